//! Single-record validation.

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::instance::InstanceSpec;
use crate::rules::FIELD_RULES;
use crate::schema::check_record_shape;

/// Validate a raw record and produce its canonical form.
///
/// The record must be an object with exactly the keys `name`, `os`, `cpu`
/// and `ram`. Fields are then checked in the order name, os, cpu, ram and
/// the first failure is returned; a value that is not a string fails at its
/// own field's turn.
pub fn validate_instance(raw: &Value) -> Result<InstanceSpec, ValidationError> {
    check_record_shape(raw)?;

    let mut normalized = Vec::with_capacity(FIELD_RULES.len());
    for rule in FIELD_RULES.iter() {
        let value = match raw.get(rule.field) {
            Some(Value::String(value)) => value,
            Some(_) => {
                return Err(ValidationError::Field {
                    field: rule.field,
                    reason: "must be a string",
                })
            }
            None => {
                return Err(ValidationError::Schema(format!(
                    "'{}' is a required property",
                    rule.field
                )))
            }
        };
        normalized.push(rule.apply(value)?);
    }

    let [name, os, cpu, ram] = <[String; 4]>::try_from(normalized).map_err(|_| {
        ValidationError::Schema("rule table does not cover every record field".to_string())
    })?;

    Ok(InstanceSpec::from_validated(name, os, cpu, ram))
}

/// Validate the four parts of a record as given on the command line or at a prompt.
pub fn validate_parts(
    name: &str,
    os: &str,
    cpu: &str,
    ram: &str,
) -> Result<InstanceSpec, ValidationError> {
    let mut raw = Map::new();
    raw.insert("name".to_string(), Value::from(name));
    raw.insert("os".to_string(), Value::from(os));
    raw.insert("cpu".to_string(), Value::from(cpu));
    raw.insert("ram".to_string(), Value::from(ram));
    validate_instance(&Value::Object(raw))
}
