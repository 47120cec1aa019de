//! JSON Schema check for the key set of a single instance record.
//!
//! The embedded schema only fixes which keys a record has. Value types and
//! formats are handled by [`crate::rules`], one field at a time, so that the
//! name, os, cpu, ram order decides which error is reported.

use std::sync::OnceLock;

use crate::error::ValidationError;

/// Embedded record schema (loaded at compile time).
const INSTANCE_SCHEMA_JSON: &str = include_str!("../schema/instance.schema.json");

static COMPILED_SCHEMA: OnceLock<jsonschema::Validator> = OnceLock::new();

/// The compiled record schema. The schema is a crate constant, so failing to
/// compile it is a build defect rather than a property of any record.
fn validator() -> &'static jsonschema::Validator {
    COMPILED_SCHEMA.get_or_init(|| {
        let schema: serde_json::Value =
            serde_json::from_str(INSTANCE_SCHEMA_JSON).expect("embedded instance schema is JSON");
        jsonschema::options()
            .build(&schema)
            .expect("embedded instance schema compiles")
    })
}

/// Check that a raw record is an object with exactly the keys `name`, `os`,
/// `cpu` and `ram`.
///
/// Only the first violation is reported.
pub fn check_record_shape(record: &serde_json::Value) -> Result<(), ValidationError> {
    match validator().iter_errors(record).next() {
        None => Ok(()),
        Some(e) => {
            let path = e.instance_path.to_string();
            let message = if path.is_empty() {
                e.to_string()
            } else {
                format!("{} at {}", e, path)
            };
            Err(ValidationError::Schema(message))
        }
    }
}
