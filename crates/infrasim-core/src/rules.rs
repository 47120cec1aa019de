//! Field rules for instance records.
//!
//! Every field of a record is checked by one entry of [`FIELD_RULES`],
//! evaluated in table order. The order is part of the contract: the first
//! failing entry is the error the caller sees.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ValidationError;

/// Operating systems accepted for an instance, in canonical casing.
pub const SUPPORTED_OS: &[&str] = &["Ubuntu", "CentOS"];

lazy_static! {
    /// A letter followed by 1-30 letters, digits or hyphens.
    pub static ref NAME_PATTERN: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9-]{1,30}$").unwrap();

    /// Virtual CPU count, e.g. `2vCPU`.
    pub static ref CPU_PATTERN: Regex = Regex::new(r"^[0-9]+vCPU$").unwrap();

    /// Memory size in gigabytes, e.g. `4GB`.
    pub static ref RAM_PATTERN: Regex = Regex::new(r"^[0-9]+GB$").unwrap();

    /// The rule table, in evaluation order.
    pub static ref FIELD_RULES: [FieldRule; 4] = [
        FieldRule {
            field: "name",
            matcher: Matcher::Pattern(&*NAME_PATTERN),
            reason: "must start with a letter and contain letters, digits, or '-' (2-31 chars)",
        },
        FieldRule {
            field: "os",
            matcher: Matcher::OneOfIgnoreCase(SUPPORTED_OS),
            reason: "must be Ubuntu or CentOS",
        },
        FieldRule {
            field: "cpu",
            matcher: Matcher::Pattern(&*CPU_PATTERN),
            reason: "must match pattern like 2vCPU",
        },
        FieldRule {
            field: "ram",
            matcher: Matcher::Pattern(&*RAM_PATTERN),
            reason: "must match pattern like 4GB",
        },
    ];
}

/// How a field value is matched and normalized.
#[derive(Debug)]
pub enum Matcher {
    /// Full-string regex match. The value is kept verbatim.
    Pattern(&'static Regex),

    /// Case-insensitive membership. The value is replaced by the canonical entry.
    OneOfIgnoreCase(&'static [&'static str]),
}

impl Matcher {
    /// Returns the normalized value, or `None` when the value does not match.
    fn normalize(&self, value: &str) -> Option<String> {
        match self {
            Matcher::Pattern(pattern) => pattern.is_match(value).then(|| value.to_string()),
            Matcher::OneOfIgnoreCase(allowed) => allowed
                .iter()
                .find(|candidate| candidate.eq_ignore_ascii_case(value))
                .map(|candidate| candidate.to_string()),
        }
    }
}

/// One row of the rule table.
#[derive(Debug)]
pub struct FieldRule {
    /// Record key this rule applies to
    pub field: &'static str,

    /// Matcher and normalizer for the value
    pub matcher: Matcher,

    /// Human-readable description of the expected format
    pub reason: &'static str,
}

impl FieldRule {
    /// Check a value, returning its normalized form.
    pub fn apply(&self, value: &str) -> Result<String, ValidationError> {
        self.matcher
            .normalize(value)
            .ok_or(ValidationError::Field {
                field: self.field,
                reason: self.reason,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(field: &str, value: &str) -> Result<String, ValidationError> {
        let rule = FIELD_RULES.iter().find(|rule| rule.field == field).unwrap();
        rule.apply(value)
    }

    #[test]
    fn test_table_order() {
        let fields: Vec<_> = FIELD_RULES.iter().map(|r| r.field).collect();
        assert_eq!(fields, ["name", "os", "cpu", "ram"]);
    }

    #[test]
    fn test_name_rule() {
        assert!(check("name", "web1").is_ok());
        assert!(check("name", "db-primary").is_ok());
        assert!(check("name", "1web").is_err());
        assert!(check("name", "-web").is_err());
        assert!(check("name", "web_1").is_err());
        assert!(check("name", "web 1").is_err());
        assert!(check("name", "").is_err());
    }

    #[test]
    fn test_name_is_case_sensitive_and_verbatim() {
        assert_eq!(check("name", "WebServer").unwrap(), "WebServer");
    }

    #[test]
    fn test_os_rule_normalizes() {
        assert_eq!(check("os", "ubuntu").unwrap(), "Ubuntu");
        assert_eq!(check("os", "CENTOS").unwrap(), "CentOS");
        assert_eq!(check("os", "centos").unwrap(), "CentOS");
        assert_eq!(check("os", "Ubuntu").unwrap(), "Ubuntu");
        assert!(check("os", "Fedora").is_err());
        assert!(check("os", "debian").is_err());
        assert!(check("os", " ubuntu").is_err());
    }

    #[test]
    fn test_cpu_rule() {
        assert_eq!(check("cpu", "2vCPU").unwrap(), "2vCPU");
        assert!(check("cpu", "16vCPU").is_ok());
        assert!(check("cpu", "2 vCPU").is_err());
        assert!(check("cpu", "vCPU").is_err());
        assert!(check("cpu", "2VCPU").is_err());
        assert!(check("cpu", "2vCPU\n").is_err());
    }

    #[test]
    fn test_ram_rule() {
        assert_eq!(check("ram", "4GB").unwrap(), "4GB");
        assert!(check("ram", "4 GB").is_err());
        assert!(check("ram", "4gb").is_err());
        assert!(check("ram", "GB").is_err());
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        // Arabic-Indic digit two
        assert!(check("cpu", "\u{0662}vCPU").is_err());
    }

    #[test]
    fn test_field_error_carries_reason() {
        match check("ram", "lots").unwrap_err() {
            ValidationError::Field { field, reason } => {
                assert_eq!(field, "ram");
                assert!(reason.contains("4GB"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
