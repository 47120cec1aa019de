//! Validated machine records.

use std::fmt;

use serde::Serialize;

/// A validated, normalized machine description.
///
/// Only produced by [`crate::validate_instance`] and its wrappers, so every
/// value satisfies all field rules. Serializes as a flat object with the
/// key order `name`, `os`, `cpu`, `ram`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct InstanceSpec {
    name: String,
    os: String,
    cpu: String,
    ram: String,
}

impl InstanceSpec {
    /// Assemble a record from values that already passed the rule table.
    pub(crate) fn from_validated(name: String, os: String, cpu: String, ram: String) -> Self {
        Self { name, os, cpu, ram }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Operating system in canonical casing (`Ubuntu` or `CentOS`).
    pub fn os(&self) -> &str {
        &self.os
    }

    pub fn cpu(&self) -> &str {
        &self.cpu
    }

    pub fn ram(&self) -> &str {
        &self.ram
    }
}

impl fmt::Display for InstanceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}, {}, {}", self.name, self.os, self.cpu, self.ram)
    }
}
