//! # infrasim-core
//!
//! Validation engine for the infrasim mock provisioning simulator.
//!
//! A machine is described by four strings: `name`, `os`, `cpu` and `ram`.
//! This crate decides whether such a description is well-formed, normalizes
//! it into an [`InstanceSpec`], and checks an existing instances file before
//! a caller overwrites it.
//!
//! ## Key Guarantees
//!
//! 1. **Pure**: record validation has no side effects and does not log
//! 2. **Fail-fast**: fields are checked in the order name, os, cpu, ram and
//!    only the first failure is reported
//! 3. **Canonical**: an `InstanceSpec` always satisfies every field rule
//!
//! ## Example
//!
//! ```rust
//! use infrasim_core::{validate_parts, InstanceCollection};
//!
//! let spec = validate_parts("web1", "ubuntu", "2vCPU", "4GB").unwrap();
//! assert_eq!(spec.os(), "Ubuntu");
//!
//! let collection: InstanceCollection = vec![spec].into_iter().collect();
//! assert!(collection.to_pretty_json().unwrap().starts_with("[\n    {"));
//! ```

pub mod collection;
pub mod error;
pub mod instance;
pub mod rules;
pub mod schema;
pub mod validator;

// Re-export main types at crate root
pub use collection::{
    parse_instances, read_instances_file, validate_collection, validate_instances_file,
    InstanceCollection,
};
pub use error::ValidationError;
pub use instance::InstanceSpec;
pub use rules::{FieldRule, Matcher, FIELD_RULES, SUPPORTED_OS};
pub use validator::{validate_instance, validate_parts};

/// Default location of the instances file, relative to the working directory.
pub const DEFAULT_INSTANCES_PATH: &str = "configs/instances.json";
