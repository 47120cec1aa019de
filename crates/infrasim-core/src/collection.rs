//! Instance collections and the instances file.
//!
//! The instances file is a JSON array of flat records. Before a caller
//! overwrites it, [`validate_instances_file`] checks that whatever is already
//! there is well-formed.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::error::ValidationError;
use crate::instance::InstanceSpec;
use crate::validator::validate_instance;

/// An ordered set of validated instances, persisted together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InstanceCollection {
    instances: Vec<InstanceSpec>,
}

impl InstanceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instance: InstanceSpec) {
        self.instances.push(instance);
    }

    pub fn extend(&mut self, other: InstanceCollection) {
        self.instances.extend(other.instances);
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InstanceSpec> {
        self.instances.iter()
    }

    pub fn as_slice(&self) -> &[InstanceSpec] {
        &self.instances
    }

    /// Reject the collection if two instances share a name.
    ///
    /// Not part of record validation; callers opt in.
    pub fn ensure_unique_names(&self) -> Result<(), ValidationError> {
        let mut seen: HashMap<&str, usize> = HashMap::new();

        for (idx, instance) in self.instances.iter().enumerate() {
            let position = idx + 1;
            if let Some(first) = seen.insert(instance.name(), position) {
                return Err(ValidationError::DuplicateName {
                    name: instance.name().to_string(),
                    first,
                    second: position,
                });
            }
        }

        Ok(())
    }

    /// Render as a pretty-printed JSON array (4-space indent, trailing newline).
    pub fn to_pretty_json(&self) -> Result<String, ValidationError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.instances
            .serialize(&mut serializer)
            .map_err(|e| ValidationError::Io(e.into()))?;
        buf.push(b'\n');

        String::from_utf8(buf)
            .map_err(|e| ValidationError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// Write the collection to `path`, creating parent directories.
    ///
    /// The file is written to a sibling temporary path and renamed into
    /// place, so readers never observe a half-written file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), ValidationError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let contents = self.to_pretty_json()?;
        let tmp = temp_path(path);
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl FromIterator<InstanceSpec> for InstanceCollection {
    fn from_iter<T: IntoIterator<Item = InstanceSpec>>(iter: T) -> Self {
        Self {
            instances: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for InstanceCollection {
    type Item = InstanceSpec;
    type IntoIter = std::vec::IntoIter<InstanceSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.instances.into_iter()
    }
}

impl<'a> IntoIterator for &'a InstanceCollection {
    type Item = &'a InstanceSpec;
    type IntoIter = std::slice::Iter<'a, InstanceSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.instances.iter()
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Validate a parsed JSON document as a collection.
pub fn validate_collection(value: &Value) -> Result<InstanceCollection, ValidationError> {
    let items = value.as_array().ok_or_else(|| {
        ValidationError::Schema("top-level JSON must be an array".to_string())
    })?;

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| validate_instance(item).map_err(|e| e.at_position(idx + 1)))
        .collect()
}

/// Parse and validate instances file contents.
pub fn parse_instances(bytes: &[u8]) -> Result<InstanceCollection, ValidationError> {
    let value: Value = serde_json::from_slice(bytes)?;
    validate_collection(&value)
}

/// Load an instances file, validating every record.
///
/// A missing file yields an empty collection.
pub fn read_instances_file(path: impl AsRef<Path>) -> Result<InstanceCollection, ValidationError> {
    match fs::read(path.as_ref()) {
        Ok(bytes) => parse_instances(&bytes),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(InstanceCollection::new()),
        Err(e) => Err(e.into()),
    }
}

/// Pre-flight check of an existing instances file.
///
/// Succeeds when the file does not exist. Otherwise the file must hold a
/// JSON array whose elements all validate; the first bad element is
/// reported with its 1-based position.
pub fn validate_instances_file(path: impl AsRef<Path>) -> Result<(), ValidationError> {
    read_instances_file(path).map(|_| ())
}
