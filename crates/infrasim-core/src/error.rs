//! Validation errors.

use thiserror::Error;

/// Why a record or an instances file was rejected.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Wrong key set or value types on a record, or a top-level value that
    /// is not an array.
    #[error("schema error: {0}")]
    Schema(String),

    /// A field failed its pattern or enum rule.
    #[error("invalid {field}: {reason}")]
    Field {
        field: &'static str,
        reason: &'static str,
    },

    /// Malformed JSON in an existing file.
    #[error("invalid JSON at line {line}, column {column} ({message})")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("cannot access file: {0}")]
    Io(#[from] std::io::Error),

    /// An element of a collection failed; `position` is 1-based.
    #[error("item #{position}: {source}")]
    Element {
        position: usize,
        #[source]
        source: Box<ValidationError>,
    },

    /// Two records share a name. Only raised by the optional uniqueness policy.
    #[error("duplicate instance name '{name}' (items #{first} and #{second})")]
    DuplicateName {
        name: String,
        first: usize,
        second: usize,
    },
}

impl ValidationError {
    /// Wrap an element error with its 1-based position in a collection.
    pub fn at_position(self, position: usize) -> Self {
        Self::Element {
            position,
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping any `Element` wrappers.
    pub fn root(&self) -> &ValidationError {
        match self {
            Self::Element { source, .. } => source.root(),
            other => other,
        }
    }

    /// The field name when this is (or wraps) a field error.
    pub fn field(&self) -> Option<&'static str> {
        match self.root() {
            Self::Field { field, .. } => Some(*field),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        let (line, column) = (err.line(), err.column());
        // serde_json appends the location to its message; keep the bare message.
        let full = err.to_string();
        let suffix = format!(" at line {} column {}", line, column);
        let message = full
            .strip_suffix(&suffix)
            .map(str::to_string)
            .unwrap_or(full);

        Self::Parse {
            line,
            column,
            message,
        }
    }
}
