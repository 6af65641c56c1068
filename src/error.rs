//! Error kinds reported by the record store. Every variant is recoverable:
//! the menu prints it and carries on.

use thiserror::Error;

/// Which collection an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Show,
    Channel,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Show => f.write_str("Show"),
            RecordKind::Channel => f.write_str("Channel"),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field was empty, or a duration was not positive.
    #[error("Invalid input. {0}")]
    Validation(String),

    #[error("{kind} with this {field} already exists.")]
    Duplicate {
        kind: RecordKind,
        field: &'static str,
        value: String,
    },

    #[error("Channel code '{0}' does not exist. Please enter a valid channel code.")]
    Reference(String),

    /// Unparsable start time or duration typed by the user.
    #[error("{0}")]
    Format(String),

    /// A persisted line could not be turned back into a record.
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("{kind} not found.")]
    NotFound { kind: RecordKind, name: String },

    #[error("failed to update data file")]
    Persistence(#[source] anyhow::Error),
}

impl StoreError {
    pub(crate) fn duplicate(kind: RecordKind, field: &'static str, value: &str) -> Self {
        StoreError::Duplicate {
            kind,
            field,
            value: value.to_string(),
        }
    }

    pub(crate) fn not_found(kind: RecordKind, name: &str) -> Self {
        StoreError::NotFound {
            kind,
            name: name.to_string(),
        }
    }
}
