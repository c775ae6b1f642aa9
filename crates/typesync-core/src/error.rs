use std::fmt;
use thiserror::Error as ThisError;
use typesync_schema::{error::ModelError, types::Category, validate::ValidationError};

///
/// SyncError
///
/// Everything a synchronization run can fail with. Validation failures are
/// raised before any mutation; the rest abort the in-flight model and leave
/// earlier models of the batch as they were persisted.
///

#[derive(Debug, ThisError)]
pub enum SyncError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("model '{model}' is a {found} model, synchronizer handles {expected}")]
    CategoryMismatch {
        model: String,
        expected: Category,
        found: Category,
    },

    #[error("property '{property}' of '{model}': {source}")]
    NoMappingFound {
        model: String,
        property: String,
        #[source]
        source: EditorError,
    },

    #[error("'{alias}' was saved but could not be read back")]
    MissingAfterSave { alias: String },

    #[error("'{alias}' was read back without a runtime id")]
    Unidentified { alias: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Tracking(#[from] TrackingError),
}

impl SyncError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Validation(_) => ErrorClass::Conflict,
            Self::Model(_) | Self::CategoryMismatch { .. } => ErrorClass::Invalid,
            Self::NoMappingFound { .. } => ErrorClass::NotFound,
            Self::MissingAfterSave { .. } | Self::Unidentified { .. } | Self::Store(_) => {
                ErrorClass::Store
            }
            Self::Tracking(_) => ErrorClass::Tracking,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }
}

///
/// ErrorClass
/// Coarse classification of a `SyncError`, with a stable label.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Conflict,
    Invalid,
    NotFound,
    Store,
    Tracking,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Conflict => "conflict",
            Self::Invalid => "invalid",
            Self::NotFound => "not_found",
            Self::Store => "store",
            Self::Tracking => "tracking",
        };
        write!(f, "{label}")
    }
}

///
/// StoreError
/// Failure reported by an entity store implementation.
///

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("store backend failure: {message}")]
    Backend { message: String },

    #[error("record '{alias}' does not exist in the store")]
    NotFound { alias: String },
}

impl StoreError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

///
/// TrackingError
///

#[derive(Debug, ThisError)]
pub enum TrackingError {
    #[error("tracking file i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("tracking file is malformed: {0}")]
    Format(#[from] serde_json::Error),
}

///
/// EditorError
///

#[derive(Debug, ThisError)]
pub enum EditorError {
    #[error("no editor mapping found for {value_type} (hint {hint:?})")]
    NoMappingFound {
        hint: Option<String>,
        value_type: typesync_schema::types::ValueType,
    },
}
