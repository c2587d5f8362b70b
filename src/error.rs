//! Error types of the resource model.

use thiserror::Error;

use crate::culture::Culture;

/// Contract violations reported by [`ResourceEntity`](crate::model::ResourceEntity)
/// and its table entries.
///
/// A vetoed edit is not an error; it is reported as
/// [`EditOutcome::Vetoed`](crate::model::EditOutcome::Vetoed).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntityError {
    /// A required argument was empty or otherwise unusable.
    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument {
        /// Name of the offending parameter
        name: &'static str,
        message: String,
    },

    /// Two files map to the same language.
    #[error("Language '{0}' is already part of this resource entity")]
    DuplicateLanguage(Culture),

    #[error("Language '{0}' is not part of this resource entity")]
    UnknownLanguage(Culture),

    #[error("Key '{0}' already exists")]
    DuplicateKey(String),

    /// A write was attempted from a Changing / Changed handler.
    #[error("The languages are being edited; nested writes are not allowed")]
    EditInProgress,
}

impl EntityError {
    pub(crate) fn invalid_argument(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument { name, message: message.into() }
    }

    /// Fails with [`EntityError::InvalidArgument`] when `value` is empty.
    pub(crate) fn require_non_empty(name: &'static str, value: &str) -> Result<(), Self> {
        if value.is_empty() {
            return Err(Self::invalid_argument(name, "must not be empty"));
        }
        Ok(())
    }
}
