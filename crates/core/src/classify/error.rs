//! Classifier error types.

use thiserror::Error;

use super::groups::NaturalClass;

/// Errors raised while registering or strictly resolving groups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifierError {
    /// Group name is empty after trimming.
    #[error("Group name cannot be empty")]
    EmptyName,

    /// Group name collides with a built-in group.
    #[error("Group '{0}' is a built-in group and cannot be registered")]
    BuiltInGroup(String),

    /// Group was already registered under another class.
    #[error("Group '{name}' is already registered as {existing}, cannot register as {requested}")]
    ConflictingClass {
        /// Group name.
        name: String,
        /// Class it is registered under.
        existing: NaturalClass,
        /// Class requested now.
        requested: NaturalClass,
    },

    /// Group is neither built in nor registered.
    #[error("Unknown group: {0}")]
    UnknownGroup(String),
}

impl From<ClassifierError> for khata_shared::AppError {
    fn from(err: ClassifierError) -> Self {
        match err {
            ClassifierError::EmptyName => Self::Validation(err.to_string()),
            ClassifierError::BuiltInGroup(_) | ClassifierError::ConflictingClass { .. } => {
                Self::Conflict(err.to_string())
            }
            ClassifierError::UnknownGroup(_) => Self::NotFound(err.to_string()),
        }
    }
}
