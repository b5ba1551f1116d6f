use crate::validator::ValidationError;
use std::fmt;

/// Why the engine refused an operation without contacting the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// A conflicting request is still in flight
    Busy,
    /// The accumulator already holds every page
    NothingToLoad,
    /// Save/cancel with a draft identical to its snapshot
    Unchanged,
    /// Delete on a contact that was never persisted
    NotPersisted,
    /// Field rules failed; the same errors are recorded on the draft
    Invalid(Vec<ValidationError>),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Busy => write!(f, "Another request is still in flight"),
            Rejection::NothingToLoad => write!(f, "All contacts are already loaded"),
            Rejection::Unchanged => write!(f, "No changes to save"),
            Rejection::NotPersisted => write!(f, "Contact has not been saved yet"),
            Rejection::Invalid(errors) => {
                let messages: Vec<String> = errors.iter().map(|e| e.message()).collect();
                write!(f, "Invalid input: {}", messages.join("; "))
            }
        }
    }
}

impl std::error::Error for Rejection {}

impl From<ValidationError> for Rejection {
    fn from(err: ValidationError) -> Self {
        Rejection::Invalid(vec![err])
    }
}
