use std::fmt;
use thiserror::Error;

/// The repository operation a [`DrinkError::Failed`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Load,
    Add,
    Update,
    Remove,
    Save,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Operation::Load => "Failed to load drinks",
            Operation::Add => "Failed to add drink",
            Operation::Update => "Failed to update drink",
            Operation::Remove => "Failed to remove drink",
            Operation::Save => "Failed to save drinks",
        };
        f.write_str(msg)
    }
}

#[derive(Error, Debug)]
pub enum DrinkError {
    #[error("{0}. Please try again.")]
    Failed(Operation),

    #[error("Drink not found: {0}")]
    DrinkNotFound(String),

    #[error("Invalid drink: {0}")]
    Invalid(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Local drink storage is corrupt: {0}")]
    CorruptStore(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend responded {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("Store error: {0}")]
    Store(String),
}

impl DrinkError {
    /// True for errors that carry meaning for callers and must not be
    /// collapsed into a generic [`DrinkError::Failed`].
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            DrinkError::DrinkNotFound(_) | DrinkError::Invalid(_) | DrinkError::CorruptStore(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DrinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_messages_are_generic() {
        assert_eq!(
            DrinkError::Failed(Operation::Load).to_string(),
            "Failed to load drinks. Please try again."
        );
        assert_eq!(
            DrinkError::Failed(Operation::Remove).to_string(),
            "Failed to remove drink. Please try again."
        );
    }

    #[test]
    fn test_domain_errors() {
        assert!(DrinkError::DrinkNotFound("1".into()).is_domain());
        assert!(DrinkError::CorruptStore("eof".into()).is_domain());
        assert!(!DrinkError::Failed(Operation::Add).is_domain());
        assert!(!DrinkError::Store("boom".into()).is_domain());
    }
}
