//! Error types for starport core.

use std::{error::Error, fmt};

/// Error type for starport core operations.
#[derive(Debug)]
pub enum StarportError {
    /// A request failed field or query-parameter validation.
    Validation(String),
    /// No ship exists for the given identifier.
    NotFound(i64),
    /// The backing store failed.
    Store(String),
}

impl fmt::Display for StarportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "{message}"),
            Self::NotFound(id) => write!(f, "ship {id} not found"),
            Self::Store(message) => write!(f, "store error: {message}"),
        }
    }
}

impl Error for StarportError {}

/// Convenience result type for starport core.
pub type Result<T> = std::result::Result<T, StarportError>;
