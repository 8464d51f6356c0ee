//! Error types for lrusim

use std::fmt;

/// Result type alias for lrusim operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for engine construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Engine parameters are unusable (e.g. zero capacity)
    InvalidConfiguration(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
