//! Error type shared by the whole crate.

/// Errors produced while building a city registry, loading a distance
/// table, or validating an evolution configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A run parameter is out of range. Raised before any generation runs.
    #[error("InvalidConfiguration: {0}")]
    InvalidConfiguration(String),

    /// A route is not a permutation of the registry.
    #[error("InvariantViolation: {0}")]
    InvariantViolation(String),

    /// The distance table is malformed.
    #[error("InputFormatError: line {line}: {message}")]
    InputFormat { line: usize, message: String },

    #[error("IoError: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error::InvalidConfiguration(message.into())
    }

    pub(crate) fn input(line: usize, message: impl Into<String>) -> Self {
        Error::InputFormat {
            line,
            message: message.into(),
        }
    }
}
