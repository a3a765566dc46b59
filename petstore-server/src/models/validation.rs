//! Validation error types

use std::fmt;

/// Input that could not be coerced into a domain value
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Required field was absent
    Missing { field: &'static str },

    /// Field value doesn't have the expected shape (e.g. non-numeric id)
    InvalidFormat { field: &'static str, reason: String },

    /// Request body couldn't be decoded
    MalformedBody { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{} is required", field),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::MalformedBody { reason } => write!(f, "malformed request body: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}
