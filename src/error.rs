//! Error types for chromatext.
//!
//! The editing surface never returns these: out-of-range arguments are
//! clamped and empty targets are no-ops. Errors show up only where a caller
//! asks for strictness (color parsing, option validation) and as the failure
//! value of a custom color resolver.

use std::fmt;

/// Result type alias for chromatext operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for chromatext operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Color string that the parser does not understand.
    InvalidColor(String),
    /// Rejected configuration value.
    InvalidOption {
        name: &'static str,
        reason: String,
    },
    /// A custom color resolver failed.
    Resolver(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColor(s) => write!(f, "invalid color format: {s}"),
            Self::InvalidOption { name, reason } => {
                write!(f, "invalid option `{name}`: {reason}")
            }
            Self::Resolver(msg) => write!(f, "color resolver failed: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
