//! Error types for the diff crate.

use std::fmt;

/// Which side of a comparison an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Original,
    Current,
}

impl Side {
    /// The other side of the comparison.
    pub fn opposite(self) -> Self {
        match self {
            Self::Original => Self::Current,
            Self::Current => Self::Original,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => write!(f, "original"),
            Self::Current => write!(f, "current"),
        }
    }
}

/// Errors that can occur during diff operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DiffError {
    /// An input is too large to diff within the configured bounds.
    #[error("{side} text has {chars} characters, above the limit of {limit}")]
    ResourceExhausted {
        /// The oversized input.
        side: Side,
        /// Its length in characters.
        chars: usize,
        /// The configured ceiling.
        limit: usize,
    },

    /// Engine options were rejected.
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}

impl DiffError {
    /// Relabel the sides of an error raised on a reversed comparison.
    pub(crate) fn with_sides_swapped(self) -> Self {
        match self {
            Self::ResourceExhausted { side, chars, limit } => Self::ResourceExhausted {
                side: side.opposite(),
                chars,
                limit,
            },
            other @ Self::InvalidConfig(_) => other,
        }
    }
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
