//! Error types for mapping operations.

use thiserror::Error;

/// Errors from mapping operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Source field is not part of the current import.
    #[error("unknown source field: {0}")]
    UnknownField(String),
    /// Destination key is not in the catalog.
    #[error("unknown destination field: {0}")]
    UnknownDestination(String),
}
