use thiserror::Error;

/// Errors raised while building catalog and session values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("destination field key must not be empty")]
    EmptyFieldKey,

    #[error("duplicate destination field key: {0}")]
    DuplicateFieldKey(String),

    #[error("confidence for {key} must be within [0, 1], got {value}")]
    ConfidenceOutOfRange { key: String, value: f32 },

    #[error("alias source name must not be empty (target {target})")]
    EmptyAliasSource { target: String },

    #[error("alias {source_name} points at unknown destination field {target}")]
    UnknownAliasTarget { source_name: String, target: String },

    #[error("aliases {first} and {second} both target destination field {target}")]
    AliasCollision {
        target: String,
        first: String,
        second: String,
    },

    #[error("invalid session context: {0}")]
    InvalidSessionContext(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
