//! Codec error types.

use thiserror::Error;

use scylla_fdw_types::SemanticType;

/// Errors raised while converting values between the host and the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The value's representation does not match the target type.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// The value exists in the source representation but not in the target one.
    #[error("{ty} value out of range: {detail}")]
    OutOfRange { ty: SemanticType, detail: String },

    /// Text could not be parsed as the named type.
    #[error("invalid input syntax for type {ty}: {text:?}")]
    InvalidText { ty: SemanticType, text: String },

    /// The value cannot be written as a remote literal.
    #[error("cannot render {ty} literal: {reason}")]
    Unrepresentable { ty: SemanticType, reason: String },
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
