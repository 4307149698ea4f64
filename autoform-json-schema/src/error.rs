//! Error types for schema loading.

use thiserror::Error;

/// Errors raised while turning a source schema into a provider.
///
/// Invalid *values* are never reported here; they come back as
/// [`autoform_core::SchemaValidation::Failure`].
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema failed to compile.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// The root schema does not describe an object.
    #[error("root schema must describe an object, found {found}")]
    RootNotObject { found: String },

    /// Schema generation or conversion failed.
    #[error("schema serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for schema loading.
pub type Result<T> = std::result::Result<T, SchemaError>;
