//! Error types for rendering.

use autoform_core::FieldPath;
use thiserror::Error;

/// Errors raised while rendering a field tree.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The output sink rejected a write.
    #[error("failed to write form output")]
    Write(#[from] std::fmt::Error),

    /// A component could not render its field.
    #[error("component failed at `{path}`: {message}")]
    Component { path: FieldPath, message: String },
}

impl RenderError {
    /// Create a component error for the field at `path`.
    pub fn component(path: &FieldPath, message: impl Into<String>) -> Self {
        RenderError::Component {
            path: path.clone(),
            message: message.into(),
        }
    }
}

/// Result alias for rendering.
pub type Result<T> = std::result::Result<T, RenderError>;
