//! # autoform-render
//!
//! Walks a sorted field tree and renders one component per field.
//!
//! Rendering is split between the walker ([`AutoForm`]), which decides
//! what each field is and where its value lives, and pluggable
//! components ([`UiComponents`]) that decide what it looks like. The
//! [`text`] module ships components producing a plain-text outline.
//!
//! ## Quick Start
//!
//! ```rust
//! use autoform_core::parse_schema;
//! use autoform_json_schema::JsonSchemaProvider;
//! use autoform_render::{AutoForm, TextTheme, text_components};
//! use serde_json::json;
//!
//! let provider = JsonSchemaProvider::new(json!({
//!     "type": "object",
//!     "properties": {"name": {"type": "string"}}
//! }))
//! .unwrap();
//!
//! let form = AutoForm::new(text_components(TextTheme { color: false, ..Default::default() }));
//! let text = form
//!     .render_to_string(&parse_schema(&provider), &json!({"name": "Ada"}), &[])
//!     .unwrap();
//! assert_eq!(text, "Name: Ada\n");
//! ```

/// Component traits, props and registry.
pub mod components;

/// Error types for rendering.
pub mod error;

/// The form walker and submit pipeline.
pub mod form;

mod node;

/// Plain-text components.
pub mod text;

pub use components::{
    ArrayWrapper, FieldComponent, FieldProps, FieldWrapper, ObjectWrapper, Output, RenderFn,
    UiComponents,
};
pub use error::{RenderError, Result};
pub use form::{AutoForm, FormOptions};
pub use node::FieldNode;
pub use text::{TextTheme, text_components};
