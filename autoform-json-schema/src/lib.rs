//! # autoform-json-schema
//!
//! [`SchemaProvider`](autoform_core::SchemaProvider) implementations backed
//! by JSON Schema.
//!
//! - [`JsonSchemaProvider`] takes a schema document, compiles it with the
//!   `jsonschema` crate and parses its properties into a field tree.
//! - [`TypedProvider`] generates the document from a Rust type with
//!   `schemars` and additionally deserializes validated values into it.
//!
//! ## Quick Start
//!
//! ```rust
//! use autoform_core::{SchemaProvider, parse_schema};
//! use autoform_json_schema::JsonSchemaProvider;
//! use serde_json::json;
//!
//! let provider = JsonSchemaProvider::new(json!({
//!     "type": "object",
//!     "required": ["name"],
//!     "properties": {
//!         "name": {"type": "string"},
//!         "newsletter": {"type": "boolean", "default": true}
//!     }
//! }))
//! .unwrap();
//!
//! let schema = parse_schema(&provider);
//! assert_eq!(schema.fields.len(), 2);
//! assert!(!provider.validate_schema(&json!({})).is_success());
//! ```

/// Error types for schema loading.
pub mod error;

/// JSON Schema to field tree conversion.
pub mod parse;

/// The JSON Schema provider.
pub mod provider;

/// Provider for `schemars` types.
pub mod typed;

pub use error::{Result, SchemaError};
pub use parse::{FIELD_CONFIG_KEYWORD, MAX_DEPTH};
pub use provider::JsonSchemaProvider;
pub use typed::TypedProvider;
