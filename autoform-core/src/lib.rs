//! # autoform-core
//!
//! Schema-to-form pipeline shared by every schema provider and renderer.
//!
//! A [`SchemaProvider`] turns some schema dialect into a tree of
//! [`ParsedField`]s, validates value trees and produces default values.
//! This crate sorts that tree for display and prepares values for
//! submission; it does not know any schema dialect itself.
//!
//! ## Quick Start
//!
//! ```rust
//! use autoform_core::{FieldConfig, FieldType, ParsedField, remove_empty_values, sort_fields_by_order};
//! use serde_json::json;
//!
//! let fields = vec![
//!     ParsedField::new("email", FieldType::String)
//!         .with_field_config(FieldConfig::new().with_order(1)),
//!     ParsedField::new("name", FieldType::String),
//! ];
//! let sorted = sort_fields_by_order(&fields);
//! assert_eq!(sorted[0].key, "name");
//!
//! let values = json!({"name": "Ada", "email": ""});
//! let pruned = remove_empty_values(values.as_object().unwrap());
//! assert_eq!(serde_json::Value::Object(pruned), json!({"name": "Ada"}));
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Parsed field tree, field config and validation result
//! - [`provider`] - The provider trait
//! - [`logic`] - Parsing, ordering and empty-value pruning
//! - [`path`] - Key/index paths into value trees
//! - [`label`] - Display labels for fields

/// Display labels for fields.
pub mod label;

/// Parsing, ordering and empty-value pruning.
pub mod logic;

/// Key/index paths into value trees.
pub mod path;

/// The schema provider trait.
pub mod provider;

/// Parsed field tree, field config and validation result.
pub mod types;

pub use label::get_label;
pub use logic::{
    get_default_values, is_empty_value, parse_schema, remove_empty_values, sort_fields_by_order,
    validate_schema,
};
pub use path::{FieldPath, PathSegment, get_path_in_object};
pub use provider::SchemaProvider;
pub use serde_json::Value;
pub use types::{
    FieldConfig, FieldType, ParsedField, ParsedSchema, SchemaValidation, SchemaValidationError,
};
