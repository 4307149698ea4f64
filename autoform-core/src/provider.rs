//! Schema provider contract.

use serde_json::{Map, Value};

use crate::types::{ParsedSchema, SchemaValidation};

/// A source of form structure, validation and default values.
///
/// Every schema dialect (JSON Schema, a typed Rust schema, ...) implements
/// this trait independently; the rest of the pipeline only sees these three
/// methods. Implementations report malformed source schemas when they are
/// constructed, so the methods here cannot fail.
pub trait SchemaProvider {
    /// Parse the schema into an unsorted field tree.
    ///
    /// Must build a fresh tree on every call.
    fn parse_schema(&self) -> ParsedSchema;

    /// Validate a value tree.
    ///
    /// Invalid values are reported as [`SchemaValidation::Failure`], never
    /// as a panic.
    fn validate_schema(&self, values: &Value) -> SchemaValidation;

    /// Initial values for a new form.
    fn default_values(&self) -> Map<String, Value>;
}

impl<P: SchemaProvider + ?Sized> SchemaProvider for &P {
    fn parse_schema(&self) -> ParsedSchema {
        (**self).parse_schema()
    }

    fn validate_schema(&self, values: &Value) -> SchemaValidation {
        (**self).validate_schema(values)
    }

    fn default_values(&self) -> Map<String, Value> {
        (**self).default_values()
    }
}

impl<P: SchemaProvider + ?Sized> SchemaProvider for Box<P> {
    fn parse_schema(&self) -> ParsedSchema {
        (**self).parse_schema()
    }

    fn validate_schema(&self, values: &Value) -> SchemaValidation {
        (**self).validate_schema(values)
    }

    fn default_values(&self) -> Map<String, Value> {
        (**self).default_values()
    }
}
