//! JSON Schema backed [`SchemaProvider`].

use autoform_core::{
    FieldPath, ParsedSchema, SchemaProvider, SchemaValidation, SchemaValidationError,
};
use jsonschema::{ValidationError, Validator, error::ValidationErrorKind};
use log::debug;
use serde_json::{Map, Value};

use crate::{
    error::{Result, SchemaError},
    parse::{SchemaWalker, field_type},
};

/// Provider for a JSON Schema document describing an object.
///
/// The schema is compiled once at construction; parsing the field tree
/// and collecting defaults walk the stored document on every call.
pub struct JsonSchemaProvider {
    schema: Value,
    validator: Validator,
}

impl JsonSchemaProvider {
    /// Compile `schema` into a provider.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::RootNotObject`] when the root does not
    /// describe an object, and [`SchemaError::InvalidSchema`] when the
    /// schema does not compile (including unresolvable references).
    pub fn new(schema: Value) -> Result<Self> {
        let walker = SchemaWalker::new(&schema);
        let root_type = field_type(&walker.resolve(&schema));
        if root_type != autoform_core::FieldType::Object {
            return Err(SchemaError::RootNotObject {
                found: root_type.to_string(),
            });
        }

        let validator =
            jsonschema::validator_for(&schema).map_err(|e| SchemaError::InvalidSchema(e.to_string()))?;
        debug!("compiled JSON schema provider");

        Ok(Self { schema, validator })
    }

    /// Build a provider from schema text.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Self::new(serde_json::from_str(s)?)
    }

    /// The source schema document.
    pub fn schema(&self) -> &Value {
        &self.schema
    }
}

impl SchemaProvider for JsonSchemaProvider {
    fn parse_schema(&self) -> ParsedSchema {
        ParsedSchema::new(SchemaWalker::new(&self.schema).parse_properties(&self.schema, 0))
    }

    fn validate_schema(&self, values: &Value) -> SchemaValidation {
        let errors: Vec<SchemaValidationError> = self
            .validator
            .iter_errors(values)
            .map(|e| to_validation_error(&e, values))
            .collect();

        if errors.is_empty() {
            SchemaValidation::Success(values.clone())
        } else {
            debug!("validation failed with {} errors", errors.len());
            SchemaValidation::Failure(errors)
        }
    }

    fn default_values(&self) -> Map<String, Value> {
        SchemaWalker::new(&self.schema).defaults(&self.schema, 0)
    }
}

/// Map a validator error onto a field path and message.
///
/// The instance location is read against `values`, so numeric property
/// names stay keys. `required` errors are reported by the validator at the
/// parent object; the missing property is appended so the error lands on
/// the field.
fn to_validation_error(error: &ValidationError<'_>, values: &Value) -> SchemaValidationError {
    let mut path = FieldPath::from_json_pointer_in(error.instance_path.as_str(), values);
    if let ValidationErrorKind::Required { property } = &error.kind {
        if let Some(name) = property.as_str() {
            path.push(name);
        }
    }
    SchemaValidationError::new(path, error.to_string())
}
