//! Provider for Rust types deriving [`JsonSchema`].

use std::marker::PhantomData;

use autoform_core::{
    FieldPath, ParsedSchema, SchemaProvider, SchemaValidation, SchemaValidationError,
};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{error::Result, provider::JsonSchemaProvider};

/// Provider whose schema is generated from `T`.
///
/// Validation runs the generated JSON Schema first and then deserializes
/// into `T`, so serde-only constraints are checked too.
pub struct TypedProvider<T> {
    inner: JsonSchemaProvider,
    _marker: PhantomData<fn() -> T>,
}

impl<T: JsonSchema + DeserializeOwned> TypedProvider<T> {
    /// Generate the schema of `T` and compile it.
    ///
    /// # Errors
    ///
    /// Fails when `T` does not serialize to an object schema.
    pub fn new() -> Result<Self> {
        let schema = schemars::schema_for!(T);
        let schema = serde_json::to_value(&schema)?;
        Ok(Self {
            inner: JsonSchemaProvider::new(schema)?,
            _marker: PhantomData,
        })
    }

    /// The generated schema document.
    pub fn schema(&self) -> &Value {
        self.inner.schema()
    }

    /// Validate `values` and convert them into `T`.
    pub fn parse_values(&self, values: &Value) -> std::result::Result<T, Vec<SchemaValidationError>> {
        let data = self.validate_schema(values).into_result()?;
        serde_json::from_value(data)
            .map_err(|e| vec![SchemaValidationError::new(FieldPath::root(), e.to_string())])
    }
}

impl<T: JsonSchema + DeserializeOwned> SchemaProvider for TypedProvider<T> {
    fn parse_schema(&self) -> ParsedSchema {
        self.inner.parse_schema()
    }

    fn validate_schema(&self, values: &Value) -> SchemaValidation {
        match self.inner.validate_schema(values) {
            SchemaValidation::Success(data) => match serde_json::from_value::<T>(data.clone()) {
                Ok(_) => SchemaValidation::Success(data),
                Err(e) => SchemaValidation::Failure(vec![SchemaValidationError::new(
                    FieldPath::root(),
                    e.to_string(),
                )]),
            },
            failure => failure,
        }
    }

    fn default_values(&self) -> Map<String, Value> {
        self.inner.default_values()
    }
}
