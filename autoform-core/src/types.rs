//! Parsed field tree and validation result types.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::path::FieldPath;

/// Value type of a parsed field.
///
/// The renderer looks components up by the string form of this type, so
/// custom types registered by an application round-trip through
/// [`FieldType::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Date,
    Select,
    Object,
    Array,
    Custom(String),
}

impl FieldType {
    /// Name used as the component registry key.
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Select => "select",
            FieldType::Object => "object",
            FieldType::Array => "array",
            FieldType::Custom(name) => name,
        }
    }
}

impl From<&str> for FieldType {
    fn from(s: &str) -> Self {
        match s {
            "string" => FieldType::String,
            "number" => FieldType::Number,
            "boolean" => FieldType::Boolean,
            "date" => FieldType::Date,
            "select" => FieldType::Select,
            "object" => FieldType::Object,
            "array" => FieldType::Array,
            other => FieldType::Custom(other.to_string()),
        }
    }
}

impl From<String> for FieldType {
    fn from(s: String) -> Self {
        FieldType::from(s.as_str())
    }
}

impl From<FieldType> for String {
    fn from(t: FieldType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field presentation hints.
///
/// Read from the `fieldConfig` keyword of a schema, so the serialized form
/// uses camelCase names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldConfig {
    /// Label shown instead of the capitalized key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Help text shown below the input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sort key among siblings, ascending. Missing means 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// Extra attributes forwarded to the input component.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub input_props: Map<String, Value>,
    /// Name of a registered wrapper component used instead of the default one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_wrapper: Option<String>,
    /// Component override, looked up before the field's own type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    /// Free-form data for application components.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub custom_data: Map<String, Value>,
}

impl FieldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_input_prop(mut self, key: impl Into<String>, value: Value) -> Self {
        self.input_props.insert(key.into(), value);
        self
    }

    pub fn with_field_wrapper(mut self, wrapper: impl Into<String>) -> Self {
        self.field_wrapper = Some(wrapper.into());
        self
    }

    pub fn with_field_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = Some(field_type.into());
        self
    }

    pub fn with_custom_data(mut self, key: impl Into<String>, value: Value) -> Self {
        self.custom_data.insert(key.into(), value);
        self
    }

    /// Effective sort key.
    pub fn order(&self) -> i64 {
        self.order.unwrap_or(0)
    }
}

/// One node of the parsed field tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedField {
    pub key: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_config: Option<FieldConfig>,
    /// Enumerated `(value, label)` pairs for select fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<(String, String)>>,
    /// Child fields: object properties, or the element template of an array.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Vec<ParsedField>>,
}

impl ParsedField {
    /// Creates an optional field with no metadata.
    pub fn new(key: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            key: key.into(),
            field_type,
            required: false,
            default: None,
            description: None,
            field_config: None,
            options: None,
            schema: None,
        }
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_field_config(mut self, config: FieldConfig) -> Self {
        self.field_config = Some(config);
        self
    }

    pub fn with_options(mut self, options: Vec<(String, String)>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_schema(mut self, children: Vec<ParsedField>) -> Self {
        self.schema = Some(children);
        self
    }

    /// Effective sort key: `field_config.order`, defaulting to 0.
    pub fn order(&self) -> i64 {
        self.field_config.as_ref().map_or(0, FieldConfig::order)
    }

    /// Child fields, empty when none are declared.
    pub fn children(&self) -> &[ParsedField] {
        self.schema.as_deref().unwrap_or_default()
    }

    /// Description from the field config, falling back to the schema's own.
    pub fn effective_description(&self) -> Option<&str> {
        self.field_config
            .as_ref()
            .and_then(|c| c.description.as_deref())
            .or(self.description.as_deref())
    }
}

/// Root of the parsed field tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedSchema {
    pub fields: Vec<ParsedField>,
}

impl ParsedSchema {
    pub fn new(fields: Vec<ParsedField>) -> Self {
        Self { fields }
    }
}

/// One validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaValidationError {
    /// Location of the offending value, root when empty.
    pub path: FieldPath,
    pub message: String,
}

impl SchemaValidationError {
    pub fn new(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Outcome of validating a value tree against a schema.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaValidation {
    /// Values are valid; carries the validated data.
    Success(Value),
    /// Values are invalid; errors are in the order the validator reported them.
    Failure(Vec<SchemaValidationError>),
}

impl SchemaValidation {
    pub fn is_success(&self) -> bool {
        matches!(self, SchemaValidation::Success(_))
    }

    /// Errors of a failed validation, empty on success.
    pub fn errors(&self) -> &[SchemaValidationError] {
        match self {
            SchemaValidation::Success(_) => &[],
            SchemaValidation::Failure(errors) => errors,
        }
    }

    pub fn into_result(self) -> Result<Value, Vec<SchemaValidationError>> {
        match self {
            SchemaValidation::Success(data) => Ok(data),
            SchemaValidation::Failure(errors) => Err(errors),
        }
    }
}
