//! JSON Schema to field tree conversion.
//!
//! Handles the subset of JSON Schema that maps onto form fields:
//! `properties`, `required`, `type`, `format`, `enum`, `items`, `default`,
//! `title`, `description`, the custom `fieldConfig` keyword, local `$ref`s
//! and the single-branch `allOf`/`anyOf`/`oneOf` wrappers that schema
//! generators emit around references.

use autoform_core::{FieldConfig, FieldType, ParsedField};
use log::{debug, warn};
use serde_json::{Map, Value};

/// Maximum nesting of objects, arrays and `$ref` hops.
///
/// Recursive references are cut off when they repeat; this bounds plain
/// nesting. The field at the limit keeps its type but gets no children.
pub const MAX_DEPTH: usize = 32;

/// Keyword holding per-field presentation hints.
pub const FIELD_CONFIG_KEYWORD: &str = "fieldConfig";

/// Walks a schema document, resolving references against its root.
///
/// Keeps the `$ref`s entered on the way down; a property whose references
/// include one of them is recursive and gets no children.
pub(crate) struct SchemaWalker<'a> {
    root: &'a Value,
    active: Vec<&'a str>,
}

impl<'a> SchemaWalker<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self {
            root,
            active: Vec::new(),
        }
    }

    /// Follow `$ref`s and unwrap single-branch combinators.
    ///
    /// Returns the chain from the outermost schema to the resolved one, so
    /// annotations on a wrapper (description, default) can win over the
    /// referenced definition.
    pub fn resolve(&self, schema: &'a Value) -> Vec<&'a Value> {
        let mut chain = vec![schema];
        let mut current = schema;

        while chain.len() <= MAX_DEPTH {
            let next = if let Some(reference) = current.get("$ref").and_then(Value::as_str) {
                match self.lookup_ref(reference) {
                    Some(target) => target,
                    None => {
                        warn!("unresolved schema reference `{reference}`");
                        break;
                    }
                }
            } else if let Some(single) = single_branch(current) {
                single
            } else {
                break;
            };
            chain.push(next);
            current = next;
        }

        chain
    }

    fn lookup_ref(&self, reference: &str) -> Option<&'a Value> {
        let pointer = reference.strip_prefix('#')?;
        self.root.pointer(pointer)
    }

    /// First reference of `chain` that is already being walked.
    fn repeated_ref(&self, chain: &[&'a Value]) -> Option<&'a str> {
        chain_refs(chain).find(|r| self.active.contains(r))
    }

    /// Mark the references of `chain` as entered; returns the mark to
    /// [`leave`](Self::leave) with.
    fn enter(&mut self, chain: &[&'a Value]) -> usize {
        let mark = self.active.len();
        for reference in chain_refs(chain) {
            if !self.active.contains(&reference) {
                self.active.push(reference);
            }
        }
        mark
    }

    fn leave(&mut self, mark: usize) {
        self.active.truncate(mark);
    }

    /// Parse the `properties` of an object schema into fields.
    pub fn parse_properties(&mut self, schema: &'a Value, depth: usize) -> Vec<ParsedField> {
        let chain = self.resolve(schema);
        let Some(properties) = lookup(&chain, "properties").and_then(Value::as_object) else {
            return Vec::new();
        };
        let required = required_keys(&chain);

        let mark = self.enter(&chain);
        let fields = properties
            .iter()
            .map(|(key, prop)| self.parse_field(key, prop, required.contains(&key.as_str()), depth))
            .collect();
        self.leave(mark);
        fields
    }

    /// Parse one property schema into a field.
    pub fn parse_field(
        &mut self,
        key: &str,
        schema: &'a Value,
        required: bool,
        depth: usize,
    ) -> ParsedField {
        let chain = self.resolve(schema);
        let field_type = field_type(&chain);

        let mut field = ParsedField::new(key, field_type.clone()).with_required(required);
        field.default = lookup(&chain, "default").cloned();
        field.description = lookup(&chain, "description")
            .and_then(Value::as_str)
            .map(str::to_string);
        field.field_config = field_config(key, &chain);

        if field_type == FieldType::Select {
            field.options = lookup(&chain, "enum")
                .and_then(Value::as_array)
                .map(|values| enum_options(values));
        }

        if !matches!(field_type, FieldType::Object | FieldType::Array) {
            debug!("parsed field `{key}` as {field_type}");
            return field;
        }
        if let Some(reference) = self.repeated_ref(&chain) {
            warn!("recursive reference `{reference}` at `{key}`, children skipped");
            return field;
        }
        if depth >= MAX_DEPTH {
            warn!("schema nesting at `{key}` exceeds {MAX_DEPTH} levels, children skipped");
            return field;
        }

        let mark = self.enter(&chain);
        match field_type {
            FieldType::Object => {
                if lookup(&chain, "properties").is_some() {
                    field.schema = Some(self.parse_properties(schema, depth + 1));
                }
            }
            FieldType::Array => {
                let element = match lookup(&chain, "items") {
                    Some(items) => self.parse_field("0", items, false, depth + 1),
                    None => ParsedField::new("0", FieldType::String),
                };
                field.schema = Some(vec![element]);
            }
            _ => {}
        }
        self.leave(mark);

        debug!("parsed field `{key}` as {field_type}");
        field
    }

    /// Collect `default` values of the properties of an object schema.
    ///
    /// Object properties without their own default contribute the defaults
    /// of their children, when there are any.
    pub fn defaults(&mut self, schema: &'a Value, depth: usize) -> Map<String, Value> {
        let chain = self.resolve(schema);
        let mut values = Map::new();
        let Some(properties) = lookup(&chain, "properties").and_then(Value::as_object) else {
            return values;
        };

        let mark = self.enter(&chain);
        for (key, prop) in properties {
            let prop_chain = self.resolve(prop);
            if let Some(default) = lookup(&prop_chain, "default") {
                values.insert(key.clone(), default.clone());
            } else if depth < MAX_DEPTH
                && field_type(&prop_chain) == FieldType::Object
                && self.repeated_ref(&prop_chain).is_none()
            {
                let nested = self.defaults(prop, depth + 1);
                if !nested.is_empty() {
                    values.insert(key.clone(), Value::Object(nested));
                }
            }
        }
        self.leave(mark);
        values
    }
}

/// `$ref` targets along a resolution chain.
fn chain_refs<'a>(chain: &[&'a Value]) -> impl Iterator<Item = &'a str> {
    chain
        .iter()
        .filter_map(|schema| schema.get("$ref").and_then(Value::as_str))
}

/// First occurrence of `keyword` along a resolution chain, outermost first.
fn lookup<'a>(chain: &[&'a Value], keyword: &str) -> Option<&'a Value> {
    chain.iter().find_map(|schema| schema.get(keyword))
}

/// The only non-null branch of `allOf`, `anyOf` or `oneOf`, if there is
/// exactly one.
///
/// Covers `allOf: [{$ref}]` and `anyOf: [{$ref}, {type: null}]` as generated
/// for documented and optional references.
fn single_branch(schema: &Value) -> Option<&Value> {
    ["allOf", "anyOf", "oneOf"].iter().find_map(|keyword| {
        let branches = schema.get(*keyword)?.as_array()?;
        let mut non_null = branches.iter().filter(|b| !is_null_schema(b));
        match (non_null.next(), non_null.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    })
}

fn is_null_schema(schema: &Value) -> bool {
    schema.get("type").and_then(Value::as_str) == Some("null")
}

fn required_keys<'a>(chain: &[&'a Value]) -> Vec<&'a str> {
    lookup(chain, "required")
        .and_then(Value::as_array)
        .map(|keys| keys.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

/// Declared type name, skipping `"null"` in type unions.
fn type_name<'a>(chain: &[&'a Value]) -> Option<&'a str> {
    match lookup(chain, "type")? {
        Value::String(name) => Some(name.as_str()),
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .find(|name| *name != "null"),
        _ => None,
    }
}

pub(crate) fn field_type(chain: &[&Value]) -> FieldType {
    if lookup(chain, "enum").is_some() {
        return FieldType::Select;
    }
    match type_name(chain) {
        Some("string") => match lookup(chain, "format").and_then(Value::as_str) {
            Some("date") | Some("date-time") => FieldType::Date,
            _ => FieldType::String,
        },
        Some("number") | Some("integer") => FieldType::Number,
        Some("boolean") => FieldType::Boolean,
        Some("object") => FieldType::Object,
        Some("array") => FieldType::Array,
        Some(other) => {
            warn!("unknown schema type `{other}`, treating as string");
            FieldType::String
        }
        None if lookup(chain, "properties").is_some() => FieldType::Object,
        None if lookup(chain, "items").is_some() => FieldType::Array,
        None => FieldType::String,
    }
}

fn enum_options(values: &[Value]) -> Vec<(String, String)> {
    values
        .iter()
        .filter(|v| !v.is_null())
        .map(|v| {
            let value = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (value.clone(), value)
        })
        .collect()
}

/// Field config from the `fieldConfig` keyword, with `title` as the
/// fallback label.
fn field_config(key: &str, chain: &[&Value]) -> Option<FieldConfig> {
    let mut config = match lookup(chain, FIELD_CONFIG_KEYWORD) {
        Some(raw) => match serde_json::from_value::<FieldConfig>(raw.clone()) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("ignoring malformed {FIELD_CONFIG_KEYWORD} on `{key}`: {e}");
                None
            }
        },
        None => None,
    };

    if let Some(title) = lookup(chain, "title").and_then(Value::as_str) {
        let config = config.get_or_insert_with(FieldConfig::default);
        if config.label.is_none() {
            config.label = Some(title.to_string());
        }
    }
    config
}
