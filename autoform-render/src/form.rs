//! The form walker and submit pipeline.

use std::fmt;

use autoform_core::{
    FieldPath, ParsedField, ParsedSchema, SchemaProvider, SchemaValidation, SchemaValidationError,
    Value, get_default_values, get_label, get_path_in_object, remove_empty_values, validate_schema,
};
use log::debug;
use serde_json::Map;

use crate::{
    components::{FieldProps, Output, UiComponents},
    error::Result,
    node::FieldNode,
};

/// Behaviour switches of an [`AutoForm`].
#[derive(Debug, Clone)]
pub struct FormOptions {
    /// Drop empty values before validating on submit.
    pub prune_empty: bool,
    /// Spaces per nesting level.
    pub indent: usize,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            prune_empty: true,
            indent: 2,
        }
    }
}

/// Renders a sorted field tree with a set of components and runs submits.
pub struct AutoForm {
    components: UiComponents,
    options: FormOptions,
}

struct RenderState<'a> {
    values: &'a Value,
    errors: &'a [SchemaValidationError],
}

impl AutoForm {
    pub fn new(components: UiComponents) -> Self {
        Self {
            components,
            options: FormOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FormOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    /// Initial form values: the provider's defaults overlaid with `values`.
    ///
    /// Objects present on both sides are merged key by key; any other value
    /// in `values` replaces the default.
    pub fn initial_values<P: SchemaProvider + ?Sized>(
        provider: &P,
        values: &Map<String, Value>,
    ) -> Map<String, Value> {
        let mut merged = get_default_values(provider);
        merge_into(&mut merged, values);
        merged
    }

    /// Prepare `values` for submission and validate them.
    ///
    /// Empty values are removed first unless [`FormOptions::prune_empty`]
    /// is off.
    pub fn submit<P: SchemaProvider + ?Sized>(
        &self,
        provider: &P,
        values: &Map<String, Value>,
    ) -> SchemaValidation {
        let values = if self.options.prune_empty {
            remove_empty_values(values)
        } else {
            values.clone()
        };
        let result = validate_schema(provider, &Value::Object(values));
        debug!(
            "submit {}",
            if result.is_success() { "succeeded" } else { "failed" }
        );
        result
    }

    /// Render every field of `schema` into `writer`.
    pub fn render(
        &self,
        schema: &ParsedSchema,
        values: &Value,
        errors: &[SchemaValidationError],
        writer: &mut dyn fmt::Write,
    ) -> Result<()> {
        let state = RenderState { values, errors };
        let mut out = Output::new(writer, self.options.indent);
        let root = FieldPath::root();
        for field in &schema.fields {
            self.render_field(&state, field, &root.child(field.key.as_str()), &mut out)?;
        }
        Ok(())
    }

    /// Render into a new string.
    pub fn render_to_string(
        &self,
        schema: &ParsedSchema,
        values: &Value,
        errors: &[SchemaValidationError],
    ) -> Result<String> {
        let mut s = String::new();
        self.render(schema, values, errors, &mut s)?;
        Ok(s)
    }

    fn render_field(
        &self,
        state: &RenderState<'_>,
        field: &ParsedField,
        path: &FieldPath,
        out: &mut Output<'_>,
    ) -> Result<()> {
        let props = FieldProps {
            field,
            path,
            id: path.to_string(),
            label: get_label(field),
            value: get_path_in_object(state.values, path),
            error: state
                .errors
                .iter()
                .find(|e| &e.path == path)
                .map(|e| e.message.as_str()),
        };

        // An explicit component override wins over structural dispatch.
        let node = if self.components.override_component(field).is_some() {
            FieldNode::Leaf { field }
        } else {
            FieldNode::classify(field)
        };

        match node {
            FieldNode::Object { children, .. } => {
                self.components
                    .object_wrapper()
                    .render(&props, out, &mut |out| {
                        for child in children {
                            self.render_field(state, child, &path.child(child.key.as_str()), out)?;
                        }
                        Ok(())
                    })
            }
            FieldNode::Array { element, .. } => {
                let len = match props.value {
                    Some(Value::Array(items)) if !items.is_empty() => items.len(),
                    _ => 1,
                };
                self.components
                    .array_wrapper()
                    .render(&props, len, out, &mut |out| {
                        for idx in 0..len {
                            let item = ParsedField {
                                key: idx.to_string(),
                                ..element.clone()
                            };
                            self.render_field(state, &item, &path.child(idx), out)?;
                        }
                        Ok(())
                    })
            }
            FieldNode::Leaf { field } => {
                let component = self.components.field_component(field);
                self.components
                    .field_wrapper(field)
                    .render(&props, out, &mut |out| component.render(&props, out))
            }
        }
    }
}

fn merge_into(target: &mut Map<String, Value>, overlay: &Map<String, Value>) {
    for (key, value) in overlay {
        match (target.get_mut(key), value) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => merge_into(existing, incoming),
            _ => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{
        ArrayWrapper, FieldComponent, FieldWrapper, ObjectWrapper, RenderFn,
    };
    use autoform_core::{FieldConfig, FieldType, parse_schema};
    use autoform_json_schema::JsonSchemaProvider;
    use serde_json::json;

    /// Writes `kind:id=value` lines so tests can check dispatch and paths.
    struct Recorder(&'static str);

    fn describe(kind: &str, props: &FieldProps<'_>) -> String {
        let value = props.value.map(|v| v.to_string()).unwrap_or_default();
        let error = props.error.map(|e| format!(" !{e}")).unwrap_or_default();
        format!("{kind}:{}={value}{error}", props.id)
    }

    impl FieldComponent for Recorder {
        fn render(&self, props: &FieldProps<'_>, out: &mut Output<'_>) -> Result<()> {
            out.line(describe(self.0, props))
        }
    }

    impl FieldWrapper for Recorder {
        fn render(
            &self,
            _props: &FieldProps<'_>,
            out: &mut Output<'_>,
            input: &mut RenderFn<'_>,
        ) -> Result<()> {
            input(out)
        }
    }

    impl ObjectWrapper for Recorder {
        fn render(
            &self,
            props: &FieldProps<'_>,
            out: &mut Output<'_>,
            children: &mut RenderFn<'_>,
        ) -> Result<()> {
            out.line(format!("object:{}", props.id))?;
            out.nested(children)
        }
    }

    impl ArrayWrapper for Recorder {
        fn render(
            &self,
            props: &FieldProps<'_>,
            len: usize,
            out: &mut Output<'_>,
            elements: &mut RenderFn<'_>,
        ) -> Result<()> {
            out.line(format!("array({len}):{}", props.id))?;
            out.nested(elements)
        }
    }

    fn form() -> AutoForm {
        AutoForm::new(
            UiComponents::new(Recorder(""), Recorder(""), Recorder(""), Recorder("fallback"))
                .with_field("string", Recorder("string"))
                .with_field("number", Recorder("number"))
                .with_field("json", Recorder("json")),
        )
    }

    fn schema() -> ParsedSchema {
        ParsedSchema::new(vec![
            ParsedField::new("name", FieldType::String),
            ParsedField::new("address", FieldType::Object).with_schema(vec![
                ParsedField::new("city", FieldType::String),
                ParsedField::new("zip", FieldType::Number),
            ]),
            ParsedField::new("tags", FieldType::Array)
                .with_schema(vec![ParsedField::new("0", FieldType::String)]),
            ParsedField::new("meta", FieldType::Object),
            ParsedField::new("raw", FieldType::Object)
                .with_field_config(FieldConfig::new().with_field_type("json"))
                .with_schema(vec![ParsedField::new("x", FieldType::String)]),
        ])
    }

    #[test]
    fn test_render_paths_and_dispatch() {
        let values = json!({
            "name": "Ada",
            "address": {"city": "London"},
            "tags": ["a", "b"]
        });
        let rendered = form().render_to_string(&schema(), &values, &[]).unwrap();
        assert_eq!(
            rendered,
            "string:name=\"Ada\"\n\
             object:address\n  \
               string:address.city=\"London\"\n  \
               number:address.zip=\n\
             array(2):tags\n  \
               string:tags[0]=\"a\"\n  \
               string:tags[1]=\"b\"\n\
             fallback:meta=\n\
             json:raw=\n"
        );
    }

    #[test]
    fn test_render_empty_array_shows_template() {
        let rendered = form()
            .render_to_string(&schema(), &json!({"tags": []}), &[])
            .unwrap();
        assert!(rendered.contains("array(1):tags\n  string:tags[0]=\n"));
    }

    #[test]
    fn test_render_attaches_errors() {
        let errors = vec![SchemaValidationError::new(
            FieldPath::parse("address.city"),
            "is required",
        )];
        let rendered = form()
            .render_to_string(&schema(), &json!({}), &errors)
            .unwrap();
        assert!(rendered.contains("string:address.city= !is required"));
        assert!(rendered.contains("string:name=\n"));
    }

    fn provider() -> JsonSchemaProvider {
        JsonSchemaProvider::new(json!({
            "type": "object",
            "required": ["name"],
            "properties": {
                "name": {"type": "string", "minLength": 1},
                "nick": {"type": "string", "minLength": 2},
                "prefs": {
                    "type": "object",
                    "properties": {
                        "theme": {"type": "string", "default": "light"},
                        "size": {"type": "number", "default": 12}
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_submit_prunes_before_validating() {
        let values = json!({"name": "Ada", "nick": ""});
        let values = values.as_object().unwrap();

        let result = form().submit(&provider(), values);
        assert_eq!(result, SchemaValidation::Success(json!({"name": "Ada"})));

        let strict = form().with_options(FormOptions {
            prune_empty: false,
            ..FormOptions::default()
        });
        let errors = strict.submit(&provider(), values).into_result().unwrap_err();
        assert_eq!(errors[0].path, FieldPath::parse("nick"));
    }

    #[test]
    fn test_submit_reports_missing_required() {
        let values = json!({"name": ""});
        let errors = form()
            .submit(&provider(), values.as_object().unwrap())
            .into_result()
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, FieldPath::parse("name"));
    }

    #[test]
    fn test_initial_values_merge() {
        let values = json!({"name": "Ada", "prefs": {"theme": "dark"}});
        let merged = AutoForm::initial_values(&provider(), values.as_object().unwrap());
        assert_eq!(
            Value::Object(merged),
            json!({"prefs": {"theme": "dark", "size": 12}, "name": "Ada"})
        );
    }

    #[test]
    fn test_render_object_without_properties_uses_fallback() {
        let schema = ParsedSchema::new(vec![
            ParsedField::new("blank", FieldType::Object).with_schema(vec![]),
        ]);
        let rendered = form().render_to_string(&schema, &json!({}), &[]).unwrap();
        assert_eq!(rendered, "fallback:blank=\n");
    }

    #[test]
    fn test_render_attaches_errors_on_numeric_keys() {
        let provider = JsonSchemaProvider::new(json!({
            "type": "object",
            "properties": {"2024": {"type": "string", "minLength": 3}}
        }))
        .unwrap();
        let values = json!({"2024": "x"});
        let errors = provider.validate_schema(&values).errors().to_vec();
        assert_eq!(errors.len(), 1);

        let rendered = form()
            .render_to_string(&parse_schema(&provider), &values, &errors)
            .unwrap();
        assert!(rendered.starts_with("string:2024=\"x\" !"));
    }

    #[test]
    fn test_render_parsed_provider_schema() {
        let provider = provider();
        let parsed = parse_schema(&provider);
        let rendered = form()
            .render_to_string(&parsed, &json!({"prefs": {"size": 14}}), &[])
            .unwrap();
        assert!(rendered.contains("number:prefs.size=14"));
    }
}
