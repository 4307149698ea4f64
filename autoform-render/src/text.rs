//! Plain-text components.
//!
//! Renders a form as an indented outline, one line per field:
//!
//! ```text
//! Name*: Ada
//! Address:
//!   City: London
//!   Zip: <empty>
//! [x] Newsletter
//! Role: admin {admin, member}
//! ```

use autoform_core::{FieldType, Value};
use colored::Colorize;

use crate::{
    components::{
        ArrayWrapper, FieldComponent, FieldProps, FieldWrapper, ObjectWrapper, Output, RenderFn,
        UiComponents,
    },
    error::Result,
};

/// Presentation switches of the text components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextTheme {
    /// Emit ANSI colors.
    pub color: bool,
    /// Print field descriptions under the input.
    pub show_descriptions: bool,
    /// Show the schema default next to fields without a value.
    pub show_defaults: bool,
}

impl Default for TextTheme {
    fn default() -> Self {
        Self {
            color: true,
            show_descriptions: true,
            show_defaults: true,
        }
    }
}

impl TextTheme {
    fn label(&self, props: &FieldProps<'_>) -> String {
        let marker = if props.field.required { "*" } else { "" };
        if self.color {
            format!("{}{}", props.label.bold(), marker.red())
        } else {
            format!("{}{marker}", props.label)
        }
    }

    fn dim(&self, s: &str) -> String {
        if self.color {
            s.dimmed().to_string()
        } else {
            s.to_string()
        }
    }

    fn error(&self, s: &str) -> String {
        let s = format!("! {s}");
        if self.color { s.red().to_string() } else { s }
    }

    /// Current value, or a placeholder for a missing one.
    fn value(&self, props: &FieldProps<'_>) -> String {
        match props.value {
            Some(value) if !value.is_null() => display_value(value),
            _ => {
                let placeholder = props
                    .input_props()
                    .and_then(|p| p.get("placeholder"))
                    .and_then(Value::as_str)
                    .map(|p| format!("<{p}>"))
                    .unwrap_or_else(|| "<empty>".to_string());
                let mut s = self.dim(&placeholder);
                if self.show_defaults
                    && let Some(default) = &props.field.default
                {
                    s.push_str(&self.dim(&format!(" (default: {})", display_value(default))));
                }
                s
            }
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Single-line input for strings, numbers and dates.
pub struct TextInput(pub TextTheme);

impl FieldComponent for TextInput {
    fn render(&self, props: &FieldProps<'_>, out: &mut Output<'_>) -> Result<()> {
        out.line(format!("{}: {}", self.0.label(props), self.0.value(props)))
    }
}

/// Checkbox for booleans.
pub struct Checkbox(pub TextTheme);

impl FieldComponent for Checkbox {
    fn render(&self, props: &FieldProps<'_>, out: &mut Output<'_>) -> Result<()> {
        let checked = props
            .value
            .or(props.field.default.as_ref())
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let mark = if checked { "[x]" } else { "[ ]" };
        out.line(format!("{mark} {}", self.0.label(props)))
    }
}

/// Select with its options listed after the current value.
pub struct Select(pub TextTheme);

impl FieldComponent for Select {
    fn render(&self, props: &FieldProps<'_>, out: &mut Output<'_>) -> Result<()> {
        let choices = props
            .field
            .options
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|(_, label)| label.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        out.line(format!(
            "{}: {} {}",
            self.0.label(props),
            self.0.value(props),
            self.0.dim(&format!("{{{choices}}}"))
        ))
    }
}

/// Rendered for fields no registered component handles.
pub struct Fallback(pub TextTheme);

impl FieldComponent for Fallback {
    fn render(&self, props: &FieldProps<'_>, out: &mut Output<'_>) -> Result<()> {
        let note = match &props.field.field_type {
            FieldType::Object => "no fields declared".to_string(),
            other => format!("no component for `{other}`"),
        };
        out.line(format!(
            "{}: {} {}",
            self.0.label(props),
            self.0.value(props),
            self.0.dim(&format!("({note})"))
        ))
    }
}

/// Adds description and error lines below a leaf input.
pub struct TextFieldWrapper(pub TextTheme);

impl FieldWrapper for TextFieldWrapper {
    fn render(
        &self,
        props: &FieldProps<'_>,
        out: &mut Output<'_>,
        input: &mut RenderFn<'_>,
    ) -> Result<()> {
        input(out)?;
        let theme = self.0;
        out.nested(&mut |out| {
            if theme.show_descriptions
                && let Some(description) = props.field.effective_description()
            {
                out.line(theme.dim(description))?;
            }
            if let Some(error) = props.error {
                out.line(theme.error(error))?;
            }
            Ok(())
        })
    }
}

/// Heading line followed by the indented children.
pub struct TextObjectWrapper(pub TextTheme);

impl ObjectWrapper for TextObjectWrapper {
    fn render(
        &self,
        props: &FieldProps<'_>,
        out: &mut Output<'_>,
        children: &mut RenderFn<'_>,
    ) -> Result<()> {
        out.line(format!("{}:", self.0.label(props)))?;
        if let Some(error) = props.error {
            out.nested(&mut |out| out.line(self.0.error(error)))?;
        }
        out.nested(children)
    }
}

/// Heading with the element count followed by the indented elements.
pub struct TextArrayWrapper(pub TextTheme);

impl ArrayWrapper for TextArrayWrapper {
    fn render(
        &self,
        props: &FieldProps<'_>,
        len: usize,
        out: &mut Output<'_>,
        elements: &mut RenderFn<'_>,
    ) -> Result<()> {
        let count = if matches!(props.value, Some(Value::Array(items)) if !items.is_empty()) {
            format!("({len} items)")
        } else {
            "(empty)".to_string()
        };
        out.line(format!("{}: {}", self.0.label(props), self.0.dim(&count)))?;
        if let Some(error) = props.error {
            out.nested(&mut |out| out.line(self.0.error(error)))?;
        }
        out.nested(elements)
    }
}

/// Registry with the text components for every built-in field type.
pub fn text_components(theme: TextTheme) -> UiComponents {
    UiComponents::new(
        TextFieldWrapper(theme),
        TextObjectWrapper(theme),
        TextArrayWrapper(theme),
        Fallback(theme),
    )
    .with_field(FieldType::String.as_str(), TextInput(theme))
    .with_field(FieldType::Number.as_str(), TextInput(theme))
    .with_field(FieldType::Date.as_str(), TextInput(theme))
    .with_field(FieldType::Boolean.as_str(), Checkbox(theme))
    .with_field(FieldType::Select.as_str(), Select(theme))
}
