//! Component traits, props and the component registry.
//!
//! Applications plug their own input components into a [`UiComponents`]
//! registry; the form walker only decides which component renders which
//! field and what it is wrapped in.

use std::{collections::HashMap, fmt};

use autoform_core::{FieldPath, ParsedField, Value};

use crate::error::Result;

/// Indented line writer shared by all components of one render pass.
pub struct Output<'w> {
    writer: &'w mut dyn fmt::Write,
    indent: usize,
    depth: usize,
}

impl<'w> Output<'w> {
    pub fn new(writer: &'w mut dyn fmt::Write, indent: usize) -> Self {
        Self {
            writer,
            indent,
            depth: 0,
        }
    }

    /// Current nesting level.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Write one line at the current nesting level.
    pub fn line(&mut self, text: impl fmt::Display) -> Result<()> {
        let pad = self.depth * self.indent;
        writeln!(self.writer, "{:pad$}{text}", "")?;
        Ok(())
    }

    /// Run `f` one level deeper.
    pub fn nested(&mut self, f: &mut RenderFn<'_>) -> Result<()> {
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

/// Deferred rendering of a field's inner content.
pub type RenderFn<'a> = dyn FnMut(&mut Output<'_>) -> Result<()> + 'a;

/// Everything a component knows about the field it renders.
#[derive(Debug, Clone)]
pub struct FieldProps<'a> {
    pub field: &'a ParsedField,
    /// Location of the field's value in the form values.
    pub path: &'a FieldPath,
    /// Unique identity of the field, the display form of `path`.
    pub id: String,
    pub label: String,
    /// Current value, if the form values contain one.
    pub value: Option<&'a Value>,
    /// First validation error reported for this field.
    pub error: Option<&'a str>,
}

impl FieldProps<'_> {
    /// Input props from the field config.
    pub fn input_props(&self) -> Option<&serde_json::Map<String, Value>> {
        self.field.field_config.as_ref().map(|c| &c.input_props)
    }
}

/// Renders the input of a leaf field.
pub trait FieldComponent {
    fn render(&self, props: &FieldProps<'_>, out: &mut Output<'_>) -> Result<()>;
}

/// Decorates a leaf field: label, description, error.
pub trait FieldWrapper {
    fn render(
        &self,
        props: &FieldProps<'_>,
        out: &mut Output<'_>,
        input: &mut RenderFn<'_>,
    ) -> Result<()>;
}

/// Frames the children of an object field.
pub trait ObjectWrapper {
    fn render(
        &self,
        props: &FieldProps<'_>,
        out: &mut Output<'_>,
        children: &mut RenderFn<'_>,
    ) -> Result<()>;
}

/// Frames the elements of an array field.
pub trait ArrayWrapper {
    fn render(
        &self,
        props: &FieldProps<'_>,
        len: usize,
        out: &mut Output<'_>,
        elements: &mut RenderFn<'_>,
    ) -> Result<()>;
}

/// Registry of the components a form renders with.
///
/// Leaf components are keyed by type name. A field's
/// `field_config.field_type` is looked up first, then its own type; when
/// neither is registered the fallback renders the field.
pub struct UiComponents {
    fields: HashMap<String, Box<dyn FieldComponent>>,
    wrappers: HashMap<String, Box<dyn FieldWrapper>>,
    field_wrapper: Box<dyn FieldWrapper>,
    object_wrapper: Box<dyn ObjectWrapper>,
    array_wrapper: Box<dyn ArrayWrapper>,
    fallback: Box<dyn FieldComponent>,
}

impl UiComponents {
    pub fn new(
        field_wrapper: impl FieldWrapper + 'static,
        object_wrapper: impl ObjectWrapper + 'static,
        array_wrapper: impl ArrayWrapper + 'static,
        fallback: impl FieldComponent + 'static,
    ) -> Self {
        Self {
            fields: HashMap::new(),
            wrappers: HashMap::new(),
            field_wrapper: Box::new(field_wrapper),
            object_wrapper: Box::new(object_wrapper),
            array_wrapper: Box::new(array_wrapper),
            fallback: Box::new(fallback),
        }
    }

    /// Register the component for a type name, replacing any previous one.
    pub fn with_field(
        mut self,
        type_name: impl Into<String>,
        component: impl FieldComponent + 'static,
    ) -> Self {
        self.fields.insert(type_name.into(), Box::new(component));
        self
    }

    /// Register a named wrapper for `field_config.field_wrapper`.
    pub fn with_wrapper(mut self, name: impl Into<String>, wrapper: impl FieldWrapper + 'static) -> Self {
        self.wrappers.insert(name.into(), Box::new(wrapper));
        self
    }

    pub fn has_field(&self, type_name: &str) -> bool {
        self.fields.contains_key(type_name)
    }

    /// Registered component for an explicit `field_config.field_type`.
    pub fn override_component(&self, field: &ParsedField) -> Option<&dyn FieldComponent> {
        let name = field.field_config.as_ref()?.field_type.as_deref()?;
        self.fields.get(name).map(Box::as_ref)
    }

    /// Component rendering a leaf field.
    pub fn field_component(&self, field: &ParsedField) -> &dyn FieldComponent {
        self.override_component(field)
            .or_else(|| self.fields.get(field.field_type.as_str()).map(Box::as_ref))
            .unwrap_or(self.fallback.as_ref())
    }

    /// Wrapper of a leaf field, falling back to the default when the named
    /// wrapper is unknown.
    pub fn field_wrapper(&self, field: &ParsedField) -> &dyn FieldWrapper {
        let named = field
            .field_config
            .as_ref()
            .and_then(|c| c.field_wrapper.as_deref());
        match named {
            Some(name) => match self.wrappers.get(name) {
                Some(wrapper) => wrapper.as_ref(),
                None => {
                    log::warn!("unknown field wrapper `{name}` on `{}`, using default", field.key);
                    self.field_wrapper.as_ref()
                }
            },
            None => self.field_wrapper.as_ref(),
        }
    }

    pub fn object_wrapper(&self) -> &dyn ObjectWrapper {
        self.object_wrapper.as_ref()
    }

    pub fn array_wrapper(&self) -> &dyn ArrayWrapper {
        self.array_wrapper.as_ref()
    }

    pub fn fallback(&self) -> &dyn FieldComponent {
        self.fallback.as_ref()
    }
}
