use autoform_core::{FieldType, ParsedField};

/// Dispatch view of a parsed field.
///
/// Object fields without children and array fields without an element
/// template are leaves, which sends them to the leaf components (and usually
/// the fallback).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldNode<'a> {
    Object {
        field: &'a ParsedField,
        children: &'a [ParsedField],
    },
    Array {
        field: &'a ParsedField,
        element: &'a ParsedField,
    },
    Leaf {
        field: &'a ParsedField,
    },
}

impl<'a> FieldNode<'a> {
    pub fn classify(field: &'a ParsedField) -> Self {
        match (&field.field_type, field.schema.as_deref()) {
            (FieldType::Object, Some(children)) if !children.is_empty() => {
                FieldNode::Object { field, children }
            }
            (FieldType::Array, Some([element, ..])) => FieldNode::Array { field, element },
            _ => FieldNode::Leaf { field },
        }
    }

    pub fn field(&self) -> &'a ParsedField {
        match *self {
            FieldNode::Object { field, .. }
            | FieldNode::Array { field, .. }
            | FieldNode::Leaf { field } => field,
        }
    }
}
