//! Schema pipeline operations shared by every provider and renderer.

use log::{debug, trace};
use serde_json::{Map, Value};

use crate::{
    provider::SchemaProvider,
    types::{ParsedField, ParsedSchema, SchemaValidation},
};

/// Parse the provider's schema and sort the resulting field tree.
///
/// Calls [`SchemaProvider::parse_schema`] exactly once and returns a new
/// tree; nothing is cached between calls.
pub fn parse_schema<P: SchemaProvider + ?Sized>(provider: &P) -> ParsedSchema {
    let parsed = provider.parse_schema();
    debug!("parsed schema with {} top-level fields", parsed.fields.len());
    ParsedSchema {
        fields: sort_fields_by_order(&parsed.fields),
    }
}

/// Validate `values` with the provider.
pub fn validate_schema<P: SchemaProvider + ?Sized>(provider: &P, values: &Value) -> SchemaValidation {
    provider.validate_schema(values)
}

/// Default values of the provider's schema.
pub fn get_default_values<P: SchemaProvider + ?Sized>(provider: &P) -> Map<String, Value> {
    provider.default_values()
}

/// Sort fields by `field_config.order`, ascending, recursing into children.
///
/// Fields without an order sort as 0. The sort is stable: fields with the
/// same effective order keep their input sequence. Children of every
/// field are sorted independently by the same rule before the list itself
/// is sorted. The input is left untouched.
pub fn sort_fields_by_order(fields: &[ParsedField]) -> Vec<ParsedField> {
    let mut sorted: Vec<ParsedField> = fields
        .iter()
        .map(|field| match &field.schema {
            Some(children) => ParsedField {
                schema: Some(sort_fields_by_order(children)),
                ..field.clone()
            },
            None => field.clone(),
        })
        .collect();

    // `sort_by_key` is stable.
    sorted.sort_by_key(ParsedField::order);
    sorted
}

/// Whether a value counts as empty: `null`, `""`, `[]` or `{}`.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(arr) => arr.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Drop every empty entry from a value record.
///
/// Objects are pruned recursively. Array elements are pruned first and then
/// every element that is (or has become) empty is filtered out. A key whose
/// value ends up empty after pruning is dropped as well, so running the
/// function on its own output changes nothing. The input is not modified.
pub fn remove_empty_values(values: &Map<String, Value>) -> Map<String, Value> {
    values
        .iter()
        .filter_map(|(key, value)| match prune(value) {
            Some(pruned) => Some((key.clone(), pruned)),
            None => {
                trace!("dropping empty value at `{key}`");
                None
            }
        })
        .collect()
}

fn prune(value: &Value) -> Option<Value> {
    let pruned = match value {
        Value::Object(map) => Value::Object(remove_empty_values(map)),
        Value::Array(arr) => Value::Array(arr.iter().filter_map(prune).collect()),
        other => other.clone(),
    };

    if is_empty_value(&pruned) {
        None
    } else {
        Some(pruned)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::types::{FieldConfig, FieldType};
    use proptest::prelude::*;
    use serde_json::json;

    fn field(key: &str, order: Option<i64>) -> ParsedField {
        let f = ParsedField::new(key, FieldType::String);
        match order {
            Some(o) => f.with_field_config(FieldConfig::new().with_order(o)),
            None => f,
        }
    }

    fn keys(fields: &[ParsedField]) -> Vec<&str> {
        fields.iter().map(|f| f.key.as_str()).collect()
    }

    #[test]
    fn test_sort_keeps_unordered_sequence() {
        let sorted = sort_fields_by_order(&[field("b", None), field("a", None)]);
        assert_eq!(keys(&sorted), ["b", "a"]);
    }

    #[test]
    fn test_sort_mixed_order() {
        let sorted = sort_fields_by_order(&[
            field("c", Some(2)),
            field("a", Some(0)),
            field("b", None),
        ]);
        assert_eq!(keys(&sorted), ["a", "b", "c"]);

        // Ties follow input position, not the key.
        let sorted = sort_fields_by_order(&[
            field("c", Some(2)),
            field("b", None),
            field("a", Some(0)),
        ]);
        assert_eq!(keys(&sorted), ["b", "a", "c"]);
    }

    #[test]
    fn test_sort_negative_order_goes_first() {
        let sorted = sort_fields_by_order(&[field("a", None), field("z", Some(-1))]);
        assert_eq!(keys(&sorted), ["z", "a"]);
    }

    #[test]
    fn test_sort_nested_children() {
        let parent = ParsedField::new("parent", FieldType::Object)
            .with_field_config(FieldConfig::new().with_order(1))
            .with_schema(vec![field("x", Some(1)), field("y", Some(0))]);
        let input = vec![parent, field("first", None)];

        let sorted = sort_fields_by_order(&input);
        assert_eq!(keys(&sorted), ["first", "parent"]);
        assert_eq!(keys(sorted[1].children()), ["y", "x"]);

        // Input untouched.
        assert_eq!(keys(input[0].children()), ["x", "y"]);
    }

    #[test]
    fn test_sort_empty() {
        assert!(sort_fields_by_order(&[]).is_empty());
        let leaf = ParsedField::new("obj", FieldType::Object);
        let sorted = sort_fields_by_order(&[leaf]);
        assert_eq!(sorted[0].schema, None);
    }

    #[test]
    fn test_remove_empty_values() {
        let values = json!({
            "a": "",
            "b": null,
            "c": [],
            "d": {},
            "e": "keep",
            "f": [1, {}, {"g": ""}]
        });
        let pruned = remove_empty_values(values.as_object().unwrap());
        assert_eq!(Value::Object(pruned), json!({"e": "keep", "f": [1]}));
    }

    #[test]
    fn test_remove_empty_values_nested() {
        let values = json!({
            "user": {"name": "Ada", "nick": "", "address": {"line": null}},
            "flags": [false, 0, "", "x"],
            "empty_after": {"inner": {"deep": []}}
        });
        let pruned = remove_empty_values(values.as_object().unwrap());
        assert_eq!(
            Value::Object(pruned),
            json!({
                "user": {"name": "Ada"},
                "flags": [false, 0, "x"]
            })
        );
        // Source untouched.
        assert_eq!(values["user"]["nick"], json!(""));
    }

    #[test]
    fn test_remove_empty_values_keeps_order() {
        let values = json!({"z": 1, "a": "", "m": 2});
        let pruned = remove_empty_values(values.as_object().unwrap());
        assert_eq!(pruned.keys().collect::<Vec<_>>(), ["z", "m"]);
    }

    struct CountingProvider {
        calls: Cell<usize>,
    }

    impl SchemaProvider for CountingProvider {
        fn parse_schema(&self) -> ParsedSchema {
            self.calls.set(self.calls.get() + 1);
            ParsedSchema::new(vec![
                field("second", Some(1)),
                ParsedField::new("group", FieldType::Object)
                    .with_schema(vec![field("b", Some(5)), field("a", None)]),
            ])
        }

        fn validate_schema(&self, values: &Value) -> SchemaValidation {
            SchemaValidation::Success(values.clone())
        }

        fn default_values(&self) -> Map<String, Value> {
            let mut map = Map::new();
            map.insert("second".into(), json!("x"));
            map
        }
    }

    #[test]
    fn test_parse_schema_calls_provider_once() {
        let provider = CountingProvider {
            calls: Cell::new(0),
        };
        let mut parsed = parse_schema(&provider);
        assert_eq!(provider.calls.get(), 1);
        assert_eq!(keys(&parsed.fields), ["group", "second"]);
        assert_eq!(keys(parsed.fields[0].children()), ["a", "b"]);

        parsed.fields.clear();
        let again = parse_schema(&provider);
        assert_eq!(provider.calls.get(), 2);
        assert_eq!(again.fields.len(), 2);
    }

    #[test]
    fn test_delegating_operations() {
        let provider = CountingProvider {
            calls: Cell::new(0),
        };
        assert!(validate_schema(&provider, &json!({})).is_success());
        assert_eq!(get_default_values(&provider)["second"], json!("x"));
        assert_eq!(provider.calls.get(), 0);
    }

    fn arb_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i32>().prop_map(|n| json!(n)),
            prop_oneof![Just(String::new()), "[a-z]{1,4}"].prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-d]", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    fn arb_fields() -> impl Strategy<Value = Vec<ParsedField>> {
        prop::collection::vec(
            (
                "[a-z]{1,3}",
                prop::option::of(-2i64..3),
                prop::collection::vec(("[a-z]{1,3}", prop::option::of(-2i64..3)), 0..3),
            ),
            0..8,
        )
        .prop_map(|specs| {
            specs
                .into_iter()
                .map(|(key, order, children)| {
                    let mut f = field(&key, order);
                    if !children.is_empty() {
                        f = f.with_schema(
                            children.iter().map(|(k, o)| field(k, *o)).collect(),
                        );
                    }
                    f
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_remove_empty_values_idempotent(value in arb_value()) {
            if let Value::Object(map) = value {
                let once = remove_empty_values(&map);
                let twice = remove_empty_values(&once);
                prop_assert_eq!(once, twice);
            }
        }

        #[test]
        fn prop_remove_empty_values_leaves_nothing_empty(value in arb_value()) {
            fn check(v: &Value) -> bool {
                !is_empty_value(v) && match v {
                    Value::Array(arr) => arr.iter().all(check),
                    Value::Object(map) => map.values().all(check),
                    _ => true,
                }
            }
            if let Value::Object(map) = value {
                let pruned = remove_empty_values(&map);
                prop_assert!(pruned.values().all(check));
            }
        }

        #[test]
        fn prop_sort_idempotent(fields in arb_fields()) {
            let once = sort_fields_by_order(&fields);
            let twice = sort_fields_by_order(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_sort_stable_per_order(fields in arb_fields()) {
            let sorted = sort_fields_by_order(&fields);
            prop_assert!(sorted.windows(2).all(|w| w[0].order() <= w[1].order()));
            for order in -2i64..3 {
                let before: Vec<_> = fields.iter().filter(|f| f.order() == order).map(|f| &f.key).collect();
                let after: Vec<_> = sorted.iter().filter(|f| f.order() == order).map(|f| &f.key).collect();
                prop_assert_eq!(before, after);
            }
        }
    }
}
