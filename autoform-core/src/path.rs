//! Key/index paths into a value tree.
//!
//! Paths are displayed in dot/bracket notation (`address.lines[0].city`)
//! and serialized as a plain array of keys and indices
//! (`["address", "lines", 0, "city"]`).

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Array element access: `[0]`.
    Index(usize),
    /// Object property access: `.name`.
    Key(String),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// Path from the root of a value tree to one of its nodes.
///
/// The display form parses back to the same path, except for empty keys
/// and keys containing `]`: keys with `.` or `[` are shown bracketed
/// (`[a.b]`) and numeric keys are shown dotted, never bracketed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The empty path.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Returns a new path with `segment` appended.
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut new = self.clone();
        new.segments.push(segment.into());
        new
    }

    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.segments.push(segment.into());
    }

    /// Parse dot/bracket notation.
    ///
    /// Bracketed segments that are not a non-negative integer are kept as
    /// keys, so `map[x]` reads the same as `map.x`.
    pub fn parse(s: &str) -> Self {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = s.chars();

        while let Some(ch) = chars.next() {
            match ch {
                '.' => {
                    if !current.is_empty() {
                        segments.push(PathSegment::Key(std::mem::take(&mut current)));
                    }
                }
                '[' => {
                    if !current.is_empty() {
                        segments.push(PathSegment::Key(std::mem::take(&mut current)));
                    }
                    let inner: String = chars.by_ref().take_while(|&c| c != ']').collect();
                    match inner.parse::<usize>() {
                        Ok(idx) => segments.push(PathSegment::Index(idx)),
                        Err(_) if !inner.is_empty() => segments.push(PathSegment::Key(inner)),
                        Err(_) => {}
                    }
                }
                _ => current.push(ch),
            }
        }

        if !current.is_empty() {
            segments.push(PathSegment::Key(current));
        }

        Self { segments }
    }

    /// Split a JSON pointer (`/a/0/b`) into segments.
    ///
    /// Numeric tokens become indices; `~1` and `~0` escapes are decoded.
    /// Without the document the pointer refers to, a property named `2024`
    /// cannot be told apart from an index; use
    /// [`from_json_pointer_in`](Self::from_json_pointer_in) when the
    /// document is at hand.
    pub fn from_json_pointer(pointer: &str) -> Self {
        pointer_tokens(pointer).map(index_or_key).collect()
    }

    /// Split a JSON pointer into segments typed by walking `document`.
    ///
    /// Tokens addressing an object are keys and tokens addressing an array
    /// are indices. Tokens past the end of the document fall back to the
    /// rule of [`from_json_pointer`](Self::from_json_pointer).
    pub fn from_json_pointer_in(pointer: &str, document: &Value) -> Self {
        let mut current = Some(document);
        let mut segments = Vec::new();

        for token in pointer_tokens(pointer) {
            let segment = match current {
                Some(Value::Object(map)) => {
                    current = map.get(&token);
                    PathSegment::Key(token)
                }
                Some(Value::Array(items)) => {
                    let segment = index_or_key(token);
                    current = match &segment {
                        PathSegment::Index(idx) => items.get(*idx),
                        PathSegment::Key(_) => None,
                    };
                    segment
                }
                _ => {
                    current = None;
                    index_or_key(token)
                }
            };
            segments.push(segment);
        }

        Self { segments }
    }
}

fn pointer_tokens(pointer: &str) -> impl Iterator<Item = String> + '_ {
    pointer
        .split('/')
        .skip(1)
        .map(|token| token.replace("~1", "/").replace("~0", "~"))
}

fn index_or_key(token: String) -> PathSegment {
    match token.parse::<usize>() {
        Ok(idx) => PathSegment::Index(idx),
        Err(_) => PathSegment::Key(token),
    }
}

/// Keys [`FieldPath::parse`] would split unless bracketed.
fn needs_brackets(key: &str) -> bool {
    key.contains(['.', '['])
}

impl<S: Into<PathSegment>> FromIterator<S> for FieldPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            match seg {
                PathSegment::Key(key) if needs_brackets(key) => write!(f, "[{key}]")?,
                PathSegment::Key(key) if i == 0 => write!(f, "{key}")?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

/// Look up the value at `path` inside `value`.
///
/// Returns `None` as soon as a segment does not exist. Index segments also
/// match object keys spelled as the number, since form values coming from
/// TOML or query strings often key arrays that way.
pub fn get_path_in_object<'a>(value: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    path.segments().iter().try_fold(value, |current, seg| match (seg, current) {
        (PathSegment::Key(key), Value::Object(map)) => map.get(key),
        (PathSegment::Index(idx), Value::Array(arr)) => arr.get(*idx),
        (PathSegment::Index(idx), Value::Object(map)) => map.get(&idx.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display() {
        let path: FieldPath = FieldPath::root()
            .child("address")
            .child("lines")
            .child(0usize)
            .child("city");
        assert_eq!(path.to_string(), "address.lines[0].city");
        assert_eq!(FieldPath::root().to_string(), "");
    }

    #[test]
    fn test_parse() {
        let path = FieldPath::parse("items[2].name");
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("items".into()),
                PathSegment::Index(2),
                PathSegment::Key("name".into()),
            ]
        );
        assert_eq!(FieldPath::parse("").len(), 0);
        assert_eq!(FieldPath::parse("map[x]"), FieldPath::parse("map.x"));
        assert_eq!(FieldPath::parse("a..b"), FieldPath::parse("a.b"));
    }

    #[test]
    fn test_json_pointer() {
        let path = FieldPath::from_json_pointer("/tags/1/a~1b");
        assert_eq!(path.to_string(), "tags[1].a/b");
        assert!(FieldPath::from_json_pointer("").is_root());
    }

    #[test]
    fn test_json_pointer_typed_by_document() {
        let values = json!({"2024": "x", "rows": [{"7": 1}], "map": {"0": true}});

        let path = FieldPath::from_json_pointer_in("/2024", &values);
        assert_eq!(path.segments(), &[PathSegment::Key("2024".into())]);
        assert_eq!(path, FieldPath::root().child("2024"));

        let path = FieldPath::from_json_pointer_in("/rows/0/7", &values);
        assert_eq!(path, FieldPath::root().child("rows").child(0usize).child("7"));

        let path = FieldPath::from_json_pointer_in("/map/0", &values);
        assert_eq!(path, FieldPath::root().child("map").child("0"));

        // Past the end of the document numeric tokens are read as indices.
        let path = FieldPath::from_json_pointer_in("/missing/3", &values);
        assert_eq!(path, FieldPath::root().child("missing").child(3usize));
    }

    #[test]
    fn test_display_round_trips_awkward_keys() {
        let path = FieldPath::root().child("a.b").child("c");
        assert_eq!(path.to_string(), "[a.b].c");
        assert_eq!(FieldPath::parse(&path.to_string()), path);

        let path = FieldPath::root().child("2024").child(1usize).child("x[y");
        assert_eq!(path.to_string(), "2024[1][x[y]");
        assert_eq!(FieldPath::parse(&path.to_string()), path);

        let path = FieldPath::root().child("years").child("2024");
        assert_eq!(path.to_string(), "years.2024");
        assert_eq!(FieldPath::parse(&path.to_string()), path);
    }

    #[test]
    fn test_serialize_as_array() {
        let path = FieldPath::parse("tags[1]");
        assert_eq!(serde_json::to_value(&path).unwrap(), json!(["tags", 1]));
        let back: FieldPath = serde_json::from_value(json!(["tags", 1])).unwrap();
        assert_eq!(back, path);
    }

    #[test]
    fn test_get_path_in_object() {
        let value = json!({
            "user": {"emails": ["a@example.com", "b@example.com"]},
            "byIndex": {"0": "zero"}
        });

        assert_eq!(
            get_path_in_object(&value, &FieldPath::parse("user.emails[1]")),
            Some(&json!("b@example.com"))
        );
        assert_eq!(
            get_path_in_object(&value, &FieldPath::parse("byIndex[0]")),
            Some(&json!("zero"))
        );
        assert_eq!(
            get_path_in_object(&value, &FieldPath::parse("user.phone")),
            None
        );
        assert_eq!(
            get_path_in_object(&value, &FieldPath::parse("user.emails.first")),
            None
        );
        assert_eq!(get_path_in_object(&value, &FieldPath::root()), Some(&value));
    }
}
