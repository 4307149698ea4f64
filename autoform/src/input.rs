//! Loading schemas and value files.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use autoform_json_schema::JsonSchemaProvider;
use serde_json::{Map, Value};

/// Derive the schema path belonging to a values file.
///
/// `config.toml` maps to `config-schema.json` in the same directory.
pub fn default_schema_by_values(values: &Path) -> PathBuf {
    let stem = values
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let name = format!("{stem}-schema.json");

    match values.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

/// Pick the schema path: the explicit one, else the one derived from the
/// values file.
pub fn resolve_schema_path(schema: Option<&Path>, values: Option<&Path>) -> anyhow::Result<PathBuf> {
    match (schema, values) {
        (Some(schema), _) => Ok(schema.to_path_buf()),
        (None, Some(values)) => Ok(default_schema_by_values(values)),
        (None, None) => bail!("no schema given; pass --schema or a values file to derive it from"),
    }
}

/// Read a JSON Schema file and compile it into a provider.
pub fn load_provider(path: &Path) -> anyhow::Result<JsonSchemaProvider> {
    if !path.exists() {
        bail!("Schema file does not exist: {}", path.display());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema {}", path.display()))?;
    let schema: Value = serde_json::from_str(&content)
        .with_context(|| format!("Schema {} is not valid JSON", path.display()))?;
    JsonSchemaProvider::new(schema).with_context(|| format!("Failed to load schema {}", path.display()))
}

/// Parse values text in the format named by `ext` (`json` or `toml`).
pub fn parse_values(content: &str, ext: &str) -> anyhow::Result<Map<String, Value>> {
    if content.trim().is_empty() {
        return Ok(Map::new());
    }
    let value: Value = match ext {
        "json" => serde_json::from_str(content)?,
        "toml" | "tml" => {
            let v: toml::Value = toml::from_str(content)?;
            serde_json::to_value(v)?
        }
        ext => bail!("Unsupported values file extension: {ext:?}"),
    };
    match value {
        Value::Object(map) => Ok(map),
        other => bail!("Values must be an object, found {other}"),
    }
}

/// Read a values file; the format follows its extension.
pub fn load_values(path: &Path) -> anyhow::Result<Map<String, Value>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read values {}", path.display()))?;
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
    parse_values(&content, ext).with_context(|| format!("Failed to parse values {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_default() {
        assert_eq!(
            default_schema_by_values(Path::new("config.toml")),
            PathBuf::from("config-schema.json")
        );
        assert_eq!(
            default_schema_by_values(Path::new("forms/signup.form.json")),
            PathBuf::from("forms/signup.form-schema.json")
        );
    }

    #[test]
    fn test_resolve_schema_path() {
        assert_eq!(
            resolve_schema_path(Some(Path::new("a.json")), Some(Path::new("b.toml"))).unwrap(),
            PathBuf::from("a.json")
        );
        assert_eq!(
            resolve_schema_path(None, Some(Path::new("b.toml"))).unwrap(),
            PathBuf::from("b-schema.json")
        );
        assert!(resolve_schema_path(None, None).is_err());
    }

    #[test]
    fn test_parse_values() {
        let toml = parse_values("name = \"Ada\"\n[address]\ncity = \"London\"\n", "toml").unwrap();
        assert_eq!(toml["address"]["city"], Value::from("London"));

        let json = parse_values(r#"{"name": "Ada"}"#, "json").unwrap();
        assert_eq!(json["name"], Value::from("Ada"));

        assert!(parse_values("   ", "yaml").unwrap().is_empty());
        assert!(parse_values("name: Ada", "yaml").is_err());
        assert!(parse_values("[1, 2]", "json").is_err());
    }

    #[test]
    fn test_load_provider_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_provider(&dir.path().join("nope.json")).err().unwrap();
        assert!(err.to_string().contains("does not exist"));
    }
}
