//! Command line configuration.
//!
//! Stored as TOML, by default in `.autoform.toml` in the working directory.
//! Every key is optional:
//!
//! ```toml
//! [render]
//! color = true
//! descriptions = true
//! defaults = true
//! indent = 2
//!
//! [submit]
//! prune_empty = true
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use autoform_render::{FormOptions, TextTheme};
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default configuration file name.
pub const DEFAULT_CONFIG_PATH: &str = ".autoform.toml";

/// Root configuration.
#[derive(Default, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AutoformConfig {
    /// How forms are rendered.
    pub render: RenderConfig,
    /// How values are prepared on submit.
    pub submit: SubmitConfig,
}

/// Text rendering options.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Emit ANSI colors.
    pub color: bool,
    /// Print field descriptions.
    pub descriptions: bool,
    /// Show schema defaults next to empty fields.
    pub defaults: bool,
    /// Spaces per nesting level.
    pub indent: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            color: true,
            descriptions: true,
            defaults: true,
            indent: 2,
        }
    }
}

/// Submit options.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SubmitConfig {
    /// Drop empty strings, nulls, empty arrays and empty objects before validating.
    pub prune_empty: bool,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self { prune_empty: true }
    }
}

impl AutoformConfig {
    /// Load the configuration.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_PATH`] is
    /// read when present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_PATH);
                if !default.exists() {
                    debug!("no {DEFAULT_CONFIG_PATH}, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn theme(&self) -> TextTheme {
        TextTheme {
            color: self.render.color,
            show_descriptions: self.render.descriptions,
            show_defaults: self.render.defaults,
        }
    }

    pub fn form_options(&self) -> FormOptions {
        FormOptions {
            prune_empty: self.submit.prune_empty,
            indent: self.render.indent,
        }
    }

    /// JSON Schema of the configuration file.
    pub fn json_schema() -> anyhow::Result<String> {
        let schema = schemars::schema_for!(AutoformConfig);
        Ok(serde_json::to_string_pretty(&schema)?)
    }
}
