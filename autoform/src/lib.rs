//! # autoform
//!
//! Command line front end for schema-driven forms.
//!
//! Takes a JSON Schema, optionally a values file in JSON or TOML, and
//! prints the parsed field tree, the defaults, a rendered text form or
//! the validation result.
//!
//! ## Modules
//!
//! - [`commands`] - Subcommands and their shared context
//! - [`config`] - `.autoform.toml` loading
//! - [`input`] - Schema and values file loading

/// Subcommands and their shared context.
pub mod commands;

/// Command line configuration.
pub mod config;

/// Loading schemas and value files.
pub mod input;

pub use commands::{Command, Context, Outcome};
pub use config::AutoformConfig;
