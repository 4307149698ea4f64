//! Subcommands.

use std::{io::Write, path::PathBuf};

use clap::{Args, Subcommand};

use crate::config::AutoformConfig;

mod inspect;
mod render;
mod schema;

/// Shared state handed to every command.
pub struct Context<'a> {
    pub config: AutoformConfig,
    pub out: &'a mut dyn Write,
}

/// Whether a command's check passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed,
}

#[derive(Args, Debug, Clone)]
pub struct SchemaArgs {
    /// JSON Schema file.
    #[arg(short, long)]
    pub schema: PathBuf,
    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ValuesArgs {
    /// Values file (`.json` or `.toml`).
    #[arg(long)]
    pub values: PathBuf,
    /// JSON Schema file; defaults to `<values-stem>-schema.json` next to the values.
    #[arg(short, long)]
    pub schema: Option<PathBuf>,
    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the parsed field tree in display order.
    Fields(SchemaArgs),
    /// Print the schema's default values.
    Defaults(SchemaArgs),
    /// Validate a values file.
    Validate(ValuesArgs),
    /// Prune empty values and validate, as a form submit does.
    Submit(ValuesArgs),
    /// Print a values file with empty entries removed.
    Prune {
        /// Values file (`.json` or `.toml`).
        #[arg(long)]
        values: PathBuf,
    },
    /// Render the form as a text outline.
    Render {
        /// JSON Schema file; defaults to `<values-stem>-schema.json` next to the values.
        #[arg(short, long)]
        schema: Option<PathBuf>,
        /// Values to fill in; schema defaults are used for missing ones.
        #[arg(long)]
        values: Option<PathBuf>,
        /// Validate the values and show errors next to their fields.
        #[arg(long)]
        check: bool,
    },
    /// Print the value at a path such as `address.lines[0]`.
    Get {
        /// Values file (`.json` or `.toml`).
        #[arg(long)]
        values: PathBuf,
        /// Dot/bracket path.
        path: String,
    },
    /// Print the JSON Schema of the configuration file.
    ConfigSchema,
}

impl Command {
    pub fn run(self, ctx: &mut Context<'_>) -> anyhow::Result<Outcome> {
        match self {
            Command::Fields(args) => schema::fields(ctx, &args),
            Command::Defaults(args) => schema::defaults(ctx, &args),
            Command::Validate(args) => inspect::validate(ctx, &args, false),
            Command::Submit(args) => inspect::validate(ctx, &args, true),
            Command::Prune { values } => inspect::prune(ctx, &values),
            Command::Get { values, path } => inspect::get(ctx, &values, &path),
            Command::Render {
                schema,
                values,
                check,
            } => render::render(ctx, schema.as_deref(), values.as_deref(), check),
            Command::ConfigSchema => {
                writeln!(ctx.out, "{}", AutoformConfig::json_schema()?)?;
                Ok(Outcome::Passed)
            }
        }
    }
}
