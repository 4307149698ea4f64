use std::path::Path;

use anyhow::bail;
use autoform_core::{FieldPath, SchemaValidation, Value, get_path_in_object, remove_empty_values, validate_schema};
use autoform_render::{AutoForm, text_components};
use colored::Colorize;
use log::info;

use super::{Context, Outcome, ValuesArgs};
use crate::input::{load_provider, load_values, resolve_schema_path};

/// Validate a values file, pruning it first when `submit` is set.
pub fn validate(ctx: &mut Context<'_>, args: &ValuesArgs, submit: bool) -> anyhow::Result<Outcome> {
    let schema_path = resolve_schema_path(args.schema.as_deref(), Some(&args.values))?;
    let provider = load_provider(&schema_path)?;
    let values = load_values(&args.values)?;
    info!(
        "validating {} against {}",
        args.values.display(),
        schema_path.display()
    );

    let result = if submit {
        AutoForm::new(text_components(ctx.config.theme()))
            .with_options(ctx.config.form_options())
            .submit(&provider, &values)
    } else {
        validate_schema(&provider, &Value::Object(values))
    };

    let color = ctx.config.render.color;
    match result {
        SchemaValidation::Success(data) => {
            if args.json {
                writeln!(ctx.out, "{}", serde_json::to_string_pretty(&data)?)?;
            } else if color {
                writeln!(ctx.out, "{}", "OK".green())?;
            } else {
                writeln!(ctx.out, "OK")?;
            }
            Ok(Outcome::Passed)
        }
        SchemaValidation::Failure(errors) => {
            if args.json {
                writeln!(ctx.out, "{}", serde_json::to_string_pretty(&errors)?)?;
            } else {
                for error in &errors {
                    let line = if error.path.is_root() {
                        format!("(root): {}", error.message)
                    } else {
                        error.to_string()
                    };
                    if color {
                        writeln!(ctx.out, "{}", line.red())?;
                    } else {
                        writeln!(ctx.out, "{line}")?;
                    }
                }
            }
            Ok(Outcome::Failed)
        }
    }
}

pub fn prune(ctx: &mut Context<'_>, values: &Path) -> anyhow::Result<Outcome> {
    let pruned = remove_empty_values(&load_values(values)?);
    writeln!(ctx.out, "{}", serde_json::to_string_pretty(&pruned)?)?;
    Ok(Outcome::Passed)
}

pub fn get(ctx: &mut Context<'_>, values: &Path, path: &str) -> anyhow::Result<Outcome> {
    let values = Value::Object(load_values(values)?);
    let path = FieldPath::parse(path);
    let Some(value) = get_path_in_object(&values, &path) else {
        bail!("No value at `{path}`");
    };
    let text = match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other)?,
    };
    writeln!(ctx.out, "{text}")?;
    Ok(Outcome::Passed)
}
