use std::io::Write;

use autoform_core::{ParsedField, get_default_values, get_label, parse_schema};
use colored::Colorize;

use super::{Context, Outcome, SchemaArgs};
use crate::input::load_provider;

pub fn fields(ctx: &mut Context<'_>, args: &SchemaArgs) -> anyhow::Result<Outcome> {
    let provider = load_provider(&args.schema)?;
    let schema = parse_schema(&provider);

    if args.json {
        writeln!(ctx.out, "{}", serde_json::to_string_pretty(&schema)?)?;
    } else {
        let color = ctx.config.render.color;
        for field in &schema.fields {
            write_field(ctx.out, field, 0, color)?;
        }
    }
    Ok(Outcome::Passed)
}

pub fn defaults(ctx: &mut Context<'_>, args: &SchemaArgs) -> anyhow::Result<Outcome> {
    let provider = load_provider(&args.schema)?;
    let defaults = serde_json::Value::Object(get_default_values(&provider));
    let text = if args.json {
        serde_json::to_string_pretty(&defaults)?
    } else {
        toml::to_string_pretty(&defaults)?
    };
    write!(ctx.out, "{text}")?;
    if !text.ends_with('\n') {
        writeln!(ctx.out)?;
    }
    Ok(Outcome::Passed)
}

/// `key: type` lines, children indented below their parent.
fn write_field(
    out: &mut dyn Write,
    field: &ParsedField,
    depth: usize,
    color: bool,
) -> std::io::Result<()> {
    let pad = depth * 2;
    let mut line = format!("{:pad$}{}", "", field.key);
    if field.required {
        line.push('*');
    }
    let mut details = vec![field.field_type.to_string()];
    if field.field_config.as_ref().is_some_and(|c| c.label.is_some()) {
        details.push(format!("label={:?}", get_label(field)));
    }
    if field.order() != 0 {
        details.push(format!("order={}", field.order()));
    }
    if let Some(default) = &field.default {
        details.push(format!("default={default}"));
    }
    let details = details.join(", ");
    if color {
        writeln!(out, "{line} {}", format!("({details})").dimmed())?;
    } else {
        writeln!(out, "{line} ({details})")?;
    }

    for child in field.children() {
        write_field(out, child, depth + 1, color)?;
    }
    Ok(())
}
