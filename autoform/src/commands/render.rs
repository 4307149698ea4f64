use std::path::Path;

use autoform_core::{Value, parse_schema, validate_schema};
use autoform_render::{AutoForm, text_components};
use log::debug;
use serde_json::Map;

use super::{Context, Outcome};
use crate::input::{load_provider, load_values, resolve_schema_path};

/// Render the form for a schema, filled with `values` over the defaults.
///
/// With `check`, the filled values are validated and each error is shown
/// under its field; the command then fails if any error was found.
pub fn render(
    ctx: &mut Context<'_>,
    schema: Option<&Path>,
    values: Option<&Path>,
    check: bool,
) -> anyhow::Result<Outcome> {
    let schema_path = resolve_schema_path(schema, values)?;
    let provider = load_provider(&schema_path)?;
    let values = match values {
        Some(path) => load_values(path)?,
        None => Map::new(),
    };
    let values = Value::Object(AutoForm::initial_values(&provider, &values));

    let errors = if check {
        validate_schema(&provider, &values).errors().to_vec()
    } else {
        Vec::new()
    };
    debug!("rendering with {} validation errors", errors.len());

    let form = AutoForm::new(text_components(ctx.config.theme())).with_options(ctx.config.form_options());
    let text = form.render_to_string(&parse_schema(&provider), &values, &errors)?;
    write!(ctx.out, "{text}")?;

    Ok(if errors.is_empty() {
        Outcome::Passed
    } else {
        Outcome::Failed
    })
}
