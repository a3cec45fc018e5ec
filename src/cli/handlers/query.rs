use anyhow::{Context, Result};
use serde_json::Value;

use crate::error::LinearError;
use crate::validation::require_text;

use super::CommandContext;
use super::utils::{print_json, resolve_text};

pub fn handle_query(
    ctx: &CommandContext,
    document: String,
    variables: Option<String>,
) -> Result<()> {
    let document = require_text("Query", &resolve_text(Some(document))?)?;
    let vars = parse_variables(variables.as_deref())?;

    let data = ctx.client.query(&document, vars)?;
    print_json(&data)
}

/// Variables must be a JSON object; absent means none.
fn parse_variables(raw: Option<&str>) -> Result<Value> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(Value::Null);
    };
    let value: Value = serde_json::from_str(raw).context("--variables is not valid JSON")?;
    match value {
        Value::Object(_) | Value::Null => Ok(value),
        _ => Err(LinearError::Validation("--variables must be a JSON object".to_string()).into()),
    }
}
