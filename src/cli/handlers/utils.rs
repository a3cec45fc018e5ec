use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, Read};

use crate::analytics::CapitalizationMarkers;
use crate::api::{Team, find_team};
use crate::error::LinearError;
use crate::validation::sanitize_text;

use super::CommandContext;

/// Resolve text from a CLI arg, or read stdin when absent or `-`
pub fn resolve_text(arg: Option<String>) -> Result<String> {
    match arg {
        Some(text) if text != "-" => Ok(text),
        _ => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read from stdin")?;
            Ok(content.trim().to_string())
        }
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Trimmed, sanitized optional text; blank becomes `None`
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| sanitize_text(&v))
        .filter(|v| !v.is_empty())
}

/// Team from the flag, falling back to the configured default team
pub fn team_or_default(ctx: &CommandContext, team: Option<String>) -> Result<String> {
    optional_text(team)
        .or_else(|| ctx.config.default_team.clone())
        .ok_or_else(|| {
            LinearError::Validation(
                "No team given. Pass --team or set LINEAR_DEFAULT_TEAM".to_string(),
            )
            .into()
        })
}

/// Look up a team by name or key among all teams
pub fn resolve_team(ctx: &CommandContext, name: &str) -> Result<Team> {
    let teams = ctx.client.teams()?;
    Ok(find_team(&teams, name)?.clone())
}

/// Markers from `--labels`, otherwise the configured ones
pub fn markers_or_config(ctx: &CommandContext, labels: Option<&str>) -> CapitalizationMarkers {
    match labels {
        Some(raw) => CapitalizationMarkers::parse(raw),
        None => ctx.config.capitalization_markers.clone(),
    }
}
