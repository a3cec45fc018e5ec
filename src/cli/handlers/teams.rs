use anyhow::Result;
use colored::Colorize;
use tracing::info;

use crate::api::{Team, find_team, queries};
use crate::cli::TeamAction;
use crate::display::{render_team, render_teams};
use crate::error::LinearError;
use crate::validation::require_text;

use super::CommandContext;
use super::utils::{optional_text, print_json};

/// Longest team key the tracker accepts.
const MAX_KEY_LENGTH: usize = 7;

pub fn handle_teams(ctx: &CommandContext, action: TeamAction) -> Result<()> {
    match action {
        TeamAction::List { json } => {
            let mut teams = ctx.client.teams()?;
            teams.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            if json {
                print_json(&teams)?;
            } else {
                print!("{}", render_teams(&teams, ctx.style));
            }
            Ok(())
        }
        TeamAction::View { team, json } => {
            let team = require_text("Team", &team)?;
            let team = lookup_team(ctx, &team)?;
            if json {
                print_json(&team)?;
            } else {
                print!("{}", render_team(&team, ctx.style));
            }
            Ok(())
        }
        TeamAction::Create {
            name,
            key,
            description,
        } => {
            let name = require_text("Team name", &name)?;
            let key = validate_team_key(&key)?;
            let description = optional_text(description);
            ctx.client.guard(queries::CREATE_TEAM)?;

            let team = ctx.client.create_team(&name, &key, description.as_deref())?;
            info!(team = %team.name, key = %team.key, "created team");
            println!("{} {} {}", "Created".green(), team.key.cyan(), team.name);
            Ok(())
        }
    }
}

/// Matches by name or key first; anything else is treated as a team ID.
fn lookup_team(ctx: &CommandContext, reference: &str) -> Result<Team> {
    let teams = ctx.client.teams()?;
    let id = match find_team(&teams, reference) {
        Ok(team) => team.id.clone(),
        Err(_) if teams.iter().any(|t| t.id == reference) => reference.to_string(),
        Err(e) => return Err(e.into()),
    };
    Ok(ctx.client.team(&id)?)
}

fn validate_team_key(key: &str) -> Result<String, LinearError> {
    let key = require_text("Team key", key)?.to_uppercase();
    let valid = key.len() <= MAX_KEY_LENGTH
        && key.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && key.chars().all(|c| c.is_ascii_alphanumeric());
    if !valid {
        return Err(LinearError::Validation(format!(
            "'{}' is not a valid team key (letters and digits, starting with a letter, at most {} characters)",
            key, MAX_KEY_LENGTH
        )));
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_team_key() {
        assert_eq!(validate_team_key(" eng ").unwrap(), "ENG");
        assert_eq!(validate_team_key("Ops2").unwrap(), "OPS2");
        assert!(validate_team_key("2FA").is_err());
        assert!(validate_team_key("EN-G").is_err());
        assert!(validate_team_key("TOOLONGKEY").is_err());
        assert!(validate_team_key("   ").is_err());
    }
}
