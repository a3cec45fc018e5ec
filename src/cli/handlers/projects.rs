use anyhow::Result;
use colored::Colorize;
use tracing::info;

use crate::api::queries;
use crate::cli::ProjectAction;
use crate::display::{render_project, render_projects};
use crate::validation::require_text;

use super::CommandContext;
use super::utils::{optional_text, print_json, resolve_team};

pub fn handle_projects(ctx: &CommandContext, action: ProjectAction) -> Result<()> {
    match action {
        ProjectAction::List { team, json } => {
            let team = match optional_text(team) {
                Some(name) => Some(resolve_team(ctx, &name)?.name),
                None => None,
            };
            let projects = ctx.client.projects(team.as_deref())?;
            if json {
                print_json(&projects)?;
            } else {
                print!("{}", render_projects(&projects, ctx.style));
            }
            Ok(())
        }
        ProjectAction::View { id, json } => {
            let id = require_text("Project ID", &id)?;
            let project = ctx.client.project(&id)?;
            if json {
                print_json(&project)?;
            } else {
                print!("{}", render_project(&project));
            }
            Ok(())
        }
        ProjectAction::Create {
            name,
            team,
            description,
        } => {
            let name = require_text("Project name", &name)?;
            let team = require_text("Team", &team)?;
            let description = optional_text(description);
            ctx.client.guard(queries::CREATE_PROJECT)?;

            let team = resolve_team(ctx, &team)?;
            let project =
                ctx.client
                    .create_project(&name, &[team.id.clone()], description.as_deref())?;
            info!(project = %project.name, team = %team.name, "created project");
            println!("{} {} ({})", "Created".green(), project.name.cyan(), team.name);
            Ok(())
        }
    }
}
