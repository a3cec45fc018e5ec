use anyhow::{Context, Result};
use tracing::debug;

use crate::analytics::{capitalization_report, engineer_workload, generate_report};
use crate::api::{Issue, IssueFilter, Project, Team};
use crate::cli::{AnalyticsAction, OutputFormat};
use crate::display::{render_capitalization_report, render_report, render_workload};

use super::CommandContext;
use super::utils::{markers_or_config, optional_text, print_json, resolve_team};

/// Teams, projects and issues in scope for a report
struct Dataset {
    teams: Vec<Team>,
    projects: Vec<Project>,
    issues: Vec<Issue>,
}

pub fn handle_analytics(ctx: &CommandContext, action: AnalyticsAction) -> Result<()> {
    match action {
        AnalyticsAction::Report { format, team } => {
            let data = fetch(ctx, team, true)?;
            let report = generate_report(&data.teams, &data.projects, &data.issues);
            match format {
                OutputFormat::Json => print_json(&report)?,
                OutputFormat::Table => print!("{}", render_report(&report, ctx.style)),
            }
            Ok(())
        }
        AnalyticsAction::Capitalization {
            format,
            team,
            labels,
        } => {
            let markers = markers_or_config(ctx, labels.as_deref());
            let data = fetch(ctx, team, true)?;
            let report = capitalization_report(&data.issues, &data.projects, &markers);
            match format {
                OutputFormat::Json => print_json(&report)?,
                OutputFormat::Table => {
                    print!("{}", render_capitalization_report(&report, ctx.style))
                }
            }
            Ok(())
        }
        AnalyticsAction::Workload {
            format,
            team,
            labels,
        } => {
            let markers = markers_or_config(ctx, labels.as_deref());
            let data = fetch(ctx, team, false)?;
            let workload = engineer_workload(&data.issues, &markers);
            match format {
                OutputFormat::Json => print_json(&workload)?,
                OutputFormat::Table if workload.is_empty() => println!("No issues found."),
                OutputFormat::Table => print!("{}", render_workload(&workload, ctx.style)),
            }
            Ok(())
        }
    }
}

/// Fetches every issue (and optionally projects) for one team or the
/// whole workspace.
fn fetch(ctx: &CommandContext, team: Option<String>, with_projects: bool) -> Result<Dataset> {
    let (teams, team_filter) = match optional_text(team) {
        Some(name) => {
            let team = resolve_team(ctx, &name)?;
            let filter = Some(team.name.clone());
            (vec![team], filter)
        }
        None => (ctx.client.teams().context("Failed to fetch teams")?, None),
    };

    let projects = if with_projects {
        ctx.client
            .projects(team_filter.as_deref())
            .context("Failed to fetch projects")?
    } else {
        Vec::new()
    };
    let issues = ctx
        .client
        .all_issues(&IssueFilter::for_team(team_filter))
        .context("Failed to fetch issues")?;
    debug!(
        teams = teams.len(),
        projects = projects.len(),
        issues = issues.len(),
        "fetched analytics dataset"
    );

    Ok(Dataset {
        teams,
        projects,
        issues,
    })
}
