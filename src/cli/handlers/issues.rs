use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;

use crate::api::{IssueCreateInput, IssueFilter, IssueUpdateInput, queries};
use crate::cli::IssueAction;
use crate::display::{render_issue, render_issue_list};
use crate::error::LinearError;
use crate::validation::{
    clamp_limit, parse_label_list, require_text, validate_issue_id, validate_priority,
    validate_title,
};

use super::CommandContext;
use super::utils::{optional_text, print_json, resolve_team, resolve_text, team_or_default};

pub fn handle_issues(ctx: &CommandContext, action: IssueAction) -> Result<()> {
    match action {
        IssueAction::List {
            team,
            assignee,
            status,
            limit,
            detail,
            json,
        } => handle_list(ctx, team, assignee, status, limit, detail, json),
        IssueAction::View { id, json } => handle_view(ctx, &id, json),
        IssueAction::Create {
            title,
            team,
            description,
            assignee,
            status,
            priority,
            labels,
            json,
        } => handle_create(
            ctx,
            IssueArgs {
                title: Some(title),
                description,
                assignee,
                status,
                priority,
                labels,
            },
            team,
            json,
        ),
        IssueAction::Update {
            id,
            title,
            description,
            assignee,
            status,
            priority,
            labels,
            json,
        } => handle_update(
            ctx,
            &id,
            IssueArgs {
                title,
                description,
                assignee,
                status,
                priority,
                labels,
            },
            json,
        ),
        IssueAction::Comment { id, text } => handle_comment(ctx, &id, text),
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_list(
    ctx: &CommandContext,
    team: Option<String>,
    assignee: Option<String>,
    status: Option<String>,
    limit: usize,
    detail: bool,
    json: bool,
) -> Result<()> {
    let limit = clamp_limit(limit);
    let team = optional_text(team);
    let assignee = optional_text(assignee);
    let status = optional_text(status);

    let mut filter = IssueFilter {
        status,
        ..IssueFilter::default()
    };
    if let Some(name) = team {
        filter.team = Some(resolve_team(ctx, &name)?.name);
    }
    if let Some(who) = assignee {
        filter.assignee_id = Some(ctx.client.get_user_id(&who)?);
    }

    let issues = ctx.client.issues(&filter, Some(limit))?;

    if json {
        print_json(&issues)?;
    } else {
        print!("{}", render_issue_list(&issues, detail, ctx.style));
    }
    Ok(())
}

fn handle_view(ctx: &CommandContext, id: &str, json: bool) -> Result<()> {
    let id = validate_issue_id(id)?;
    let issue = ctx.client.issue(&id)?;

    if json {
        print_json(&issue)?;
    } else {
        print!("{}", render_issue(&issue));
    }
    Ok(())
}

/// Raw field arguments shared by `create` and `update`
#[derive(Debug, Default)]
struct IssueArgs {
    title: Option<String>,
    description: Option<String>,
    assignee: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    labels: Option<String>,
}

/// Field values after local validation, before any name lookups
#[derive(Debug, Default, PartialEq)]
struct IssueFields {
    title: Option<String>,
    description: Option<String>,
    assignee: Option<String>,
    status: Option<String>,
    priority: Option<u8>,
    labels: Option<Vec<String>>,
}

impl IssueFields {
    fn is_empty(&self) -> bool {
        *self == IssueFields::default()
    }
}

fn validate_fields(args: IssueArgs) -> Result<IssueFields, LinearError> {
    Ok(IssueFields {
        title: args.title.as_deref().map(validate_title).transpose()?,
        description: optional_text(args.description),
        assignee: optional_text(args.assignee),
        status: optional_text(args.status),
        priority: args.priority.as_deref().map(validate_priority).transpose()?,
        labels: args.labels.as_deref().map(parse_label_list),
    })
}

fn handle_create(
    ctx: &CommandContext,
    args: IssueArgs,
    team: Option<String>,
    json: bool,
) -> Result<()> {
    let fields = validate_fields(args)?;
    let title = fields
        .title
        .ok_or_else(|| LinearError::Validation("Title cannot be empty".to_string()))?;
    let team_name = team_or_default(ctx, team)?;
    ctx.client.guard(&queries::create_issue_mutation())?;

    let team = resolve_team(ctx, &team_name)?;
    let assignee_id = fields
        .assignee
        .map(|who| ctx.client.get_user_id(&who))
        .transpose()?;
    let state_id = fields
        .status
        .map(|status| ctx.client.workflow_state_id(&team.id, &status))
        .transpose()?;
    let label_ids = ctx.client.label_ids(&fields.labels.unwrap_or_default())?;

    let input = IssueCreateInput {
        title,
        team_id: team.id.clone(),
        description: fields.description,
        assignee_id,
        state_id,
        priority: fields.priority,
        label_ids,
        ..IssueCreateInput::default()
    };
    let issue = ctx
        .client
        .create_issue(&input)
        .with_context(|| format!("Failed to create issue in team {}", team.name))?;
    info!(identifier = %issue.identifier, team = %team.name, "created issue");

    if json {
        print_json(&issue)?;
    } else {
        println!("{} {} {}", "Created".green(), issue.identifier.cyan(), issue.title);
        if let Some(url) = &issue.url {
            println!("{}", url.dimmed());
        }
    }
    Ok(())
}

fn handle_update(ctx: &CommandContext, id: &str, args: IssueArgs, json: bool) -> Result<()> {
    let id = validate_issue_id(id)?;
    let fields = validate_fields(args)?;
    if fields.is_empty() {
        return Err(LinearError::Validation(
            "Nothing to update. Pass at least one of --title, --description, --assignee, \
             --status, --priority or --labels"
                .to_string(),
        )
        .into());
    }
    ctx.client.guard(&queries::update_issue_mutation())?;

    let current = ctx.client.issue(&id)?;
    let assignee_id = fields
        .assignee
        .map(|who| ctx.client.get_user_id(&who))
        .transpose()?;
    let state_id = match fields.status {
        Some(status) => {
            let team = current.team.as_ref().ok_or_else(|| {
                LinearError::Lookup(format!("Issue {} has no team to resolve status", id))
            })?;
            Some(ctx.client.workflow_state_id(&team.id, &status)?)
        }
        None => None,
    };
    let label_ids = fields
        .labels
        .map(|names| ctx.client.label_ids(&names))
        .transpose()?;

    let input = IssueUpdateInput {
        title: fields.title,
        description: fields.description,
        assignee_id,
        state_id,
        priority: fields.priority,
        label_ids,
    };
    let issue = ctx
        .client
        .update_issue(&current.id, &input)
        .with_context(|| format!("Failed to update {}", id))?;
    info!(identifier = %issue.identifier, "updated issue");

    if json {
        print_json(&issue)?;
    } else {
        println!("{} {} {}", "Updated".green(), issue.identifier.cyan(), issue.title);
    }
    Ok(())
}

fn handle_comment(ctx: &CommandContext, id: &str, text: Option<String>) -> Result<()> {
    let id = validate_issue_id(id)?;
    let body = require_text("Comment", &resolve_text(text)?)?;
    ctx.client.guard(queries::CREATE_COMMENT)?;

    let issue = ctx.client.issue(&id)?;
    ctx.client.create_comment(&issue.id, &body)?;
    info!(identifier = %issue.identifier, "added comment");

    println!("{} {}", "Commented on".green(), issue.identifier.cyan());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_fields_normalises_input() {
        let fields = validate_fields(IssueArgs {
            title: Some("  Fix login  ".into()),
            priority: Some("2".into()),
            labels: Some("bug, capex,,".into()),
            status: Some(" In Progress ".into()),
            ..IssueArgs::default()
        })
        .unwrap();

        assert_eq!(fields.title.as_deref(), Some("Fix login"));
        assert_eq!(fields.priority, Some(2));
        assert_eq!(fields.labels, Some(vec!["bug".to_string(), "capex".to_string()]));
        assert_eq!(fields.status.as_deref(), Some("In Progress"));
        assert!(fields.assignee.is_none());
    }

    #[test]
    fn test_validate_fields_rejects_bad_priority() {
        let err = validate_fields(IssueArgs {
            priority: Some("7".into()),
            ..IssueArgs::default()
        })
        .unwrap_err();
        assert!(matches!(err, LinearError::Validation(_)));
    }

    #[test]
    fn test_validate_fields_rejects_blank_title() {
        let err = validate_fields(IssueArgs {
            title: Some("   ".into()),
            ..IssueArgs::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("Title"));
    }

    #[test]
    fn test_blank_optional_fields_count_as_empty() {
        let fields = validate_fields(IssueArgs {
            description: Some("  ".into()),
            assignee: Some("".into()),
            ..IssueArgs::default()
        })
        .unwrap();
        assert!(fields.is_empty());
    }

    #[test]
    fn test_empty_label_list_still_counts_as_update() {
        let fields = validate_fields(IssueArgs {
            labels: Some(String::new()),
            ..IssueArgs::default()
        })
        .unwrap();
        assert_eq!(fields.labels, Some(Vec::new()));
        assert!(!fields.is_empty());
    }
}
