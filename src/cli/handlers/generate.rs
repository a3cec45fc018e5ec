use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;

use crate::api::{IssueCreateInput, queries};
use crate::validation::parse_label_list;

use super::CommandContext;
use super::utils::{resolve_team, team_or_default};

pub const MAX_GENERATED: usize = 50;
const BATCH_ID_LENGTH: usize = 6;

const SUBJECTS: &[&str] = &[
    "billing export",
    "login flow",
    "search index",
    "audit log",
    "onboarding checklist",
    "webhook retries",
    "invoice PDF",
    "team settings",
];
const VERBS: &[&str] = &["Fix", "Refactor", "Add tests for", "Document", "Speed up"];
const ESTIMATES: &[u8] = &[1, 2, 3, 5, 8];

pub struct GenerateParams {
    pub team: Option<String>,
    pub count: usize,
    pub labels: Option<String>,
}

pub fn handle_generate(ctx: &CommandContext, params: GenerateParams) -> Result<()> {
    let team_name = team_or_default(ctx, params.team)?;
    let count = params.count.clamp(1, MAX_GENERATED);
    let labels = params.labels.as_deref().map(parse_label_list).unwrap_or_default();
    ctx.client.guard(&queries::create_issue_mutation())?;

    let team = resolve_team(ctx, &team_name)?;
    let label_ids = ctx.client.label_ids(&labels)?;
    let batch = batch_id();
    info!(batch = %batch, team = %team.name, count, "generating issues");

    for n in 0..count {
        let input = IssueCreateInput {
            title: generated_title(n, &batch),
            team_id: team.id.clone(),
            description: Some(format!(
                "Generated by linear-analytics (batch `{}`, {} of {}).",
                batch,
                n + 1,
                count
            )),
            priority: Some(generated_priority(n)),
            estimate: Some(generated_estimate(n)),
            label_ids: label_ids.clone(),
            ..IssueCreateInput::default()
        };
        let issue = ctx
            .client
            .create_issue(&input)
            .with_context(|| format!("Failed after creating {} of {} issues", n, count))?;
        println!("{} {} {}", "Created".green(), issue.identifier.cyan(), issue.title);
    }

    println!(
        "{} {} issue(s) in {} (batch {})",
        "Generated".green(),
        count,
        team.name,
        batch.cyan()
    );
    Ok(())
}

fn batch_id() -> String {
    const ALPHABET: [char; 36] = [
        '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h',
        'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
    ];
    nanoid::format(nanoid::rngs::default, &ALPHABET, BATCH_ID_LENGTH)
}

fn generated_title(n: usize, batch: &str) -> String {
    let verb = VERBS[n % VERBS.len()];
    let subject = SUBJECTS[(n / VERBS.len() + n) % SUBJECTS.len()];
    format!("{} {} [{}]", verb, subject, batch)
}

/// Cycles through 1 (urgent) to 4 (low).
fn generated_priority(n: usize) -> u8 {
    (n % 4) as u8 + 1
}

fn generated_estimate(n: usize) -> u8 {
    ESTIMATES[n % ESTIMATES.len()]
}
