use super::OutputStyle;
use super::format::{format_points, format_priority, format_rate, format_status};
use super::table::Table;
use crate::analytics::{
    CapitalizationMetrics, CapitalizationReport, EngineerWorkload, ProjectContributors, Report,
    UNASSIGNED, UNKNOWN,
};
use crate::api::{Issue, Project, Team};
use colored::Colorize;
use std::collections::BTreeMap;
use std::fmt::Write;

const MAX_TITLE_WIDTH: usize = 60;

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

fn heading(out: &mut String, text: &str) {
    if !out.is_empty() {
        out.push('\n');
    }
    let _ = writeln!(out, "{}", text.bold());
}

/// Adds a titled count table, largest count first; skipped when empty.
fn push_counts(
    out: &mut String,
    title: &str,
    label: &str,
    counts: &BTreeMap<String, usize>,
    style: OutputStyle,
) {
    if counts.is_empty() {
        return;
    }
    let mut rows: Vec<_> = counts.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let mut table = Table::new([label, "Count"]).align_right(&[1]);
    for (name, count) in rows {
        table.add_row([name.clone(), count.to_string()]);
    }
    heading(out, title);
    out.push_str(&table.render(style));
}

pub fn render_issue_list(issues: &[Issue], detail: bool, style: OutputStyle) -> String {
    if issues.is_empty() {
        return "No issues found.\n".to_string();
    }

    let mut headers = vec!["ID", "Status", "Priority", "Title", "Assignee"];
    if detail {
        headers.extend(["Team", "Project", "Estimate", "Labels"]);
    }
    let mut table = Table::new(headers);

    for issue in issues {
        let status = match &issue.state {
            Some(state) => format_status(&state.name, state.state_type.as_deref()).to_string(),
            None => UNKNOWN.dimmed().to_string(),
        };
        let title = match style {
            OutputStyle::Table => truncate(&issue.title, MAX_TITLE_WIDTH),
            OutputStyle::Plain => issue.title.clone(),
        };
        let mut row = vec![
            issue.identifier.cyan().to_string(),
            status,
            format_priority(issue.priority).to_string(),
            title,
            issue.assignee_name().unwrap_or(UNASSIGNED).to_string(),
        ];
        if detail {
            row.push(issue.team_name().unwrap_or("-").to_string());
            row.push(issue.project_name().unwrap_or("-").to_string());
            row.push(issue.estimate.map(format_points).unwrap_or_else(|| "-".to_string()));
            row.push(issue.label_names().collect::<Vec<_>>().join(", "));
        }
        table.add_row(row);
    }

    let mut out = table.render(style);
    let _ = writeln!(out, "{} issue(s)", issues.len());
    out
}

pub fn render_issue(issue: &Issue) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", issue.identifier.cyan().bold(), issue.title.bold());
    if let Some(state) = &issue.state {
        let _ = writeln!(
            out,
            "Status:    {}",
            format_status(&state.name, state.state_type.as_deref())
        );
    }
    let _ = writeln!(out, "Priority:  {}", format_priority(issue.priority));
    if let Some(team) = &issue.team {
        let _ = writeln!(out, "Team:      {} ({})", team.name, team.key);
    }
    let _ = writeln!(out, "Assignee:  {}", issue.assignee_name().unwrap_or(UNASSIGNED));
    if let Some(project) = issue.project_name() {
        let _ = writeln!(out, "Project:   {}", project);
    }
    if let Some(estimate) = issue.estimate {
        let _ = writeln!(out, "Estimate:  {}", format_points(estimate));
    }
    let labels: Vec<_> = issue.label_names().collect();
    if !labels.is_empty() {
        let _ = writeln!(out, "Labels:    {}", labels.join(", ").magenta());
    }
    let _ = writeln!(
        out,
        "Created:   {}",
        issue.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed()
    );
    if let Some(started) = issue.started_at {
        let _ = writeln!(out, "Started:   {}", started.format("%Y-%m-%d %H:%M"));
    }
    if let Some(completed) = issue.completed_at {
        let _ = writeln!(out, "Completed: {}", completed.format("%Y-%m-%d %H:%M"));
    }
    if let Some(url) = &issue.url {
        let _ = writeln!(out, "URL:       {}", url.blue());
    }
    if let Some(description) = issue.description.as_deref().filter(|d| !d.trim().is_empty()) {
        let _ = writeln!(out, "\n{}", description.trim_end());
    }
    if let Some(comments) = issue.comments.as_ref().filter(|c| !c.nodes.is_empty()) {
        let _ = writeln!(out, "\n{} ({})", "Comments".bold(), comments.nodes.len());
        for comment in &comments.nodes {
            let author = comment.user.as_ref().map(|u| u.label()).unwrap_or("Unknown");
            let _ = writeln!(
                out,
                "{} {}\n{}\n",
                author.cyan(),
                comment.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
                comment.body.trim_end()
            );
        }
    }
    out
}

pub fn render_teams(teams: &[Team], style: OutputStyle) -> String {
    if teams.is_empty() {
        return "No teams found.\n".to_string();
    }
    let mut table = Table::new(["Key", "Name", "ID"]);
    for team in teams {
        table.add_row([team.key.cyan().to_string(), team.name.clone(), team.id.clone()]);
    }
    table.render(style)
}

pub fn render_team(team: &Team, style: OutputStyle) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", team.key.cyan().bold(), team.name.bold());
    let _ = writeln!(out, "ID:        {}", team.id.dimmed());
    if let Some(description) = team.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "\n{}", description);
    }

    if !team.members.nodes.is_empty() {
        let mut members = Table::new(["Name", "Email"]);
        for user in &team.members.nodes {
            members.add_row([user.label().to_string(), user.email.clone().unwrap_or_default()]);
        }
        heading(&mut out, &format!("Members ({})", team.members.nodes.len()));
        out.push_str(&members.render(style));
    }

    if !team.states.nodes.is_empty() {
        let mut states: Vec<_> = team.states.nodes.iter().collect();
        states.sort_by(|a, b| {
            a.position
                .unwrap_or_default()
                .total_cmp(&b.position.unwrap_or_default())
        });
        let mut table = Table::new(["State", "Type"]);
        for state in states {
            table.add_row([
                format_status(&state.name, state.state_type.as_deref()).to_string(),
                state.state_type.clone().unwrap_or_default(),
            ]);
        }
        heading(&mut out, "Workflow states");
        out.push_str(&table.render(style));
    }
    out
}

pub fn render_projects(projects: &[Project], style: OutputStyle) -> String {
    if projects.is_empty() {
        return "No projects found.\n".to_string();
    }
    let mut table = Table::new(["Name", "State", "Teams", "Lead", "Target"]);
    for project in projects {
        table.add_row([
            project.name.clone(),
            project.state.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            project.team_names().join(", "),
            project
                .lead
                .as_ref()
                .map(|u| u.label().to_string())
                .unwrap_or_else(|| "-".to_string()),
            project.target_date.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    table.render(style)
}

pub fn render_project(project: &Project) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", project.name.bold());
    let _ = writeln!(out, "ID:        {}", project.id.dimmed());
    let _ = writeln!(out, "State:     {}", project.state.as_deref().unwrap_or(UNKNOWN));
    let teams = project.team_names();
    if !teams.is_empty() {
        let _ = writeln!(out, "Teams:     {}", teams.join(", "));
    }
    if let Some(lead) = &project.lead {
        let _ = writeln!(out, "Lead:      {}", lead.label());
    }
    let labels: Vec<_> = project.label_names().collect();
    if !labels.is_empty() {
        let _ = writeln!(out, "Labels:    {}", labels.join(", ").magenta());
    }
    if let Some(start) = &project.start_date {
        let _ = writeln!(out, "Start:     {}", start);
    }
    if let Some(target) = &project.target_date {
        let _ = writeln!(out, "Target:    {}", target);
    }
    if let Some(progress) = project.progress {
        let _ = writeln!(out, "Progress:  {}", format_rate(progress * 100.0));
    }
    if let Some(description) = project.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "\n{}", description);
    }
    out
}

pub fn render_report(report: &Report, style: OutputStyle) -> String {
    let mut out = String::new();
    let summary = &report.summary;

    let mut table = Table::new(["Metric", "Value"]).align_right(&[1]);
    table.add_row(["Teams".to_string(), summary.teams.to_string()]);
    table.add_row(["Projects".to_string(), summary.projects.to_string()]);
    table.add_row(["Issues".to_string(), summary.issues.to_string()]);
    table.add_row(["Completed issues".to_string(), summary.completed_issues.to_string()]);
    table.add_row(["Unassigned issues".to_string(), summary.unassigned_issues.to_string()]);
    heading(&mut out, "Summary");
    out.push_str(&table.render(style));

    push_counts(&mut out, "Issues by status", "Status", &report.issues_by_status, style);
    push_counts(&mut out, "Issues by team", "Team", &report.issues_by_team, style);
    push_counts(&mut out, "Projects by state", "State", &report.projects_by_state, style);

    if !report.completion_rates.is_empty() {
        let mut table = Table::new(["Team", "Total", "Completed", "Rate"]).align_right(&[1, 2, 3]);
        for (team, rate) in &report.completion_rates {
            table.add_row([
                team.clone(),
                rate.total.to_string(),
                rate.completed.to_string(),
                format_rate(rate.rate).to_string(),
            ]);
        }
        heading(&mut out, "Completion rate by team");
        out.push_str(&table.render(style));
    }
    out
}

pub fn render_capitalization_metrics(
    metrics: &CapitalizationMetrics,
    style: OutputStyle,
) -> String {
    let mut out = String::new();
    let overall = &metrics.overall;
    if overall.total_issues == 0 {
        return "No issues to classify.\n".to_string();
    }

    let _ = writeln!(
        out,
        "{} {}",
        "Marker labels:".dimmed(),
        metrics.marker_labels.as_slice().join(", ")
    );
    let mut table = Table::new(["Metric", "Value"]).align_right(&[1]);
    table.add_row(["Total issues".to_string(), overall.total_issues.to_string()]);
    table.add_row(["Capitalized".to_string(), overall.capitalized_count.to_string()]);
    table.add_row(["Non-capitalized".to_string(), overall.non_capitalized_count.to_string()]);
    table.add_row([
        "Capitalization rate".to_string(),
        format_rate(overall.capitalization_rate).to_string(),
    ]);
    heading(&mut out, "Capitalization");
    out.push_str(&table.render(style));

    if !metrics.by_team.is_empty() {
        let mut table = Table::new(["Team", "Total", "Capitalized", "Non-capitalized", "Rate"])
            .align_right(&[1, 2, 3, 4]);
        for (team, split) in &metrics.by_team {
            table.add_row([
                team.clone(),
                split.total_issues.to_string(),
                split.capitalized_count.to_string(),
                split.non_capitalized_count.to_string(),
                format_rate(split.capitalization_rate).to_string(),
            ]);
        }
        heading(&mut out, "Capitalization by team");
        out.push_str(&table.render(style));
    }
    out
}

pub fn render_workload(workloads: &[EngineerWorkload], style: OutputStyle) -> String {
    let mut out = String::new();
    if workloads.is_empty() {
        return out;
    }
    let mut table = Table::new([
        "Engineer",
        "Issues",
        "Points",
        "Cap. issues",
        "Cap. points",
        "Non-cap. points",
        "Cap. % (issues)",
        "Cap. % (points)",
    ])
    .align_right(&[1, 2, 3, 4, 5, 6, 7]);
    for w in workloads {
        table.add_row([
            w.name.clone(),
            w.total_issues.to_string(),
            format_points(w.total_points),
            w.capitalized_issues.to_string(),
            format_points(w.capitalized_points),
            format_points(w.non_capitalized_points),
            format_rate(w.capitalized_issue_pct).to_string(),
            format_rate(w.capitalized_points_pct).to_string(),
        ]);
    }
    heading(&mut out, "Engineer workload");
    out.push_str(&table.render(style));
    out
}

pub fn render_project_contributors(projects: &[ProjectContributors], style: OutputStyle) -> String {
    let mut out = String::new();
    if projects.is_empty() {
        return out;
    }
    heading(&mut out, "Capitalized projects");
    for project in projects {
        let teams = if project.teams.is_empty() {
            String::new()
        } else {
            format!(", teams: {}", project.teams.join(", "))
        };
        let title = format!(
            "{} [{}{}] {} issue(s), {} point(s)",
            project.project.cyan(),
            project.state,
            teams,
            project.total_issues,
            format_points(project.total_points)
        );
        let mut table = Table::new(["Contributor", "Issues", "Points"]).align_right(&[1, 2]);
        for c in &project.contributors {
            table.add_row([c.name.clone(), c.issue_count.to_string(), format_points(c.points)]);
        }
        out.push_str(&table.with_title(title).render(style));
    }
    out
}

pub fn render_capitalization_report(report: &CapitalizationReport, style: OutputStyle) -> String {
    let mut out = render_capitalization_metrics(&report.metrics, style);
    if report.metrics.overall.total_issues == 0 {
        return out;
    }
    for section in [
        render_workload(&report.engineers, style),
        render_project_contributors(&report.projects, style),
    ] {
        if !section.is_empty() {
            out.push('\n');
            out.push_str(&section);
        }
    }
    out
}
