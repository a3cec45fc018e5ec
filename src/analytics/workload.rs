use super::capitalization::CapitalizationMarkers;
use super::counts::{UNASSIGNED, UNKNOWN, label_or, percentage, round2};
use crate::api::{Issue, Project};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineerWorkload {
    pub name: String,
    pub total_issues: usize,
    pub total_points: f64,
    pub capitalized_issues: usize,
    pub capitalized_points: f64,
    pub non_capitalized_issues: usize,
    pub non_capitalized_points: f64,
    pub capitalized_issue_pct: f64,
    pub capitalized_points_pct: f64,
}

/// Per-assignee issue and estimate totals split by capitalization, ordered by
/// total points (highest first) and then by name.
pub fn engineer_workload(
    issues: &[Issue],
    markers: &CapitalizationMarkers,
) -> Vec<EngineerWorkload> {
    let mut by_person: BTreeMap<String, EngineerWorkload> = BTreeMap::new();

    for issue in issues {
        let name = label_or(issue.assignee_name(), UNASSIGNED);
        let entry = by_person
            .entry(name.to_string())
            .or_insert_with(|| EngineerWorkload {
                name: name.to_string(),
                ..Default::default()
            });

        let points = issue.points();
        entry.total_issues += 1;
        entry.total_points += points;
        if markers.is_capitalized(issue) {
            entry.capitalized_issues += 1;
            entry.capitalized_points += points;
        } else {
            entry.non_capitalized_issues += 1;
            entry.non_capitalized_points += points;
        }
    }

    let mut workloads: Vec<EngineerWorkload> = by_person
        .into_values()
        .map(|mut w| {
            w.total_points = round2(w.total_points);
            w.capitalized_points = round2(w.capitalized_points);
            w.non_capitalized_points = round2(w.non_capitalized_points);
            w.capitalized_issue_pct =
                percentage(w.capitalized_issues as f64, w.total_issues as f64);
            w.capitalized_points_pct = percentage(w.capitalized_points, w.total_points);
            w
        })
        .collect();

    workloads.sort_by(|a, b| {
        b.total_points
            .total_cmp(&a.total_points)
            .then_with(|| a.name.cmp(&b.name))
    });
    workloads
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    pub name: String,
    pub issue_count: usize,
    pub points: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectContributors {
    pub project: String,
    pub state: String,
    pub teams: Vec<String>,
    pub total_issues: usize,
    pub total_points: f64,
    pub contributors: Vec<Contributor>,
}

/// Contributors of every capitalized project.
///
/// A project is capitalized when one of its own labels matches a marker or
/// when at least one of its issues is capitalized. Issues without a project
/// are ignored. Projects are ordered by name, contributors by points (highest
/// first) and then by name.
pub fn project_contributors(
    issues: &[Issue],
    projects: &[Project],
    markers: &CapitalizationMarkers,
) -> Vec<ProjectContributors> {
    let known: HashMap<&str, &Project> = projects.iter().map(|p| (p.id.as_str(), p)).collect();

    // project id -> (name, any capitalized issue, assignee -> (count, points))
    let mut grouped: BTreeMap<&str, (&str, bool, BTreeMap<String, (usize, f64)>)> = BTreeMap::new();
    for issue in issues {
        let Some(project) = issue.project.as_ref() else {
            continue;
        };
        let entry = grouped
            .entry(project.id.as_str())
            .or_insert_with(|| (project.name.as_str(), false, BTreeMap::new()));
        entry.1 |= markers.is_capitalized(issue);

        let contributor = entry
            .2
            .entry(label_or(issue.assignee_name(), UNASSIGNED).to_string())
            .or_default();
        contributor.0 += 1;
        contributor.1 += issue.points();
    }

    let mut result: Vec<ProjectContributors> = grouped
        .into_iter()
        .filter_map(|(id, (project_name, has_capitalized_issue, people))| {
            let project = known.get(id).copied();
            let labelled = project.is_some_and(|p| markers.matches_any(p.label_names()));
            if !(labelled || has_capitalized_issue) {
                return None;
            }

            let mut contributors: Vec<Contributor> = people
                .into_iter()
                .map(|(name, (issue_count, points))| Contributor {
                    name,
                    issue_count,
                    points: round2(points),
                })
                .collect();
            contributors.sort_by(|a, b| {
                b.points
                    .total_cmp(&a.points)
                    .then_with(|| a.name.cmp(&b.name))
            });

            Some(ProjectContributors {
                project: project_name.to_string(),
                state: label_or(project.and_then(|p| p.state.as_deref()), UNKNOWN).to_string(),
                teams: project
                    .map(|p| p.team_names().into_iter().map(String::from).collect())
                    .unwrap_or_default(),
                total_issues: contributors.iter().map(|c| c.issue_count).sum(),
                total_points: round2(contributors.iter().map(|c| c.points).sum()),
                contributors,
            })
        })
        .collect();

    result.sort_by(|a, b| a.project.cmp(&b.project));
    result
}
