use super::capitalization::{CapitalizationMarkers, CapitalizationMetrics, capitalization_metrics};
use super::completion::{CompletionRate, completion_rates};
use super::counts::{UNKNOWN, count_by};
use super::workload::{
    EngineerWorkload, ProjectContributors, engineer_workload, project_contributors,
};
use crate::api::{Issue, Project, Team};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub teams: usize,
    pub projects: usize,
    pub issues: usize,
    pub completed_issues: usize,
    pub unassigned_issues: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub summary: Summary,
    pub issues_by_status: BTreeMap<String, usize>,
    pub issues_by_team: BTreeMap<String, usize>,
    pub projects_by_state: BTreeMap<String, usize>,
    pub completion_rates: BTreeMap<String, CompletionRate>,
}

/// Assembles counts, completion rates and summary sizes into one report.
pub fn generate_report(teams: &[Team], projects: &[Project], issues: &[Issue]) -> Report {
    Report {
        summary: Summary {
            teams: teams.len(),
            projects: projects.len(),
            issues: issues.len(),
            completed_issues: issues.iter().filter(|i| i.is_completed()).count(),
            unassigned_issues: issues.iter().filter(|i| i.assignee.is_none()).count(),
        },
        issues_by_status: count_by(issues, Issue::status_name, UNKNOWN),
        issues_by_team: count_by(issues, Issue::team_name, UNKNOWN),
        projects_by_state: count_by(projects, |p: &Project| p.state.as_deref(), UNKNOWN),
        completion_rates: completion_rates(issues),
    }
}

/// Capitalization metrics together with the per-engineer and per-project views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapitalizationReport {
    pub metrics: CapitalizationMetrics,
    pub engineers: Vec<EngineerWorkload>,
    pub projects: Vec<ProjectContributors>,
}

pub fn capitalization_report(
    issues: &[Issue],
    projects: &[Project],
    markers: &CapitalizationMarkers,
) -> CapitalizationReport {
    CapitalizationReport {
        metrics: capitalization_metrics(issues, markers),
        engineers: engineer_workload(issues, markers),
        projects: project_contributors(issues, projects, markers),
    }
}
