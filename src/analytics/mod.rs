//! Aggregations over fetched issues, teams and projects.
//!
//! Everything here is pure: functions take borrowed slices, never fail, and
//! return empty or zero-valued structures for empty input. Missing grouping
//! fields are replaced with [`UNKNOWN`] or [`UNASSIGNED`] explicitly.
//!
//! - [`count_by`]: label → count for any optional key
//! - [`completion_rates`]: completed/total per team
//! - [`capitalization_metrics`]: capitalized split, global and per team
//! - [`engineer_workload`] / [`project_contributors`]: per-person rollups
//! - [`generate_report`]: the combined report

mod capitalization;
mod completion;
mod counts;
mod report;
mod workload;

pub use capitalization::{
    CapitalizationMarkers, CapitalizationMetrics, CapitalizationSplit, capitalization_metrics,
};
pub use completion::{CompletionRate, completion_rates};
pub use counts::{UNASSIGNED, UNKNOWN, count_by, label_or, percentage, round2};
pub use report::{CapitalizationReport, Report, Summary, capitalization_report, generate_report};
pub use workload::{
    Contributor, EngineerWorkload, ProjectContributors, engineer_workload, project_contributors,
};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::api::{
        Connection, Issue, Label, Project, ProjectRef, Team, TeamRef, User, WorkflowState,
    };
    use chrono::{TimeZone, Utc};

    pub struct IssueBuilder {
        issue: Issue,
    }

    impl IssueBuilder {
        pub fn new(n: u32) -> Self {
            Self {
                issue: Issue {
                    id: format!("issue-{n}"),
                    identifier: format!("ENG-{n}"),
                    title: format!("Issue {n}"),
                    description: None,
                    priority: Some(0.0),
                    estimate: None,
                    state: None,
                    team: None,
                    assignee: None,
                    project: None,
                    labels: Connection::default(),
                    created_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
                    started_at: None,
                    completed_at: None,
                    canceled_at: None,
                    url: None,
                    comments: None,
                },
            }
        }

        pub fn team(mut self, name: &str) -> Self {
            self.issue.team = Some(TeamRef {
                id: format!("team-{}", name.to_lowercase()),
                name: name.to_string(),
                key: name.chars().take(3).collect::<String>().to_uppercase(),
            });
            self
        }

        pub fn status(mut self, name: &str) -> Self {
            self.issue.state = Some(WorkflowState {
                id: format!("state-{}", name.to_lowercase()),
                name: name.to_string(),
                state_type: None,
                position: None,
            });
            self
        }

        pub fn completed(mut self, done: bool) -> Self {
            self.issue.completed_at =
                done.then(|| Utc.with_ymd_and_hms(2024, 2, 1, 17, 0, 0).unwrap());
            self
        }

        pub fn assignee(mut self, name: &str) -> Self {
            self.issue.assignee = Some(User {
                id: format!("user-{}", name.to_lowercase()),
                name: name.to_string(),
                ..Default::default()
            });
            self
        }

        pub fn project(mut self, id: &str, name: &str) -> Self {
            self.issue.project = Some(ProjectRef {
                id: id.to_string(),
                name: name.to_string(),
            });
            self
        }

        pub fn estimate(mut self, points: f64) -> Self {
            self.issue.estimate = Some(points);
            self
        }

        pub fn labels(mut self, names: &[&str]) -> Self {
            self.issue.labels = names
                .iter()
                .map(|n| Label {
                    id: None,
                    name: n.to_string(),
                })
                .collect::<Vec<_>>()
                .into();
            self
        }

        pub fn build(self) -> Issue {
            self.issue
        }
    }

    pub fn team(name: &str, key: &str) -> Team {
        Team {
            id: format!("team-{}", name.to_lowercase()),
            name: name.to_string(),
            key: key.to_string(),
            description: None,
            members: Connection::default(),
            states: Connection::default(),
        }
    }

    pub fn project(id: &str, name: &str, labels: &[&str], teams: &[&str]) -> Project {
        Project {
            id: id.to_string(),
            name: name.to_string(),
            state: None,
            description: None,
            labels: labels
                .iter()
                .map(|n| Label {
                    id: None,
                    name: n.to_string(),
                })
                .collect::<Vec<_>>()
                .into(),
            teams: teams
                .iter()
                .map(|t| TeamRef {
                    id: format!("team-{}", t.to_lowercase()),
                    name: t.to_string(),
                    key: String::new(),
                })
                .collect::<Vec<_>>()
                .into(),
            lead: None,
            start_date: None,
            target_date: None,
            progress: None,
        }
    }
}
