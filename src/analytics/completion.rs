use super::counts::{UNKNOWN, label_or, percentage};
use crate::api::Issue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionRate {
    pub total: usize,
    pub completed: usize,
    pub rate: f64,
}

impl CompletionRate {
    pub fn new(total: usize, completed: usize) -> Self {
        Self {
            total,
            completed,
            rate: percentage(completed as f64, total as f64),
        }
    }
}

/// Completion rate per team name; an issue counts as completed when it has a
/// completion timestamp.
pub fn completion_rates(issues: &[Issue]) -> BTreeMap<String, CompletionRate> {
    let mut tallies: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for issue in issues {
        let team = label_or(issue.team_name(), UNKNOWN);
        let entry = tallies.entry(team.to_string()).or_default();
        entry.0 += 1;
        if issue.is_completed() {
            entry.1 += 1;
        }
    }

    tallies
        .into_iter()
        .map(|(team, (total, completed))| (team, CompletionRate::new(total, completed)))
        .collect()
}
