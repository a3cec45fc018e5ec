use super::counts::{UNKNOWN, label_or, percentage};
use crate::api::Issue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const DEFAULT_MARKERS: &[&str] = &["capitalization", "capex", "fixed asset"];

/// Lower-cased substrings that mark a label as capitalized work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapitalizationMarkers(Vec<String>);

impl Default for CapitalizationMarkers {
    fn default() -> Self {
        Self(DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect())
    }
}

impl CapitalizationMarkers {
    /// Normalises markers; an empty list falls back to the defaults.
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalised: Vec<String> = Vec::new();
        for marker in markers {
            let marker = marker.as_ref().trim().to_lowercase();
            if !marker.is_empty() && !normalised.contains(&marker) {
                normalised.push(marker);
            }
        }
        if normalised.is_empty() {
            Self::default()
        } else {
            Self(normalised)
        }
    }

    /// Parses a comma-separated list such as `"capex, R&D"`.
    pub fn parse(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }

    /// Case-insensitive substring match against a single label name.
    pub fn matches_label(&self, label: &str) -> bool {
        let label = label.to_lowercase();
        self.0.iter().any(|marker| label.contains(marker.as_str()))
    }

    pub fn matches_any<'a, I>(&self, labels: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        labels.into_iter().any(|label| self.matches_label(label))
    }

    pub fn is_capitalized(&self, issue: &Issue) -> bool {
        self.matches_any(issue.label_names())
    }
}

/// Capitalized vs non-capitalized split over a set of issues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CapitalizationSplit {
    pub total_issues: usize,
    pub capitalized_count: usize,
    pub non_capitalized_count: usize,
    pub capitalization_rate: f64,
}

impl CapitalizationSplit {
    fn record(&mut self, capitalized: bool) {
        self.total_issues += 1;
        if capitalized {
            self.capitalized_count += 1;
        } else {
            self.non_capitalized_count += 1;
        }
    }

    fn finish(mut self) -> Self {
        self.capitalization_rate =
            percentage(self.capitalized_count as f64, self.total_issues as f64);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapitalizationMetrics {
    pub marker_labels: CapitalizationMarkers,
    #[serde(flatten)]
    pub overall: CapitalizationSplit,
    pub by_team: BTreeMap<String, CapitalizationSplit>,
}

/// Classifies every issue and computes the global and per-team split.
pub fn capitalization_metrics(
    issues: &[Issue],
    markers: &CapitalizationMarkers,
) -> CapitalizationMetrics {
    let mut overall = CapitalizationSplit::default();
    let mut by_team: BTreeMap<String, CapitalizationSplit> = BTreeMap::new();

    for issue in issues {
        let capitalized = markers.is_capitalized(issue);
        overall.record(capitalized);
        by_team
            .entry(label_or(issue.team_name(), UNKNOWN).to_string())
            .or_default()
            .record(capitalized);
    }

    CapitalizationMetrics {
        marker_labels: markers.clone(),
        overall: overall.finish(),
        by_team: by_team
            .into_iter()
            .map(|(team, split)| (team, split.finish()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::IssueBuilder;

    #[test]
    fn test_marker_match_is_case_insensitive_substring() {
        let markers = CapitalizationMarkers::default();
        assert!(markers.matches_label("CapEx-2024"));
        assert!(markers.matches_label("Capitalization"));
        assert!(markers.matches_label("Fixed Asset: servers"));
        assert!(!markers.matches_label("OpEx"));
        assert!(!markers.matches_label("fixed"));
    }

    #[test]
    fn test_markers_normalise_and_default() {
        let markers = CapitalizationMarkers::parse(" CAPEX, ,capex, R&D ");
        assert_eq!(markers.as_slice(), ["capex", "r&d"]);
        assert_eq!(CapitalizationMarkers::parse(" , "), CapitalizationMarkers::default());
    }

    #[test]
    fn test_metrics_counts_add_up() {
        let markers = CapitalizationMarkers::default();
        let issues = vec![
            IssueBuilder::new(1)
                .team("Engineering")
                .labels(&["CapEx-2024"])
                .build(),
            IssueBuilder::new(2)
                .team("Engineering")
                .labels(&["bug"])
                .build(),
            IssueBuilder::new(3).team("Engineering").build(),
            IssueBuilder::new(4)
                .team("Design")
                .labels(&["feature", "capitalization"])
                .build(),
            IssueBuilder::new(5).labels(&["Fixed Asset"]).build(),
        ];

        let metrics = capitalization_metrics(&issues, &markers);

        let overall = metrics.overall;
        assert_eq!(overall.total_issues, 5);
        assert_eq!(overall.capitalized_count, 3);
        assert_eq!(overall.capitalized_count + overall.non_capitalized_count, overall.total_issues);
        assert_eq!(overall.capitalization_rate, 60.0);

        let eng = metrics.by_team["Engineering"];
        assert_eq!((eng.total_issues, eng.capitalized_count), (3, 1));
        assert_eq!(eng.capitalization_rate, 33.33);
        assert_eq!(metrics.by_team["Design"].capitalization_rate, 100.0);
        assert_eq!(metrics.by_team[UNKNOWN].capitalized_count, 1);
    }

    #[test]
    fn test_custom_marker() {
        let markers = CapitalizationMarkers::parse("r&d");
        let issues = vec![IssueBuilder::new(1).labels(&["R&D Project"]).build()];
        assert_eq!(capitalization_metrics(&issues, &markers).overall.capitalized_count, 1);
    }

    #[test]
    fn test_empty_metrics() {
        let metrics = capitalization_metrics(&[], &CapitalizationMarkers::default());
        assert_eq!(metrics.overall, CapitalizationSplit::default());
        assert_eq!(metrics.overall.capitalization_rate, 0.0);
        assert!(metrics.by_team.is_empty());
    }

    #[test]
    fn test_metrics_json_shape() {
        let issues = vec![
            IssueBuilder::new(1)
                .team("Engineering")
                .labels(&["capex"])
                .build(),
        ];
        let metrics = capitalization_metrics(&issues, &CapitalizationMarkers::default());
        let json = serde_json::to_value(metrics).unwrap();
        assert_eq!(json["total_issues"], 1);
        assert_eq!(json["capitalization_rate"], 100.0);
        assert_eq!(json["by_team"]["Engineering"]["capitalized_count"], 1);
        assert_eq!(json["marker_labels"][1], "capex");
    }
}
