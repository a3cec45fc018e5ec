use std::collections::BTreeMap;

/// Label used when a grouping field is absent.
pub const UNKNOWN: &str = "Unknown";

/// Label used for issues without an assignee.
pub const UNASSIGNED: &str = "Unassigned";

/// Groups records by an optional key, substituting `default_label` when the
/// key is missing or blank.
pub fn count_by<T, F>(records: &[T], key: F, default_label: &str) -> BTreeMap<String, usize>
where
    F: Fn(&T) -> Option<&str>,
{
    let mut counts = BTreeMap::new();
    for record in records {
        let label = label_or(key(record), default_label);
        *counts.entry(label.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Explicit default substitution for an optional grouping key.
pub fn label_or<'a>(value: Option<&'a str>, default_label: &'a str) -> &'a str {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default_label)
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / whole * 100`, rounded to two decimals; 0 when `whole` is 0.
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        round2(part / whole * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        status: Option<&'static str>,
    }

    #[test]
    fn test_count_by_sums_to_len() {
        let rows = vec![
            Row { status: Some("Todo") },
            Row { status: Some("Done") },
            Row { status: Some("Todo") },
            Row { status: None },
            Row { status: Some("  ") },
        ];

        let counts = count_by(&rows, |r| r.status, UNKNOWN);

        assert_eq!(counts.values().sum::<usize>(), rows.len());
        assert_eq!(counts["Todo"], 2);
        assert_eq!(counts["Done"], 1);
        assert_eq!(counts[UNKNOWN], 2);
    }

    #[test]
    fn test_count_by_empty() {
        let rows: Vec<Row> = Vec::new();
        assert!(count_by(&rows, |r| r.status, UNKNOWN).is_empty());
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(2.0, 6.0), 33.33);
        assert_eq!(percentage(4.0, 10.0), 40.0);
        assert_eq!(percentage(1.0, 0.0), 0.0);
        assert_eq!(percentage(2.0, 3.0), 66.67);
    }
}
