use colored::{ColoredString, Colorize};

/// Presentation tier of a percentage value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateTier {
    Favorable,
    Caution,
    Concern,
}

impl RateTier {
    pub fn classify(pct: f64) -> Self {
        if pct >= 75.0 {
            RateTier::Favorable
        } else if pct >= 50.0 {
            RateTier::Caution
        } else {
            RateTier::Concern
        }
    }
}

/// Formats a percentage with its tier color, e.g. `40.00%` in red.
pub fn format_rate(pct: f64) -> ColoredString {
    let text = format!("{:.2}%", pct);
    match RateTier::classify(pct) {
        RateTier::Favorable => text.green(),
        RateTier::Caution => text.yellow(),
        RateTier::Concern => text.red(),
    }
}

/// Formats estimate points without a trailing `.0` for whole numbers.
pub fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{}", points as i64)
    } else {
        format!("{:.2}", points)
    }
}

pub fn priority_label(priority: Option<f64>) -> &'static str {
    match priority.map(|p| p.round() as i64) {
        Some(1) => "urgent",
        Some(2) => "high",
        Some(3) => "medium",
        Some(4) => "low",
        _ => "none",
    }
}

/// Format priority with color coding
pub fn format_priority(priority: Option<f64>) -> ColoredString {
    let label = priority_label(priority);
    match label {
        "urgent" => label.red().bold(),
        "high" => label.red(),
        "medium" => label.yellow(),
        "low" => label.white(),
        _ => label.dimmed(),
    }
}

/// Format a workflow state name using its state type for color
pub fn format_status(name: &str, state_type: Option<&str>) -> ColoredString {
    match state_type.unwrap_or_default() {
        "completed" => name.green(),
        "started" => name.yellow(),
        "canceled" => name.red(),
        "backlog" | "triage" => name.dimmed(),
        _ => name.white(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_tiers() {
        assert_eq!(RateTier::classify(100.0), RateTier::Favorable);
        assert_eq!(RateTier::classify(75.0), RateTier::Favorable);
        assert_eq!(RateTier::classify(74.99), RateTier::Caution);
        assert_eq!(RateTier::classify(50.0), RateTier::Caution);
        assert_eq!(RateTier::classify(49.99), RateTier::Concern);
        assert_eq!(RateTier::classify(0.0), RateTier::Concern);
    }

    #[test]
    fn test_format_rate_text() {
        colored::control::set_override(false);
        assert_eq!(format_rate(33.333).to_string(), "33.33%");
        assert_eq!(format_rate(40.0).to_string(), "40.00%");
    }

    #[test]
    fn test_format_points() {
        assert_eq!(format_points(3.0), "3");
        assert_eq!(format_points(2.5), "2.50");
        assert_eq!(format_points(0.0), "0");
    }

    #[test]
    fn test_priority_label() {
        assert_eq!(priority_label(Some(0.0)), "none");
        assert_eq!(priority_label(Some(1.0)), "urgent");
        assert_eq!(priority_label(Some(4.0)), "low");
        assert_eq!(priority_label(None), "none");
    }
}
