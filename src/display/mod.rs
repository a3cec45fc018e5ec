//! Terminal rendering for command output.
//!
//! Interactive terminals get bordered tables and colors; anything else
//! (redirects, pipes, test harnesses) gets `|`-separated plain lines without
//! ANSI codes. Color tiers for percentages are presentation only.

mod format;
mod sections;
mod table;

use std::io::IsTerminal;

pub use format::{
    RateTier, format_points, format_priority, format_rate, format_status, priority_label,
};
pub use sections::*;
pub use table::{Align, Table, strip_ansi, visible_width};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    /// Bordered Unicode tables.
    Table,
    /// One `|`-separated line per row.
    Plain,
}

impl OutputStyle {
    /// Picks `Table` for an interactive stdout, `Plain` otherwise.
    pub fn detect() -> Self {
        if std::io::stdout().is_terminal() {
            OutputStyle::Table
        } else {
            OutputStyle::Plain
        }
    }

    /// Disables ANSI colors globally when output is not interactive.
    pub fn apply_color_policy(self) {
        if self == OutputStyle::Plain {
            colored::control::set_override(false);
        }
    }
}
