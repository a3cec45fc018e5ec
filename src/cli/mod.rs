mod commands;
pub mod handlers;

pub use commands::{
    AnalyticsAction, Cli, Commands, IssueAction, OutputFormat, ProjectAction, TeamAction,
};
