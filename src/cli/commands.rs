use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "linear-analytics")]
#[command(
    author,
    version,
    about = "Query, manage and analyse a Linear workspace from the command line"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Allow commands that modify the workspace (safe mode is on by default)
    #[arg(long, global = true)]
    pub allow_mutations: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file (rotated daily)
    #[arg(long, global = true, env = "LINEAR_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Path to settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Work with issues
    #[command(visible_alias = "i")]
    Issues {
        #[command(subcommand)]
        action: IssueAction,
    },

    /// Work with teams
    Teams {
        #[command(subcommand)]
        action: TeamAction,
    },

    /// Work with projects
    Projects {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Reports and metrics over the workspace
    Analytics {
        #[command(subcommand)]
        action: AnalyticsAction,
    },

    /// Execute a raw GraphQL document (mutations require --allow-mutations)
    Query {
        /// GraphQL document (use '-' to read from stdin)
        document: String,

        /// Variables as a JSON object
        #[arg(long)]
        variables: Option<String>,
    },

    /// Create a batch of synthetic issues for testing reports
    Generate {
        /// Team to create issues in (defaults to LINEAR_DEFAULT_TEAM)
        #[arg(long)]
        team: Option<String>,

        /// Number of issues to create (1-50)
        #[arg(long, default_value_t = 10)]
        count: usize,

        /// Comma-separated label names to apply
        #[arg(long)]
        labels: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum IssueAction {
    /// List issues
    #[command(visible_alias = "ls")]
    List {
        /// Filter by team name or key
        #[arg(short, long)]
        team: Option<String>,

        /// Filter by assignee ("me", email or name)
        #[arg(short, long)]
        assignee: Option<String>,

        /// Filter by workflow state name
        #[arg(short, long)]
        status: Option<String>,

        /// Maximum number of issues to fetch
        #[arg(short, long, default_value_t = 50)]
        limit: usize,

        /// Include assignee, labels and project columns
        #[arg(long)]
        detail: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single issue with its comments
    #[command(visible_alias = "show")]
    View {
        /// Issue identifier, e.g. ENG-123
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create an issue
    Create {
        /// Issue title
        #[arg(long)]
        title: String,

        /// Team name or key (defaults to LINEAR_DEFAULT_TEAM)
        #[arg(short, long)]
        team: Option<String>,

        /// Issue description (markdown)
        #[arg(short, long)]
        description: Option<String>,

        /// Assignee ("me", email or name)
        #[arg(short, long)]
        assignee: Option<String>,

        /// Workflow state name
        #[arg(short, long)]
        status: Option<String>,

        /// Priority 0-4 (0 none, 1 urgent, 4 low)
        #[arg(short, long)]
        priority: Option<String>,

        /// Comma-separated label names
        #[arg(long)]
        labels: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update an issue
    Update {
        /// Issue identifier, e.g. ENG-123
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description (markdown)
        #[arg(short, long)]
        description: Option<String>,

        /// New assignee ("me", email or name)
        #[arg(short, long)]
        assignee: Option<String>,

        /// New workflow state name
        #[arg(short, long)]
        status: Option<String>,

        /// New priority 0-4
        #[arg(short, long)]
        priority: Option<String>,

        /// Replace labels with this comma-separated list
        #[arg(long)]
        labels: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a comment to an issue
    Comment {
        /// Issue identifier, e.g. ENG-123
        id: String,

        /// Comment text (omit or use '-' to read from stdin)
        text: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TeamAction {
    /// List teams
    #[command(visible_alias = "ls")]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a team with its members and workflow states
    #[command(visible_alias = "show")]
    View {
        /// Team ID, name or key
        team: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a team
    Create {
        /// Team name
        #[arg(long)]
        name: String,

        /// Short key used as issue prefix, e.g. ENG
        #[arg(long)]
        key: String,

        /// Team description
        #[arg(short, long)]
        description: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// List projects
    #[command(visible_alias = "ls")]
    List {
        /// Only projects accessible to this team
        #[arg(short, long)]
        team: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a project
    #[command(visible_alias = "show")]
    View {
        /// Project ID
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a project
    Create {
        /// Project name
        #[arg(long)]
        name: String,

        /// Owning team name or key
        #[arg(short, long)]
        team: String,

        /// Project description
        #[arg(short, long)]
        description: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum AnalyticsAction {
    /// Summary counts and completion rates
    Report {
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Restrict to one team
        #[arg(short, long)]
        team: Option<String>,
    },

    /// Capitalized vs non-capitalized work, by team, engineer and project
    #[command(visible_alias = "capex")]
    Capitalization {
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Restrict to one team
        #[arg(short, long)]
        team: Option<String>,

        /// Comma-separated capitalization label names (overrides config)
        #[arg(long)]
        labels: Option<String>,
    },

    /// Per-engineer issue and point totals
    Workload {
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Restrict to one team
        #[arg(short, long)]
        team: Option<String>,

        /// Comma-separated capitalization label names (overrides config)
        #[arg(long)]
        labels: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "linear-analytics",
            "issues",
            "list",
            "--team",
            "Engineering",
            "--allow-mutations",
            "-v",
        ])
        .unwrap();

        assert!(cli.allow_mutations);
        assert!(cli.verbose);
        match cli.command {
            Commands::Issues {
                action: IssueAction::List { team, limit, .. },
            } => {
                assert_eq!(team.as_deref(), Some("Engineering"));
                assert_eq!(limit, 50);
            }
            _ => panic!("expected issues list"),
        }
    }

    #[test]
    fn test_safe_mode_stays_on_without_flag() {
        let cli = Cli::try_parse_from(["linear-analytics", "query", "mutation { x }"]).unwrap();
        assert!(!cli.allow_mutations);
    }

    #[test]
    fn test_analytics_format_defaults_to_table() {
        let cli = Cli::try_parse_from(["linear-analytics", "analytics", "report"]).unwrap();
        match cli.command {
            Commands::Analytics {
                action: AnalyticsAction::Report { format, team },
            } => {
                assert_eq!(format, OutputFormat::Table);
                assert!(team.is_none());
            }
            _ => panic!("expected analytics report"),
        }
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result =
            Cli::try_parse_from(["linear-analytics", "analytics", "report", "--format", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_comment_text_is_optional() {
        let cli = Cli::try_parse_from(["linear-analytics", "issues", "comment", "ENG-1"]).unwrap();
        match cli.command {
            Commands::Issues {
                action: IssueAction::Comment { id, text },
            } => {
                assert_eq!(id, "ENG-1");
                assert!(text.is_none());
            }
            _ => panic!("expected issues comment"),
        }
    }
}
