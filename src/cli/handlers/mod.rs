mod analytics;
mod generate;
mod issues;
mod projects;
mod query;
mod teams;
mod utils;

pub use analytics::handle_analytics;
pub use generate::{GenerateParams, handle_generate};
pub use issues::handle_issues;
pub use projects::handle_projects;
pub use query::handle_query;
pub use teams::handle_teams;

use crate::api::LinearClient;
use crate::config::Config;
use crate::display::OutputStyle;

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: Config,
    pub client: LinearClient,
    pub style: OutputStyle,
}

impl CommandContext {
    pub fn new(config: Config, client: LinearClient, style: OutputStyle) -> Self {
        Self {
            config,
            client,
            style,
        }
    }
}
