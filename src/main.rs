use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use linear_analytics::api::{LinearClient, SafeMode};
use linear_analytics::cli::handlers::{
    CommandContext, GenerateParams, handle_analytics, handle_generate, handle_issues,
    handle_projects, handle_query, handle_teams,
};
use linear_analytics::cli::{Cli, Commands};
use linear_analytics::config::Config;
use linear_analytics::display::OutputStyle;
use linear_analytics::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_file.clone());

    let style = OutputStyle::detect();
    style.apply_color_policy();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let safe_mode = SafeMode::from_allow_mutations(cli.allow_mutations);
    debug!(endpoint = %config.api_url, ?safe_mode, "starting");

    let client = LinearClient::connect(&config, safe_mode)?;
    let ctx = CommandContext::new(config, client, style);

    match cli.command {
        Commands::Issues { action } => handle_issues(&ctx, action),
        Commands::Teams { action } => handle_teams(&ctx, action),
        Commands::Projects { action } => handle_projects(&ctx, action),
        Commands::Analytics { action } => handle_analytics(&ctx, action),
        Commands::Query {
            document,
            variables,
        } => handle_query(&ctx, document, variables),
        Commands::Generate {
            team,
            count,
            labels,
        } => handle_generate(
            &ctx,
            GenerateParams {
                team,
                count,
                labels,
            },
        ),
    }
}
