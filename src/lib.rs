//! # linear-analytics - query, manage and analyse a Linear workspace
//!
//! A command-line client for Linear's GraphQL API. It lists and edits
//! issues, teams and projects, and computes analytics over them:
//! issue counts, completion rates, capitalized-work splits and per-engineer
//! workload.
//!
//! ## Features
//!
//! - **Safe mode**: mutations are refused unless `--allow-mutations` is given
//! - **Analytics**: pure aggregations over fetched records, rendered as tables or JSON
//! - **Layered config**: settings file, `.env`, then environment variables
//!
//! ## Quick Start
//!
//! ```bash
//! export LINEAR_API_KEY=lin_api_...
//!
//! # List your open issues
//! linear-analytics issues list --assignee me
//!
//! # Workspace report as JSON
//! linear-analytics analytics report --format json
//!
//! # Create an issue (needs the mutation flag)
//! linear-analytics --allow-mutations issues create --title "Fix login" --team Engineering
//! ```
//!
//! ## Modules
//!
//! - [`api`]: GraphQL client, query templates and data types
//! - [`analytics`]: Counts, rates and capitalization metrics
//! - [`display`]: Table and text rendering
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`config`]: Configuration loading
//! - [`error`]: Error types and result aliases
//! - [`validation`]: Input validation utilities

/// Pure aggregations over issues, teams and projects.
pub mod analytics;

/// GraphQL client for the Linear API.
///
/// Provides `LinearClient` with a pluggable `Transport` and the safe-mode guard.
pub mod api;

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Resolves the settings file, `.env` and `LINEAR_*` environment variables.
pub mod config;

/// Terminal rendering of tables and records.
pub mod display;

/// Error types and result aliases.
///
/// Defines `LinearError` enum and `Result<T>` type alias.
pub mod error;

pub mod logging;

/// Input validation utilities.
///
/// Validates issue IDs, priorities, limits and free text before any request.
pub mod validation;
