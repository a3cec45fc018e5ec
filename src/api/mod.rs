//! Client for the Linear GraphQL API.
//!
//! Requests are sent sequentially over a blocking HTTPS transport. The
//! [`SafeMode`] value given to [`LinearClient::new`] decides whether mutation
//! documents may leave the process at all.
//!
//! ```no_run
//! use linear_analytics::api::{IssueFilter, LinearClient, SafeMode};
//! use linear_analytics::config::Config;
//!
//! # fn main() -> linear_analytics::error::Result<()> {
//! let config = Config::load(None)?;
//! let client = LinearClient::connect(&config, SafeMode::Enabled)?;
//! let issues = client.issues(&IssueFilter::for_team(Some("Engineering".into())), Some(50))?;
//! # Ok(())
//! # }
//! ```

mod client;
pub mod queries;
mod transport;
mod types;

pub use client::{
    LinearClient, PAGE_SIZE, SafeMode, find_team, find_user, is_mutation, operation_name,
};
pub use queries::IssueFilter;
pub use transport::{GraphQlRequest, HttpResponse, HttpTransport, Transport, authorization_header};
pub use types::*;
