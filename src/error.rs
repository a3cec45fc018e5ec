use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinearError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("{0}")]
    Lookup(String),

    #[error("Invalid argument: {0}")]
    Validation(String),

    #[error(
        "Mutation blocked: safe mode is enabled and '{0}' would modify data. \
         Re-run with --allow-mutations to permit changes."
    )]
    MutationBlocked(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, LinearError>;
