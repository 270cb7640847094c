use thiserror::Error;

#[derive(Error, Debug)]
pub enum PullError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Login failed: {0}")]
    Login(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Markup error: {0}")]
    Markup(String),
    #[error("Malformed matchup block: {0}")]
    MalformedMatchup(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PullError>;
