use crate::config::cli::{Args, Command};
use crate::domain::Period;
use crate::error::{PullError, Result};
use crate::infrastructure::Credentials;
use clap::Parser;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub(crate) mod cli;

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub league_id: String,
    #[serde(default = "default_season_weeks")]
    pub season_weeks: u32,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_login_host")]
    pub login_host: String,
    #[serde(
        default = "default_history_start",
        deserialize_with = "period_from_str"
    )]
    pub history_start: Period,
}

fn default_season_weeks() -> u32 {
    17
}

fn default_host() -> String {
    "fantasy.nfl.com".to_string()
}

fn default_login_host() -> String {
    "id2.s.nfl.com".to_string()
}

fn default_history_start() -> Period {
    Period::new(2012, 1)
}

fn period_from_str<'de, D>(deserializer: D) -> std::result::Result<Period, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

impl LeagueConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PullError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: LeagueConfig = serde_json::from_str(&content)?;

        if config.season_weeks == 0 {
            return Err(PullError::Config("season_weeks must be positive".into()));
        }
        Ok(config)
    }
}

pub struct Config {
    pub args: Args,
    pub league_config: Option<LeagueConfig>,
    pub http_client: Client,
}

impl Config {
    pub fn new() -> Result<Self> {
        let args = Args::parse();

        // Only pulls need the league file
        let league_config = match args.command {
            Command::Checkpoint { .. } => None,
            _ => Some(LeagueConfig::load(&args.config_file)?),
        };

        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()?;

        Ok(Self {
            args,
            league_config,
            http_client,
        })
    }

    pub fn league(&self) -> Result<&LeagueConfig> {
        self.league_config
            .as_ref()
            .ok_or_else(|| PullError::Config("league configuration not loaded".into()))
    }

    pub fn credentials(&self) -> Result<Credentials> {
        match (&self.args.username, &self.args.password) {
            (Some(username), Some(password)) => Ok(Credentials {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => Err(PullError::Config(
                "credentials missing: set --username/--password or NFL_USERNAME/NFL_PASSWORD"
                    .into(),
            )),
        }
    }

    pub fn ensure_directories(&self) -> Result<()> {
        if !self.args.data_dir.exists() {
            std::fs::create_dir_all(&self.args.data_dir)?;
        }
        if let Some(parent) = self.args.database.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        info!("Data dirs exist");
        Ok(())
    }
}
