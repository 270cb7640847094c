use crate::domain::storage::RecordTable;
use crate::domain::Period;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to league configuration file
    #[arg(long, default_value = "league_config.json")]
    pub config_file: PathBuf,

    /// SQLite database receiving pulled rows
    #[arg(long, default_value = "data/fantasy.db")]
    pub database: PathBuf,

    /// Directory for JSON exports
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Portal account name
    #[clap(long, env = "NFL_USERNAME")]
    pub username: Option<String>,

    /// Portal account password
    #[clap(long, env = "NFL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Also write each pulled table as JSON under the data dir
    #[arg(long)]
    pub export_json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pull weekly player stats
    Players(RangeArgs),
    /// Pull weekly league matchups
    League {
        #[command(flatten)]
        range: RangeArgs,

        /// Stop at the end of the start season
        #[arg(long)]
        first_season_only: bool,
    },
    /// Print the latest stored period of a table
    Checkpoint {
        #[arg(long, value_enum, default_value = "players")]
        table: RecordTable,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct RangeArgs {
    /// First period as YEAR:WEEK, defaults to the league's history start
    #[arg(long, value_parser = parse_period)]
    pub start: Option<Period>,

    /// Last period as YEAR:WEEK, inclusive
    #[arg(long, value_parser = parse_period)]
    pub end: Period,

    /// Continue after the latest stored period
    #[arg(long)]
    pub resume: bool,
}

fn parse_period(raw: &str) -> Result<Period, String> {
    raw.parse().map_err(|e: crate::error::PullError| e.to_string())
}
