pub mod stats;
pub mod verify;
pub mod watch;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::api::feed::{FeedClient, FeedError};
use crate::config::{Config, ConfigError};
use crate::services::verify_service::VerifyError;

/// Campaign transparency tracker
#[derive(Debug, Parser)]
#[command(name = "campaign-tracker", version, about)]
pub struct Cli {
    /// Feed endpoint, overrides FEED_URL
    #[arg(long, global = true)]
    pub feed_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch once and print the current totals
    Stats,
    /// Keep the totals on screen, refreshing on a fixed interval. Lines typed
    /// on stdin as `verify <date> <time> <amount>` check a contribution.
    Watch,
    /// Check whether a contribution appears in the feed
    Verify {
        /// Date exactly as the feed records it, e.g. 2024-01-01
        #[arg(long)]
        date: Option<String>,
        /// Time of day, HH:MM
        #[arg(long)]
        time: Option<String>,
        /// Amount sent
        #[arg(long)]
        amount: Option<String>,
    },
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Feed(#[from] FeedError),
    #[error(transparent)]
    Verify(#[from] VerifyError),
    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared state handed to every command
pub struct AppContext {
    pub config: Config,
    pub feed: FeedClient,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        let feed = FeedClient::new(config.feed_url.clone());
        Self { config, feed }
    }
}

pub async fn run(command: Command, ctx: &AppContext) -> Result<(), CommandError> {
    match command {
        Command::Stats => stats::execute(ctx).await,
        Command::Watch => watch::execute(ctx).await,
        Command::Verify { date, time, amount } => {
            verify::execute(
                ctx,
                date.unwrap_or_default(),
                time.unwrap_or_default(),
                amount.unwrap_or_default(),
            )
            .await
        }
    }
}
