use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use campaign_tracker::commands::{self, AppContext, Cli};
use campaign_tracker::config::Config;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing; logs go to stderr so stdout only carries the display
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("campaign_tracker=debug,reqwest=warn,hyper=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("📊 Starting campaign tracker v{}", env!("CARGO_PKG_VERSION"));

    let config = match Config::from_env(cli.feed_url.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(2);
        }
    };

    let ctx = AppContext::new(config);

    let code = match commands::run(cli.command, &ctx).await {
        Ok(()) => 0,
        Err(e) => {
            error!("Command failed: {}", e);
            1
        }
    };

    // A pending stdin read would otherwise hold the runtime open on shutdown
    std::process::exit(code);
}
