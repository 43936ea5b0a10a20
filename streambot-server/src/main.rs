use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use streambot_core::Error;
use streambot_core::tasks::live_poll::DEFAULT_POLL_INTERVAL;

mod config;
mod context;
mod server;

use config::BotConfig;
use server::run_server;

#[derive(Parser, Debug, Clone)]
#[command(name = "streambot")]
#[command(author, version, about = "Announces Twitch go-lives in a Discord channel")]
pub struct Args {
    /// Load environment variables from this file instead of `./.env`
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// JSON file holding the tracked streamer logins
    #[arg(long, default_value = "streamers.json")]
    streamers_file: PathBuf,

    /// Seconds between two live checks
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL.as_secs(), value_parser = clap::value_parser!(u64).range(1..))]
    poll_interval_secs: u64,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("streambot_core=info,streambot_server=info"));
    let sub = fmt().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(sub) {
        eprintln!("Failed to set global subscriber: {e}");
    }
}

fn load_env_file(args: &Args) -> Result<(), Error> {
    match &args.env_file {
        Some(path) => dotenv::from_path(path)
            .map_err(|e| Error::Config(format!("cannot load {}: {e}", path.display()))),
        None => {
            // A missing ./.env is fine; the variables may come from the real environment.
            dotenv::dotenv().ok();
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    let args = Args::parse();
    info!(
        "Streambot starting. streamers_file={}, poll_interval={}s",
        args.streamers_file.display(),
        args.poll_interval_secs
    );

    let config = match load_env_file(&args).and_then(|_| BotConfig::from_env()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_server(args, config).await {
        error!("Server error: {:?}", e);
        std::process::exit(1);
    }
    info!("Main finished. Goodbye!");
}
