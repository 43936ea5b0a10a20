//! streambot-server/src/server.rs
//!
//! Connects Discord, runs the poll timer and waits for Ctrl-C.

use tokio::sync::watch;
use tracing::{error, info, warn};

use streambot_core::Error;
use streambot_core::tasks::live_poll::spawn_live_poll_task;

use crate::Args;
use crate::config::BotConfig;
use crate::context::ServerContext;

pub async fn run_server(args: Args, config: BotConfig) -> Result<(), Error> {
    let mut ctx = ServerContext::new(&args, config).await?;

    // The live set is memory-only, so anyone live right now is announced again.
    warn!("Live state starts empty; streamers already live will be announced on the first poll");

    let commands = ctx.slash_commands();
    ctx.discord.connect(commands).await?;
    info!("Discord gateway connected");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poll_task = spawn_live_poll_task(ctx.live_poll.clone(), ctx.poll_interval, shutdown_rx);

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {:?}", e);
    }
    info!("Ctrl-C detected; shutting down...");

    let _ = shutdown_tx.send(true);
    if let Err(e) = poll_task.await {
        error!("Live poll task ended abnormally: {:?}", e);
    }

    ctx.discord.disconnect().await?;
    info!("Server shutdown complete.");
    Ok(())
}
