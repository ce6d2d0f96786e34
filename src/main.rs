use std::sync::Arc;

use chaos_actor::actor::Actor;
use chaos_actor::bridge::BridgeClient;
use chaos_actor::config::Config;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.logging.init();
    info!(
        amount_wei = %config.amount,
        recipient = %config.recipient,
        interval_ms = config.loop_interval.as_millis() as u64,
        "chaos actor starting"
    );

    let client = match BridgeClient::connect(&config).await {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Failed to connect to networks");
            std::process::exit(1);
        }
    };

    let actor = Actor::new(Arc::new(client), config.actor());

    tokio::select! {
        () = actor.run() => {}
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("chaos actor stopped");
}
