use anyhow::{Context, Result};
use beacon::server::{RelayConfig, RelayService};
use clap::Parser;
use colored::*;
use std::net::IpAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const MAX_HEARTBEAT_SECS: u64 = 24 * 60 * 60;

#[derive(Parser, Debug)]
#[command(name = "beacon", version, about = "WebSocket signaling relay for peer discovery")]
struct Cli {
    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Address to bind.
    #[arg(long, env = "BEACON_BIND", default_value = "0.0.0.0")]
    bind: IpAddr,

    /// Start new connections in the shared global room instead of
    /// grouping them by address.
    #[arg(long, env = "USE_GLOBAL_ROOM_BY_DEFAULT")]
    use_global_room_by_default: bool,

    /// Seconds between liveness pings.
    #[arg(
        long,
        env = "BEACON_HEARTBEAT_SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..=MAX_HEARTBEAT_SECS)
    )]
    heartbeat_secs: u64,
}

impl Cli {
    fn config(&self) -> RelayConfig {
        RelayConfig {
            port: self.port,
            use_global_room_by_default: self.use_global_room_by_default,
            heartbeat_interval: Duration::from_secs(self.heartbeat_secs),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = cli.config();

    let listener = TcpListener::bind((cli.bind, config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", cli.bind, config.port))?;

    println!("{}", "📡 Beacon signaling relay".green().bold());
    println!("   🔌 Listening: {}", listener.local_addr()?);
    println!(
        "   🏠 Default room: {}",
        if config.use_global_room_by_default {
            "global".cyan()
        } else {
            "per address".cyan()
        }
    );
    println!("   💓 Heartbeat: {}s", config.heartbeat_interval.as_secs());

    let service = RelayService::new(config);
    service
        .clone()
        .serve(listener, shutdown_signal())
        .await?;

    let stats = service.snapshot();
    info!(
        connections = stats.connections,
        relayed = stats.relayed,
        malformed_frames = stats.malformed_frames,
        undeliverable = stats.undeliverable,
        evictions = stats.evictions,
        "Relay stopped"
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
