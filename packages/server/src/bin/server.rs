//! Clicker Race game server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin clicker-race-server
//! cargo run --bin clicker-race-server -- --host 0.0.0.0 --port 3000 --static-dir public
//! ```

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use clicker_race_server::{build_server, config::GameConfig, domain::RoundDuration};
use clicker_race_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "clicker-race-server")]
#[command(about = "Round-based multiplayer clicker game server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to (falls back to `PORT`)
    #[arg(short = 'p', long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Round length in seconds when `start` carries no usable duration
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u32).range(1..))]
    default_duration: u32,

    /// Period of the round timer in milliseconds
    #[arg(long, default_value = "200", value_parser = clap::value_parser!(u64).range(1..))]
    tick_interval_ms: u64,

    /// Delay of the state broadcast that follows `game_over`, in milliseconds
    #[arg(long, default_value = "200")]
    final_broadcast_delay_ms: u64,

    /// Directory served as static assets
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig, Box<dyn std::error::Error>> {
        Ok(GameConfig {
            default_duration: RoundDuration::from_secs(self.default_duration)?,
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            final_broadcast_delay: Duration::from_millis(self.final_broadcast_delay_ms),
        })
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let config = match args.game_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Default round {}s, tick every {:?}",
        config.default_duration.as_secs(),
        config.tick_interval
    );

    let server = build_server(config).with_static_dir(args.static_dir);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
