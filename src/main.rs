use std::net::TcpStream;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use loa_engine::config::{EngineConfig, DEFAULT_HOST, DEFAULT_MOVE_TIME_MS, DEFAULT_PORT};
use loa_engine::protocol::session::run_session;
use loa_engine::search::move_orderer::KILLER_DEPTHS;

/// Lines of Action engine client for the tournament server.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Time budget per move in milliseconds.
    #[arg(long, default_value_t = DEFAULT_MOVE_TIME_MS)]
    move_time_ms: u64,

    /// Deepest iterative-deepening pass.
    #[arg(long, default_value_t = KILLER_DEPTHS)]
    max_depth: usize,

    /// Log filter used when RUST_LOG is unset, e.g. `debug` or `loa_engine=trace`.
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl From<&Args> for EngineConfig {
    fn from(args: &Args) -> Self {
        Self {
            host: args.host.clone(),
            port: args.port,
            move_time_ms: args.move_time_ms,
            max_depth: args.max_depth,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = EngineConfig::from(&args);
    let address = config.address();
    let mut stream = TcpStream::connect(&address)
        .with_context(|| format!("failed to connect to game server at {address}"))?;
    info!(%address, move_time_ms = config.move_time_ms, max_depth = config.max_depth, "connected");

    run_session(&mut stream, config).context("game session failed")?;
    Ok(())
}
