use std::path::PathBuf;

use clap::Parser;
use configs::AppConfig;
use dotenvy::dotenv;

/// Command-line arguments for the device API server.
#[derive(Parser, Debug)]
#[command(author, version, about = "In-memory device API server", long_about = None)]
struct Args {
    /// Path to a TOML config file (defaults to CONFIG_PATH or ./config.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// HTTP port to serve the device API on; overrides the config file.
    #[arg(short, long)]
    port: Option<u16>,
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = Args::parse();

    let mut cfg = AppConfig::load(args.config.as_deref())?;
    cfg.override_port(args.port)?;
    server::startup::init_logging(cfg.logging.format);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(cfg.server.worker_threads.unwrap_or(4))
        .enable_all()
        .build()?;
    runtime.block_on(server::run(cfg))
}
