use clap::Parser;
use std::sync::Arc;

use dimsum_devserver::config::{self, AppState, Config};
use dimsum_devserver::{logger, server};

/// DIMSum-BPS static dev server
#[derive(Parser, Debug)]
#[command(name = "dimsum-devserver", version, about, long_about = None)]
struct Cli {
    /// Port to bind (default: 8000)
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Host to bind (default: 0.0.0.0)
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Asset root to serve and write into (default: `public` next to Cargo.toml)
    #[arg(long, env = "DIMSUM_ROOT")]
    root: Option<String>,

    /// Optional TOML configuration file
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE)]
    config: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cfg = Config::load_from(&cli.config)?.with_overrides(cli.host, cli.port, cli.root);

    logger::init(&cfg)?;

    // Multi-threaded runtime; `server.workers` caps the thread count
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let state = Arc::new(AppState::new(cfg));
    state.layout.ensure_dirs()?;

    let listener = server::bind_listener(addr)?;
    logger::log_server_start(&addr, &state.config, &state.layout);

    server::start_server_loop(listener, state).await;
    Ok(())
}
