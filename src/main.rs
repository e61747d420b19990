use std::sync::Arc;

mod api;
mod config;
mod error;
mod gateway;
mod http;
mod logger;
mod server;

use crate::config::{AppState, Config, GatewaySettings};
use crate::gateway::mounts::{Mount, MountTable};

/// Config file name (without extension), resolved by the config loader
const CONFIG_FILE: &str = "fastai";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load_or_default(CONFIG_FILE).map_err(error::GatewayError::Configuration)?;
    logger::init(&cfg)?;

    let base_dir = config::base_dir(&cfg.server)?;
    let settings = GatewaySettings::resolve(&cfg, &base_dir)?;

    // Mount composition is fatal on a missing root: the gateway must not
    // start serving with a broken mount. The table order is the route
    // precedence, with the frontend catch-all last.
    let mounts = MountTable::new(vec![
        Mount::new("/static", settings.static_dir.clone(), false),
        Mount::new("/", settings.frontend_dir.clone(), true),
    ])?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(AppState::new(cfg, settings, mounts)))
}

async fn async_main(state: AppState) -> Result<(), Box<dyn std::error::Error>> {
    let addr = state.config.socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    logger::log_server_start(&addr, &state.config, &state.settings);

    let signals = Arc::new(server::signal::SignalHandler::new());
    server::signal::start_signal_handler(Arc::clone(&signals));

    let state = Arc::new(state);
    let shutdown = Arc::clone(&signals.shutdown);

    // LocalSet so connection tasks can use spawn_local
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::run_server(listener, state, shutdown))
        .await
}
