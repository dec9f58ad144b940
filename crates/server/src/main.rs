use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use roundvote_core::app::context::AppContext;
use roundvote_core::app::scheduler::Scheduler;
use roundvote_core::infra::config::ConfigLoader;
use roundvote_core::infra::logging::{BootError, init_logging};
use roundvote_core::infra::random::MutexRng;
use roundvote_core::infra::sources::build_sources;
use roundvote_core::infra::system_clock::SystemClock;
use roundvote_server::app_state::AppState;
use roundvote_server::router;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Binary entrypoint:
/// - loads the TOML config (first CLI arg, `ROUNDVOTE_CONFIG_PATH`, or
///   `res/config.toml`), `PORT` overrides the bind port
/// - initializes logging and builds one adapter per configured source
/// - spawns the round scheduler and serves the read API until ctrl-c
#[tokio::main]
async fn main() -> Result<(), BootError> {
    let cfg_path = pick_config_path(std::env::args().nth(1));
    let mut cfg = ConfigLoader::load(&cfg_path)
        .await
        .map_err(|e| BootError::Fatal(format!("{}: {e}", cfg_path.display())))?;

    if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        cfg.http.port = port;
    }

    init_logging(&cfg.log_level)?;

    info!(
        config = %cfg_path.display(),
        timezone = %cfg.timezone,
        sources = cfg.sources.len(),
        prepare_offset = cfg.round.prepare_offset_seconds,
        finalize_offset = cfg.round.finalize_offset_seconds,
        "Loaded config"
    );

    let sources = build_sources(&cfg).map_err(|e| BootError::Fatal(e.to_string()))?;
    let ctx = AppContext::new(
        cfg.round.clone(),
        cfg.timezone,
        SystemClock,
        cfg.rng_seed.map_or_else(MutexRng::new, MutexRng::seeded),
        sources,
    );
    let state = AppState::new(ctx.store.clone(), Arc::new(SystemClock));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                let _ = shutdown_tx.send(true);
            }
            Err(e) => {
                warn!(error = %e, "Cannot listen for shutdown signal");
                std::future::pending::<()>().await;
            }
        }
    });

    let scheduler = tokio::spawn(Scheduler::run_forever(ctx, wait_for_shutdown(shutdown_rx.clone())));

    let addr: SocketAddr = format!("{}:{}", cfg.http.host, cfg.http.port)
        .parse()
        .map_err(|e| BootError::Fatal(format!("invalid http bind: {e}")))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| BootError::Fatal(format!("bind {addr}: {e}")))?;
    info!(addr = %addr, "HTTP server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(wait_for_shutdown(shutdown_rx))
        .await
        .map_err(|e| BootError::Fatal(format!("http server error: {e}")))?;

    if let Err(e) = scheduler.await {
        error!(error = %e, "Scheduler task ended abnormally");
    }

    Ok(())
}

async fn wait_for_shutdown(mut rx: watch::Receiver<bool>) {
    let _ = rx.wait_for(|stop| *stop).await;
}

fn pick_config_path(arg1: Option<String>) -> PathBuf {
    if let Some(p) = arg1 {
        return PathBuf::from(p);
    }
    if let Ok(p) = std::env::var("ROUNDVOTE_CONFIG_PATH") {
        return PathBuf::from(p);
    }
    PathBuf::from("res/config.toml")
}
