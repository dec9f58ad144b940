use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Startup failures that abort the process.
#[derive(Debug, Error)]
pub enum BootError {
    #[error("fatal: {0}")]
    Fatal(String),
}

/// Installs the global fmt subscriber. `level` comes from `[logging] level`;
/// a `RUST_LOG` in the environment takes precedence.
pub fn init_logging(level: &str) -> Result<(), BootError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => EnvFilter::try_new(format!("{level},reqwest=warn,hyper=warn,hyper_util=warn"))
            .map_err(|e| BootError::Fatal(format!("invalid log filter '{level}': {e}")))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .try_init()
        .map_err(|e| BootError::Fatal(format!("logging already initialised: {e}")))
}
