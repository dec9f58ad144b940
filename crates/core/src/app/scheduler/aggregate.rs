use std::sync::Arc;

use futures::future::join_all;
use tracing::{error, warn};

use crate::domain::round::RoundKey;
use crate::domain::snapshot::{NamedReading, Snapshot};
use crate::ports::source::{EntropySource, FETCH_GRACE};

/// Queries every source concurrently and waits for all of them to settle.
///
/// Each source runs in its own task under its own deadline; a failing, slow or
/// panicking source only turns its own reading absent. The snapshot always has
/// one entry per source, in the order given.
pub async fn collect_snapshot(sources: &[Arc<dyn EntropySource>], key: RoundKey) -> Snapshot {
    let handles: Vec<_> = sources
        .iter()
        .map(|source| {
            let source = Arc::clone(source);
            tokio::spawn(async move {
                let bound = source.timeout() + FETCH_GRACE;
                match tokio::time::timeout(bound, source.fetch()).await {
                    Ok(reading) => reading,
                    Err(_) => {
                        warn!(source = source.name(), bound_ms = bound.as_millis() as u64, "Source overran its deadline, abandoned");
                        None
                    }
                }
            })
        })
        .collect();

    let results = join_all(handles).await;

    let readings = sources
        .iter()
        .zip(results)
        .map(|(source, result)| {
            let reading = match result {
                Ok(reading) => reading,
                Err(e) => {
                    error!(source = source.name(), error = %e, "Source task failed");
                    None
                }
            };
            NamedReading {
                source: source.name().to_string(),
                reading,
            }
        })
        .collect();

    Snapshot::new(key, readings)
}
