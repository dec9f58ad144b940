use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::domain::model::AppConfig;
use crate::infra::http_source::HttpJsonSource;
use crate::ports::source::EntropySource;

pub fn build_http_client(user_agent: &str) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(user_agent.to_string())
        .pool_idle_timeout(Duration::from_secs(120))
        .build()
}

/// Instantiates one adapter per configured source, in configuration order,
/// sharing a single connection pool.
pub fn build_sources(cfg: &AppConfig) -> Result<Vec<Arc<dyn EntropySource>>, reqwest::Error> {
    let client = build_http_client(&cfg.user_agent)?;
    let sources = cfg
        .sources
        .iter()
        .map(|s| {
            let source = HttpJsonSource::new(client.clone(), s);
            info!(
                source = %s.name,
                url = %s.url,
                method = ?s.method,
                timeout_ms = s.timeout.as_millis() as u64,
                disabled = source.is_disabled(),
                "Registered source"
            );
            Arc::new(source) as Arc<dyn EntropySource>
        })
        .collect();
    Ok(sources)
}
