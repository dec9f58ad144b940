use roundvote_core::app::state::RoundStatus;
use roundvote_core::domain::digit::Outcome;
use roundvote_core::infra::time::iso_utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `GET /api/result`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResultResponse {
    pub previous: Option<Outcome>,
    #[serde(rename = "final")]
    pub final_outcome: Option<Outcome>,
    /// Per-source readings of the in-flight round, in configuration order;
    /// `null` outside the prepare..finalize window.
    pub sources: Option<Map<String, Value>>,
    pub round: Option<String>,
    #[serde(rename = "serverTimeUTC")]
    pub server_time_utc: String,
}

impl From<RoundStatus> for ResultResponse {
    fn from(status: RoundStatus) -> Self {
        let (sources, round) = match status.snapshot {
            Some(snapshot) => {
                let readings = snapshot
                    .readings
                    .into_iter()
                    .map(|r| {
                        let digit = r.reading.map_or(Value::Null, |d| Value::from(d.value()));
                        (r.source, digit)
                    })
                    .collect();
                (Some(readings), Some(snapshot.key.to_string()))
            }
            None => (None, None),
        };
        Self {
            previous: status.previous,
            final_outcome: status.final_outcome,
            sources,
            round,
            server_time_utc: iso_utc(status.server_time),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub time: String,
}
