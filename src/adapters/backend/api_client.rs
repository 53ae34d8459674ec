use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::application::ports::ShelfDataPort;
use crate::domain::detection::{apply_ingest_policy, Detection, IngestPolicy};
use crate::domain::errors::{DomainError, DomainResult};

const DEFAULT_BASE_URL: &str = "http://localhost:8000/state";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Cliente del backend de visión. Una petición GET por cámara contra
/// `{base}/{camera_id}`, con timeout fijo y sin reintentos.
pub struct ShelfApiClient {
    client: reqwest::Client,
    base_url: String,
    ingest_policy: IngestPolicy,
}

impl ShelfApiClient {
    /// Base desde `SHELF_API_BASE` si está definida; si no, la fija.
    pub fn new() -> Self {
        let base = std::env::var("SHELF_API_BASE").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::with_base_url(base)
    }

    pub fn with_base_url(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            base_url,
            ingest_policy: IngestPolicy::default(),
        }
    }

    pub fn with_ingest_policy(mut self, policy: IngestPolicy) -> Self {
        self.ingest_policy = policy;
        self
    }
}

impl Default for ShelfApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Si el payload trae un array `detections` la estantería está presente;
/// cualquier otra forma cuenta como ausente, nunca como error.
pub fn normalize_payload(
    payload: &Value,
    policy: IngestPolicy,
) -> DomainResult<Option<Vec<Detection>>> {
    let Some(raw) = payload.get("detections").filter(|v| v.is_array()) else {
        return Ok(None);
    };
    let detections: Vec<Detection> = serde_json::from_value(raw.clone())
        .map_err(|e| DomainError::InvalidInput(format!("payload de detecciones inválido: {e}")))?;
    apply_ingest_policy(detections, policy).map(Some)
}

#[async_trait]
impl ShelfDataPort for ShelfApiClient {
    async fn fetch_shelf(&self, camera_id: &str) -> DomainResult<Option<Vec<Detection>>> {
        let url = format!("{}/{}", self.base_url, camera_id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::UpstreamUnavailable(format!("GET {url}: {e}")))?
            .error_for_status()
            .map_err(|e| DomainError::UpstreamUnavailable(format!("GET {url}: {e}")))?;

        let payload: Value = response
            .json()
            .await
            .map_err(|e| DomainError::InvalidInput(format!("JSON inválido de {url}: {e}")))?;

        normalize_payload(&payload, self.ingest_policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detection_json(id: &str, score: f64) -> Value {
        json!({
            "id": id, "camera_id": "6591", "roi_id": format!("r-{id}"),
            "product_id": format!("p-{id}"), "product_name": "Banana",
            "quantidade_pct": 55.0, "qualidade_pct": 60.0,
            "contexto_pct": 70.0, "pontuacao_total": score
        })
    }

    #[test]
    fn payload_with_detections_is_present() {
        let payload = json!({ "camera_id": "6591", "detections": [detection_json("d1", 80.0)] });
        let shelf = normalize_payload(&payload, IngestPolicy::Drop).unwrap();
        let detections = shelf.expect("estantería presente");
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].score, 80.0);
    }

    #[test]
    fn payload_without_detections_is_absent_not_error() {
        let payload = json!({ "camera_id": "6371", "message": "sem dados ainda" });
        assert!(normalize_payload(&payload, IngestPolicy::Drop)
            .unwrap()
            .is_none());
    }

    #[test]
    fn drop_policy_filters_out_of_range_values() {
        let payload = json!({
            "detections": [detection_json("ok", 80.0), detection_json("bad", 130.0)]
        });
        let detections = normalize_payload(&payload, IngestPolicy::Drop)
            .unwrap()
            .unwrap();
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].id, "ok");
    }

    #[test]
    fn reject_policy_fails_the_shelf() {
        let payload = json!({
            "detections": [detection_json("ok", 80.0), detection_json("bad", -2.0)]
        });
        assert!(normalize_payload(&payload, IngestPolicy::Reject).is_err());
    }
}
