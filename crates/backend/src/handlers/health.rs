use axum::Json;
use contracts::system::health::{HealthResponse, UpstreamStatus};
use std::time::Duration;

use crate::shared::upstream::{http_client, Upstream};

/// GET /health
///
/// Any HTTP answer from the sync backend counts as reachable.
pub async fn health() -> Json<HealthResponse> {
    let api_url = Upstream::Api.base_url().to_string();
    let reachable = match http_client() {
        Ok(client) => client
            .get(&api_url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .is_ok(),
        Err(_) => false,
    };
    if !reachable {
        tracing::warn!("upstream {} not reachable", api_url);
    }

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        upstream: UpstreamStatus { api_url, reachable },
    })
}
