use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamStatus {
    pub api_url: String,
    pub reachable: bool,
}

/// Body of the gateway `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub upstream: UpstreamStatus,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_gateway_body() {
        let h: HealthResponse = serde_json::from_str(
            r#"{"status":"ok","version":"0.1.0","upstream":{"api_url":"http://x","reachable":false}}"#,
        )
        .unwrap();
        assert!(h.is_ok());
        assert!(!h.upstream.reachable);
    }
}
