use super::config::config;
use super::error::GatewayError;
use once_cell::sync::OnceCell;
use reqwest::Url;
use std::time::Duration;

/// Which upstream a proxied request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    Api,
    Marketplace,
}

impl Upstream {
    pub fn base_url(self) -> &'static str {
        let upstream = &config().upstream;
        match self {
            Self::Api => &upstream.api_url,
            Self::Marketplace => &upstream.marketplace_url,
        }
    }
}

static CLIENT: OnceCell<reqwest::Client> = OnceCell::new();

/// Shared HTTP client with the configured timeout.
pub fn http_client() -> Result<&'static reqwest::Client, GatewayError> {
    CLIENT.get_or_try_init(|| {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(config().upstream.timeout_secs))
            .build()
            .map_err(GatewayError::from)
    })
}

/// `base` + `/path` + `?query`. The resolved URL must stay on the base origin
/// and under the base path once the URL parser has normalised `\`, `%2e%2e`
/// and `..` segments.
pub fn build_upstream_url(
    base: &str,
    path: &str,
    query: Option<&str>,
) -> Result<String, GatewayError> {
    let path = path.trim_start_matches(['/', '\\']);
    let invalid = || GatewayError::InvalidPath(path.to_string());
    if path.contains("://") {
        return Err(invalid());
    }

    let base_url = Url::parse(base).map_err(|_| invalid())?;
    let mut joined = format!("{}/{}", base.trim_end_matches('/'), path);
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        joined.push('?');
        joined.push_str(query);
    }
    let url = Url::parse(&joined).map_err(|_| invalid())?;

    let base_path = base_url.path().trim_end_matches('/');
    let under_base = url.path() == base_path
        || url
            .path()
            .strip_prefix(base_path)
            .is_some_and(|rest| rest.starts_with('/'));
    if url.origin() != base_url.origin() || !under_base {
        return Err(invalid());
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_base_path_and_query() {
        assert_eq!(
            build_upstream_url("http://sync/api/", "/mercadolibre/stock/556", Some("page=1"))
                .unwrap(),
            "http://sync/api/mercadolibre/stock/556?page=1"
        );
        assert_eq!(
            build_upstream_url("https://api.mercadolibre.com", "items/MLC1", Some("")).unwrap(),
            "https://api.mercadolibre.com/items/MLC1"
        );
    }

    #[test]
    fn rejects_traversal_and_foreign_hosts() {
        assert!(matches!(
            build_upstream_url("http://sync/api", "../admin", None),
            Err(GatewayError::InvalidPath(_))
        ));
        assert!(matches!(
            build_upstream_url("http://sync/api", "http://evil.example/x", None),
            Err(GatewayError::InvalidPath(_))
        ));
    }

    #[test]
    fn rejects_paths_that_normalise_out_of_the_base() {
        for path in [
            "..\\admin",
            "%2e%2e/admin",
            "sub/%2E%2E/%2e%2e/admin",
            "mercadolibre/../../admin",
        ] {
            assert!(
                matches!(
                    build_upstream_url("http://sync/api", path, None),
                    Err(GatewayError::InvalidPath(_))
                ),
                "{path} should be rejected"
            );
        }
    }

    #[test]
    fn inner_dot_segments_that_stay_under_the_base_are_kept() {
        assert_eq!(
            build_upstream_url("http://sync/api", "a/../mercadolibre/stock/1", None).unwrap(),
            "http://sync/api/mercadolibre/stock/1"
        );
        assert_eq!(
            build_upstream_url("https://api.mercadolibre.com", "items/%2e%2e/users/1", None)
                .unwrap(),
            "https://api.mercadolibre.com/users/1"
        );
    }
}
