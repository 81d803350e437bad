use axum::body::{Body, Bytes};
use axum::extract::{Path, RawQuery};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::Response;

use crate::shared::error::GatewayError;
use crate::shared::upstream::{build_upstream_url, http_client, Upstream};

const FORWARDED_HEADERS: [header::HeaderName; 3] =
    [header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE];

/// ANY /api/*path
pub async fn forward_api(
    method: Method,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, GatewayError> {
    forward(Upstream::Api, method, &path, query.as_deref(), &headers, body).await
}

/// ANY /marketplace/*path
pub async fn forward_marketplace(
    method: Method,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, GatewayError> {
    forward(Upstream::Marketplace, method, &path, query.as_deref(), &headers, body).await
}

/// Sends the request upstream and returns its status and body untouched.
async fn forward(
    upstream: Upstream,
    method: Method,
    path: &str,
    query: Option<&str>,
    headers: &HeaderMap,
    body: Bytes,
) -> Result<Response, GatewayError> {
    let url = build_upstream_url(upstream.base_url(), path, query)?;
    tracing::debug!("{} {} -> {}", method, path, url);

    let mut request = http_client()?.request(method, &url);
    for name in FORWARDED_HEADERS.iter() {
        if let Some(value) = headers.get(name) {
            request = request.header(name, value);
        }
    }
    if !body.is_empty() {
        request = request.body(body);
    }

    let upstream_response = request.send().await?;
    let status = upstream_response.status();
    let content_type = upstream_response.headers().get(header::CONTENT_TYPE).cloned();
    let bytes = upstream_response.bytes().await?;

    if !status.is_success() {
        tracing::warn!("{} {} answered {}", upstream_label(upstream), path, status);
    }

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    if let Some(content_type) = content_type {
        response.headers_mut().insert(header::CONTENT_TYPE, content_type);
    }
    Ok(response)
}

fn upstream_label(upstream: Upstream) -> &'static str {
    match upstream {
        Upstream::Api => "api",
        Upstream::Marketplace => "marketplace",
    }
}
