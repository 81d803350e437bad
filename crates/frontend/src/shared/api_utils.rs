//! HTTP helpers for the gateway.
//!
//! `/api/*` reaches the sync backend and `/marketplace/*` the marketplace
//! public API. Every call carries `Accept: application/json` and the session
//! token as `Authorization: Bearer <token>`.

use crate::system::auth::storage;
use contracts::shared::api::{ApiEnvelope, ApiError};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Gateway base URL built from the current window location on port 3000.
///
/// Returns an empty string when there is no window.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Sync backend URL: `api_url("/warehouses")` → `http://host:3000/api/warehouses`.
pub fn api_url(path: &str) -> String {
    format!("{}/api{}", api_base(), path)
}

/// Marketplace API URL through the gateway.
pub fn marketplace_url(path: &str) -> String {
    format!("{}/marketplace{}", api_base(), path)
}

/// Appends url-encoded query pairs.
pub fn with_query(url: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return url.to_string();
    }
    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, separator, query)
}

fn authorized(builder: RequestBuilder, token: Option<&str>) -> Result<RequestBuilder, ApiError> {
    let token = match token {
        Some(token) => token.to_string(),
        None => storage::get_access_token().ok_or(ApiError::MissingToken)?,
    };
    Ok(builder
        .header("Accept", "application/json")
        .header("Authorization", &format!("Bearer {}", token)))
}

/// Status check and JSON decode. 204 and non-2xx become `ApiError`.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    if status == 204 || !response.ok() {
        return Err(ApiError::from_status(status, &body));
    }
    serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
}

async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
    builder
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))
}

async fn send_body<B: Serialize>(builder: RequestBuilder, body: &B) -> Result<Response, ApiError> {
    builder
        .json(body)
        .map_err(|e| ApiError::Parse(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))
}

/// `GET /api{path}` decoding a bare JSON body.
pub async fn get_json<T: DeserializeOwned>(
    path: &str,
    params: &[(&str, String)],
) -> Result<T, ApiError> {
    let url = with_query(&api_url(path), params);
    let response = send(authorized(Request::get(&url), None)?).await?;
    read_json(response).await
}

/// `GET /api{path}` for `{ status, data, message }` bodies, returning `data`.
pub async fn get_data<T: DeserializeOwned>(
    path: &str,
    params: &[(&str, String)],
) -> Result<T, ApiError> {
    get_json::<ApiEnvelope<T>>(path, params).await?.into_data()
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    let builder = authorized(Request::post(&api_url(path)), None)?;
    read_json(send_body(builder, body).await?).await
}

pub async fn put_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    let builder = authorized(Request::put(&api_url(path)), None)?;
    read_json(send_body(builder, body).await?).await
}

/// `GET /marketplace{path}` with the session token.
pub async fn marketplace_get<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = send(authorized(Request::get(&marketplace_url(path)), None)?).await?;
    read_json(response).await
}

/// `PUT /marketplace{path}` authorized with a seller's own marketplace token.
pub async fn marketplace_put<B: Serialize>(
    path: &str,
    body: &B,
    seller_token: &str,
) -> Result<serde_json::Value, ApiError> {
    let builder = authorized(Request::put(&marketplace_url(path)), Some(seller_token))?;
    read_json(send_body(builder, body).await?).await
}

/// POST without the session header, for the login call itself.
pub async fn post_anonymous<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, ApiError> {
    let builder = Request::post(&api_url(path)).header("Accept", "application/json");
    read_json(send_body(builder, body).await?).await
}

/// Raw body of a failed call, for endpoints whose error bodies carry details.
pub async fn post_json_raw<B: Serialize>(path: &str, body: &B) -> Result<String, (u16, String)> {
    let builder = authorized(Request::post(&api_url(path)), None)
        .map_err(|e| (401, e.to_string()))?;
    let response = send_body(builder, body)
        .await
        .map_err(|e| (0, e.to_string()))?;
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    if response.ok() {
        Ok(text)
    } else {
        Err((status, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pairs_are_encoded() {
        let url = with_query(
            "/api/mercadolibre/products/1/catalogo",
            &[("title", "Polera roja & azul".to_string())],
        );
        assert_eq!(url, "/api/mercadolibre/products/1/catalogo?title=Polera%20roja%20%26%20azul");
    }

    #[test]
    fn existing_query_is_extended() {
        let url = with_query("/x?page=1", &[("limit", "100".to_string())]);
        assert_eq!(url, "/x?page=1&limit=100");
        assert_eq!(with_query("/x", &[]), "/x");
    }
}
