use crate::shared::api_utils::{get_data, get_json};
use contracts::domain::a001_connection::{Connection, ConnectionTestResponse, TokenState};
use contracts::shared::api::ApiError;
use futures::future::join_all;

/// Linked seller accounts, as a bare list.
pub async fn fetch_connections() -> Result<Vec<Connection>, ApiError> {
    get_json("/mercadolibre/conexionToken", &[]).await
}

pub async fn test_connection(client_id: &str) -> Result<ConnectionTestResponse, ApiError> {
    get_json(&format!("/mercadolibre/test-connection/{}", client_id), &[]).await
}

/// Tests every token at once. A failed test counts as an expired token.
pub async fn token_states(client_ids: Vec<String>) -> Vec<(String, TokenState)> {
    join_all(client_ids.into_iter().map(|client_id| async move {
        let state = match test_connection(&client_id).await {
            Ok(response) => TokenState::from_test(response.is_token_valid()),
            Err(e) => {
                log::warn!("token test failed for {}: {}", client_id, e);
                TokenState::Expired
            }
        };
        (client_id, state)
    }))
    .await
}

pub async fn fetch_credentials() -> Result<Vec<Connection>, ApiError> {
    get_data("/mercadolibre/credentials", &[]).await
}

/// Full credential set of one account, including its marketplace access token.
pub async fn fetch_credential(client_id: &str) -> Result<Connection, ApiError> {
    get_data(&format!("/mercadolibre/credentials/{}", client_id), &[]).await
}
