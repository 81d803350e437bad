use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::serde_ext::string_or_number;

// ============================================================================
// Connection
// ============================================================================

/// OAuth credentials of one seller account linked to the marketplace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    #[serde(deserialize_with = "string_or_number")]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Connection {
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.nickname, self.client_id)
    }
}

/// Body of `GET /mercadolibre/test-connection/{client_id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectionTestResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl ConnectionTestResponse {
    pub fn is_token_valid(&self) -> bool {
        self.status == "success"
    }
}

// ============================================================================
// Token state
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    Checking,
    Valid,
    Expired,
}

impl TokenState {
    pub fn from_test(valid: bool) -> Self {
        if valid {
            Self::Valid
        } else {
            Self::Expired
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Checking => "Verificando...",
            Self::Valid => "Vigente",
            Self::Expired => "Vencido",
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

// ============================================================================
// Selection
// ============================================================================

/// The seller account the user is working with, persisted in browser storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedConnection {
    pub client_id: String,
    pub nickname: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub token_valid: bool,
}

impl SelectedConnection {
    pub fn from_connection(conn: &Connection, token_valid: bool) -> Self {
        Self {
            client_id: conn.client_id.clone(),
            nickname: conn.nickname.clone(),
            email: conn.email.clone(),
            token_valid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    #[error("No puedes seleccionar una conexión con el token vencido.")]
    TokenExpired,
}

/// A connection can only be chosen while its token is valid.
pub fn validate_selection(
    conn: &Connection,
    token_valid: bool,
) -> Result<SelectedConnection, ConnectionError> {
    if !token_valid {
        return Err(ConnectionError::TokenExpired);
    }
    Ok(SelectedConnection::from_connection(conn, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection() -> Connection {
        serde_json::from_str(
            r#"{"client_id": 123456, "nickname": "TIENDA_SUR", "email": "sur@tienda.cl",
                "access_token": "APP_USR-1", "created_at": "2024-01-01 10:00:00"}"#,
        )
        .unwrap()
    }

    #[test]
    fn numeric_client_id_is_accepted() {
        let conn = connection();
        assert_eq!(conn.client_id, "123456");
        assert_eq!(conn.display_label(), "TIENDA_SUR (123456)");
    }

    #[test]
    fn expired_token_cannot_be_selected() {
        let err = validate_selection(&connection(), false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "No puedes seleccionar una conexión con el token vencido."
        );
    }

    #[test]
    fn valid_token_is_selected() {
        let selected = validate_selection(&connection(), true).unwrap();
        assert_eq!(selected.client_id, "123456");
        assert_eq!(selected.nickname, "TIENDA_SUR");
        assert!(selected.token_valid);
    }

    #[test]
    fn test_response_status() {
        let ok: ConnectionTestResponse = serde_json::from_str(r#"{"status":"success"}"#).unwrap();
        let bad: ConnectionTestResponse = serde_json::from_str(r#"{"status":"error"}"#).unwrap();
        assert!(ok.is_token_valid());
        assert!(!bad.is_token_valid());
        assert_eq!(TokenState::from_test(false).label(), "Vencido");
        assert_eq!(TokenState::from_test(true).label(), "Vigente");
    }
}
