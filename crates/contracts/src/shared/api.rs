//! Response envelope and transport errors shared by every API call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ACCESS_DENIED_MESSAGE: &str = "Acceso denegado. Por favor, verifica tus permisos.";
pub const NO_API_CONNECTION_MESSAGE: &str = "Sin conexión a la API";

/// Standard wrapper used by the sync backend: `{ status, data, message }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub status: Option<String>,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }

    /// Unwraps `data`. A missing payload is reported as a parse error.
    pub fn into_data(self) -> Result<T, ApiError> {
        match self.data {
            Some(data) => Ok(data),
            None => Err(ApiError::Parse(
                self.message
                    .unwrap_or_else(|| "La respuesta no contiene datos".to_string()),
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Sin conexión a la API: {0}")]
    Network(String),

    #[error("{}", ACCESS_DENIED_MESSAGE)]
    Forbidden,

    #[error("Sin contenido")]
    NoContent,

    #[error("Error {code}: {}", .message.as_deref().unwrap_or("Datos no disponibles"))]
    Status { code: u16, message: Option<String> },

    #[error("Respuesta inválida: {0}")]
    Parse(String),

    #[error("No hay una conexión seleccionada")]
    MissingConnection,

    #[error("La sesión no está iniciada")]
    MissingToken,
}

impl ApiError {
    /// Maps a non-success HTTP status and its raw body to an error.
    pub fn from_status(code: u16, body: &str) -> Self {
        match code {
            403 => Self::Forbidden,
            204 => Self::NoContent,
            _ => Self::Status {
                code,
                message: extract_message(body),
            },
        }
    }

    /// Text shown to the user. Only access-denied and backend-provided
    /// messages override the caller's fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Forbidden => ACCESS_DENIED_MESSAGE.to_string(),
            Self::Status {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// `Error <code>: <message>` for HTTP failures, the generic offline text otherwise.
    pub fn report_message(&self) -> String {
        match self {
            Self::Network(_) => NO_API_CONNECTION_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

/// Pulls the `message` field out of a JSON error body.
pub fn extract_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_uses_access_denied_text() {
        let err = ApiError::from_status(403, r#"{"message":"nope"}"#);
        assert_eq!(err, ApiError::Forbidden);
        assert_eq!(err.user_message("fallback"), ACCESS_DENIED_MESSAGE);
    }

    #[test]
    fn status_prefers_backend_message() {
        let err = ApiError::from_status(500, r#"{"message":"Bodega no encontrada"}"#);
        assert_eq!(err.user_message("Error al obtener la bodega."), "Bodega no encontrada");
        assert_eq!(err.report_message(), "Error 500: Bodega no encontrada");
    }

    #[test]
    fn status_without_message_falls_back() {
        let err = ApiError::from_status(502, "<html>bad gateway</html>");
        assert_eq!(err.user_message("Error al obtener las bodegas"), "Error al obtener las bodegas");
        assert_eq!(err.report_message(), "Error 502: Datos no disponibles");
    }

    #[test]
    fn network_error_reports_offline() {
        let err = ApiError::Network("connection refused".into());
        assert_eq!(err.report_message(), NO_API_CONNECTION_MESSAGE);
    }

    #[test]
    fn envelope_without_data_is_parse_error() {
        let env: ApiEnvelope<Vec<u32>> =
            serde_json::from_str(r#"{"status":"error","message":"sin datos"}"#).unwrap();
        assert!(!env.is_success());
        assert_eq!(env.into_data(), Err(ApiError::Parse("sin datos".into())));
    }

    #[test]
    fn envelope_with_data_unwraps() {
        let env: ApiEnvelope<Vec<u32>> =
            serde_json::from_str(r#"{"status":"success","data":[1,2]}"#).unwrap();
        assert!(env.is_success());
        assert_eq!(env.into_data(), Ok(vec![1, 2]));
    }
}
