use serde::{Deserialize, Serialize};

use crate::shared::serde_ext::string_or_number;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "access_token")]
    pub token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl UserInfo {
    /// Name for the header, email when the account has no name.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_accepts_both_token_keys() {
        let a: LoginResponse =
            serde_json::from_str(r#"{"token":"t1","user":{"id":7,"name":"Ana","email":"a@b.cl"}}"#)
                .unwrap();
        assert_eq!(a.token, "t1");
        assert_eq!(a.user.id, "7");

        let b: LoginResponse =
            serde_json::from_str(r#"{"access_token":"t2","user":{"id":"x","email":"c@d.cl"}}"#)
                .unwrap();
        assert_eq!(b.token, "t2");
        assert_eq!(b.user.display_name(), "c@d.cl");
    }
}
