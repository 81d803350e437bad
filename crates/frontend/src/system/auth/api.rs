use contracts::shared::api::ApiError;
use contracts::system::auth::{LoginRequest, LoginResponse};

use crate::shared::api_utils::post_anonymous;

/// `POST /login` with email and password.
pub async fn login(email: String, password: String) -> Result<LoginResponse, ApiError> {
    let request = LoginRequest { email, password };
    post_anonymous("/login", &request).await
}
