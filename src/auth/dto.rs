use serde::{Deserialize, Serialize};

/// OAuth2 password-grant form. `username` carries the email; the other grant
/// fields (`grant_type`, `scope`, `client_id`, ...) are accepted and ignored.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}
