use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use crate::{accounts::Account, error::ApiError, state::AppState};

/// The account named by the request's bearer token.
///
/// Every failure (missing header, bad token, deleted account) is the same 401.
pub struct CurrentAccount(pub Account);

#[async_trait]
impl FromRequestParts<AppState> for CurrentAccount {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        // Expect "Bearer <token>"
        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or(ApiError::Unauthorized)?;

        let account_id = state.jwt.resolve_token(token.trim()).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            ApiError::Unauthorized
        })?;

        let account = state
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| {
                warn!(account_id, "token subject no longer exists");
                ApiError::Unauthorized
            })?;

        Ok(CurrentAccount(account))
    }
}
