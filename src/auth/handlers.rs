use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    accounts::AccountPublic,
    auth::{
        dto::{LoginForm, TokenResponse},
        extractors::CurrentAccount,
        services::authenticate,
    },
    error::ApiError,
    extract::FormBody,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/logado", get(get_logged_in))
}

#[instrument(skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    FormBody(form): FormBody<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    let account = authenticate(state.accounts.as_ref(), &form.username, &form.password)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let access_token = state.jwt.issue_access_token(account.id)?;

    info!(account_id = account.id, "account logged in");
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
    }))
}

#[instrument(skip_all)]
pub async fn get_logged_in(CurrentAccount(account): CurrentAccount) -> Json<AccountPublic> {
    Json(account.into())
}
