use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    accounts::{
        dto::{AccountPublic, AccountWithArticles, SignupRequest, UpdateRequest},
        repo_types::{AccountChanges, NewAccount},
    },
    auth::{
        password::hash_password,
        services::{is_valid_email, normalize_email},
    },
    error::ApiError,
    extract::{JsonBody, PathParam},
    state::AppState,
};

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/singup", post(signup))
        .route("/", get(list_accounts))
        .route(
            "/:id",
            get(get_account).put(update_account).delete(delete_account),
        )
}

fn required_text(value: &str, field: &str) -> Result<String, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ApiError::Validation(format!("{field} must not be empty")));
    }
    Ok(value.to_string())
}

fn checked_email(raw: &str) -> Result<String, ApiError> {
    let email = normalize_email(raw);
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }
    Ok(email)
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<SignupRequest>,
) -> Result<(StatusCode, Json<AccountPublic>), ApiError> {
    let email = checked_email(&payload.email)?;
    let first_name = required_text(&payload.first_name, "nome")?;
    let last_name = required_text(&payload.last_name, "sobrenome")?;
    if payload.password.is_empty() {
        return Err(ApiError::Validation("senha must not be empty".into()));
    }

    let password_hash = hash_password(&payload.password)?;

    let account = state
        .accounts
        .create(NewAccount {
            first_name,
            last_name,
            email,
            password_hash,
            is_admin: payload.is_admin,
        })
        .await
        .map_err(|e| {
            warn!(error = %e, "signup rejected");
            ApiError::from(e)
        })?;

    info!(account_id = account.id, email = %account.email, "account created");
    Ok((StatusCode::CREATED, Json(account.into())))
}

#[instrument(skip(state))]
pub async fn list_accounts(
    State(state): State<AppState>,
) -> Result<Json<Vec<AccountPublic>>, ApiError> {
    let accounts = state.accounts.list().await?;
    Ok(Json(accounts.into_iter().map(AccountPublic::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_account(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<AccountWithArticles>, ApiError> {
    let account = state
        .accounts
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound("Account"))?;
    let articles = state.articles.list_by_author(account.id).await?;

    Ok(Json(AccountWithArticles {
        account: account.into(),
        articles,
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_account(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
    JsonBody(payload): JsonBody<UpdateRequest>,
) -> Result<Json<AccountPublic>, ApiError> {
    let email = payload
        .email
        .into_text()
        .map(|e| checked_email(&e))
        .transpose()?;
    let password_hash = payload
        .password
        .into_value()
        .filter(|p| !p.is_empty())
        .map(|p| hash_password(&p))
        .transpose()?;

    let changes = AccountChanges {
        first_name: payload.first_name.into_text(),
        last_name: payload.last_name.into_text(),
        email,
        password_hash,
        is_admin: payload.is_admin.into_value(),
    };

    let account = state
        .accounts
        .update(id, changes)
        .await?
        .ok_or(ApiError::NotFound("Account"))?;

    info!(account_id = account.id, "account updated");
    Ok(Json(account.into()))
}

#[instrument(skip(state))]
pub async fn delete_account(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<StatusCode, ApiError> {
    if !state.accounts.delete(id).await? {
        return Err(ApiError::NotFound("Account"));
    }
    info!(account_id = id, "account deleted");
    Ok(StatusCode::NO_CONTENT)
}
