//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use ledger_types::{
    AccountResponse, AccountStore, CreateUserRequest, LedgerError, PaymentResponse,
    RemoveAccountParams, RemoveUserParams, SaveAccountRequest, SendPaymentRequest, UserResponse,
};

use super::credentials::extract_credentials;
use crate::LedgerService;
use crate::auth::Credentials;

/// Application state shared across handlers.
pub struct AppState<S: AccountStore> {
    pub service: LedgerService<S>,
}

/// Wrapper to implement IntoResponse for LedgerError (orphan rule workaround).
pub struct ApiError(pub LedgerError);

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            LedgerError::UserNotFound => StatusCode::UNAUTHORIZED,
            LedgerError::BadCredentials => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.0.kind(),
            "message": self.0.to_string(),
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Extracts Basic credentials or denies the request.
///
/// A request whose identity cannot even be read resolves no user, so it is
/// reported as `UserNotFound` (401).
fn require_credentials(headers: &HeaderMap) -> Result<Credentials, ApiError> {
    extract_credentials(headers).ok_or(ApiError(LedgerError::UserNotFound))
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// List the caller's accounts. 204 when the caller owns none.
#[tracing::instrument(skip(state, headers))]
pub async fn get_accounts<S: AccountStore>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let credentials = require_credentials(&headers)?;
    let accounts = state.service.get_accounts(&credentials).await?;

    if accounts.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let body: Vec<AccountResponse> = accounts.iter().map(AccountResponse::from).collect();
    Ok(Json(body).into_response())
}

/// Transfer funds from the caller's account to the receiver's.
#[tracing::instrument(skip(state, headers), fields(receiver = %params.receiver, amount = params.amount))]
pub async fn send_payment<S: AccountStore>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    Query(params): Query<SendPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let credentials = require_credentials(&headers)?;
    let payment = state
        .service
        .send_payment(&credentials, &params.receiver, params.currency, params.amount)
        .await?;

    Ok((StatusCode::ACCEPTED, Json(PaymentResponse::from(&payment))))
}

/// Create a user (administrator only).
#[tracing::instrument(skip(state, headers, req), fields(email = %req.email))]
pub async fn create_user<S: AccountStore>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    Json(req): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let credentials = require_credentials(&headers)?;
    let user = state.service.create_user(&credentials, req).await?;

    Ok((StatusCode::ACCEPTED, Json(UserResponse::from(&user))))
}

/// Remove a user by email (administrator only).
#[tracing::instrument(skip(state, headers))]
pub async fn remove_user<S: AccountStore>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    Query(params): Query<RemoveUserParams>,
) -> Result<impl IntoResponse, ApiError> {
    let credentials = require_credentials(&headers)?;
    state.service.remove_user(&credentials, &params.email).await?;

    Ok(StatusCode::ACCEPTED)
}

/// Create or overwrite an account (administrator only).
#[tracing::instrument(skip(state, headers, req), fields(user_id = %req.user_id))]
pub async fn save_account<S: AccountStore>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    Json(req): Json<SaveAccountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let credentials = require_credentials(&headers)?;
    let account = state.service.save_account(&credentials, req).await?;

    Ok((StatusCode::ACCEPTED, Json(AccountResponse::from(&account))))
}

/// Remove an account by owner email and currency (administrator only).
#[tracing::instrument(skip(state, headers))]
pub async fn remove_account<S: AccountStore>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    Query(params): Query<RemoveAccountParams>,
) -> Result<impl IntoResponse, ApiError> {
    let credentials = require_credentials(&headers)?;
    state
        .service
        .remove_account(&credentials, &params.email, params.currency)
        .await?;

    Ok(StatusCode::ACCEPTED)
}
