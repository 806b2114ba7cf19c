//! Auth handlers: register, sign-in, logout.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use docvault_core::error::{AppError, ErrorKind};

use crate::dto::request::{AuthRequest, RegisterRequest, validation_failure};
use crate::dto::response::{ApiResponse, RegisterResponse, TokenResponse, acknowledged};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<RegisterResponse>>, ApiError> {
    let Json(req) = body.map_err(|e| {
        AppError::with_source(ErrorKind::Validation, "can't parse JSON", e)
    })?;

    req.validate().map_err(validation_failure)?;
    state
        .credential_validator
        .validate(&req.login, &req.password)?;

    // A wrong admin token is a bad request here, not a missing session.
    let user = state
        .session_manager
        .sign_up(&req.token, &req.login, &req.password)
        .await
        .map_err(|e| ApiError::from(e).status_if(ErrorKind::Unauthorized, StatusCode::BAD_REQUEST))?;

    Ok(Json(ApiResponse::response(RegisterResponse {
        login: user.login,
    })))
}

/// POST /api/auth
pub async fn sign_in(
    State(state): State<AppState>,
    body: Result<Json<AuthRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    let Json(req) = body.map_err(|e| {
        AppError::with_source(ErrorKind::Validation, "can't parse JSON", e)
    })?;

    state
        .credential_validator
        .validate(&req.login, &req.password)?;

    let session = state
        .session_manager
        .sign_in(&req.login, &req.password)
        .await
        .map_err(|e| ApiError::from(e).status_if(ErrorKind::NotFound, StatusCode::BAD_REQUEST))?;

    Ok(Json(ApiResponse::response(TokenResponse {
        token: session.token,
    })))
}

/// DELETE /api/auth/{token}
pub async fn logout(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<BTreeMap<String, bool>>>, ApiError> {
    state.session_manager.logout(&token).await?;
    Ok(Json(ApiResponse::response(acknowledged(&token))))
}
