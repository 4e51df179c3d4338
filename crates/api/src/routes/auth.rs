//! Login route.

use axum::{Json, Router, extract::State, routing::post};
use tracing::{error, info, warn};

use crate::AppState;
use crate::error::ApiResult;
use carteira_shared::AppError;
use carteira_shared::auth::{LoginRequest, LoginResponse, UserInfo};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

/// POST /auth/login - Check credentials and issue an access token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let credentials = state.credentials.clone();
    let username = payload.username.clone();

    // Argon2 verification is CPU-bound.
    let verified = tokio::task::spawn_blocking(move || {
        credentials.verify(&payload.username, &payload.password)
    })
    .await
    .map_err(|e| {
        error!(error = %e, "Credential check panicked");
        AppError::Internal("An error occurred during login".to_string())
    })?
    .map_err(|e| {
        error!(error = %e, "Password verification error");
        AppError::Internal("An error occurred during login".to_string())
    })?;

    let Some(user) = verified else {
        warn!(username = %username, "Failed login attempt");
        return Err(AppError::Unauthorized("Invalid username or password".to_string()).into());
    };

    let access_token = state
        .jwt_service
        .generate_access_token(&user.username, &user.name)
        .map_err(|e| {
            error!(error = %e, "Failed to generate access token");
            AppError::Internal("An error occurred during login".to_string())
        })?;

    info!(username = %user.username, "User logged in successfully");

    Ok(Json(LoginResponse {
        user: UserInfo {
            username: user.username,
            name: user.name,
        },
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_service.access_token_expires_in(),
    }))
}
