use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::password::verify_password;
use crate::auth::token::mint_token;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Seconds until the token expires.
    pub expires_in: i64,
}

/// POST /api/v1/auth/login
///
/// Bad credentials and unknown emails are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let user = state
        .users
        .find_user_by_email(&req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&req.password, &user.password_hash) {
        return Err(AppError::Unauthorized);
    }

    let token = mint_token(&user.email, state.config.token_ttl_hours, &state.config.jwt_secret)?;
    tracing::info!("Issued dashboard token for {}", user.email);

    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer",
        expires_in: state.config.token_ttl_hours * 3600,
    }))
}
