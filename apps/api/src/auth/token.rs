use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Claims carried by a dashboard bearer token. Expiry is the only
/// invalidation mechanism; there is no revocation list.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Staff user email.
    pub sub: String,
    /// Unix timestamp of expiry.
    pub exp: i64,
}

pub fn mint_token(email: &str, ttl_hours: i64, secret: &str) -> Result<String, AppError> {
    let exp = (Utc::now() + Duration::hours(ttl_hours)).timestamp();
    let claims = Claims {
        sub: email.to_string(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("minting token: {e}")))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    // Tokens live for hours; no need for clock-skew leeway on expiry.
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized)
}
