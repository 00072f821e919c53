use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use serein_core::Role;

use crate::error::AuthError;

/// Claims carried by a Serein bearer token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub roles: Vec<Role>,
    pub iat: i64,
    pub exp: i64,
}

/// Sign a token for the given user. Token issuance has no HTTP surface;
/// this is called by operator tooling and tests.
pub fn sign_token(
    user_id: Uuid,
    roles: &[Role],
    secret: &[u8],
    ttl: Duration,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        roles: roles.to_vec(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )?;
    Ok(token)
}

/// Validate a bearer token and return its claims. Expiry is always
/// checked.
pub fn validate_token(token: &str, secret: &[u8]) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken(e.to_string()),
        })?;

    Ok(data.claims)
}
