//! Bearer token minting and verification helpers.
//!
//! # Purpose
//! Define the claim structure and helpers for signing/verifying the HS256
//! access tokens used across the platform. The identity provider shares the
//! HMAC secret; this service verifies tokens and mints them only for the
//! bootstrap flow and tests.
//!
//! # Key invariants
//! - Tokens are always HS256; `iss` and `exp` are mandatory and validated.
//! - The `sub` claim carries the user id; identity details are always looked
//!   up from the store, never trusted from the token body.
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use uuid::Uuid;

pub const ISSUER: &str = "studymate";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id the token was issued for.
    pub sub: Uuid,
    pub iss: String,
    pub iat: u64,
    pub exp: u64,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

/// Mint an HS256 token for a user id with the given time to live.
pub fn mint(secret: &str, user_id: Uuid, ttl: Duration) -> anyhow::Result<String> {
    let now = unix_now();
    let claims = Claims {
        sub: user_id,
        iss: ISSUER.to_string(),
        iat: now,
        exp: now + ttl.as_secs(),
    };
    let token = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Verify a token's signature, issuer, and expiry; returns the claims.
pub fn verify(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}
