//! # Authentication Module
//!
//! This module provides the authentication boundary for the MediSync API:
//! password hashing and verification, bearer token issuance, and the
//! extractor that turns an `Authorization` header into a verified
//! `{user_id, role}` claim.
//!
//! Passwords are hashed with Argon2, a secure password hashing algorithm,
//! to protect user credentials from common attacks like rainbow tables
//! and brute force attempts. Tokens are JWTs signed with HS256; handlers
//! trust the decoded claim and never re-verify the password.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{Duration, Utc};
use eyre::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use medisync_core::{
    errors::{ClinicError, ClinicResult},
    models::user::Role,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// Hashes a password using the Argon2 algorithm
///
/// This function securely hashes passwords before storage in the database,
/// automatically generating a random salt and using industry-standard
/// parameters for Argon2.
///
/// # Arguments
///
/// * `password` - The plain text password to hash
///
/// # Returns
///
/// * `Result<String>` - The hashed password in PHC string format, or an error
pub fn hash_password(password: &str) -> Result<String> {
    // Generate a fresh, random salt
    let salt = SaltString::generate(&mut OsRng);

    // Create default Argon2 instance
    let argon2 = Argon2::default();

    // Hash the password with salt
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Verifies a plain text password against a stored PHC-format hash
///
/// # Arguments
///
/// * `hash` - The stored password hash
/// * `password` - Plain text password to verify
///
/// # Returns
///
/// * `Result<bool>` - True if the password matches, false otherwise
pub fn verify_password(hash: &str, password: &str) -> Result<bool> {
    let parsed_hash = argon2::PasswordHash::new(hash)
        .map_err(|e| eyre::eyre!("Invalid password hash: {}", e))?;

    let is_valid = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();

    Ok(is_valid)
}

/// Claims embedded in every issued bearer token
///
/// The `sub` and `role` fields are the identity the rest of the service
/// trusts; `iat`/`exp` bound the token lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Authenticated user id
    pub sub: Uuid,
    /// Account role at issuance time
    pub role: Role,
    /// Issued-at, seconds since epoch
    pub iat: i64,
    /// Expiry, seconds since epoch
    pub exp: i64,
}

/// Issues a signed bearer token embedding `{user_id, role}`
pub fn issue_token(
    secret: &str,
    user_id: Uuid,
    role: Role,
    ttl_minutes: i64,
) -> ClinicResult<String> {
    let now = Utc::now();
    let claims = TokenClaims {
        sub: user_id,
        role,
        iat: now.timestamp(),
        exp: (now + Duration::minutes(ttl_minutes)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ClinicError::Internal(Box::new(e)))
}

/// Decodes and validates a bearer token, returning its claims
///
/// Signature or expiry failures surface as an authentication error; the
/// caller never learns which check failed.
pub fn decode_token(secret: &str, token: &str) -> ClinicResult<TokenClaims> {
    decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| ClinicError::Authentication("Invalid or expired token".to_string()))
}

/// Verified caller identity, extracted from the `Authorization` header
///
/// Handlers receive this extractor and declare the roles they accept with
/// [`AuthUser::require`] or [`AuthUser::require_any`] before touching any
/// business logic.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: Role,
}

impl AuthUser {
    /// Accepts exactly one role; anything else is an authorization error.
    pub fn require(self, role: Role) -> Result<Self, ClinicError> {
        if self.role == role {
            Ok(self)
        } else {
            Err(ClinicError::Authorization(format!(
                "Only {role} accounts may perform this operation"
            )))
        }
    }

    /// Accepts any of the listed roles.
    pub fn require_any(self, roles: &[Role]) -> Result<Self, ClinicError> {
        if roles.contains(&self.role) {
            Ok(self)
        } else {
            Err(ClinicError::Authorization(
                "This account role may not perform this operation".to_string(),
            ))
        }
    }
}

#[axum::async_trait]
impl FromRequestParts<Arc<ApiState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError(ClinicError::Authentication(
                    "Missing Authorization header".to_string(),
                ))
            })?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError(ClinicError::Authentication(
                "Expected a bearer token".to_string(),
            ))
        })?;

        let claims = decode_token(&state.jwt_secret, token)?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}
