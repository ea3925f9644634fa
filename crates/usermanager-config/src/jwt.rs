//! JWT signing and validation settings.
//!
//! # Environment Variables
//!
//! - `JWT_SECRET`: HMAC signing key
//! - `JWT_ISSUER`: `iss` claim written and required (default: `usermanager`)
//! - `JWT_AUDIENCE`: `aud` claim written and required (default: `usermanager-clients`)
//! - `JWT_ACCESS_EXPIRY`: Token lifetime in seconds (default: 3600)

use std::env;

use crate::env_or;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "usermanager".to_string()),
            audience: env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "usermanager-clients".to_string()),
            access_token_expiry: env_or("JWT_ACCESS_EXPIRY", 3600), // 1 hour
        }
    }
}
