//! # User Management Config
//!
//! Configuration types for the User Management API, loaded from environment
//! variables (a `.env` file is read by the binaries through `dotenvy`):
//!
//! - [`database`]: Connection string and pool size
//! - [`jwt`]: Token signing key, issuer, audience, and lifetime
//! - [`server`]: Bind address
//! - [`cors`]: Allowed browser origins
//! - [`email`]: SMTP settings for outgoing mail
//!
//! # Example
//!
//! ```ignore
//! use usermanager_config::{DatabaseConfig, JwtConfig};
//!
//! let db_config = DatabaseConfig::from_env();
//! let jwt_config = JwtConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod email;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;

/// Reads `key` and parses it, falling back to `default` when unset or malformed.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(default)
}
