//! Database connection settings.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: SQLite connection string (default: `sqlite://usermanager.db?mode=rwc`)
//! - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 5)

use std::env;

use crate::env_or;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://usermanager.db?mode=rwc".to_string()),
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", 5),
        }
    }
}
