//! # User Management Auth
//!
//! Authentication types and JWT utilities for the User Management API.
//!
//! - [`claims`]: The claim set carried by access tokens
//! - [`jwt`]: Token creation and verification
//!
//! Tokens are HS256-signed and carry the user id, email, username, and role
//! names. Verification checks the signature, expiry, issuer, and audience
//! configured in [`usermanager_config::JwtConfig`].
//!
//! # Example
//!
//! ```ignore
//! use usermanager_auth::{create_access_token, verify_token};
//! use usermanager_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(&user_id, "a@x.com", "alice", vec![], &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.sub, user_id);
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, encode_claims, verify_token};
