//! Request extractors and middleware.
//!
//! - [`auth`]: `AuthUser` (any valid bearer token) and `RequireAdmin`
//! - [`content_type`]: 415 for body-carrying requests that are not JSON
//! - [`status`]: envelope for bare 4xx responses and the 404 fallback
//!
//! ```ignore
//! async fn delete_role(RequireAdmin(_admin): RequireAdmin) -> impl IntoResponse {
//!     // Only runs for tokens carrying the Admin role
//! }
//! ```

pub mod auth;
pub mod content_type;
pub mod status;
