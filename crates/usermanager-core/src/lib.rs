//! # User Management Core
//!
//! Core types, errors, and utilities shared by every layer of the User
//! Management API:
//!
//! - [`envelope`]: The uniform `{ data, message, success }` response wrapper
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Page/size query parsing and paginated responses
//! - [`password`]: bcrypt password hashing and verification
//! - [`serde`]: trimming deserializers for request fields
//!
//! # Example
//!
//! ```ignore
//! use usermanager_core::{ApiResponse, AppError};
//!
//! let error = AppError::not_found(anyhow::anyhow!("User not found"));
//! let body = ApiResponse::success(user, "User retrieved successfully");
//! ```

pub mod envelope;
pub mod errors;
pub mod pagination;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use envelope::{ApiResponse, EmptyData, FieldError};
pub use errors::AppError;
pub use pagination::{Page, PaginatedResponse, PaginationQuery};
pub use password::{hash_password, verify_password};
