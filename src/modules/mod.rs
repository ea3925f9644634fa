//! Feature modules. Each one follows the same layout:
//!
//! - `model`: rows, DTOs and response types
//! - `service`: business rules over the repositories
//! - `controller`: axum handlers with OpenAPI annotations
//! - `router`: route table mounted under `/api`

pub mod auth;
pub mod courses;
pub mod roles;
pub mod users;
