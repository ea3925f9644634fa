//! # User Management API
//!
//! A REST API built with Rust, Axum and SQLite for managing user accounts,
//! roles and course enrollments behind JWT bearer authentication.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Admin bootstrap used by usermanager-cli
//! ├── middleware/       # Auth extractors, content-type check, status envelope
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Registration and login
//! │   ├── users/       # Users, role assignment, enrollment
//! │   ├── roles/       # Role CRUD
//! │   └── courses/     # Course CRUD
//! ├── repositories/     # SQL per table, one struct per repository
//! └── utils/            # Outgoing email
//! ```
//!
//! Shared building blocks live in workspace crates:
//!
//! - `usermanager-core`: response envelope, `AppError`, pagination, bcrypt helpers
//! - `usermanager-config`: environment-driven config structs
//! - `usermanager-db`: SQLite pool construction
//! - `usermanager-auth`: JWT claims, signing and verification
//!
//! ## Request flow
//!
//! ```text
//! request → router → content-type check → AuthUser / RequireAdmin
//!         → controller → service → repository → SQLite
//! ```
//!
//! Every response, success or failure, is wrapped in
//! `{ "data": ..., "message": ..., "success": ... }`.
//!
//! ## Quick Start
//!
//! ```bash
//! DATABASE_URL=sqlite://usermanager.db?mode=rwc
//! JWT_SECRET=your-secure-secret-key
//! cargo run --bin usermanager-cli -- create-admin
//! cargo run
//! ```
//!
//! API documentation is served at `/swagger-ui` and `/scalar`.

pub mod cli;
pub mod db;
pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod repositories;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

pub use usermanager_auth;
pub use usermanager_config;
pub use usermanager_core;
pub use usermanager_db;
