//! Shared utilities.
//!
//! - [`email`]: welcome mail over SMTP

pub mod email;
