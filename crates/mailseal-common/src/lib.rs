//! Mailseal Common - Shared types and configuration
//!
//! This crate provides the error type, configuration and per-message
//! option types shared by the mailseal crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, LoggingConfig, OpenPgpConfig};
pub use error::{Error, Result};
pub use types::{OutgoingMail, ProtectionOptions};
