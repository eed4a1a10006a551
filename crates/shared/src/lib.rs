//! Shared types, errors, and configuration for Leavedesk.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management
//! - SMTP email delivery for notifications

pub mod config;
pub mod email;
pub mod error;
pub mod types;

pub use config::{AppConfig, DatabaseConfig, EmailConfig, LeavePolicyConfig};
pub use email::{EmailError, EmailService};
pub use error::{AppError, AppResult};
