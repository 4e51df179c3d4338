//! Shared types, errors, and configuration for Carteira.
//!
//! This crate provides common types used across all other crates:
//! - Opaque record ids handed out by the document store
//! - Application-wide error types
//! - Configuration management
//! - Access token claims and the JWT service

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::Claims;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
pub use types::RecordId;
