//! Shared types, errors, and configuration for Remit.
//!
//! This crate provides common types used across all other crates:
//! - `Money` with a fixed scale of 2 and explicit rounding per operation
//! - The closed `Currency` set and the reference currency
//! - Typed account identifiers
//! - Pagination types for list queries
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::AppError;
