//! Shared utilities, configuration, and error handling for Campus
//!
//! This crate provides common functionality used across the Campus service:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Request extractors (validated JSON, query and path, pagination)

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;

pub use config::Config;
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::{Pagination, ValidatedJson, ValidatedPath, ValidatedQuery};
