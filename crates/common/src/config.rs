//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Default SQLite database used when `DATABASE_URL` is unset
pub const DEFAULT_DATABASE_URL: &str = "sqlite://campus.db?mode=rwc";

/// Default enrolment cap per course
pub const DEFAULT_MAX_STUDENTS_PER_COURSE: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Maximum number of students a single course may enrol
    pub max_students_per_course: usize,

    /// Runtime configuration
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_students_per_course = match lookup("MAX_STUDENTS_PER_COURSE") {
            Some(raw) => raw.parse().map_err(|_| {
                anyhow::anyhow!("MAX_STUDENTS_PER_COURSE must be a non-negative integer, got '{raw}'")
            })?,
            None => DEFAULT_MAX_STUDENTS_PER_COURSE,
        };

        let config = Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),

            max_students_per_course,

            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "campus=debug".to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        };

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_students_per_course: DEFAULT_MAX_STUDENTS_PER_COURSE,
            rust_log: "campus=debug".to_string(),
            port: 3000,
        }
    }
}
