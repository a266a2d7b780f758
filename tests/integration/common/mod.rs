//! Common test utilities and fixtures for integration tests
//!
//! This module provides shared infrastructure for all integration tests:
//! - An isolated in-memory database per test, migrations applied
//! - The application router wired to that database
//! - Record factories for courses and students
//! - An API client that drives the router without a network


use std::sync::Once;

use anyhow::Result;
use axum::Router;
use campus_common::Config;
use campus_courses::CoursesRepositories;
use sqlx::SqlitePool;

pub use client::{ApiClient, ApiResponse};
pub use factories::{CourseFactory, StudentFactory};

/// Base path of the courses collection
pub const COURSES_URL: &str = "/api/v1/courses/";

/// Base path of the students collection
pub const STUDENTS_URL: &str = "/api/v1/students/";

static INIT: Once = Once::new();

/// Route a test binary's tracing output through the test harness writer
fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Test application with its own database
pub struct TestApp {
    pub config: Config,
    pub pool: SqlitePool,
    pub repos: CoursesRepositories,
    router: Router,
}

impl TestApp {
    /// Create a new test application on a fresh in-memory database
    pub async fn new() -> Result<Self> {
        Self::with_config(Config::default()).await
    }

    /// Create a test application with custom settings.
    ///
    /// `database_url` is always replaced: every test gets its own database.
    pub async fn with_config(config: Config) -> Result<Self> {
        init_tracing();

        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            ..config
        };

        let pool = campus_app::connect_pool(&config.database_url).await?;
        campus_app::run_migrations(&pool).await?;

        let router = campus_app::create_app(&config, pool.clone());
        let repos = CoursesRepositories::new(pool.clone());

        Ok(TestApp {
            config,
            pool,
            repos,
            router,
        })
    }

    /// API client bound to this application
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.router.clone())
    }

    /// Factory persisting courses into this application's database
    pub fn course_factory(&self) -> CourseFactory {
        CourseFactory::new(self.repos.clone(), self.config.max_students_per_course)
    }

    /// Factory persisting students into this application's database
    pub fn student_factory(&self) -> StudentFactory {
        StudentFactory::new(self.repos.clone())
    }

    /// Number of course rows, read straight from the database
    pub async fn course_count(&self) -> Result<i64> {
        Ok(self.repos.courses.count().await?)
    }

    /// Number of student rows, read straight from the database
    pub async fn student_count(&self) -> Result<i64> {
        Ok(self.repos.students.count().await?)
    }
}

/// URL of a single course
pub fn course_url(id: i64) -> String {
    format!("{}{}/", COURSES_URL, id)
}

/// URL of a single student
pub fn student_url(id: i64) -> String {
    format!("{}{}/", STUDENTS_URL, id)
}

/// Common test assertions
pub mod assertions {
    use super::ApiResponse;
    use axum::http::StatusCode;

    /// Assert the standard error envelope with the given status and code
    pub fn assert_error(resp: &ApiResponse, status: StatusCode, code: &str) {
        assert_eq!(resp.status, status, "unexpected status, body: {}", resp.body);
        assert_eq!(
            resp.body["error"]["code"], code,
            "unexpected error code, body: {}",
            resp.body
        );
    }

    /// Assert that a timestamp string is recent (within last minute)
    pub fn assert_timestamp_recent(value: &serde_json::Value) {
        let raw = value.as_str().expect("timestamp should be a string");
        let parsed = chrono::DateTime::parse_from_rfc3339(raw).expect("RFC 3339 timestamp");
        let diff = chrono::Utc::now().signed_duration_since(parsed);
        assert!(
            diff.num_seconds() < 60,
            "Timestamp should be recent, but was {} seconds ago",
            diff.num_seconds()
        );
    }
}
