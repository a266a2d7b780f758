//! Simple integration test to verify basic infrastructure works

#![allow(dead_code)]

mod common;

use axum::http::StatusCode;
use campus_common::Config;

use crate::common::{course_url, student_url, TestApp};

#[tokio::test]
async fn test_basic_infrastructure() {
    let app = TestApp::new().await.unwrap();

    let resp = app.client().get("/health").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "OK");
}

#[tokio::test]
async fn test_migrations_applied() {
    let app = TestApp::new().await.unwrap();

    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('courses', 'students', 'course_students') ORDER BY name",
    )
    .fetch_all(&app.pool)
    .await
    .unwrap();

    assert_eq!(tables, vec!["course_students", "courses", "students"]);
}

#[tokio::test]
async fn test_config_loading() {
    let config = Config::from_vars(|key| match key {
        "MAX_STUDENTS_PER_COURSE" => Some("5".to_string()),
        _ => None,
    })
    .unwrap();

    let app = TestApp::with_config(config).await.unwrap();

    assert_eq!(app.config.max_students_per_course, 5);
    assert_eq!(app.config.database_url, "sqlite::memory:");
}

#[tokio::test]
async fn test_each_app_has_its_own_database() {
    let first = TestApp::new().await.unwrap();
    let second = TestApp::new().await.unwrap();

    first.course_factory().make_many(3).await.unwrap();

    assert_eq!(first.course_count().await.unwrap(), 3);
    assert_eq!(second.course_count().await.unwrap(), 0);
}

#[test]
fn test_item_urls_keep_trailing_slash() {
    assert_eq!(course_url(7), "/api/v1/courses/7/");
    assert_eq!(student_url(3), "/api/v1/students/3/");
}
