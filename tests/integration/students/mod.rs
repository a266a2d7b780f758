//! Student endpoint integration tests
//!
//! - GET    /api/v1/students/         - List (filter: name)
//! - POST   /api/v1/students/         - Create
//! - GET    /api/v1/students/{id}/    - Retrieve
//! - DELETE /api/v1/students/{id}/    - Delete

use axum::http::StatusCode;
use chrono::{Duration, NaiveDate, Utc};
use serde_json::json;

use crate::common::{assertions, course_url, student_url, TestApp, STUDENTS_URL};

#[tokio::test]
async fn test_create_student() {
    let app = TestApp::new().await.unwrap();

    let resp = app
        .client()
        .post(
            STUDENTS_URL,
            json!({"name": "Ada Lovelace", "birth_date": "1815-12-10"}),
        )
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.body["name"], "Ada Lovelace");
    assert_eq!(resp.body["birth_date"], "1815-12-10");
    assertions::assert_timestamp_recent(&resp.body["created_at"]);
    assert_eq!(app.student_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_create_student_without_birth_date() {
    let app = TestApp::new().await.unwrap();

    let resp = app
        .client()
        .post(STUDENTS_URL, json!({"name": "Grace"}))
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    assert!(resp.body["birth_date"].is_null());
}

#[tokio::test]
async fn test_create_student_invalid_bodies_return_400() {
    let app = TestApp::new().await.unwrap();
    let client = app.client();
    let future = (Utc::now() + Duration::days(2)).date_naive();

    let bodies = [
        json!({}),
        json!({"name": "  "}),
        json!({"name": "Kid", "birth_date": "2020-13-45"}),
        json!({"name": "Kid", "birth_date": "10/12/1815"}),
        json!({"name": "Kid", "birth_date": future.to_string()}),
    ];

    for body in bodies {
        let resp = client.post(STUDENTS_URL, body).await;
        assertions::assert_error(&resp, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    }

    assert_eq!(app.student_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_list_students_in_creation_order() {
    let app = TestApp::new().await.unwrap();
    let ids = app.student_factory().make_ids(4).await.unwrap();

    let resp = app.client().get(STUDENTS_URL).await;

    assert_eq!(resp.status, StatusCode::OK);
    let listed: Vec<i64> = resp
        .items()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn test_list_students_filtered_by_name() {
    let app = TestApp::new().await.unwrap();
    let factory = app.student_factory();
    factory.make_many(2).await.unwrap();
    let alan = factory
        .name("Alan Turing")
        .birth_date(NaiveDate::from_ymd_opt(1912, 6, 23).unwrap())
        .make()
        .await
        .unwrap();

    let resp = app
        .client()
        .get(&format!("{}?name=Alan%20Turing", STUDENTS_URL))
        .await;

    assert_eq!(resp.items().len(), 1);
    assert_eq!(resp.items()[0]["id"], alan.id);
    assert_eq!(resp.items()[0]["birth_date"], "1912-06-23");
}

#[tokio::test]
async fn test_get_student() {
    let app = TestApp::new().await.unwrap();
    let student = app.student_factory().make().await.unwrap();

    let resp = app.client().get(&student_url(student.id)).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.id(), student.id);
    assert_eq!(resp.body["name"], student.name.as_str());
}

#[tokio::test]
async fn test_get_unknown_student_returns_404() {
    let app = TestApp::new().await.unwrap();

    let resp = app.client().get(&student_url(42)).await;

    assertions::assert_error(&resp, StatusCode::NOT_FOUND, "NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_id_and_query_return_envelope() {
    let app = TestApp::new().await.unwrap();
    let client = app.client();

    let by_path = client.get("/api/v1/students/x1/").await;
    let by_query = client.get(&format!("{}?offset=first", STUDENTS_URL)).await;

    assertions::assert_error(&by_path, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assertions::assert_error(&by_query, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_delete_student() {
    let app = TestApp::new().await.unwrap();
    let student = app.student_factory().make().await.unwrap();
    let client = app.client();

    let first = client.delete(&student_url(student.id)).await;
    let second = client.delete(&student_url(student.id)).await;

    assert_eq!(first.status, StatusCode::NO_CONTENT);
    assertions::assert_error(&second, StatusCode::NOT_FOUND, "NOT_FOUND");
    assert_eq!(app.student_count().await.unwrap(), 0);
}

#[test_log::test(tokio::test)]
async fn test_delete_student_withdraws_from_courses() {
    let app = TestApp::new().await.unwrap();
    let ids = app.student_factory().make_ids(3).await.unwrap();
    let course = app.course_factory().students(&ids).make().await.unwrap();
    let client = app.client();

    client.delete(&student_url(ids[1])).await;

    let resp = client.get(&course_url(course.id)).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["students"], json!([ids[0], ids[2]]));
}
