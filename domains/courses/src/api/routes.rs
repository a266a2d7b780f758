//! Route definitions for Courses domain API
//!
//! Every resource path is served both with and without the trailing slash.

use axum::{routing::get, Router};

use super::handlers::{courses, students};
use super::middleware::CoursesState;

/// Course collection and item routes
fn course_routes() -> Router<CoursesState> {
    let collection = get(courses::list_courses).post(courses::create_course);
    let item = get(courses::get_course)
        .put(courses::replace_course)
        .patch(courses::update_course)
        .delete(courses::delete_course);

    Router::new()
        .route("/api/v1/courses", collection.clone())
        .route("/api/v1/courses/", collection)
        .route("/api/v1/courses/{id}", item.clone())
        .route("/api/v1/courses/{id}/", item)
}

/// Student collection and item routes
fn student_routes() -> Router<CoursesState> {
    let collection = get(students::list_students).post(students::create_student);
    let item = get(students::get_student).delete(students::delete_student);

    Router::new()
        .route("/api/v1/students", collection.clone())
        .route("/api/v1/students/", collection)
        .route("/api/v1/students/{id}", item.clone())
        .route("/api/v1/students/{id}/", item)
}

/// Create all Courses domain API routes
pub fn routes() -> Router<CoursesState> {
    Router::new()
        .merge(course_routes())
        .merge(student_routes())
}
