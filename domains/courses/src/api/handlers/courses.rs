//! Course API handlers

use axum::{extract::State, http::StatusCode, Json};
use campus_common::{Error, Pagination, Result, ValidatedJson, ValidatedPath, ValidatedQuery};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::middleware::CoursesState;
use crate::domain::entities::{Course, CourseChanges, CourseFilter, NewCourse};

/// Request for creating a course
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[serde(default)]
    pub text: Vec<String>,

    /// Ids of students to enrol
    #[serde(default)]
    pub students: Vec<i64>,
}

/// Request for replacing a course (PUT). Collections left out keep their value.
#[derive(Debug, Deserialize, Validate)]
pub struct ReplaceCourseRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub text: Option<Vec<String>>,
    pub students: Option<Vec<i64>>,
}

/// Request for partially updating a course (PATCH)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub text: Option<Vec<String>>,
    pub students: Option<Vec<i64>>,
}

/// Course response DTO
#[derive(Debug, Serialize)]
pub struct CourseResponse {
    pub id: i64,
    pub name: String,
    pub text: Vec<String>,
    pub students: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Course> for CourseResponse {
    fn from(c: Course) -> Self {
        Self {
            id: c.id,
            name: c.name,
            text: c.text.0,
            students: c.students.0,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

fn course_not_found() -> Error {
    Error::NotFound("Course not found".to_string())
}

/// Reject enrolments that reference students which do not exist
async fn ensure_students_exist(state: &CoursesState, ids: &[i64]) -> Result<()> {
    let missing = state.repos.students.find_missing(ids).await?;
    if missing.is_empty() {
        return Ok(());
    }

    let listed: Vec<String> = missing.iter().map(i64::to_string).collect();
    Err(Error::Validation(format!(
        "Unknown student ids: {}",
        listed.join(", ")
    )))
}

/// List courses, optionally filtered by `id` and/or `name`
pub async fn list_courses(
    State(state): State<CoursesState>,
    ValidatedQuery(filter): ValidatedQuery<CourseFilter>,
    ValidatedQuery(page): ValidatedQuery<Pagination>,
) -> Result<Json<Vec<CourseResponse>>> {
    let courses = state.repos.courses.list(&filter, page).await?;

    let responses: Vec<CourseResponse> = courses.into_iter().map(Into::into).collect();
    Ok(Json(responses))
}

/// Get a single course by ID
pub async fn get_course(
    State(state): State<CoursesState>,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<Json<CourseResponse>> {
    let course = state
        .repos
        .courses
        .find(id)
        .await?
        .ok_or_else(course_not_found)?;

    Ok(Json(course.into()))
}

/// Create a new course
pub async fn create_course(
    State(state): State<CoursesState>,
    ValidatedJson(req): ValidatedJson<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>)> {
    let course = NewCourse::new(
        req.name,
        req.text,
        req.students,
        state.settings.max_students_per_course,
    )?;
    ensure_students_exist(&state, &course.students).await?;

    let created = state.repos.courses.create(&course).await?;
    tracing::info!(course_id = created.id, "Course created");

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Replace a course's name, and its collections when given
pub async fn replace_course(
    State(state): State<CoursesState>,
    ValidatedPath(id): ValidatedPath<i64>,
    ValidatedJson(req): ValidatedJson<ReplaceCourseRequest>,
) -> Result<Json<CourseResponse>> {
    let changes = CourseChanges::new(
        Some(req.name),
        req.text,
        req.students,
        state.settings.max_students_per_course,
    )?;

    apply_changes(&state, id, changes).await
}

/// Update only the fields present in the body
pub async fn update_course(
    State(state): State<CoursesState>,
    ValidatedPath(id): ValidatedPath<i64>,
    ValidatedJson(req): ValidatedJson<UpdateCourseRequest>,
) -> Result<Json<CourseResponse>> {
    let changes = CourseChanges::new(
        req.name,
        req.text,
        req.students,
        state.settings.max_students_per_course,
    )?;

    if changes.is_empty() {
        return get_course(State(state), ValidatedPath(id)).await;
    }

    apply_changes(&state, id, changes).await
}

async fn apply_changes(
    state: &CoursesState,
    id: i64,
    changes: CourseChanges,
) -> Result<Json<CourseResponse>> {
    if let Some(students) = &changes.students {
        ensure_students_exist(state, students).await?;
    }

    let updated = state
        .repos
        .courses
        .update(id, &changes)
        .await?
        .ok_or_else(course_not_found)?;

    Ok(Json(updated.into()))
}

/// Delete a course
pub async fn delete_course(
    State(state): State<CoursesState>,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<StatusCode> {
    if !state.repos.courses.delete(id).await? {
        return Err(course_not_found());
    }

    tracing::info!(course_id = id, "Course deleted");
    Ok(StatusCode::NO_CONTENT)
}
