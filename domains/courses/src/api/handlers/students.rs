//! Student API handlers

use axum::{extract::State, http::StatusCode, Json};
use campus_common::{Error, Pagination, Result, ValidatedJson, ValidatedPath, ValidatedQuery};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::middleware::CoursesState;
use crate::domain::entities::{NewStudent, Student, StudentFilter};

/// Request for creating a student
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStudentRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// ISO-8601 date (`YYYY-MM-DD`)
    pub birth_date: Option<NaiveDate>,
}

/// Student response DTO
#[derive(Debug, Serialize)]
pub struct StudentResponse {
    pub id: i64,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<Student> for StudentResponse {
    fn from(s: Student) -> Self {
        Self {
            id: s.id,
            name: s.name,
            birth_date: s.birth_date,
            created_at: s.created_at,
        }
    }
}

/// List students, optionally filtered by `name`
pub async fn list_students(
    State(state): State<CoursesState>,
    ValidatedQuery(filter): ValidatedQuery<StudentFilter>,
    ValidatedQuery(page): ValidatedQuery<Pagination>,
) -> Result<Json<Vec<StudentResponse>>> {
    let students = state.repos.students.list(&filter, page).await?;

    Ok(Json(students.into_iter().map(Into::into).collect()))
}

/// Get a single student by ID
pub async fn get_student(
    State(state): State<CoursesState>,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<Json<StudentResponse>> {
    let student = state
        .repos
        .students
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Student not found".to_string()))?;

    Ok(Json(student.into()))
}

/// Create a new student
pub async fn create_student(
    State(state): State<CoursesState>,
    ValidatedJson(req): ValidatedJson<CreateStudentRequest>,
) -> Result<(StatusCode, Json<StudentResponse>)> {
    let student = NewStudent::new(req.name, req.birth_date)?;
    let created = state.repos.students.create(&student).await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Delete a student, withdrawing it from every course
pub async fn delete_student(
    State(state): State<CoursesState>,
    ValidatedPath(id): ValidatedPath<i64>,
) -> Result<StatusCode> {
    if !state.repos.students.delete(id).await? {
        return Err(Error::NotFound("Student not found".to_string()));
    }

    tracing::info!(student_id = id, "Student deleted");
    Ok(StatusCode::NO_CONTENT)
}
