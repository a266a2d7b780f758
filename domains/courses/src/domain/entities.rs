//! Domain entities for the Courses domain
//!
//! Courses carry a name, an ordered list of text entries and a set of
//! enrolled students. Ids are assigned by the database on insert and are
//! never reused, so id order is creation order.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use std::collections::BTreeSet;

use campus_common::{Error, Result};

/// Maximum course name length
pub const MAX_COURSE_NAME_LENGTH: usize = 255;

/// Maximum length of a single course text entry
pub const MAX_TEXT_ENTRY_LENGTH: usize = 1000;

/// Maximum student name length
pub const MAX_STUDENT_NAME_LENGTH: usize = 255;

/// Course entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub text: Json<Vec<String>>,
    pub students: Json<Vec<i64>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Student entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Exact-match filters accepted by the course list endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CourseFilter {
    pub id: Option<i64>,
    pub name: Option<String>,
}

/// Exact-match filters accepted by the student list endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StudentFilter {
    pub name: Option<String>,
}

/// A validated course that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse {
    pub name: String,
    pub text: Vec<String>,
    pub students: Vec<i64>,
}

impl NewCourse {
    /// Validate and build a new course
    pub fn new(
        name: String,
        text: Vec<String>,
        students: Vec<i64>,
        max_students: usize,
    ) -> Result<Self> {
        validate_course_name(&name)?;
        validate_text(&text)?;
        let students = normalize_enrolment(students, max_students)?;

        Ok(NewCourse {
            name,
            text,
            students,
        })
    }
}

/// Field changes applied by PUT/PATCH. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseChanges {
    pub name: Option<String>,
    pub text: Option<Vec<String>>,
    pub students: Option<Vec<i64>>,
}

impl CourseChanges {
    /// Validate and build a change set
    pub fn new(
        name: Option<String>,
        text: Option<Vec<String>>,
        students: Option<Vec<i64>>,
        max_students: usize,
    ) -> Result<Self> {
        if let Some(ref n) = name {
            validate_course_name(n)?;
        }
        if let Some(ref t) = text {
            validate_text(t)?;
        }
        let students = students
            .map(|ids| normalize_enrolment(ids, max_students))
            .transpose()?;

        Ok(CourseChanges {
            name,
            text,
            students,
        })
    }

    /// True when the change set would not modify anything
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.text.is_none() && self.students.is_none()
    }
}

/// A validated student that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub name: String,
    pub birth_date: Option<NaiveDate>,
}

impl NewStudent {
    pub fn new(name: String, birth_date: Option<NaiveDate>) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(Error::Validation("Student name is required".to_string()));
        }
        if name.chars().count() > MAX_STUDENT_NAME_LENGTH {
            return Err(Error::Validation(format!(
                "Student name must be at most {} characters",
                MAX_STUDENT_NAME_LENGTH
            )));
        }
        if let Some(date) = birth_date {
            if date > Utc::now().date_naive() {
                return Err(Error::Validation(
                    "Birth date cannot be in the future".to_string(),
                ));
            }
        }

        Ok(NewStudent { name, birth_date })
    }
}

fn validate_course_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation("Course name is required".to_string()));
    }
    if name.chars().count() > MAX_COURSE_NAME_LENGTH {
        return Err(Error::Validation(format!(
            "Course name must be at most {} characters",
            MAX_COURSE_NAME_LENGTH
        )));
    }
    Ok(())
}

fn validate_text(text: &[String]) -> Result<()> {
    if let Some(pos) = text
        .iter()
        .position(|entry| entry.chars().count() > MAX_TEXT_ENTRY_LENGTH)
    {
        return Err(Error::Validation(format!(
            "Text entry {} must be at most {} characters",
            pos, MAX_TEXT_ENTRY_LENGTH
        )));
    }
    Ok(())
}

/// Deduplicate and sort student ids, enforcing the per-course cap
fn normalize_enrolment(students: Vec<i64>, max_students: usize) -> Result<Vec<i64>> {
    let unique: BTreeSet<i64> = students.into_iter().collect();
    if unique.len() > max_students {
        return Err(Error::Validation(format!(
            "A course can enrol at most {} students, got {}",
            max_students,
            unique.len()
        )));
    }
    Ok(unique.into_iter().collect())
}
