//! Course repository

use crate::domain::entities::{Course, CourseChanges, CourseFilter, NewCourse};
use crate::repository::transactions::{fetch_course_tx, replace_enrolments_tx};
use campus_common::{Pagination, Result};
use chrono::Utc;
use sqlx::{types::Json, QueryBuilder, Sqlite, SqlitePool};

/// Course projection with the enrolled student ids folded into a JSON array
pub(crate) const SELECT_COURSES: &str = r#"
    SELECT c.id, c.name, c.text,
           (SELECT json_group_array(cs.student_id)
              FROM course_students cs
             WHERE cs.course_id = c.id) AS students,
           c.created_at, c.updated_at
    FROM courses c
"#;

/// json_group_array has no defined order
pub(crate) fn sort_students(mut course: Course) -> Course {
    course.students.0.sort_unstable();
    course
}

#[derive(Clone)]
pub struct CourseRepository {
    pool: SqlitePool,
}

impl CourseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find course by ID
    pub async fn find(&self, id: i64) -> Result<Option<Course>> {
        let sql = format!("{SELECT_COURSES} WHERE c.id = ?");
        let course = sqlx::query_as::<_, Course>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(course.map(sort_students))
    }

    /// List courses in creation order, applying exact-match filters
    pub async fn list(&self, filter: &CourseFilter, page: Pagination) -> Result<Vec<Course>> {
        let mut query = QueryBuilder::<Sqlite>::new(SELECT_COURSES);
        query.push(" WHERE 1 = 1");

        if let Some(id) = filter.id {
            query.push(" AND c.id = ").push_bind(id);
        }
        if let Some(name) = &filter.name {
            query.push(" AND c.name = ").push_bind(name.clone());
        }

        query.push(" ORDER BY c.id ASC");
        page.push_window(&mut query);

        let courses = query
            .build_query_as::<Course>()
            .fetch_all(&self.pool)
            .await?;

        Ok(courses.into_iter().map(sort_students).collect())
    }

    /// Total number of courses
    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Create a course together with its enrolments
    pub async fn create(&self, course: &NewCourse) -> Result<Course> {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO courses (name, text, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&course.name)
        .bind(Json(&course.text))
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        replace_enrolments_tx(&mut tx, id, &course.students).await?;
        let created = fetch_course_tx(&mut tx, id).await?;
        tx.commit().await?;

        tracing::debug!(course_id = id, "Course created");
        Ok(created)
    }

    /// Apply a change set; `None` when the course does not exist
    pub async fn update(&self, id: i64, changes: &CourseChanges) -> Result<Option<Course>> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE courses SET
                name = COALESCE(?, name),
                text = COALESCE(?, text),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&changes.name)
        .bind(changes.text.as_ref().map(Json))
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        if let Some(students) = &changes.students {
            replace_enrolments_tx(&mut tx, id, students).await?;
        }

        let updated = fetch_course_tx(&mut tx, id).await?;
        tx.commit().await?;

        tracing::debug!(course_id = id, "Course updated");
        Ok(Some(updated))
    }

    /// Delete a course; its enrolments cascade
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
