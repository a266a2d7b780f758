//! Student repository

use crate::domain::entities::{NewStudent, Student, StudentFilter};
use campus_common::{Pagination, Result};
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::collections::BTreeSet;

#[derive(Clone)]
pub struct StudentRepository {
    pool: SqlitePool,
}

impl StudentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find student by ID
    pub async fn find(&self, id: i64) -> Result<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            SELECT id, name, birth_date, created_at
            FROM students
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    /// List students in creation order
    pub async fn list(&self, filter: &StudentFilter, page: Pagination) -> Result<Vec<Student>> {
        let mut query =
            QueryBuilder::<Sqlite>::new("SELECT id, name, birth_date, created_at FROM students");

        if let Some(name) = &filter.name {
            query.push(" WHERE name = ").push_bind(name.clone());
        }

        query.push(" ORDER BY id ASC");
        page.push_window(&mut query);

        let students = query
            .build_query_as::<Student>()
            .fetch_all(&self.pool)
            .await?;

        Ok(students)
    }

    /// Total number of students
    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Create a new student
    pub async fn create(&self, student: &NewStudent) -> Result<Student> {
        let created = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (name, birth_date, created_at)
            VALUES (?, ?, ?)
            RETURNING id, name, birth_date, created_at
            "#,
        )
        .bind(&student.name)
        .bind(student.birth_date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(student_id = created.id, "Student created");
        Ok(created)
    }

    /// Delete a student; enrolments cascade
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Return the ids from `ids` that have no matching student, sorted
    pub async fn find_missing(&self, ids: &[i64]) -> Result<Vec<i64>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::<Sqlite>::new("SELECT id FROM students WHERE id IN (");
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let found: BTreeSet<i64> = query
            .build_query_scalar::<i64>()
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .collect();

        let missing: BTreeSet<i64> = ids.iter().copied().filter(|id| !found.contains(id)).collect();
        Ok(missing.into_iter().collect())
    }
}
