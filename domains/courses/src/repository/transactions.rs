//! Transaction helpers shared by the course write paths

use crate::domain::entities::Course;
use crate::repository::courses::{sort_students, SELECT_COURSES};
use campus_common::Result;
use sqlx::{Sqlite, Transaction};

/// Replace the full enrolment set of a course within an existing transaction.
pub(crate) async fn replace_enrolments_tx(
    tx: &mut Transaction<'_, Sqlite>,
    course_id: i64,
    students: &[i64],
) -> Result<()> {
    sqlx::query("DELETE FROM course_students WHERE course_id = ?")
        .bind(course_id)
        .execute(&mut **tx)
        .await?;

    for student_id in students {
        sqlx::query("INSERT INTO course_students (course_id, student_id) VALUES (?, ?)")
            .bind(course_id)
            .bind(student_id)
            .execute(&mut **tx)
            .await?;
    }

    Ok(())
}

/// Read a course back inside the transaction that wrote it.
pub(crate) async fn fetch_course_tx(
    tx: &mut Transaction<'_, Sqlite>,
    course_id: i64,
) -> Result<Course> {
    let sql = format!("{SELECT_COURSES} WHERE c.id = ?");
    let course = sqlx::query_as::<_, Course>(&sql)
        .bind(course_id)
        .fetch_one(&mut **tx)
        .await?;

    Ok(sort_students(course))
}
