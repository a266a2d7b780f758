//! Repository implementations for Courses domain

pub mod courses;
pub mod students;
pub(crate) mod transactions;

use sqlx::SqlitePool;

pub use courses::CourseRepository;
pub use students::StudentRepository;

/// Combined repository access for the Courses domain
#[derive(Clone)]
pub struct CoursesRepositories {
    pub courses: CourseRepository,
    pub students: StudentRepository,
}

impl CoursesRepositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            courses: CourseRepository::new(pool.clone()),
            students: StudentRepository::new(pool),
        }
    }
}
