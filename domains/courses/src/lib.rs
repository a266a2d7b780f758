//! Courses domain: courses, students, enrolments

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{
    Course, CourseChanges, CourseFilter, NewCourse, NewStudent, Student, StudentFilter,
};

// Re-export repository types
pub use repository::{CourseRepository, CoursesRepositories, StudentRepository};

// Re-export API types
pub use api::routes;
pub use api::{CourseSettings, CoursesState};
