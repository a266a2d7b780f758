//! API layer for the Courses domain
//!
//! Contains HTTP handlers, routes, and domain state definition.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::{CourseSettings, CoursesState};
pub use routes::routes;
