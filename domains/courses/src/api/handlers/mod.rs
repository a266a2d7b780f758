//! HTTP handlers for the Courses domain

pub mod courses;
pub mod students;
