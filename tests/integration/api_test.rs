//! API endpoint integration tests
//!
//! Tests for the campus API endpoints: courses and students.

#![allow(dead_code)]

mod common;
mod courses;
mod students;
