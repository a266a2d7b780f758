//! Courses domain state

use crate::CoursesRepositories;
use campus_common::Config;

/// Tunables the handlers read on every request
#[derive(Debug, Clone, Copy)]
pub struct CourseSettings {
    pub max_students_per_course: usize,
}

impl From<&Config> for CourseSettings {
    fn from(config: &Config) -> Self {
        Self {
            max_students_per_course: config.max_students_per_course,
        }
    }
}

/// Application state for the Courses domain
#[derive(Clone)]
pub struct CoursesState {
    pub repos: CoursesRepositories,
    pub settings: CourseSettings,
}
