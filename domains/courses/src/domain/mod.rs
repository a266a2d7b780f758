//! Domain layer for the Courses domain

pub mod entities;
