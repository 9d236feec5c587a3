//! Data models for `gpa-calc`

pub mod grade;
pub mod subject;

pub use grade::{grade_scale, Grade};
pub use subject::{GradeEntry, Subject};
