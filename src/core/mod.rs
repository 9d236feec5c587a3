//! Core module: catalog, grade registry, averaging, session state and export

pub mod averaging;
pub mod catalog;
pub mod config;
pub mod export;
pub mod models;
pub mod registry;
pub mod session;

pub use averaging::{
    cumulative_breakdown, cumulative_gpa, semester_breakdown, semester_gpa, GpaSummary,
};
pub use catalog::Catalog;
pub use export::{ExportReport, ReportScope};
pub use models::{grade_scale, Grade, GradeEntry, Subject};
pub use registry::GradeRegistry;
pub use session::{CalculatorMode, Session};

/// Returns the current version of the `gpa-calc` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
