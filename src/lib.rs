//! Library for `gpa-calc`
//! Contains the catalog, grade registry and averaging engine used by the CLI

pub mod core;
pub mod logger;

pub use crate::core::{config, get_version};
