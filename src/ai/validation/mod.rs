//! Model Response Validation
//!
//! Boundary checks applied to every model answer before it enters the
//! normalization pipeline:
//! - JSON extraction with a single brace-span recovery pass
//! - Structural schema check naming the first missing or mistyped path
//!
//! ## Design Philosophy
//! - Fail fast on structural errors; never build a partial payload

mod json_extract;
mod schema;

#[cfg(test)]
pub(crate) use schema::fixtures;

pub use json_extract::{extract_json_object, extract_json_with_recovery_status};
pub use schema::{REQUIRED_SECTIONS, check_document};
