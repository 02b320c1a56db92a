//! Single-column profilers.
//!
//! Each profiler consumes a column's non-null values, already converted to
//! their canonical representation by [`crate::values`], and produces the typed
//! sub-profile attached to a [`crate::models::ColumnProfile`]. Degenerate
//! input (no values, one distinct value, zero spread) always yields defined
//! fallbacks rather than errors.

pub mod categorical;
pub mod datetime;
pub mod list;
pub mod numeric;
pub mod text;
