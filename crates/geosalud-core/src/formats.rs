//! Readers for the three input sources.
//!
//! Structural problems (unreadable files, missing columns) fail the whole
//! load; per-row data-quality issues are left to the filter stages.

pub mod registry;
pub mod shapefile;
