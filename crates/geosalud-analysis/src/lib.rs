//! The GeoSalud analysis pipeline.
//!
//! Stages run synchronously and fully materialize their outputs:
//! loader → filter → {aggregate, proximity} → stats. Each run is a pure
//! function of the three source files plus the proximity parameters, so
//! re-running with identical inputs is idempotent.

pub mod aggregate;
pub mod cache;
pub mod departments;
pub mod filter;
pub mod loader;
pub mod proximity;
pub mod stats;

pub use aggregate::count_by_district;
pub use cache::DatasetCache;
pub use filter::{filter_hospitals, FilteredHospitals};
pub use loader::{load_datasets, DataPaths, LoadedData};
pub use proximity::analyze_proximity;
pub use stats::summarize;
