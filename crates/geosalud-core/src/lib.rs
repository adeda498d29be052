//! GeoSalud Core - Domain models, configuration, and input format readers
//!
//! This crate contains the domain types shared by the GeoSalud pipeline and
//! the readers for its three input sources: the IPRESS hospital registry
//! (delimited text, Latin-1), the district polygon shapefile, and the
//! population-center point shapefile.

pub mod config;
pub mod error;
pub mod formats;
pub mod models;

pub use error::{GeosaludError, Result, SourceKind};
