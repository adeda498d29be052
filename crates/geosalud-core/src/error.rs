//! Error types for GeoSalud

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which of the three input sources an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    HospitalRegistry,
    Districts,
    PopulationCenters,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::HospitalRegistry => "hospital registry",
            SourceKind::Districts => "district polygons",
            SourceKind::PopulationCenters => "population centers",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum GeosaludError {
    // Structural failures: fatal to the run, no partial results
    #[error("{kind} source failed at {path}: {reason}")]
    DataSource {
        kind: SourceKind,
        path: PathBuf,
        reason: String,
    },

    #[error("{kind} source is missing required column(s): {}", .missing.join(", "))]
    Schema {
        kind: SourceKind,
        missing: Vec<String>,
    },

    #[error("Failed to reproject from EPSG:{from_epsg}: {reason}")]
    Projection { from_epsg: u32, reason: String },

    // Region resolution errors
    #[error("Unknown department: {name}")]
    UnknownRegion { name: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GeosaludError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_names_all_missing_columns() {
        let err = GeosaludError::Schema {
            kind: SourceKind::HospitalRegistry,
            missing: vec!["NORTE".to_string(), "ESTE".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("hospital registry"));
        assert!(message.contains("NORTE"));
        assert!(message.contains("ESTE"));
    }

    #[test]
    fn test_data_source_error_identifies_source() {
        let err = GeosaludError::DataSource {
            kind: SourceKind::Districts,
            path: PathBuf::from("DISTRITOS.shp"),
            reason: "missing .dbf companion".to_string(),
        };
        assert!(err.to_string().contains("district polygons"));
        assert!(err.to_string().contains("DISTRITOS.shp"));
    }
}
