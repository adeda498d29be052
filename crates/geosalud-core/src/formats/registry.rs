//! IPRESS hospital registry reader.
//!
//! The registry is delimited text in a Latin-1-compatible single-byte
//! encoding; bytes are decoded before CSV parsing so accented headers like
//! "Condición" resolve correctly.

use crate::error::{GeosaludError, Result, SourceKind};
use crate::models::HospitalRecord;
use encoding_rs::WINDOWS_1252;
use std::fs;
use std::path::Path;

pub const NAME_COLUMN: &str = "Nombre del establecimiento";
pub const DEPARTMENT_COLUMN: &str = "Departamento";
pub const PROVINCE_COLUMN: &str = "Provincia";
pub const DISTRICT_COLUMN: &str = "Distrito";
pub const STATUS_COLUMN: &str = "Condición";
pub const INSTITUTION_COLUMN: &str = "Institución";
pub const NORTH_COLUMN: &str = "NORTE";
pub const EAST_COLUMN: &str = "ESTE";
pub const UBIGEO_COLUMN: &str = "UBIGEO";

const REQUIRED_COLUMNS: [&str; 9] = [
    NAME_COLUMN,
    DEPARTMENT_COLUMN,
    PROVINCE_COLUMN,
    DISTRICT_COLUMN,
    STATUS_COLUMN,
    INSTITUTION_COLUMN,
    NORTH_COLUMN,
    EAST_COLUMN,
    UBIGEO_COLUMN,
];

/// Read the raw hospital registry.
///
/// Returns one [`HospitalRecord`] per data row; no rows are excluded here.
pub fn read_registry(path: &Path) -> Result<Vec<HospitalRecord>> {
    let bytes = fs::read(path).map_err(|e| data_source_error(path, e.to_string()))?;
    let (decoded, _, _) = WINDOWS_1252.decode(&bytes);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(decoded.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| data_source_error(path, format!("failed to read header row: {}", e)))?
        .clone();

    let columns = resolve_columns(&headers)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| data_source_error(path, format!("malformed row: {}", e)))?;
        records.push(columns.record_from_row(&row));
    }

    Ok(records)
}

/// Column indices of the required registry fields.
struct Columns {
    name: usize,
    department: usize,
    province: usize,
    district: usize,
    status: usize,
    institution: usize,
    north: usize,
    east: usize,
    ubigeo: usize,
}

impl Columns {
    fn record_from_row(&self, row: &csv::StringRecord) -> HospitalRecord {
        HospitalRecord {
            name: cell(row, self.name).trim().to_string(),
            department: cell(row, self.department).trim().to_uppercase(),
            province: cell(row, self.province).trim().to_uppercase(),
            district: cell(row, self.district).trim().to_uppercase(),
            status: non_empty(cell(row, self.status)),
            institution: non_empty(cell(row, self.institution)),
            north: non_empty(cell(row, self.north)),
            east: non_empty(cell(row, self.east)),
            ubigeo: cell(row, self.ubigeo).trim().to_string(),
        }
    }
}

fn resolve_columns(headers: &csv::StringRecord) -> Result<Columns> {
    let index_of = |name: &str| headers.iter().position(|h| h.trim() == name);

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| index_of(name).is_none())
        .map(|name| name.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(GeosaludError::Schema {
            kind: SourceKind::HospitalRegistry,
            missing,
        });
    }

    // The filter above guarantees every lookup below succeeds.
    let resolve = |name: &str| index_of(name).unwrap_or_default();
    Ok(Columns {
        name: resolve(NAME_COLUMN),
        department: resolve(DEPARTMENT_COLUMN),
        province: resolve(PROVINCE_COLUMN),
        district: resolve(DISTRICT_COLUMN),
        status: resolve(STATUS_COLUMN),
        institution: resolve(INSTITUTION_COLUMN),
        north: resolve(NORTH_COLUMN),
        east: resolve(EAST_COLUMN),
        ubigeo: resolve(UBIGEO_COLUMN),
    })
}

fn cell<'a>(row: &'a csv::StringRecord, index: usize) -> &'a str {
    row.get(index).unwrap_or("")
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn data_source_error(path: &Path, reason: String) -> GeosaludError {
    GeosaludError::DataSource {
        kind: SourceKind::HospitalRegistry,
        path: path.to_path_buf(),
        reason,
    }
}
