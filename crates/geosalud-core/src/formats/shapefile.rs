//! ESRI Shapefile readers for the district and population-center sources.
//!
//! Shapefiles consist of multiple component files (.shp, .shx, .dbf, .prj)
//! and the geometry CRS lives in the .prj companion. Both readers return the
//! detected EPSG code alongside the features; reprojection to WGS84 happens
//! in the pipeline loader.

use crate::error::{GeosaludError, Result, SourceKind};
use crate::models::{DistrictPolygon, PopulationCenter};
use geo::{MultiPolygon, Point};
use shapefile::dbase::{FieldValue, Record};
use shapefile::{Reader, Shape};
use std::fs;
use std::path::{Path, PathBuf};

/// EPSG code assumed when a shapefile carries no .prj companion.
pub const DEFAULT_EPSG: u32 = 4326;

// District attribute fields
pub const DISTRICT_CODE_FIELD: &str = "IDDIST";
pub const DISTRICT_DEPARTMENT_FIELD: &str = "DEPARTAMEN";
pub const DISTRICT_PROVINCE_FIELD: &str = "PROVINCIA";
pub const DISTRICT_NAME_FIELD: &str = "DISTRITO";

// Population-center attribute fields
pub const CENTER_NAME_FIELD: &str = "NOME";
pub const CENTER_CODE_FIELD: &str = "CCPP";
pub const CENTER_DEPT_CODE_FIELD: &str = "CCDD";

/// Placeholder for optional name fields the source sometimes omits.
const UNKNOWN: &str = "Unknown";

/// Read the district polygon source.
///
/// Returns the districts in source coordinates plus the detected EPSG code.
pub fn read_districts(path: &Path) -> Result<(Vec<DistrictPolygon>, u32)> {
    let kind = SourceKind::Districts;
    verify_components(path, kind)?;
    let epsg = extract_crs(path, kind)?;

    let mut reader = open_reader(path, kind)?;
    let mut districts = Vec::new();
    let mut checked_schema = false;

    for row in reader.iter_shapes_and_records() {
        let (shape, record) =
            row.map_err(|e| data_source_error(kind, path, format!("failed to read feature: {}", e)))?;

        if !checked_schema {
            require_fields(
                &record,
                &[
                    DISTRICT_CODE_FIELD,
                    DISTRICT_DEPARTMENT_FIELD,
                    DISTRICT_PROVINCE_FIELD,
                    DISTRICT_NAME_FIELD,
                ],
                kind,
            )?;
            checked_schema = true;
        }

        let geometry = match shape {
            Shape::Polygon(polygon) => MultiPolygon::<f64>::from(polygon),
            other => {
                return Err(data_source_error(
                    kind,
                    path,
                    format!("expected polygon geometry, found {:?}", other.shapetype()),
                ))
            }
        };

        districts.push(DistrictPolygon {
            department: field_str(&record, DISTRICT_DEPARTMENT_FIELD).unwrap_or_default(),
            province: field_str(&record, DISTRICT_PROVINCE_FIELD).unwrap_or_default(),
            district: field_str(&record, DISTRICT_NAME_FIELD).unwrap_or_default(),
            code: field_str(&record, DISTRICT_CODE_FIELD).unwrap_or_default(),
            geometry,
        });
    }

    Ok((districts, epsg))
}

/// Read the population-center point source.
pub fn read_population_centers(path: &Path) -> Result<(Vec<PopulationCenter>, u32)> {
    let kind = SourceKind::PopulationCenters;
    verify_components(path, kind)?;
    let epsg = extract_crs(path, kind)?;

    let mut reader = open_reader(path, kind)?;
    let mut centers = Vec::new();
    let mut checked_schema = false;

    for row in reader.iter_shapes_and_records() {
        let (shape, record) =
            row.map_err(|e| data_source_error(kind, path, format!("failed to read feature: {}", e)))?;

        if !checked_schema {
            require_fields(&record, &[CENTER_DEPT_CODE_FIELD], kind)?;
            checked_schema = true;
        }

        let point = match shape {
            Shape::Point(p) => Point::new(p.x, p.y),
            Shape::PointZ(p) => Point::new(p.x, p.y),
            Shape::PointM(p) => Point::new(p.x, p.y),
            other => {
                return Err(data_source_error(
                    kind,
                    path,
                    format!("expected point geometry, found {:?}", other.shapetype()),
                ))
            }
        };

        centers.push(PopulationCenter {
            name: field_str(&record, CENTER_NAME_FIELD).unwrap_or_else(|| UNKNOWN.to_string()),
            code: field_str(&record, CENTER_CODE_FIELD).unwrap_or_else(|| UNKNOWN.to_string()),
            department_code: field_str(&record, CENTER_DEPT_CODE_FIELD).unwrap_or_default(),
            department: field_str(&record, DISTRICT_DEPARTMENT_FIELD),
            province: field_str(&record, DISTRICT_PROVINCE_FIELD),
            district: field_str(&record, DISTRICT_NAME_FIELD),
            point,
        });
    }

    Ok((centers, epsg))
}

fn open_reader(
    path: &Path,
    kind: SourceKind,
) -> Result<Reader<std::io::BufReader<fs::File>, std::io::BufReader<fs::File>>> {
    Reader::from_path(path)
        .map_err(|e| data_source_error(kind, path, format!("failed to open shapefile: {}", e)))
}

/// Verify that all required shapefile component files exist.
fn verify_components(path: &Path, kind: SourceKind) -> Result<()> {
    let base = shapefile_base(path, kind)?;
    let mut missing = Vec::new();

    for ext in ["shp", "shx", "dbf"] {
        if !base.with_extension(ext).exists() {
            missing.push(format!(".{}", ext));
        }
    }

    if !missing.is_empty() {
        return Err(data_source_error(
            kind,
            path,
            format!("missing required component files: {}", missing.join(", ")),
        ));
    }

    Ok(())
}

/// Base path of a shapefile (without extension).
fn shapefile_base(path: &Path, kind: SourceKind) -> Result<PathBuf> {
    let is_shp = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("shp"))
        .unwrap_or(false);

    if !is_shp {
        return Err(data_source_error(kind, path, "not a shapefile (.shp)".to_string()));
    }

    Ok(path.with_extension(""))
}

/// Extract the EPSG code from the shapefile's .prj companion.
///
/// Falls back to EPSG:4326 when the companion is absent or carries no
/// recognizable authority code.
fn extract_crs(path: &Path, kind: SourceKind) -> Result<u32> {
    let base = shapefile_base(path, kind)?;
    let prj_path = base.with_extension("prj");

    if !prj_path.exists() {
        return Ok(DEFAULT_EPSG);
    }

    let prj_content = fs::read_to_string(&prj_path)
        .map_err(|e| data_source_error(kind, path, format!("failed to read .prj file: {}", e)))?;

    Ok(parse_epsg_from_wkt(&prj_content).unwrap_or(DEFAULT_EPSG))
}

/// Parse an EPSG code out of a .prj WKT string.
fn parse_epsg_from_wkt(wkt: &str) -> Option<u32> {
    // The overall CRS authority is the last AUTHORITY["EPSG","..."] entry;
    // earlier entries belong to nested datum/geogcs definitions.
    const AUTHORITY_PREFIX: &str = "AUTHORITY[\"EPSG\",\"";
    if let Some(start) = wkt.rfind(AUTHORITY_PREFIX) {
        let code_start = start + AUTHORITY_PREFIX.len();
        if let Some(end) = wkt[code_start..].find('"') {
            if let Ok(code) = wkt[code_start..code_start + end].parse::<u32>() {
                return Some(code);
            }
        }
    }

    // Bare "EPSG:nnnn" form
    if let Some(start) = wkt.find("EPSG:") {
        let code_start = start + 5;
        let code_str: String = wkt[code_start..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if let Ok(code) = code_str.parse::<u32>() {
            return Some(code);
        }
    }

    None
}

/// Fail with a schema error naming every required attribute field the
/// source lacks.
fn require_fields(record: &Record, required: &[&str], kind: SourceKind) -> Result<()> {
    let names: Vec<String> = record.clone().into_iter().map(|(name, _)| name).collect();
    let missing: Vec<String> = required
        .iter()
        .filter(|req| !names.iter().any(|n| n.eq_ignore_ascii_case(req)))
        .map(|req| req.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(GeosaludError::Schema { kind, missing })
    }
}

/// Look up a dBase field case-insensitively and render it as a string.
fn field_str(record: &Record, name: &str) -> Option<String> {
    let (_, value) = record
        .clone()
        .into_iter()
        .find(|(field, _)| field.eq_ignore_ascii_case(name))?;
    field_value_to_string(&value)
}

fn field_value_to_string(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Character(Some(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        FieldValue::Numeric(Some(n)) => Some(format_numeric(*n)),
        FieldValue::Integer(i) => Some(i.to_string()),
        FieldValue::Double(d) => Some(format_numeric(*d)),
        FieldValue::Float(Some(f)) => Some(format_numeric(f64::from(*f))),
        _ => None,
    }
}

/// Integral codes stored as dBase numerics print without a fractional part.
fn format_numeric(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn data_source_error(kind: SourceKind, path: &Path, reason: String) -> GeosaludError {
    GeosaludError::DataSource {
        kind,
        path: path.to_path_buf(),
        reason,
    }
}
