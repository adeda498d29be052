//! Hospital filtering: raw registry rows → operational public hospitals
//! with validated coordinates.
//!
//! The filter is an ordered sequence of independent stages; each row either
//! survives all of them or is dropped at the first failing stage. Per-row
//! exclusions are not reported individually; only the aggregate counts in
//! [`DropCounts`] are observable.

use geo::Point;
use geosalud_core::models::{
    Hospital, HospitalPoint, HospitalRecord, PublicInstitution, OPERATIONAL_STATUS,
};
use tracing::debug;

/// Aggregate rows excluded per filter stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropCounts {
    /// Status field was not the operational marker
    pub non_operational: usize,
    /// Institution missing or outside the public whitelist
    pub non_public: usize,
    /// Coordinates missing, non-numeric, zero, or out of bounds
    pub invalid_coordinates: usize,
}

impl DropCounts {
    pub fn total(&self) -> usize {
        self.non_operational + self.non_public + self.invalid_coordinates
    }
}

/// Output of the filter: the tabular structure and its geometry-augmented
/// counterpart, plus the drop accounting.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredHospitals {
    pub hospitals: Vec<Hospital>,
    pub points: Vec<HospitalPoint>,
    pub dropped: DropCounts,
}

/// Build the WGS84 point for a hospital row.
///
/// The registry's NORTE field carries the latitude-like value and maps to
/// the Y axis; ESTE maps to X. Swapping the two mirrors the map.
pub fn point_from_north_east(north: f64, east: f64) -> Point<f64> {
    Point::new(east, north)
}

/// Stage 1: keep only rows whose status equals the operational marker.
fn is_operational(row: &HospitalRecord) -> bool {
    row.status.as_deref().map(str::trim) == Some(OPERATIONAL_STATUS)
}

/// Stage 2: keep only rows owned by a whitelisted public institution.
fn public_institution(row: &HospitalRecord) -> Option<PublicInstitution> {
    row.institution.as_deref().and_then(PublicInstitution::parse)
}

/// Stage 3: coerce both coordinate fields to numbers.
fn coerce_coordinates(row: &HospitalRecord) -> Option<(f64, f64)> {
    let north = row.north.as_deref()?.trim().parse::<f64>().ok()?;
    let east = row.east.as_deref()?.trim().parse::<f64>().ok()?;
    Some((north, east))
}

/// Stage 4: guard against placeholder and out-of-range coordinates.
fn coordinates_in_bounds(north: f64, east: f64) -> bool {
    north != 0.0 && east != 0.0 && north.abs() <= 90.0 && east.abs() <= 180.0
}

/// Apply all stages in order.
pub fn filter_hospitals(rows: &[HospitalRecord]) -> FilteredHospitals {
    let mut dropped = DropCounts::default();
    let mut hospitals = Vec::new();
    let mut points = Vec::new();

    for row in rows {
        if !is_operational(row) {
            dropped.non_operational += 1;
            continue;
        }

        let Some(institution) = public_institution(row) else {
            dropped.non_public += 1;
            continue;
        };

        let Some((north, east)) = coerce_coordinates(row) else {
            dropped.invalid_coordinates += 1;
            continue;
        };

        if !coordinates_in_bounds(north, east) {
            dropped.invalid_coordinates += 1;
            continue;
        }

        let hospital = Hospital {
            name: row.name.clone(),
            department: row.department.clone(),
            province: row.province.clone(),
            district: row.district.clone(),
            institution,
            north,
            east,
            ubigeo: row.ubigeo.clone(),
        };
        points.push(HospitalPoint {
            point: point_from_north_east(north, east),
            hospital: hospital.clone(),
        });
        hospitals.push(hospital);
    }

    debug!(
        kept = hospitals.len(),
        non_operational = dropped.non_operational,
        non_public = dropped.non_public,
        invalid_coordinates = dropped.invalid_coordinates,
        "hospital filter applied"
    );

    FilteredHospitals {
        hospitals,
        points,
        dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str, institution: &str, north: &str, east: &str) -> HospitalRecord {
        HospitalRecord {
            name: "HOSPITAL DE PRUEBA".to_string(),
            department: "LIMA".to_string(),
            province: "LIMA".to_string(),
            district: "LIMA".to_string(),
            status: (!status.is_empty()).then(|| status.to_string()),
            institution: (!institution.is_empty()).then(|| institution.to_string()),
            north: (!north.is_empty()).then(|| north.to_string()),
            east: (!east.is_empty()).then(|| east.to_string()),
            ubigeo: "150101".to_string(),
        }
    }

    #[test]
    fn test_north_east_axis_mapping() {
        // NORTE is latitude-like and must land on Y; ESTE on X.
        let point = point_from_north_east(-12.04, -77.03);
        assert_eq!(point.x(), -77.03);
        assert_eq!(point.y(), -12.04);
    }

    #[test]
    fn test_closed_facility_excluded() {
        let rows = vec![
            row("EN FUNCIONAMIENTO", "MINSA", "-12.0", "-77.0"),
            row("CERRADO", "MINSA", "-12.0", "-77.0"),
            row("EN FUNCIONAMIENTO", "ESSALUD", "-13.0", "-76.0"),
            row("EN FUNCIONAMIENTO", "PNP", "-11.0", "-75.0"),
        ];

        let out = filter_hospitals(&rows);
        assert_eq!(out.hospitals.len(), 3);
        assert_eq!(out.dropped.non_operational, 1);
    }

    #[test]
    fn test_private_institution_excluded_regardless_of_status() {
        let rows = vec![row("EN FUNCIONAMIENTO", "PRIVADO", "-12.0", "-77.0")];

        let out = filter_hospitals(&rows);
        assert!(out.hospitals.is_empty());
        assert_eq!(out.dropped.non_public, 1);
    }

    #[test]
    fn test_null_coordinate_excluded() {
        let rows = vec![
            row("EN FUNCIONAMIENTO", "MINSA", "", "-77.0"),
            row("EN FUNCIONAMIENTO", "MINSA", "-12.0", "-77.0"),
        ];

        let out = filter_hospitals(&rows);
        assert_eq!(out.hospitals.len(), 1);
        assert_eq!(out.dropped.invalid_coordinates, 1);
    }

    #[test]
    fn test_zero_and_out_of_range_coordinates_excluded() {
        let rows = vec![
            row("EN FUNCIONAMIENTO", "MINSA", "0", "-77.0"),
            row("EN FUNCIONAMIENTO", "MINSA", "-12.0", "0"),
            row("EN FUNCIONAMIENTO", "MINSA", "95.0", "-77.0"),
            row("EN FUNCIONAMIENTO", "MINSA", "-12.0", "-190.0"),
            row("EN FUNCIONAMIENTO", "MINSA", "abc", "-77.0"),
        ];

        let out = filter_hospitals(&rows);
        assert!(out.hospitals.is_empty());
        assert_eq!(out.dropped.invalid_coordinates, 5);
    }

    #[test]
    fn test_survivors_satisfy_invariants() {
        let rows = vec![
            row("EN FUNCIONAMIENTO", "GOBIERNO REGIONAL", "-12.5", "-76.9"),
            row("SUSPENDIDO", "MINSA", "-12.0", "-77.0"),
            row("EN FUNCIONAMIENTO", "FFAA", "-9.19", "-75.01"),
        ];

        let out = filter_hospitals(&rows);
        assert_eq!(out.hospitals.len() + out.dropped.total(), rows.len());
        for hospital in &out.hospitals {
            assert!(hospital.north != 0.0 && hospital.north.abs() <= 90.0);
            assert!(hospital.east != 0.0 && hospital.east.abs() <= 180.0);
        }
        for (hospital, point) in out.hospitals.iter().zip(&out.points) {
            assert_eq!(point.point.x(), hospital.east);
            assert_eq!(point.point.y(), hospital.north);
        }
    }
}
