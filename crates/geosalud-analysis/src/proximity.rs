//! Buffer-proximity analysis for one department.

use crate::departments::department_code;
use geosalud_core::error::Result;
use geosalud_core::models::{
    HospitalPoint, PopulationCenter, ProximityAnalysis, ProximityResult,
};
use geosalud_geo::{BufferRadius, DegreeDisk, PointIndex};
use tracing::debug;

/// Count the hospitals within a fixed-radius buffer around every population
/// center of a department, and pick the extremal centers.
///
/// Returns `Ok(None)` when the department has no hospitals or no population
/// centers; a region mismatch is recoverable, not an error. An unrecognized
/// department name is an error.
pub fn analyze_proximity(
    hospitals: &[HospitalPoint],
    centers: &[PopulationCenter],
    department: &str,
    radius: BufferRadius,
) -> Result<Option<ProximityAnalysis>> {
    let code = department_code(department)?;
    let department_name = department.trim().to_uppercase();

    let dept_hospitals: Vec<HospitalPoint> = hospitals
        .iter()
        .filter(|h| h.hospital.department == department_name)
        .cloned()
        .collect();

    // Centers keep their positional index in the input collection; the
    // min/max tie-break below depends on that order.
    let dept_centers: Vec<(usize, &PopulationCenter)> = centers
        .iter()
        .enumerate()
        .filter(|(_, c)| c.department_code == code)
        .collect();

    if dept_hospitals.is_empty() || dept_centers.is_empty() {
        debug!(
            department = %department_name,
            hospitals = dept_hospitals.len(),
            centers = dept_centers.len(),
            "region restriction yielded an empty set"
        );
        return Ok(None);
    }

    debug!(
        department = %department_name,
        hospitals = dept_hospitals.len(),
        centers = dept_centers.len(),
        radius_km = radius.km(),
        "running proximity analysis"
    );

    let index = PointIndex::from_points(dept_hospitals.iter().map(|h| h.point));

    let mut results = Vec::with_capacity(dept_centers.len());
    for (center_id, center) in dept_centers {
        let disk = DegreeDisk::new(center.point, radius);
        let (lower, upper) = disk.envelope();
        let hospitals_in_buffer = index
            .candidates_in(lower, upper)
            .filter(|candidate| disk.contains(&candidate.point))
            .count() as u32;

        results.push(ProximityResult {
            center_id,
            name: center.name.clone(),
            code: center.code.clone(),
            point: center.point,
            hospitals_in_buffer,
        });
    }

    // First occurrence wins on ties: strict comparisons over input order.
    let mut most_isolated = results[0].clone();
    let mut most_concentrated = results[0].clone();
    for result in &results[1..] {
        if result.hospitals_in_buffer < most_isolated.hospitals_in_buffer {
            most_isolated = result.clone();
        }
        if result.hospitals_in_buffer > most_concentrated.hospitals_in_buffer {
            most_concentrated = result.clone();
        }
    }

    Ok(Some(ProximityAnalysis {
        most_isolated,
        most_concentrated,
        hospitals: dept_hospitals,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Point;
    use geosalud_core::error::GeosaludError;
    use geosalud_core::models::{Hospital, PublicInstitution};

    fn hospital(department: &str, north: f64, east: f64) -> HospitalPoint {
        HospitalPoint {
            hospital: Hospital {
                name: "H".to_string(),
                department: department.to_string(),
                province: String::new(),
                district: String::new(),
                institution: PublicInstitution::Minsa,
                north,
                east,
                ubigeo: "150101".to_string(),
            },
            point: Point::new(east, north),
        }
    }

    fn center(name: &str, department_code: &str, north: f64, east: f64) -> PopulationCenter {
        PopulationCenter {
            name: name.to_string(),
            code: "0001".to_string(),
            department_code: department_code.to_string(),
            department: None,
            province: None,
            district: None,
            point: Point::new(east, north),
        }
    }

    #[test]
    fn test_unknown_department_errors() {
        let result = analyze_proximity(&[], &[], "Narnia", BufferRadius::default());
        assert!(matches!(result, Err(GeosaludError::UnknownRegion { .. })));
    }

    #[test]
    fn test_empty_region_returns_none() {
        // Known department, but no hospitals there
        let hospitals = vec![hospital("CUSCO", -13.5, -71.9)];
        let centers = vec![center("SAN JUAN", "15", -12.0, -77.0)];

        let result =
            analyze_proximity(&hospitals, &centers, "Lima", BufferRadius::default()).unwrap();
        assert!(result.is_none());

        // And no centers with the right code either
        let hospitals = vec![hospital("LIMA", -12.0, -77.0)];
        let centers = vec![center("QOSQO", "08", -13.5, -71.9)];
        let result =
            analyze_proximity(&hospitals, &centers, "Lima", BufferRadius::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_counts_hospitals_inside_buffer_only() {
        // One center, one hospital ~5 km north, one ~50 km east
        let centers = vec![center("VILLA", "15", -12.0, -77.0)];
        let hospitals = vec![
            hospital("LIMA", -12.0 + 5.0 / 111.0, -77.0),
            hospital("LIMA", -12.0, -77.0 + 50.0 / 111.0),
        ];

        let analysis =
            analyze_proximity(&hospitals, &centers, "Lima", BufferRadius::from_km(10.0))
                .unwrap()
                .unwrap();

        assert_eq!(analysis.most_isolated.hospitals_in_buffer, 1);
        assert_eq!(analysis.most_concentrated.hospitals_in_buffer, 1);
        assert_eq!(analysis.hospitals.len(), 2);
    }

    #[test]
    fn test_tie_break_picks_first_occurrence() {
        // Two centers with identical counts (zero hospitals nearby each)
        let hospitals = vec![hospital("LIMA", -10.0, -79.9)];
        let centers = vec![
            center("FIRST", "15", -12.0, -77.0),
            center("SECOND", "15", -12.1, -77.1),
        ];

        let analysis =
            analyze_proximity(&hospitals, &centers, "lima", BufferRadius::from_km(10.0))
                .unwrap()
                .unwrap();

        assert_eq!(analysis.most_isolated.name, "FIRST");
        assert_eq!(analysis.most_concentrated.name, "FIRST");
        assert_eq!(analysis.most_isolated.center_id, 0);
    }

    #[test]
    fn test_extremal_selection() {
        let centers = vec![
            center("REMOTE", "15", -10.0, -79.0),
            center("URBAN", "15", -12.0, -77.0),
        ];
        let hospitals = vec![
            hospital("LIMA", -12.01, -77.0),
            hospital("LIMA", -12.0, -77.01),
            hospital("LIMA", -11.99, -77.0),
        ];

        let analysis =
            analyze_proximity(&hospitals, &centers, "LIMA", BufferRadius::from_km(10.0))
                .unwrap()
                .unwrap();

        assert_eq!(analysis.most_isolated.name, "REMOTE");
        assert_eq!(analysis.most_isolated.hospitals_in_buffer, 0);
        assert_eq!(analysis.most_concentrated.name, "URBAN");
        assert_eq!(analysis.most_concentrated.hospitals_in_buffer, 3);
    }
}
