//! Summary statistics over the pipeline outputs.

use geosalud_core::models::{
    DepartmentCount, DistrictWithCount, Hospital, InstitutionCount, PublicInstitution,
    SummaryStatistics,
};
use std::collections::HashMap;

/// Number of departments reported in the top ranking.
const TOP_DEPARTMENTS: usize = 5;

/// Derive descriptive aggregates from the filtered hospitals and the
/// district counts. Pure; inputs are not mutated.
pub fn summarize(
    hospitals: &[Hospital],
    districts: &[DistrictWithCount],
) -> SummaryStatistics {
    let mut department_counts: HashMap<&str, u32> = HashMap::new();
    let mut institution_counts: HashMap<PublicInstitution, u32> = HashMap::new();
    for hospital in hospitals {
        *department_counts.entry(hospital.department.as_str()).or_insert(0) += 1;
        *institution_counts.entry(hospital.institution).or_insert(0) += 1;
    }

    let departments_covered = department_counts.len();

    let mut top_departments: Vec<DepartmentCount> = department_counts
        .into_iter()
        .map(|(department, hospitals)| DepartmentCount {
            department: department.to_string(),
            hospitals,
        })
        .collect();
    // Deterministic ranking: count descending, then name ascending
    top_departments
        .sort_by(|a, b| b.hospitals.cmp(&a.hospitals).then_with(|| a.department.cmp(&b.department)));
    top_departments.truncate(TOP_DEPARTMENTS);

    let mut institutions: Vec<InstitutionCount> = institution_counts
        .into_iter()
        .map(|(institution, hospitals)| InstitutionCount {
            institution,
            hospitals,
        })
        .collect();
    institutions.sort_by(|a, b| {
        b.hospitals
            .cmp(&a.hospitals)
            .then_with(|| a.institution.as_str().cmp(b.institution.as_str()))
    });

    let districts_with_hospitals = districts.iter().filter(|d| d.hospital_count > 0).count();
    let assigned: u64 = districts.iter().map(|d| u64::from(d.hospital_count)).sum();
    let avg_hospitals_per_district = if districts.is_empty() {
        0.0
    } else {
        assigned as f64 / districts.len() as f64
    };
    let max_hospitals_district = districts.iter().map(|d| d.hospital_count).max().unwrap_or(0);

    SummaryStatistics {
        total_hospitals: hospitals.len(),
        total_districts: districts.len(),
        districts_with_hospitals,
        districts_without_hospitals: districts.len() - districts_with_hospitals,
        avg_hospitals_per_district,
        max_hospitals_district,
        departments_covered,
        top_departments,
        institutions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::MultiPolygon;
    use geosalud_core::models::DistrictPolygon;

    fn hospital(department: &str, institution: PublicInstitution) -> Hospital {
        Hospital {
            name: "H".to_string(),
            department: department.to_string(),
            province: String::new(),
            district: String::new(),
            institution,
            north: -12.0,
            east: -77.0,
            ubigeo: "150101".to_string(),
        }
    }

    fn counted(code: &str, hospital_count: u32) -> DistrictWithCount {
        DistrictWithCount {
            district: DistrictPolygon {
                department: String::new(),
                province: String::new(),
                district: String::new(),
                code: code.to_string(),
                geometry: MultiPolygon(vec![]),
            },
            hospital_count,
        }
    }

    #[test]
    fn test_totals_match_fixture() {
        let hospitals = vec![
            hospital("LIMA", PublicInstitution::Minsa),
            hospital("LIMA", PublicInstitution::Essalud),
            hospital("CUSCO", PublicInstitution::Minsa),
            hospital("PIURA", PublicInstitution::Police),
        ];
        let districts = vec![counted("150101", 3), counted("080101", 1), counted("200101", 0)];

        let stats = summarize(&hospitals, &districts);

        assert_eq!(stats.total_hospitals, 4);
        assert_eq!(stats.departments_covered, 3);
        assert_eq!(stats.total_districts, 3);
        assert_eq!(stats.districts_with_hospitals, 2);
        assert_eq!(stats.districts_without_hospitals, 1);
        assert_eq!(stats.max_hospitals_district, 3);
        assert!((stats.avg_hospitals_per_district - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_top_departments_deterministic_order() {
        let hospitals = vec![
            hospital("CUSCO", PublicInstitution::Minsa),
            hospital("AREQUIPA", PublicInstitution::Minsa),
            hospital("LIMA", PublicInstitution::Minsa),
            hospital("LIMA", PublicInstitution::Minsa),
        ];

        let stats = summarize(&hospitals, &[]);

        assert_eq!(stats.top_departments[0].department, "LIMA");
        assert_eq!(stats.top_departments[0].hospitals, 2);
        // AREQUIPA and CUSCO tie at 1; name order breaks the tie
        assert_eq!(stats.top_departments[1].department, "AREQUIPA");
        assert_eq!(stats.top_departments[2].department, "CUSCO");
    }

    #[test]
    fn test_top_departments_caps_at_five() {
        let hospitals: Vec<Hospital> = ["A", "B", "C", "D", "E", "F", "G"]
            .iter()
            .map(|d| hospital(d, PublicInstitution::Minsa))
            .collect();

        let stats = summarize(&hospitals, &[]);

        assert_eq!(stats.departments_covered, 7);
        assert_eq!(stats.top_departments.len(), 5);
    }

    #[test]
    fn test_institution_distribution_is_complete() {
        let hospitals = vec![
            hospital("LIMA", PublicInstitution::Minsa),
            hospital("LIMA", PublicInstitution::Minsa),
            hospital("LIMA", PublicInstitution::ArmedForces),
        ];

        let stats = summarize(&hospitals, &[]);

        assert_eq!(stats.institutions.len(), 2);
        assert_eq!(stats.institutions[0].institution, PublicInstitution::Minsa);
        assert_eq!(stats.institutions[0].hospitals, 2);
        assert_eq!(stats.institutions[1].hospitals, 1);
    }

    #[test]
    fn test_empty_inputs() {
        let stats = summarize(&[], &[]);
        assert_eq!(stats.total_hospitals, 0);
        assert_eq!(stats.avg_hospitals_per_district, 0.0);
        assert_eq!(stats.max_hospitals_district, 0);
        assert!(stats.top_departments.is_empty());
    }
}
