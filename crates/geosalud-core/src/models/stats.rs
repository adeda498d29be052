//! Summary statistics over the filtered hospitals and district counts.

use crate::models::PublicInstitution;
use serde::Serialize;

/// Hospitals attributed to one department.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentCount {
    pub department: String,
    pub hospitals: u32,
}

/// Hospitals owned by one public institution type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstitutionCount {
    pub institution: PublicInstitution,
    pub hospitals: u32,
}

/// Fixed-shape aggregate over the pipeline outputs.
///
/// A pure function of its inputs; identical inputs produce an identical
/// struct, including the ordering of the ranked vectors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub total_hospitals: usize,
    pub total_districts: usize,
    pub districts_with_hospitals: usize,
    pub districts_without_hospitals: usize,
    pub avg_hospitals_per_district: f64,
    pub max_hospitals_district: u32,
    pub departments_covered: usize,
    /// The five most frequent departments, count descending then name ascending
    pub top_departments: Vec<DepartmentCount>,
    /// Full institution-type distribution, count descending then marker ascending
    pub institutions: Vec<InstitutionCount>,
}
