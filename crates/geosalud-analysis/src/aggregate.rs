//! Per-district hospital counts via administrative-code matching.
//!
//! Matching is code-based rather than point-in-polygon: the UBIGEO code is
//! authoritative, which avoids floating-point containment ambiguity. A
//! hospital whose code matches no district is excluded from every count and
//! is not flagged; this is a known limitation of the code-join approach.

use geosalud_core::models::{DistrictPolygon, DistrictWithCount, HospitalPoint};
use std::collections::HashMap;

/// Width of a normalized UBIGEO code.
const UBIGEO_WIDTH: usize = 6;

/// Zero-pad an administrative code to the fixed UBIGEO width.
pub fn normalize_code(code: &str) -> String {
    format!("{:0>width$}", code.trim(), width = UBIGEO_WIDTH)
}

/// Count hospitals per district by administrative code.
///
/// Left join onto the full district list: every input district appears
/// exactly once in the output, unmatched districts counting 0.
pub fn count_by_district(
    hospitals: &[HospitalPoint],
    districts: &[DistrictPolygon],
) -> Vec<DistrictWithCount> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for hospital in hospitals {
        *counts
            .entry(normalize_code(&hospital.hospital.ubigeo))
            .or_insert(0) += 1;
    }

    districts
        .iter()
        .map(|district| {
            let hospital_count = counts
                .get(&normalize_code(&district.code))
                .copied()
                .unwrap_or(0);
            DistrictWithCount {
                district: district.clone(),
                hospital_count,
            }
        })
        .collect()
}
