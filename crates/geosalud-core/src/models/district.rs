//! Administrative districts and their derived hospital counts.

use geo::MultiPolygon;

/// One administrative district with its polygon geometry in WGS84.
///
/// The administrative code shares the UBIGEO code space with
/// [`super::HospitalRecord`] and is unique per district.
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictPolygon {
    pub department: String,
    pub province: String,
    pub district: String,
    /// UBIGEO-style administrative code (join key, zero-padded on use)
    pub code: String,
    pub geometry: MultiPolygon<f64>,
}

/// A district plus the number of hospitals whose administrative code
/// matches it. Recomputed on every pipeline run, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictWithCount {
    pub district: DistrictPolygon,
    pub hospital_count: u32,
}
