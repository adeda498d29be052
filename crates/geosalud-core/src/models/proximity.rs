//! Results of the buffer-proximity analysis.

use crate::models::HospitalPoint;
use geo::Point;

/// Hospitals reachable within the buffer around one population center.
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityResult {
    /// Positional index of the center in the input collection
    pub center_id: usize,
    pub name: String,
    /// Center code (CCPP)
    pub code: String,
    pub point: Point<f64>,
    pub hospitals_in_buffer: u32,
}

/// Outcome of a department-level proximity analysis.
///
/// The analyzer returns `None` instead of this struct when the department
/// has no hospitals or no population centers; callers must check before use.
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityAnalysis {
    /// Center with the fewest hospitals in its buffer (first occurrence on ties)
    pub most_isolated: ProximityResult,
    /// Center with the most hospitals in its buffer (first occurrence on ties)
    pub most_concentrated: ProximityResult,
    /// The hospitals of the analyzed department
    pub hospitals: Vec<HospitalPoint>,
}
