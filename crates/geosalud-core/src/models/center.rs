//! Population centers (settlements).

use geo::Point;

/// One settlement with its point geometry in WGS84.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationCenter {
    /// Settlement name; "Unknown" when the source field is absent
    pub name: String,
    /// Center code (CCPP); "Unknown" when the source field is absent
    pub code: String,
    /// Two-digit department code (CCDD) scoping proximity queries
    pub department_code: String,
    pub department: Option<String>,
    pub province: Option<String>,
    pub district: Option<String>,
    pub point: Point<f64>,
}
