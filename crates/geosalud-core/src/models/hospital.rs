//! Hospital registry rows, raw and filtered.

use geo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Registry marker for a facility that is currently functioning.
pub const OPERATIONAL_STATUS: &str = "EN FUNCIONAMIENTO";

/// Public owning institutions eligible for the analysis.
///
/// Any institution value outside this whitelist (including a missing one)
/// marks the row as private or unattributable and excludes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PublicInstitution {
    /// Ministry of Health (MINSA)
    Minsa,
    /// Regional government facility
    RegionalGovernment,
    /// Social-security health system (EsSalud)
    Essalud,
    /// Armed forces health system (FFAA)
    ArmedForces,
    /// National police health system (PNP)
    Police,
}

impl PublicInstitution {
    /// Parse the registry's institution marker. Returns `None` for anything
    /// outside the public whitelist.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "MINSA" => Some(PublicInstitution::Minsa),
            "GOBIERNO REGIONAL" => Some(PublicInstitution::RegionalGovernment),
            "ESSALUD" => Some(PublicInstitution::Essalud),
            "FFAA" => Some(PublicInstitution::ArmedForces),
            "PNP" => Some(PublicInstitution::Police),
            _ => None,
        }
    }

    /// The marker string used by the registry.
    pub fn as_str(&self) -> &'static str {
        match self {
            PublicInstitution::Minsa => "MINSA",
            PublicInstitution::RegionalGovernment => "GOBIERNO REGIONAL",
            PublicInstitution::Essalud => "ESSALUD",
            PublicInstitution::ArmedForces => "FFAA",
            PublicInstitution::Police => "PNP",
        }
    }
}

impl fmt::Display for PublicInstitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One raw row of the hospital registry, prior to filtering.
///
/// Status, institution, and the two coordinate fields stay in their source
/// representation so the filter stages can apply their exclusion rules
/// explicitly; nothing is defaulted at read time.
#[derive(Debug, Clone, PartialEq)]
pub struct HospitalRecord {
    pub name: String,
    pub department: String,
    pub province: String,
    pub district: String,
    pub status: Option<String>,
    pub institution: Option<String>,
    /// Raw NORTE field (latitude-like, bounded by ±90)
    pub north: Option<String>,
    /// Raw ESTE field (longitude-like, bounded by ±180)
    pub east: Option<String>,
    /// UBIGEO administrative code linking the row to a district
    pub ubigeo: String,
}

/// An operational public hospital with validated coordinates.
///
/// Built only by the filter; by construction its status was the operational
/// marker, its institution is public, and its coordinates are non-zero and
/// within geographic bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Hospital {
    pub name: String,
    pub department: String,
    pub province: String,
    pub district: String,
    pub institution: PublicInstitution,
    pub north: f64,
    pub east: f64,
    pub ubigeo: String,
}

/// A hospital together with its derived WGS84 point geometry.
///
/// Created once per valid hospital and never mutated; downstream stages only
/// read it or derive new structures.
#[derive(Debug, Clone, PartialEq)]
pub struct HospitalPoint {
    pub hospital: Hospital,
    pub point: Point<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_institution_whitelist() {
        assert_eq!(PublicInstitution::parse("MINSA"), Some(PublicInstitution::Minsa));
        assert_eq!(
            PublicInstitution::parse("GOBIERNO REGIONAL"),
            Some(PublicInstitution::RegionalGovernment)
        );
        assert_eq!(PublicInstitution::parse("ESSALUD"), Some(PublicInstitution::Essalud));
        assert_eq!(PublicInstitution::parse("FFAA"), Some(PublicInstitution::ArmedForces));
        assert_eq!(PublicInstitution::parse("PNP"), Some(PublicInstitution::Police));
    }

    #[test]
    fn test_private_and_unknown_institutions_rejected() {
        assert_eq!(PublicInstitution::parse("PRIVADO"), None);
        assert_eq!(PublicInstitution::parse(""), None);
        assert_eq!(PublicInstitution::parse("minsa"), None);
    }

    #[test]
    fn test_institution_marker_round_trip() {
        for institution in [
            PublicInstitution::Minsa,
            PublicInstitution::RegionalGovernment,
            PublicInstitution::Essalud,
            PublicInstitution::ArmedForces,
            PublicInstitution::Police,
        ] {
            assert_eq!(PublicInstitution::parse(institution.as_str()), Some(institution));
        }
    }
}
