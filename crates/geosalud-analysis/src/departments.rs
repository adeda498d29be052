//! Department name → CCDD code resolution.

use geosalud_core::error::{GeosaludError, Result};

/// Two-digit department codes keyed by lowercase name.
const DEPARTMENT_CODES: &[(&str, &str)] = &[
    ("lima", "15"),
    ("loreto", "16"),
    ("cusco", "08"),
    ("arequipa", "04"),
    ("piura", "20"),
    ("la libertad", "13"),
    ("cajamarca", "06"),
    ("puno", "21"),
    ("junin", "12"),
    ("ancash", "02"),
];

/// Resolve a department name (case-insensitive) to its two-digit code.
///
/// An unrecognized name is an error; there is no silent fallback region.
pub fn department_code(name: &str) -> Result<&'static str> {
    let needle = name.trim().to_lowercase();
    DEPARTMENT_CODES
        .iter()
        .find(|(candidate, _)| *candidate == needle)
        .map(|(_, code)| *code)
        .ok_or_else(|| GeosaludError::UnknownRegion {
            name: name.trim().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(department_code("Lima").unwrap(), "15");
        assert_eq!(department_code("CUSCO").unwrap(), "08");
        assert_eq!(department_code("  la libertad ").unwrap(), "13");
    }

    #[test]
    fn test_unknown_department_is_an_error() {
        let err = department_code("Atlantis").unwrap_err();
        assert!(matches!(err, GeosaludError::UnknownRegion { name } if name == "Atlantis"));
    }
}
