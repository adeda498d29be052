//! Domain models for the hospital accessibility pipeline.

pub mod center;
pub mod district;
pub mod hospital;
pub mod proximity;
pub mod stats;

pub use center::PopulationCenter;
pub use district::{DistrictPolygon, DistrictWithCount};
pub use hospital::{Hospital, HospitalPoint, HospitalRecord, PublicInstitution, OPERATIONAL_STATUS};
pub use proximity::{ProximityAnalysis, ProximityResult};
pub use stats::{DepartmentCount, InstitutionCount, SummaryStatistics};
