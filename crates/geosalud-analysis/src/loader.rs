//! Loads and CRS-normalizes the three input sources.

use geosalud_core::error::Result;
use geosalud_core::formats::{registry, shapefile};
use geosalud_core::models::{DistrictPolygon, HospitalRecord, PopulationCenter};
use geosalud_geo::transform::ToWgs84;
use std::path::PathBuf;
use tracing::info;

/// Locations of the three input sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub hospitals: PathBuf,
    pub districts: PathBuf,
    pub centers: PathBuf,
}

impl DataPaths {
    pub fn new(
        hospitals: impl Into<PathBuf>,
        districts: impl Into<PathBuf>,
        centers: impl Into<PathBuf>,
    ) -> Self {
        Self {
            hospitals: hospitals.into(),
            districts: districts.into(),
            centers: centers.into(),
        }
    }
}

/// The three in-memory structures produced by the loader, geometry already
/// in WGS84.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub hospitals: Vec<HospitalRecord>,
    pub districts: Vec<DistrictPolygon>,
    pub centers: Vec<PopulationCenter>,
}

/// Load all three sources, or none.
///
/// Any unreadable or malformed source aborts the load with an error naming
/// it; no partial triple is ever returned.
pub fn load_datasets(paths: &DataPaths) -> Result<LoadedData> {
    let hospitals = registry::read_registry(&paths.hospitals)?;
    info!(rows = hospitals.len(), "hospital registry loaded");

    let (districts, district_epsg) = shapefile::read_districts(&paths.districts)?;
    let districts = normalize_districts(districts, district_epsg)?;
    info!(rows = districts.len(), "district polygons loaded");

    let (centers, center_epsg) = shapefile::read_population_centers(&paths.centers)?;
    let centers = normalize_centers(centers, center_epsg)?;
    info!(rows = centers.len(), "population centers loaded");

    Ok(LoadedData {
        hospitals,
        districts,
        centers,
    })
}

fn normalize_districts(
    districts: Vec<DistrictPolygon>,
    epsg: u32,
) -> Result<Vec<DistrictPolygon>> {
    let transform = ToWgs84::new(epsg)?;
    if transform.is_identity() {
        return Ok(districts);
    }

    info!(from_epsg = epsg, "reprojecting district polygons to EPSG:4326");
    districts
        .into_iter()
        .map(|mut district| {
            district.geometry = transform.multi_polygon(&district.geometry)?;
            Ok(district)
        })
        .collect()
}

fn normalize_centers(
    centers: Vec<PopulationCenter>,
    epsg: u32,
) -> Result<Vec<PopulationCenter>> {
    let transform = ToWgs84::new(epsg)?;
    if transform.is_identity() {
        return Ok(centers);
    }

    info!(from_epsg = epsg, "reprojecting population centers to EPSG:4326");
    centers
        .into_iter()
        .map(|mut center| {
            center.point = transform.point(&center.point)?;
            Ok(center)
        })
        .collect()
}
