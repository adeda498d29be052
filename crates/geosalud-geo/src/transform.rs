//! CRS normalization to WGS84.

use geo::{Coord, LineString, MultiPolygon, Point, Polygon};
use geosalud_core::error::{GeosaludError, Result};
use proj::Proj;

/// The fixed geographic reference frame of the pipeline.
pub const WGS84_EPSG: u32 = 4326;

/// Reprojects geometry from a source EPSG code into WGS84.
///
/// Constructed once per source dataset; a no-op when the source is already
/// EPSG:4326.
pub struct ToWgs84 {
    from_epsg: u32,
    proj: Option<Proj>,
}

impl ToWgs84 {
    pub fn new(from_epsg: u32) -> Result<Self> {
        let proj = if from_epsg == WGS84_EPSG {
            None
        } else {
            let from = format!("EPSG:{}", from_epsg);
            let to = format!("EPSG:{}", WGS84_EPSG);
            Some(Proj::new_known_crs(&from, &to, None).map_err(|e| {
                GeosaludError::Projection {
                    from_epsg,
                    reason: format!("failed to create projection to {}: {}", to, e),
                }
            })?)
        };

        Ok(Self { from_epsg, proj })
    }

    /// Whether the source frame already is WGS84.
    pub fn is_identity(&self) -> bool {
        self.proj.is_none()
    }

    pub fn point(&self, point: &Point<f64>) -> Result<Point<f64>> {
        match &self.proj {
            None => Ok(*point),
            Some(proj) => {
                let (x, y) = self.convert(proj, (point.x(), point.y()))?;
                Ok(Point::new(x, y))
            }
        }
    }

    pub fn multi_polygon(&self, multi_polygon: &MultiPolygon<f64>) -> Result<MultiPolygon<f64>> {
        match &self.proj {
            None => Ok(multi_polygon.clone()),
            Some(proj) => {
                let polygons: Result<Vec<Polygon<f64>>> = multi_polygon
                    .0
                    .iter()
                    .map(|polygon| self.polygon(proj, polygon))
                    .collect();
                Ok(MultiPolygon(polygons?))
            }
        }
    }

    fn polygon(&self, proj: &Proj, polygon: &Polygon<f64>) -> Result<Polygon<f64>> {
        let exterior = self.line_string(proj, polygon.exterior())?;
        let interiors: Result<Vec<LineString<f64>>> = polygon
            .interiors()
            .iter()
            .map(|interior| self.line_string(proj, interior))
            .collect();
        Ok(Polygon::new(exterior, interiors?))
    }

    fn line_string(&self, proj: &Proj, line: &LineString<f64>) -> Result<LineString<f64>> {
        let coords: Result<Vec<Coord<f64>>> = line
            .coords()
            .map(|coord| self.convert(proj, (coord.x, coord.y)).map(|(x, y)| Coord { x, y }))
            .collect();
        Ok(LineString::from(coords?))
    }

    fn convert(&self, proj: &Proj, xy: (f64, f64)) -> Result<(f64, f64)> {
        proj.convert(xy).map_err(|e| GeosaludError::Projection {
            from_epsg: self.from_epsg,
            reason: format!("projection failed: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wgs84_source_is_identity() {
        let transform = ToWgs84::new(WGS84_EPSG).unwrap();
        assert!(transform.is_identity());

        let point = Point::new(-77.03, -12.04);
        assert_eq!(transform.point(&point).unwrap(), point);
    }

    #[test]
    fn test_web_mercator_point_reprojects() {
        let transform = ToWgs84::new(3857).unwrap();
        assert!(!transform.is_identity());

        // One degree of longitude at the equator in Web Mercator meters
        let reprojected = transform.point(&Point::new(111_319.490_793_273_57, 0.0)).unwrap();
        assert!((reprojected.x() - 1.0).abs() < 1e-9);
        assert!(reprojected.y().abs() < 1e-9);
    }

    #[test]
    fn test_multi_polygon_round_trip_identity() {
        let transform = ToWgs84::new(WGS84_EPSG).unwrap();
        let square = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]),
            vec![],
        );
        let multi = MultiPolygon(vec![square]);

        assert_eq!(transform.multi_polygon(&multi).unwrap(), multi);
    }
}
