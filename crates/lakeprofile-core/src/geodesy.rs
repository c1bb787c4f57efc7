//! Spherical geometry for grid-cell area estimation.
//!
//! Distances use the spherical law of cosines on a sphere of radius
//! [`EARTH_RADIUS_KM`]; cell areas integrate east-west distances over
//! [`AREA_STRIPS`] latitude strips.

use serde::{Deserialize, Serialize};

/// Radius of the earth [km].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Number of latitude strips used to integrate a cell's area.
pub const AREA_STRIPS: usize = 10;

/// Square kilometres to square metres.
const KM2_TO_M2: f64 = 1000.0 * 1000.0;

/// Location and size of a lat/lon-rectangular grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCellLocation {
    /// Cell-centre latitude [degrees].
    pub latitude: f64,
    /// Cell-centre longitude [degrees].
    pub longitude: f64,
    /// Cell edge length [degrees].
    pub resolution: f64,
}

impl GridCellLocation {
    pub fn new(latitude: f64, longitude: f64, resolution: f64) -> Self {
        Self {
            latitude,
            longitude,
            resolution,
        }
    }

    /// Planar-equivalent area of the cell [m^2].
    pub fn area(&self) -> f64 {
        estimate_cell_area(self.latitude, self.longitude, self.resolution)
    }
}

/// Great-circle distance between two points given in degrees [km].
///
/// The cosine argument is capped at 1.0 so rounding on near-coincident
/// points cannot push `acos` out of its domain. Coincident points are
/// exactly zero apart.
pub fn great_circle_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }

    let phi1 = lat1.to_radians();
    let theta1 = lon1.to_radians();
    let phi2 = lat2.to_radians();
    let theta2 = lon2.to_radians();

    // Per-point factors are grouped so that swapping the points gives
    // bit-identical results.
    let term1 = (phi1.cos() * theta1.cos()) * (phi2.cos() * theta2.cos());
    let term2 = (phi1.cos() * theta1.sin()) * (phi2.cos() * theta2.sin());
    let term3 = phi1.sin() * phi2.sin();

    let cos_angle = (term1 + term2 + term3).min(1.0);
    EARTH_RADIUS_KM * cos_angle.acos()
}

/// Estimate the area of a grid cell [m^2].
///
/// Works on absolute coordinates, so the result does not depend on the
/// hemisphere. The north-south strip height is taken once at the cell
/// centre and reused for every strip.
pub fn estimate_cell_area(lat: f64, lon: f64, resolution: f64) -> f64 {
    let lat = lat.abs();
    let lon = lon.abs();

    let strip_width = resolution / AREA_STRIPS as f64;
    let west = lon - resolution / 2.0;
    let east = lon + resolution / 2.0;

    let delta = great_circle_distance(lat, lon, lat + strip_width, lon);

    let mut strip_lat = lat - resolution / 2.0;
    let mut dist = 0.0;
    for _ in 0..AREA_STRIPS {
        dist += great_circle_distance(strip_lat, west, strip_lat, east) * delta;
        strip_lat += strip_width;
    }

    dist * KM2_TO_M2
}
