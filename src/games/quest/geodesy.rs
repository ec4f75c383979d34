//! Great-circle geometry on a spherical Earth.
//!
//! Everything here is a pure function of its inputs. Coordinates are decimal
//! degrees, distances are kilometers.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Mean Earth radius used for all distance calculations.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Width of one compass sector in degrees (360 / 16).
pub const SECTOR_DEGREES: f64 = 22.5;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
}

impl Coordinates {
    /// Creates a coordinate pair.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns true if both components are finite and within their ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Great-circle distance to `other` in kilometers.
    pub fn distance_km_to(&self, other: &Coordinates) -> f64 {
        distance_km(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }

    /// Initial bearing from `self` toward `other`.
    pub fn bearing_to(&self, other: &Coordinates) -> f64 {
        bearing_degrees(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

/// Haversine great-circle distance between two lat/lng points in kilometers.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let lat1_r = lat1.to_radians();
    let lat2_r = lat2.to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1_r.cos() * lat2_r.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 for near-antipodal points.
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();
    EARTH_RADIUS_KM * c
}

/// Initial (forward azimuth) bearing from point 1 to point 2, in `[0, 360)`.
pub fn bearing_degrees(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_r = lat1.to_radians();
    let lat2_r = lat2.to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let y = d_lon.sin() * lat2_r.cos();
    let x = lat1_r.cos() * lat2_r.sin() - lat1_r.sin() * lat2_r.cos() * d_lon.cos();

    normalize_degrees(y.atan2(x).to_degrees())
}

/// Wraps any angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid of a tiny negative value rounds up to exactly 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// The sixteen points of the compass rose, clockwise from north.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CompassDirection {
    /// 0°
    North,
    /// 22.5°
    NorthNortheast,
    /// 45°
    Northeast,
    /// 67.5°
    EastNortheast,
    /// 90°
    East,
    /// 112.5°
    EastSoutheast,
    /// 135°
    Southeast,
    /// 157.5°
    SouthSoutheast,
    /// 180°
    South,
    /// 202.5°
    SouthSouthwest,
    /// 225°
    Southwest,
    /// 247.5°
    WestSouthwest,
    /// 270°
    West,
    /// 292.5°
    WestNorthwest,
    /// 315°
    Northwest,
    /// 337.5°
    NorthNorthwest,
}

impl CompassDirection {
    const ROSE: [CompassDirection; 16] = [
        Self::North,
        Self::NorthNortheast,
        Self::Northeast,
        Self::EastNortheast,
        Self::East,
        Self::EastSoutheast,
        Self::Southeast,
        Self::SouthSoutheast,
        Self::South,
        Self::SouthSouthwest,
        Self::Southwest,
        Self::WestSouthwest,
        Self::West,
        Self::WestNorthwest,
        Self::Northwest,
        Self::NorthNorthwest,
    ];

    /// Index on the rose, 0 for north up to 15 for north-northwest.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Bearing at the center of this direction's sector.
    pub fn center_degrees(self) -> f64 {
        self.index() as f64 * SECTOR_DEGREES
    }

    /// Looks up the direction by rose index, wrapping past 15.
    pub fn from_index(index: usize) -> Self {
        Self::ROSE[index % 16]
    }
}

/// Maps a bearing onto the 16-point rose, sectors centered on each point.
pub fn compass_direction(bearing: f64) -> CompassDirection {
    let sector = (normalize_degrees(bearing) / SECTOR_DEGREES).round() as usize;
    CompassDirection::from_index(sector)
}
