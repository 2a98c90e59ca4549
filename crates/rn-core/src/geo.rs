//! Geographic coordinate type and spatial utilities.
//!
//! `Coordinate` stores WGS-84 degrees as `(lon, lat)` in double precision —
//! the order the storage layer and WKT use.  All distances are great-circle
//! (haversine) metres on a spherical Earth.
//!
//! Two helpers support spatial indexing without giving up great-circle
//! semantics:
//!
//! - [`Coordinate::to_cartesian`] maps onto an Earth-centred sphere, where
//!   straight-line (chord) distance grows monotonically with great-circle
//!   distance, so an R-tree nearest-neighbour search over chords finds the
//!   great-circle nearest point.
//! - [`GridKey`] quantizes a coordinate to a 1e-7° grid (≈ 1 cm) so it can be
//!   hashed; exact float equality is never used as a map key.

use std::fmt;
use std::str::FromStr;

use crate::{RnError, RnResult};

/// Mean Earth radius in metres (the value the storage layer's distance
/// functions use).
pub const EARTH_RADIUS_M: f64 = 6_371_009.0;

/// A WGS-84 geographic coordinate, longitude first.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// `false` if either component is NaN or infinite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: Coordinate) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Earth-centred Cartesian position in metres on the reference sphere.
    pub fn to_cartesian(self) -> [f64; 3] {
        let lat = self.lat.to_radians();
        let lon = self.lon.to_radians();
        [
            EARTH_RADIUS_M * lat.cos() * lon.cos(),
            EARTH_RADIUS_M * lat.cos() * lon.sin(),
            EARTH_RADIUS_M * lat.sin(),
        ]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.7}, {:.7})", self.lon, self.lat)
    }
}

impl FromStr for Coordinate {
    type Err = RnError;

    /// Parse `"lon,lat"` or `"lon lat"`.
    fn from_str(s: &str) -> RnResult<Self> {
        let parts: Vec<&str> = s
            .split(|ch: char| ch == ',' || ch.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        let &[lon, lat] = parts.as_slice() else {
            return Err(RnError::Parse(format!("expected \"lon,lat\", got {s:?}")));
        };
        let number = |p: &str| {
            p.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| RnError::Parse(format!("invalid coordinate component {p:?} in {s:?}")))
        };
        Ok(Coordinate::new(number(lon)?, number(lat)?))
    }
}

/// Chord length (metres) between two points `distance_m` apart along the
/// great circle.  Inverse of the arc length on the reference sphere.
#[inline]
pub fn chord_for_distance(distance_m: f64) -> f64 {
    let half_angle = (distance_m / (2.0 * EARTH_RADIUS_M)).min(std::f64::consts::FRAC_PI_2);
    2.0 * EARTH_RADIUS_M * half_angle.sin()
}

// ── GridKey ───────────────────────────────────────────────────────────────────

/// Fixed-precision hashable key for a coordinate.
///
/// Both components are rounded to the nearest 1e-7 degree.  Use only for
/// exact-position lookups; proximity decisions always go through
/// [`Coordinate::distance_m`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct GridKey {
    lon: i64,
    lat: i64,
}

impl GridKey {
    /// Grid cells per degree.
    pub const SCALE: f64 = 1e7;

    pub fn new(pos: Coordinate) -> Self {
        Self {
            lon: (pos.lon * Self::SCALE).round() as i64,
            lat: (pos.lat * Self::SCALE).round() as i64,
        }
    }

    /// Centre of the grid cell.
    pub fn center(self) -> Coordinate {
        Coordinate::new(self.lon as f64 / Self::SCALE, self.lat as f64 / Self::SCALE)
    }
}

impl From<Coordinate> for GridKey {
    fn from(pos: Coordinate) -> Self {
        GridKey::new(pos)
    }
}
