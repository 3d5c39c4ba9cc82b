//! Geographic primitives: normalized coordinates, bounding boxes and
//! great-circle helpers.
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::constants::{COORDINATE_EPSILON_DEG, EARTH_RADIUS_KM};

/// Raised when a coordinate cannot be represented on the globe.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
#[error("coordinate ({lat}, {lng}) is not a finite position")]
pub struct InvalidCoordinate {
    pub lat: f64,
    pub lng: f64,
}

/// A point on the globe, always normalized to `lat ∈ [-90, 90]` and
/// `lng ∈ [-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate", into = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawCoordinate {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = InvalidCoordinate;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::try_new(raw.lat, raw.lng)
    }
}

impl From<Coordinate> for RawCoordinate {
    fn from(value: Coordinate) -> Self {
        Self {
            lat: value.lat,
            lng: value.lng,
        }
    }
}

impl Coordinate {
    /// Build a coordinate, clamping latitude and wrapping longitude.
    ///
    /// Non-finite components collapse to zero; use [`Coordinate::try_new`]
    /// when the input comes from outside the engine.
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        let lat = if lat.is_finite() { lat } else { 0.0 };
        let lng = if lng.is_finite() { lng } else { 0.0 };
        Self {
            lat: lat.clamp(-90.0, 90.0),
            lng: wrap_longitude(lng),
        }
    }

    /// Build a coordinate from untrusted input.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCoordinate`] when either component is NaN or infinite.
    pub fn try_new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinate> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(InvalidCoordinate { lat, lng });
        }
        Ok(Self::new(lat, lng))
    }

    #[must_use]
    pub const fn lat(self) -> f64 {
        self.lat
    }

    #[must_use]
    pub const fn lng(self) -> f64 {
        self.lng
    }

    /// Whether two coordinates denote the same position.
    #[must_use]
    pub fn approx_eq(self, other: Self) -> bool {
        (self.lat - other.lat).abs() < COORDINATE_EPSILON_DEG
            && (longitude_delta(self.lng, other.lng)).abs() < COORDINATE_EPSILON_DEG
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lng)
    }
}

fn wrap_longitude(lng: f64) -> f64 {
    if (-180.0..=180.0).contains(&lng) {
        return lng;
    }
    (lng + 180.0).rem_euclid(360.0) - 180.0
}

/// Signed shortest longitude difference `to - from` in degrees.
#[must_use]
pub fn longitude_delta(from: f64, to: f64) -> f64 {
    let mut delta = to - from;
    if delta > 180.0 {
        delta -= 360.0;
    } else if delta < -180.0 {
        delta += 360.0;
    }
    delta
}

/// Axis-aligned latitude/longitude box. Boxes never straddle the antimeridian;
/// such regions are split into two boxes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBox {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

impl GeoBox {
    #[must_use]
    pub const fn new(south: f64, north: f64, west: f64, east: f64) -> Self {
        Self {
            south,
            north,
            west,
            east,
        }
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        (self.south..=self.north).contains(&point.lat())
            && (self.west..=self.east).contains(&point.lng())
    }

    #[must_use]
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            f64::midpoint(self.south, self.north),
            f64::midpoint(self.west, self.east),
        )
    }
}

/// Great-circle distance in kilometres (haversine).
#[must_use]
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let dlat = (b.lat() - a.lat()).to_radians();
    let dlng = longitude_delta(a.lng(), b.lng()).to_radians();
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Sum of consecutive great-circle distances along a path.
#[must_use]
pub fn path_length_km(points: &[Coordinate]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_km(pair[0], pair[1]))
        .sum()
}

/// Linear interpolation in latitude/longitude space, taking the short way
/// across the antimeridian.
#[must_use]
pub fn lerp(a: Coordinate, b: Coordinate, fraction: f64) -> Coordinate {
    let t = fraction.clamp(0.0, 1.0);
    let lat = a.lat() + (b.lat() - a.lat()) * t;
    let lng = a.lng() + longitude_delta(a.lng(), b.lng()) * t;
    Coordinate::new(lat, lng)
}

/// Point at `fraction` along the great circle from `a` to `b`.
///
/// Degenerates to [`lerp`] for coincident or antipodal endpoints.
#[must_use]
pub fn great_circle_point(a: Coordinate, b: Coordinate, fraction: f64) -> Coordinate {
    let t = fraction.clamp(0.0, 1.0);
    let angular = haversine_km(a, b) / EARTH_RADIUS_KM;
    let sin_angular = angular.sin();
    if sin_angular.abs() < 1e-9 {
        return lerp(a, b, t);
    }
    let (lat1, lng1) = (a.lat().to_radians(), a.lng().to_radians());
    let (lat2, lng2) = (b.lat().to_radians(), b.lng().to_radians());
    let wa = ((1.0 - t) * angular).sin() / sin_angular;
    let wb = (t * angular).sin() / sin_angular;
    let x = wa * lat1.cos() * lng1.cos() + wb * lat2.cos() * lng2.cos();
    let y = wa * lat1.cos() * lng1.sin() + wb * lat2.cos() * lng2.sin();
    let z = wa * lat1.sin() + wb * lat2.sin();
    let lat = z.atan2(x.hypot(y));
    let lng = y.atan2(x);
    Coordinate::new(lat.to_degrees(), lng.to_degrees())
}

/// Shift `point` sideways (perpendicular to the `from → to` heading) by
/// `offset_deg`. Positive offsets go to the left of the heading.
#[must_use]
pub fn lateral_shift(
    point: Coordinate,
    from: Coordinate,
    to: Coordinate,
    offset_deg: f64,
) -> Coordinate {
    let scale = point.lat().to_radians().cos().max(0.01);
    let dy = to.lat() - from.lat();
    let dx = longitude_delta(from.lng(), to.lng()) * scale;
    let norm = dx.hypot(dy);
    if norm < COORDINATE_EPSILON_DEG {
        return point;
    }
    let (px, py) = (-dy / norm, dx / norm);
    Coordinate::new(
        point.lat() + py * offset_deg,
        point.lng() + px * offset_deg / scale,
    )
}
