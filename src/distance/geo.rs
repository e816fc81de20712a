//! Geographic points and haversine distance.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by [`haversine_km`], in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in degrees.
///
/// # Examples
///
/// ```
/// use u_depot_routing::distance::GeoPoint;
///
/// let p = GeoPoint::new(40.45, -3.70);
/// assert_eq!(p.lat(), 40.45);
/// assert!(p.is_valid());
/// assert!(!GeoPoint::new(91.0, 0.0).is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    /// Creates a point from latitude and longitude in degrees.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Returns `true` if both coordinates are finite and within range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Haversine distance to another point, in kilometers.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        haversine_km(*self, *other)
    }
}

/// Great-circle distance between two points, in kilometers.
///
/// The `asin` argument is clamped to `[-1, 1]` so that floating drift near
/// antipodal points never yields NaN.
///
/// # Examples
///
/// ```
/// use u_depot_routing::distance::{haversine_km, GeoPoint};
///
/// let madrid = GeoPoint::new(40.4168, -3.7038);
/// assert_eq!(haversine_km(madrid, madrid), 0.0);
///
/// let north = GeoPoint::new(40.45, -3.70);
/// let d = haversine_km(madrid, north);
/// assert!((d - haversine_km(north, madrid)).abs() < 1e-12);
/// assert!(d > 3.0 && d < 4.0);
/// ```
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.lon - a.lon).to_radians();

    let s1 = (dlat / 2.0).sin();
    let s2 = (dlon / 2.0).sin();
    let h = s1 * s1 + lat1.cos() * lat2.cos() * s2 * s2;

    2.0 * EARTH_RADIUS_KM * h.sqrt().clamp(-1.0, 1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_identical_points() {
        let p = GeoPoint::new(-33.45, -70.66);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let a = GeoPoint::new(40.45, -3.70);
        let b = GeoPoint::new(40.43, -3.71);
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-12);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(1.0, 0.0);
        let expected = EARTH_RADIUS_KM * PI / 180.0;
        assert!((haversine_km(a, b) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_antipodal_is_half_circumference() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 180.0);
        let d = haversine_km(a, b);
        assert!(!d.is_nan());
        assert!((d - EARTH_RADIUS_KM * PI).abs() < 1e-6);

        let pole = haversine_km(GeoPoint::new(90.0, 0.0), GeoPoint::new(-90.0, 0.0));
        assert!((pole - EARTH_RADIUS_KM * PI).abs() < 1e-6);
    }

    #[test]
    fn test_validity() {
        assert!(GeoPoint::new(-90.0, 180.0).is_valid());
        assert!(!GeoPoint::new(0.0, 180.5).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_distance_to_matches_free_function() {
        let a = GeoPoint::new(40.4168, -3.7038);
        let b = GeoPoint::new(40.4285, -3.6950);
        assert_eq!(a.distance_to(&b), haversine_km(a, b));
    }
}
