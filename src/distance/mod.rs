//! Great-circle distances between geographic points.
//!
//! Provides the haversine distance on a spherical Earth and a dense
//! id-keyed distance matrix computed from a problem instance.

mod geo;
mod matrix;

pub use geo::{haversine_km, GeoPoint, EARTH_RADIUS_KM};
pub use matrix::DistanceMatrix;
