//! Great-circle distance and coordinate validation.
//!
//! Every distance-based decision in the engine (nearby events, claim
//! geofence) goes through [`distance_meters`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Haversine distance to `other` in meters.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        distance_meters(self.lat, self.lng, other.lat, other.lng)
    }
}

/// Great-circle distance between two points in meters (haversine formula).
///
/// Inputs are not range-checked; callers validate with [`validate_coordinates`].
pub fn distance_meters(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lng2 - lng1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Reject non-finite or out-of-range coordinates.
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<GeoPoint, CoreError> {
    if !lat.is_finite() || !lng.is_finite() {
        return Err(CoreError::Validation(
            "lat and lng must be finite numbers".to_string(),
        ));
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(CoreError::Validation(format!(
            "lat must be between -90 and 90, got {lat}"
        )));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(CoreError::Validation(format!(
            "lng must be between -180 and 180, got {lng}"
        )));
    }
    Ok(GeoPoint::new(lat, lng))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATANIA: GeoPoint = GeoPoint {
        lat: 37.5079,
        lng: 15.0830,
    };

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(CATANIA.distance_to(&CATANIA), 0.0);
        assert_eq!(distance_meters(-33.86, 151.2, -33.86, 151.2), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let etna = GeoPoint::new(37.7510, 14.9934);
        let there = CATANIA.distance_to(&etna);
        let back = etna.distance_to(&CATANIA);
        assert!((there - back).abs() < 1e-6);
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let d = distance_meters(0.0, 0.0, 0.0, 1.0);
        let expected = 111_195.0;
        assert!(
            (d - expected).abs() / expected < 0.01,
            "expected ~{expected}m, got {d}m"
        );
    }

    #[test]
    fn short_distances_are_meter_accurate() {
        // 0.0001 degrees of latitude is ~11.12m anywhere on the sphere.
        let d = distance_meters(37.5, 15.0, 37.5001, 15.0);
        assert!((d - 11.119).abs() < 0.01, "got {d}");
    }

    #[test]
    fn validate_accepts_boundaries() {
        assert!(validate_coordinates(90.0, 180.0).is_ok());
        assert!(validate_coordinates(-90.0, -180.0).is_ok());
        assert!(validate_coordinates(0.0, 0.0).is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range() {
        assert!(validate_coordinates(90.01, 0.0).is_err());
        assert!(validate_coordinates(0.0, -180.5).is_err());
    }

    #[test]
    fn validate_rejects_nan() {
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
        assert!(validate_coordinates(0.0, f64::INFINITY).is_err());
    }
}
