use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::helpers::api_error::ApiError;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, ApiError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ApiError::Validation(format!(
                "Latitude must be between -90 and 90, got {}",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ApiError::Validation(format!(
                "Longitude must be between -180 and 180, got {}",
                longitude
            )));
        }

        Ok(Self { latitude, longitude })
    }
}

/// A single nearby search, built from the client payload and thrown away
/// once the response has been sent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchRequest {
    pub coordinate: Coordinate,
    pub radius_meters: f64,
}

impl SearchRequest {
    /// Parses `{latitude, longitude, distance?}`. Values must be JSON numbers,
    /// strings holding numbers are rejected.
    pub fn from_payload(
        payload: &Value,
        default_radius_meters: f64,
    ) -> Result<Self, ApiError> {
        let latitude = payload.get("latitude").and_then(Value::as_f64);
        let longitude = payload.get("longitude").and_then(Value::as_f64);

        let (latitude, longitude) = match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => (latitude, longitude),
            _ => {
                return Err(ApiError::Validation(
                    "Invalid or missing latitude/longitude".to_string()
                ));
            }
        };

        let radius_meters = match payload.get("distance") {
            None | Some(Value::Null) => default_radius_meters,
            Some(distance) => distance
                .as_f64()
                .ok_or_else(|| ApiError::Validation("Distance must be a number".to_string()))?,
        };
        if !radius_meters.is_finite() || radius_meters <= 0.0 {
            return Err(ApiError::Validation(
                "Distance must be a positive number of meters".to_string()
            ));
        }

        Ok(Self {
            coordinate: Coordinate::new(latitude, longitude)?,
            radius_meters,
        })
    }
}
