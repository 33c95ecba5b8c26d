//! The coordinate estimate returned by the geolocation service.

use serde::Deserialize;
use serde::Serialize;

/// A single location estimate.
///
/// The field names match the JSON the backend produces, so a successful body
/// deserializes straight into this type.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
    /// Backend's self-reported certainty, in `[0, 1]`.
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidGeoLocation {
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
    #[error("confidence {0} is outside [0, 1]")]
    Confidence(f64),
}

impl GeoLocation {
    /// Checks ranges. NaN fails every range check.
    pub fn validate(self) -> Result<Self, InvalidGeoLocation> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(InvalidGeoLocation::Latitude(self.lat));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(InvalidGeoLocation::Longitude(self.lon));
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(InvalidGeoLocation::Confidence(self.confidence));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_body() {
        let loc: GeoLocation =
            serde_json::from_str(r#"{"lat": 48.8566, "lon": 2.3522, "confidence": 0.87}"#).unwrap();
        assert_eq!(loc.lat, 48.8566);
        assert_eq!(loc.lon, 2.3522);
        assert_eq!(loc.confidence, 0.87);
        assert!(loc.validate().is_ok());
    }

    #[test]
    fn missing_confidence_does_not_parse() {
        let parsed = serde_json::from_str::<GeoLocation>(r#"{"lat": 1.0, "lon": 2.0}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let base = GeoLocation { lat: 0.0, lon: 0.0, confidence: 0.5 };
        assert_eq!(
            GeoLocation { lat: 91.0, ..base }.validate(),
            Err(InvalidGeoLocation::Latitude(91.0))
        );
        assert_eq!(
            GeoLocation { lon: -180.5, ..base }.validate(),
            Err(InvalidGeoLocation::Longitude(-180.5))
        );
        assert_eq!(
            GeoLocation { confidence: 1.2, ..base }.validate(),
            Err(InvalidGeoLocation::Confidence(1.2))
        );
        assert!(GeoLocation { confidence: f64::NAN, ..base }.validate().is_err());
    }

    #[test]
    fn bounds_are_inclusive() {
        let edge = GeoLocation { lat: -90.0, lon: 180.0, confidence: 1.0 };
        assert_eq!(edge.validate(), Ok(edge));
    }
}
