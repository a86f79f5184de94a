//! Validated coordinates and the "same place" comparison.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Per-axis tolerance (degrees) under which two points count as the same place.
pub const SAME_LOCATION_TOLERANCE_DEG: f64 = 0.0001;

/// Default camera center.
pub const INITIAL_CENTER: LatLng = LatLng::from_raw(-27.5969, -48.5495);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationError {
    NonFinite,
    LatitudeOutOfRange(f64),
    LongitudeOutOfRange(f64),
}

impl Display for LocationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFinite => write!(f, "coordinate must be finite"),
            Self::LatitudeOutOfRange(value) => write!(f, "latitude {value} out of range"),
            Self::LongitudeOutOfRange(value) => write!(f, "longitude {value} out of range"),
        }
    }
}

impl Error for LocationError {}

/// Geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    lat: f64,
    lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Result<Self, LocationError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(LocationError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(LocationError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(LocationError::LongitudeOutOfRange(lng));
        }
        Ok(Self { lat, lng })
    }

    /// Builds a point from trusted constants without validation.
    pub(crate) const fn from_raw(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub const fn lat(self) -> f64 {
        self.lat
    }

    pub const fn lng(self) -> f64 {
        self.lng
    }
}

/// Whether `a` and `b` are within the same-place tolerance on both axes.
pub fn is_same_location(a: LatLng, b: LatLng) -> bool {
    (a.lat - b.lat).abs() < SAME_LOCATION_TOLERANCE_DEG
        && (a.lng - b.lng).abs() < SAME_LOCATION_TOLERANCE_DEG
}
