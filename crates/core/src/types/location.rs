//! Delivery location state and geolocation failure classification.
//!
//! The device positioning capability itself lives in the browser; this
//! module models the state it produces. Capture is requested with high
//! accuracy, a 15 second timeout, and no cached fix accepted.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Timeout passed to the positioning request, in milliseconds.
pub const CAPTURE_TIMEOUT_MS: u32 = 15_000;

/// State of the one-shot delivery location capture.
///
/// Exactly three states are representable: not yet requested, capture in
/// flight, and fully resolved coordinates. A partially populated location
/// cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LocationState {
    /// No capture has been requested.
    #[default]
    Unset,
    /// A capture request is in flight.
    Pending,
    /// Coordinates have been captured.
    Resolved {
        /// Latitude in decimal degrees.
        lat: f64,
        /// Longitude in decimal degrees.
        lng: f64,
    },
}

impl LocationState {
    /// Whether coordinates have been captured.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }

    /// Map link for the captured coordinates, if resolved.
    #[must_use]
    pub fn maps_url(&self) -> Option<String> {
        match self {
            Self::Resolved { lat, lng } => {
                Some(format!("https://maps.google.com/?q={lat},{lng}"))
            }
            Self::Unset | Self::Pending => None,
        }
    }
}

/// Classified failure from the device positioning capability.
///
/// Codes 1-3 match the browser geolocation error codes; anything else
/// (including a browser without the capability) maps to `Unsupported`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    /// The user denied the positioning permission prompt.
    #[error("Could not get location. Permission denied.")]
    PermissionDenied,
    /// The device could not produce a fix.
    #[error("Could not get location. Position unavailable.")]
    PositionUnavailable,
    /// No fix within the capture timeout.
    #[error("Could not get location. Request timed out.")]
    Timeout,
    /// The browser does not expose the positioning capability.
    #[error("Geolocation is not supported by your browser.")]
    Unsupported,
}

impl GeolocationError {
    /// Classify a reported geolocation error code.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            1 => Self::PermissionDenied,
            2 => Self::PositionUnavailable,
            3 => Self::Timeout,
            _ => Self::Unsupported,
        }
    }
}

impl fmt::Display for LocationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => write!(f, "Share your location for delivery."),
            Self::Pending => write!(f, "Getting your location..."),
            Self::Resolved { .. } => write!(f, "Location ready!"),
        }
    }
}
