//! Route sequence types.
//!
//! A route is an ordered list of [`RouteStation`]s where the list index is the
//! visiting order. The same physical stop may appear more than once (loops,
//! out-and-back workings), so positions are always expressed as indices, never
//! as stop identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::StopId;
use crate::geo::GeoPoint;

/// Provider-assigned route identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(String);

impl RouteId {
    pub fn new(id: impl Into<String>) -> Self {
        RouteId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RouteId {
    fn from(value: &str) -> Self {
        RouteId(value.to_string())
    }
}

/// Explicit travel direction published by some providers for each station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TravelDirection {
    /// Outbound from the start terminal ("상행").
    Up,
    /// Returning toward the start terminal ("하행").
    Down,
}

impl TravelDirection {
    /// Parse a provider direction code.
    ///
    /// The code is split into words at anything that is not a letter or
    /// digit, and the first recognised word decides: `1`, `u`, `up` or `상행`
    /// for up, `2`, `d`, `down` or `하행` for down, in any case. A word that
    /// merely contains one of these ("pickup") does not count.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_direction::domain::TravelDirection;
    ///
    /// assert_eq!(TravelDirection::parse_code("1"), Some(TravelDirection::Up));
    /// assert_eq!(TravelDirection::parse_code(" Down "), Some(TravelDirection::Down));
    /// assert_eq!(TravelDirection::parse_code("하행 방향"), Some(TravelDirection::Down));
    /// assert_eq!(TravelDirection::parse_code("pickup"), None);
    /// ```
    pub fn parse_code(code: &str) -> Option<Self> {
        code.split(|c: char| !c.is_alphanumeric())
            .find_map(|word| match word.to_lowercase().as_str() {
                "1" | "u" | "up" | "상행" => Some(TravelDirection::Up),
                "2" | "d" | "down" | "하행" => Some(TravelDirection::Down),
                _ => None,
            })
    }
}

/// One entry in a route's visiting sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStation {
    /// Identifier of the stop served at this position.
    pub stop_id: StopId,
    /// Display name of the stop.
    pub name: String,
    /// Stop coordinates, when the provider includes them.
    pub location: Option<GeoPoint>,
    /// Explicit direction, when the provider includes one. Raw provider
    /// codes go through [`TravelDirection::parse_code`]; see
    /// [`RouteStation::with_direction_code`].
    pub direction: Option<TravelDirection>,
}

impl RouteStation {
    /// Creates a station entry with only an identifier and name.
    pub fn new(stop_id: impl Into<StopId>, name: impl Into<String>) -> Self {
        Self {
            stop_id: stop_id.into(),
            name: name.into(),
            location: None,
            direction: None,
        }
    }

    /// Returns this station with coordinates attached.
    pub fn at(mut self, lat: f64, lon: f64) -> Self {
        self.location = Some(GeoPoint::new(lat, lon));
        self
    }

    /// Returns this station with the direction parsed from a raw provider
    /// code. An unrecognised code leaves the direction unknown.
    pub fn with_direction_code(mut self, code: &str) -> Self {
        self.direction = TravelDirection::parse_code(code);
        self
    }

    /// Returns this station with a direction code attached.
    pub fn heading(mut self, direction: TravelDirection) -> Self {
        self.direction = Some(direction);
        self
    }
}
