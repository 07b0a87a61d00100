//! Station lookup within a route sequence.

use crate::domain::{RouteStation, Stop};
use crate::geo::haversine_distance;

/// Default radius of the proximity pass, in metres.
pub const PROXIMITY_RADIUS_M: f64 = 50.0;

/// How hard [`locate_station_with`] tries to place a stop on a route.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LocateStrategy {
    /// Identifier, then exact display name.
    #[default]
    Exact,
    /// The exact passes, then a normalised-name pass, then the first route
    /// station within `radius_m` of the stop's coordinates.
    Lenient { radius_m: f64 },
}

impl LocateStrategy {
    /// Lenient matching with the default proximity radius.
    pub fn lenient() -> Self {
        LocateStrategy::Lenient {
            radius_m: PROXIMITY_RADIUS_M,
        }
    }
}

/// Find the position of `stop` in a route's station sequence.
///
/// Identifier matches take priority over name matches: the whole sequence is
/// scanned by identifier first, and only if that fails is it scanned again by
/// display name. Within each pass the lowest index wins, so a stop served at
/// both ends of a loop resolves to its first visit.
///
/// Returns `None` when the stop is not on the route. That is an ordinary
/// outcome (registries and route lists drift apart), not an error.
///
/// # Examples
///
/// ```
/// use transit_direction::domain::{RouteStation, Stop};
/// use transit_direction::locate::locate_station;
///
/// let route = vec![
///     RouteStation::new("A", "Depot"),
///     RouteStation::new("B", "Market"),
///     RouteStation::new("A", "Depot"),
/// ];
///
/// assert_eq!(locate_station(&route, &Stop::new("A", "Depot")), Some(0));
/// assert_eq!(locate_station(&route, &Stop::new("X", "Market")), Some(1));
/// assert_eq!(locate_station(&route, &Stop::new("X", "Harbour")), None);
/// ```
pub fn locate_station(stations: &[RouteStation], stop: &Stop) -> Option<usize> {
    stations
        .iter()
        .position(|s| s.stop_id == stop.id)
        .or_else(|| stations.iter().position(|s| s.name == stop.name))
}

/// [`locate_station`] with a configurable number of fallback passes.
///
/// With [`LocateStrategy::Lenient`], a stop the exact passes miss is matched
/// by [`normalize_name`], and failing that by distance. A stop or station
/// without coordinates never matches by distance.
pub fn locate_station_with(
    stations: &[RouteStation],
    stop: &Stop,
    strategy: LocateStrategy,
) -> Option<usize> {
    let exact = locate_station(stations, stop);
    let LocateStrategy::Lenient { radius_m } = strategy else {
        return exact;
    };

    exact
        .or_else(|| {
            let target = normalize_name(&stop.name);
            if target.is_empty() {
                return None;
            }
            stations.iter().position(|s| normalize_name(&s.name) == target)
        })
        .or_else(|| {
            let here = stop.location?;
            stations.iter().position(|s| {
                s.location.is_some_and(|there| haversine_distance(here, there) <= radius_m)
            })
        })
}

/// Stop name with whitespace and `·`, `.`, `-` removed, lower-cased.
///
/// ```
/// use transit_direction::locate::normalize_name;
///
/// assert_eq!(normalize_name("시청·앞"), normalize_name("시청 앞"));
/// assert_eq!(normalize_name("St. Mary-Rd"), "stmaryrd");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '·' | '.' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route() -> Vec<RouteStation> {
        vec![
            RouteStation::new("S0", "가경터미널"),
            RouteStation::new("S1", "시청"),
            RouteStation::new("S2", "충북대"),
            RouteStation::new("S3", "시청"),
            RouteStation::new("S0", "가경터미널"),
        ]
    }

    #[test]
    fn matches_by_id() {
        assert_eq!(locate_station(&route(), &Stop::new("S2", "충북대")), Some(2));
    }

    #[test]
    fn id_beats_earlier_name_match() {
        // Name "시청" first appears at 1, but the id points at 3.
        assert_eq!(locate_station(&route(), &Stop::new("S3", "시청")), Some(3));
    }

    #[test]
    fn falls_back_to_name() {
        assert_eq!(locate_station(&route(), &Stop::new("UNKNOWN", "시청")), Some(1));
    }

    #[test]
    fn duplicate_stop_resolves_to_first_visit() {
        assert_eq!(locate_station(&route(), &Stop::new("S0", "가경터미널")), Some(0));
    }

    #[test]
    fn not_found() {
        assert_eq!(locate_station(&route(), &Stop::new("S9", "어딘가")), None);
        assert_eq!(locate_station(&[], &Stop::new("S0", "가경터미널")), None);
    }

    #[test]
    fn name_match_is_exact() {
        assert_eq!(locate_station(&route(), &Stop::new("S9", "시청 ")), None);
    }

    fn punctuated_route() -> Vec<RouteStation> {
        vec![
            RouteStation::new("S0", "가경").at(36.6000, 127.4),
            RouteStation::new("S1", "시청·앞").at(36.6100, 127.4),
            RouteStation::new("S2", "St. Mary-Rd").at(36.6200, 127.4),
        ]
    }

    #[test]
    fn exact_strategy_ignores_punctuation_variants() {
        let route = punctuated_route();
        let stop = Stop::new("X", "시청 앞");
        assert_eq!(locate_station_with(&route, &stop, LocateStrategy::Exact), None);
    }

    #[test]
    fn lenient_matches_normalised_name() {
        let route = punctuated_route();
        let lenient = LocateStrategy::lenient();
        assert_eq!(locate_station_with(&route, &Stop::new("X", "시청 앞"), lenient), Some(1));
        assert_eq!(locate_station_with(&route, &Stop::new("X", "st mary rd"), lenient), Some(2));
    }

    #[test]
    fn lenient_keeps_exact_passes_first() {
        // Normalised "시청앞" would match index 1, but the id points at 2.
        let route = punctuated_route();
        let stop = Stop::new("S2", "시청앞");
        assert_eq!(locate_station_with(&route, &stop, LocateStrategy::lenient()), Some(2));
    }

    #[test]
    fn lenient_matches_by_proximity() {
        let route = punctuated_route();
        let lenient = LocateStrategy::lenient();

        // ~44 m north of 시청·앞
        let near = Stop::new("X", "City Hall").at(36.6104, 127.4);
        assert_eq!(locate_station_with(&route, &near, lenient), Some(1));

        // ~67 m away: outside the default radius
        let far = Stop::new("X", "City Hall").at(36.6106, 127.4);
        assert_eq!(locate_station_with(&route, &far, lenient), None);

        let wide = LocateStrategy::Lenient { radius_m: 100.0 };
        assert_eq!(locate_station_with(&route, &far, wide), Some(1));
    }

    #[test]
    fn proximity_needs_coordinates() {
        let mut route = punctuated_route();
        route[1].location = None;
        let near = Stop::new("X", "City Hall").at(36.6104, 127.4);
        assert_eq!(locate_station_with(&route, &near, LocateStrategy::lenient()), None);

        let route = punctuated_route();
        let nan = Stop::new("X", "City Hall").at(f64::NAN, 127.4);
        assert_eq!(locate_station_with(&route, &nan, LocateStrategy::lenient()), None);
    }

    #[test]
    fn blank_names_never_match_after_normalising() {
        let route = vec![RouteStation::new("S0", "·"), RouteStation::new("S1", "가경")];
        let stop = Stop::new("X", " - ");
        assert_eq!(locate_station_with(&route, &stop, LocateStrategy::lenient()), None);
    }
}
