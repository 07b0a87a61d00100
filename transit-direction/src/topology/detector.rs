//! Turnback detection strategies.
//!
//! Providers rarely publish where a route reverses, so the default strategy
//! reads station names. Where direction codes are available the
//! [`DirectionCodeDetector`] reads them instead, and [`AnyOf`] combines the two.

use crate::domain::RouteStation;

/// Decides which interior stations of a route are turnback points.
pub trait TerminalDetector {
    /// Whether the station at `index` is a turnback point.
    ///
    /// Only called for interior indices (never the first or last station).
    fn is_turnback(&self, stations: &[RouteStation], index: usize) -> bool;

    /// Display name for a destination reached at a station called `name`.
    fn destination_name(&self, name: &str) -> String {
        name.to_string()
    }
}

impl<D: TerminalDetector + ?Sized> TerminalDetector for &D {
    fn is_turnback(&self, stations: &[RouteStation], index: usize) -> bool {
        (**self).is_turnback(stations, index)
    }

    fn destination_name(&self, name: &str) -> String {
        (**self).destination_name(name)
    }
}

/// Name-substring turnback detection.
///
/// A station is a turnback point when its name contains any of `keywords`.
/// Destination names have every one of `strip_markers` removed, so a station
/// named "시청종점" is presented as "시청". A name made up only of markers is
/// kept as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalKeywords {
    pub keywords: Vec<String>,
    pub strip_markers: Vec<String>,
}

impl TerminalKeywords {
    /// Detector for the given keywords, with no strip markers.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            strip_markers: Vec::new(),
        }
    }

    /// Replace the strip markers.
    pub fn with_strip_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.strip_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    /// Korean terminus, terminal, depot and public depot markers.
    ///
    /// Destinations drop the terminus, stop and depot suffixes
    /// ("가경차고지" is shown as "가경").
    pub fn korean() -> Self {
        Self::new(["종점", "터미널", "차고지", "공영차고"])
            .with_strip_markers(["종점", "정류장", "정류소", "차고지"])
    }

    /// English equivalents of [`TerminalKeywords::korean`].
    pub fn english() -> Self {
        Self::new(["Terminus", "Terminal", "Depot", "Public Depot"])
            .with_strip_markers(["Terminus"])
    }

    /// Whether `name` contains any of the keywords.
    pub fn matches(&self, name: &str) -> bool {
        self.keywords.iter().any(|k| name.contains(k.as_str()))
    }
}

impl Default for TerminalKeywords {
    fn default() -> Self {
        Self::korean()
    }
}

impl TerminalDetector for TerminalKeywords {
    fn is_turnback(&self, stations: &[RouteStation], index: usize) -> bool {
        stations
            .get(index)
            .is_some_and(|station| self.matches(&station.name))
    }

    fn destination_name(&self, name: &str) -> String {
        let stripped = self
            .strip_markers
            .iter()
            .fold(name.to_string(), |acc, marker| acc.replace(marker.as_str(), ""));
        let stripped = stripped.trim();
        if stripped.is_empty() {
            name.to_string()
        } else {
            stripped.to_string()
        }
    }
}

/// Turnback detection from explicit direction codes.
///
/// Station `i` is the turnback point when it and station `i + 1` both carry a
/// direction code and the codes differ. Stations without codes never match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionCodeDetector;

impl TerminalDetector for DirectionCodeDetector {
    fn is_turnback(&self, stations: &[RouteStation], index: usize) -> bool {
        let here = stations.get(index).and_then(|s| s.direction);
        let next = stations.get(index + 1).and_then(|s| s.direction);
        matches!((here, next), (Some(a), Some(b)) if a != b)
    }
}

/// Flags a station when either detector does.
///
/// Destination names come from the first detector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnyOf<A, B>(pub A, pub B);

impl<A: TerminalDetector, B: TerminalDetector> TerminalDetector for AnyOf<A, B> {
    fn is_turnback(&self, stations: &[RouteStation], index: usize) -> bool {
        self.0.is_turnback(stations, index) || self.1.is_turnback(stations, index)
    }

    fn destination_name(&self, name: &str) -> String {
        self.0.destination_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TravelDirection;

    fn stations(names: &[&str]) -> Vec<RouteStation> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| RouteStation::new(format!("S{i}"), *name))
            .collect()
    }

    #[test]
    fn korean_keywords_match() {
        let detector = TerminalKeywords::korean();
        let route = stations(&[
            "가",
            "시청종점",
            "고속버스터미널",
            "차고지앞",
            "공영차고지",
            "나",
        ]);
        for i in 1..=4 {
            assert!(detector.is_turnback(&route, i), "index {i}");
        }
        assert!(!detector.is_turnback(&route, 0));
        assert!(!detector.is_turnback(&route, 5));
    }

    #[test]
    fn out_of_range_index_never_matches() {
        let detector = TerminalKeywords::korean();
        let route = stations(&["종점"]);
        assert!(!detector.is_turnback(&route, 3));
    }

    #[test]
    fn english_keywords() {
        let detector = TerminalKeywords::english();
        let route = stations(&["Main St", "Harbour Terminus", "North Depot", "Elm"]);
        assert!(detector.is_turnback(&route, 1));
        assert!(detector.is_turnback(&route, 2));
        assert!(!detector.is_turnback(&route, 3));
        assert_eq!(detector.destination_name("Harbour Terminus"), "Harbour");
    }

    #[test]
    fn custom_keywords() {
        let detector = TerminalKeywords::new(["회차"]);
        let route = stations(&["가", "대학교회차지", "나"]);
        assert!(detector.is_turnback(&route, 1));
        assert_eq!(detector.destination_name("대학교회차지"), "대학교회차지");
    }

    #[test]
    fn strips_terminus_marker() {
        let detector = TerminalKeywords::default();
        assert_eq!(detector.destination_name("시청종점"), "시청");
        assert_eq!(detector.destination_name("가경 종점 "), "가경");
        // Terminal is kept as part of the name
        assert_eq!(detector.destination_name("고속버스터미널"), "고속버스터미널");
    }

    #[test]
    fn strips_stop_and_depot_suffixes() {
        let detector = TerminalKeywords::korean();
        assert_eq!(detector.destination_name("가경차고지"), "가경");
        assert_eq!(detector.destination_name("시청정류장"), "시청");
        assert_eq!(detector.destination_name("충북대 정류소"), "충북대");
        assert_eq!(detector.destination_name("가경차고지종점"), "가경");
        // Nothing left after stripping: keep the original
        assert_eq!(detector.destination_name("차고지"), "차고지");
    }

    #[test]
    fn direction_code_flip() {
        let route = vec![
            RouteStation::new("A", "A").heading(TravelDirection::Up),
            RouteStation::new("B", "B").heading(TravelDirection::Up),
            RouteStation::new("C", "C").heading(TravelDirection::Down),
            RouteStation::new("D", "D").heading(TravelDirection::Down),
        ];
        let detector = DirectionCodeDetector;
        assert!(!detector.is_turnback(&route, 0));
        assert!(detector.is_turnback(&route, 1));
        assert!(!detector.is_turnback(&route, 2));
        assert!(!detector.is_turnback(&route, 3));
    }

    #[test]
    fn direction_code_missing_never_matches() {
        let route = vec![
            RouteStation::new("A", "A").heading(TravelDirection::Up),
            RouteStation::new("B", "B"),
            RouteStation::new("C", "C").heading(TravelDirection::Down),
        ];
        let detector = DirectionCodeDetector;
        assert!(!detector.is_turnback(&route, 0));
        assert!(!detector.is_turnback(&route, 1));
    }

    #[test]
    fn any_of_combines() {
        let route = vec![
            RouteStation::new("A", "A").heading(TravelDirection::Up),
            RouteStation::new("B", "B").heading(TravelDirection::Up),
            RouteStation::new("C", "C").heading(TravelDirection::Down),
            RouteStation::new("D", "버스터미널").heading(TravelDirection::Down),
            RouteStation::new("E", "E").heading(TravelDirection::Down),
        ];
        let detector = AnyOf(TerminalKeywords::korean(), DirectionCodeDetector);
        assert!(detector.is_turnback(&route, 1));
        assert!(!detector.is_turnback(&route, 2));
        assert!(detector.is_turnback(&route, 3));
        assert_eq!(detector.destination_name("시청종점"), "시청");
    }

    #[test]
    fn works_through_reference() {
        fn flags<D: TerminalDetector>(detector: D, route: &[RouteStation]) -> bool {
            detector.is_turnback(route, 1)
        }

        let detector = TerminalKeywords::korean();
        let route = stations(&["가", "종점", "나"]);
        let as_dyn: &dyn TerminalDetector = &detector;
        assert!(flags(&detector, &route));
        assert!(flags(as_dyn, &route));
    }
}
