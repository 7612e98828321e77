use serde::{Deserialize, Serialize};

use super::ordered::OrderedMap;

/// Global track metadata. Only `noPoints` matters here; other fields in
/// `tracks.json` (names, flags, images) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Track {
    /// Exhibition or cancelled event that does not count toward standings
    #[serde(rename = "noPoints", default)]
    pub no_points: bool,
}

impl Track {
    pub fn scoring() -> Self {
        Self { no_points: false }
    }

    pub fn exhibition() -> Self {
        Self { no_points: true }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FastestLap {
    #[serde(rename = "racerId")]
    pub racer_id: String,
}

/// One race's classification.
///
/// `results` is keyed by driver in finishing order; the key's position is the
/// driver's 0-indexed finishing position. Entry values (lap times, gaps) are
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RaceResult {
    pub results: OrderedMap<serde_json::Value>,
    #[serde(rename = "fastestLap", default)]
    pub fastest_lap: Option<FastestLap>,
}

impl RaceResult {
    /// Build a classification from drivers listed in finishing order.
    pub fn from_order(order: &[&str], fastest_lap: Option<&str>) -> Self {
        Self {
            results: order
                .iter()
                .map(|driver| (driver.to_string(), serde_json::Value::Null))
                .collect(),
            fastest_lap: fastest_lap.map(|id| FastestLap {
                racer_id: id.to_string(),
            }),
        }
    }

    /// Drivers with their 0-indexed finishing position.
    pub fn finishing_order(&self) -> impl Iterator<Item = (usize, &str)> {
        self.results.keys().enumerate()
    }

    pub fn fastest_lap_driver(&self) -> Option<&str> {
        self.fastest_lap.as_ref().map(|lap| lap.racer_id.as_str())
    }
}

/// A driver's entry in `seasonRacers/<season>.json`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SeasonRacer {
    /// Constructor the driver raced for that season
    pub car: String,
}

/// Points awarded by finishing position, 0-indexed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PointsScheme(pub Vec<u32>);

impl PointsScheme {
    /// Points for a finishing position; positions past the table score zero.
    pub fn points_for(&self, position: usize) -> u32 {
        self.0.get(position).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u32>> for PointsScheme {
    fn from(points: Vec<u32>) -> Self {
        Self(points)
    }
}

/// Race id -> classification, in season order. `None` means the race did not run.
pub type SeasonResults = OrderedMap<Option<RaceResult>>;

/// Driver id -> season assignment.
pub type SeasonRacers = OrderedMap<SeasonRacer>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_for_past_table_is_zero() {
        let scheme = PointsScheme::from(vec![10, 9, 8]);
        assert_eq!(scheme.points_for(0), 10);
        assert_eq!(scheme.points_for(2), 8);
        assert_eq!(scheme.points_for(3), 0);
        assert_eq!(scheme.points_for(99), 0);
    }

    #[test]
    fn test_parse_race_result_keeps_finishing_order() {
        let json = r#"{
            "results": { "max": "1:31.2", "lando": "+2.1", "oscar": "+4.0" },
            "fastestLap": { "racerId": "lando", "time": "1:29.8" }
        }"#;
        let result: RaceResult = serde_json::from_str(json).unwrap();
        let order: Vec<(usize, &str)> = result.finishing_order().collect();
        assert_eq!(order, vec![(0, "max"), (1, "lando"), (2, "oscar")]);
        assert_eq!(result.fastest_lap_driver(), Some("lando"));
    }

    #[test]
    fn test_parse_race_result_without_fastest_lap() {
        let result: RaceResult = serde_json::from_str(r#"{ "results": { "max": 1 } }"#).unwrap();
        assert!(result.fastest_lap_driver().is_none());
    }

    #[test]
    fn test_track_ignores_extra_fields() {
        let track: Track =
            serde_json::from_str(r#"{ "name": "Monza", "noPoints": true, "laps": 53 }"#).unwrap();
        assert!(track.no_points);

        let track: Track = serde_json::from_str(r#"{ "name": "Spa" }"#).unwrap();
        assert!(!track.no_points);
    }

    #[test]
    fn test_season_results_null_race() {
        let json = r#"{
            "bahrain": { "results": { "a": 0 }, "fastestLap": { "racerId": "a" } },
            "imola": null
        }"#;
        let season: SeasonResults = serde_json::from_str(json).unwrap();
        let races: Vec<&str> = season.keys().collect();
        assert_eq!(races, vec!["bahrain", "imola"]);
        assert!(season.get("imola").unwrap().is_none());
    }
}
