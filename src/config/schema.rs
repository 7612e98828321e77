use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use crate::fixtures::PointsScheme;
use crate::standings::Rules;

/// Top-level generator configuration.
///
/// Example YAML:
/// ```yaml
/// data_dir: src/data
/// standard_driver_count: 2
/// fastest_lap_bonus: 1
/// points_schemes:
///   top_ten: [10, 9, 8, 7, 6, 5, 4, 3, 2, 1]
/// seasons:
///   - { id: s1, points_scheme: top_ten }
///   - { id: s2, points_scheme: top_ten, generate: true }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding tracks.json and the per-season fixture folders
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Team size constructor points are normalised to
    #[serde(default = "default_standard_driver_count")]
    pub standard_driver_count: u32,

    #[serde(default = "default_fastest_lap_bonus")]
    pub fastest_lap_bonus: u32,

    /// Named points tables, indexed by finishing position
    #[serde(default = "default_points_schemes")]
    pub points_schemes: BTreeMap<String, Vec<u32>>,

    /// Seasons in chronological order
    #[serde(default = "default_seasons")]
    pub seasons: Vec<SeasonConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SeasonConfig {
    pub id: String,

    /// Key into `points_schemes`
    pub points_scheme: String,

    /// Regenerate this season's standings artifacts on every run
    #[serde(default)]
    pub generate: bool,
}

impl SeasonConfig {
    fn new(id: &str, points_scheme: &str, generate: bool) -> Self {
        Self {
            id: id.to_string(),
            points_scheme: points_scheme.to_string(),
            generate,
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("src/data")
}

fn default_standard_driver_count() -> u32 {
    2
}

fn default_fastest_lap_bonus() -> u32 {
    1
}

fn default_points_schemes() -> BTreeMap<String, Vec<u32>> {
    let mut schemes = BTreeMap::new();
    schemes.insert("top_ten".to_string(), vec![10, 9, 8, 7, 6, 5, 4, 3, 2, 1]);
    schemes.insert(
        "top_twenty".to_string(),
        vec![35, 29, 24, 21, 19, 17, 15, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1],
    );
    schemes
}

fn default_seasons() -> Vec<SeasonConfig> {
    vec![
        SeasonConfig::new("s1", "top_ten", false),
        SeasonConfig::new("s2", "top_ten", false),
        SeasonConfig::new("s3", "top_ten", false),
        SeasonConfig::new("s4", "top_twenty", true),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            standard_driver_count: default_standard_driver_count(),
            fastest_lap_bonus: default_fastest_lap_bonus(),
            points_schemes: default_points_schemes(),
            seasons: default_seasons(),
        }
    }
}

impl Config {
    pub fn rules(&self) -> Rules {
        Rules {
            fastest_lap_bonus: self.fastest_lap_bonus,
            standard_driver_count: self.standard_driver_count,
        }
    }

    pub fn season(&self, id: &str) -> Option<&SeasonConfig> {
        self.seasons.iter().find(|s| s.id == id)
    }

    /// Seasons whose artifacts are regenerated, in configured order.
    pub fn generated_seasons(&self) -> impl Iterator<Item = &SeasonConfig> {
        self.seasons.iter().filter(|s| s.generate)
    }

    /// Season id -> resolved points table. Seasons naming an unknown scheme are skipped.
    pub fn season_schemes(&self) -> HashMap<String, PointsScheme> {
        self.seasons
            .iter()
            .filter_map(|season| {
                self.points_schemes
                    .get(&season.points_scheme)
                    .map(|points| (season.id.clone(), PointsScheme::from(points.clone())))
            })
            .collect()
    }
}
