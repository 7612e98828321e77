use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StandingsError {
    #[error("race '{race}' has no entry in tracks.json")]
    UnknownTrack { race: String },

    #[error("season {season}: no constructor assigned to driver '{driver}'")]
    UnknownConstructor { season: String, driver: String },

    #[error("season '{season}' is not configured")]
    UnknownSeason { season: String },

    #[error("failed to read fixture {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse fixture {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
