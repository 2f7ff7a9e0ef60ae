use serde::{Deserialize, Serialize};

/// Episode count of one season as reported by the metadata service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeasonSummary {
    pub season_number: u32,
    pub episode_count: u32,
}

/// The parts of a metadata-service detail document the matcher reads
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetadataDetails {
    /// Localized genre names
    #[serde(default)]
    pub genres: Vec<String>,
    /// Production country names (English)
    #[serde(default)]
    pub production_countries: Vec<String>,
    #[serde(default)]
    pub seasons: Vec<SeasonSummary>,
}

impl MetadataDetails {
    /// Episode count of a season, 0 when the season is unknown
    pub fn season_episode_count(&self, season_number: u32) -> u32 {
        self.seasons
            .iter()
            .find(|s| s.season_number == season_number)
            .map(|s| s.episode_count)
            .unwrap_or(0)
    }
}
