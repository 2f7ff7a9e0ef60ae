use serde::{Deserialize, Serialize};
use vod_match_models::{MetadataDetails, SeasonSummary};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbNamed {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbSeason {
    pub season_number: u32,
    #[serde(default)]
    pub episode_count: u32,
}

/// Movie and TV detail documents share the fields we read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbDetails {
    #[serde(default)]
    pub genres: Vec<TmdbNamed>,
    #[serde(default)]
    pub production_countries: Vec<TmdbNamed>,
    #[serde(default)]
    pub seasons: Vec<TmdbSeason>,
}

impl From<TmdbDetails> for MetadataDetails {
    fn from(details: TmdbDetails) -> Self {
        MetadataDetails {
            genres: details.genres.into_iter().map(|g| g.name).collect(),
            production_countries: details.production_countries.into_iter().map(|c| c.name).collect(),
            seasons: details
                .seasons
                .into_iter()
                .map(|s| SeasonSummary {
                    season_number: s.season_number,
                    episode_count: s.episode_count,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbExternalIds {
    #[serde(default)]
    pub imdb_id: Option<String>,
}

impl TmdbExternalIds {
    pub fn imdb_id(self) -> Option<String> {
        self.imdb_id.filter(|id| !id.trim().is_empty())
    }
}
