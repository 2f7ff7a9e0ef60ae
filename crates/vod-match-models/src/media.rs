use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    /// Path segment used by the metadata service and in cache keys
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" | "film" => Ok(MediaType::Movie),
            "tv" | "series" | "show" => Ok(MediaType::Tv),
            other => Err(format!("Invalid media type: {}. Use 'movie' or 'tv'", other)),
        }
    }
}

/// Caller-supplied description of the item to locate in a catalog
///
/// `tmdb_id` lives in the metadata-service id space, `imdb_id` in the
/// industry id space. For movies `season` is carried as 1 and ignored by the
/// matching rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanonicalQuery {
    pub series_name: String,
    pub tmdb_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    pub media_type: MediaType,
    #[serde(default = "default_season")]
    pub season: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<u32>,
}

fn default_season() -> u32 {
    1
}

impl CanonicalQuery {
    pub fn movie(series_name: impl Into<String>, tmdb_id: impl Into<String>) -> Self {
        Self {
            series_name: series_name.into(),
            tmdb_id: tmdb_id.into(),
            imdb_id: None,
            media_type: MediaType::Movie,
            season: 1,
            episode: None,
        }
    }

    pub fn tv(series_name: impl Into<String>, tmdb_id: impl Into<String>, season: u32) -> Self {
        Self {
            series_name: series_name.into(),
            tmdb_id: tmdb_id.into(),
            imdb_id: None,
            media_type: MediaType::Tv,
            season: season.max(1),
            episode: None,
        }
    }

    pub fn with_imdb_id(mut self, imdb_id: impl Into<String>) -> Self {
        let imdb_id = imdb_id.into();
        self.imdb_id = if imdb_id.trim().is_empty() { None } else { Some(imdb_id) };
        self
    }

    pub fn with_episode(mut self, episode: u32) -> Self {
        self.episode = Some(episode);
        self
    }

    /// Supplied industry id, ignoring blank values
    pub fn imdb_id(&self) -> Option<&str> {
        self.imdb_id.as_deref().filter(|id| !id.trim().is_empty())
    }

    pub fn is_tv(&self) -> bool {
        self.media_type == MediaType::Tv
    }
}
