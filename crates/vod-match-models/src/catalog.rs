use serde::{Deserialize, Serialize};
use crate::MediaType;

/// One playable episode of a catalog listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Episode {
    /// Label as shown by the catalog (e.g. "第01集", "HD")
    pub title: String,
    pub url: String,
}

/// A catalog search hit after structural parsing
///
/// `douban_id` is the review-site id; catalogs frequently leave it blank.
/// `episodes` keeps the catalog's order, which is usually broadcast order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub genre: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub douban_id: Option<String>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

impl CatalogEntry {
    /// Review-site id, ignoring blank values
    pub fn douban_id(&self) -> Option<&str> {
        self.douban_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn episode_count(&self) -> usize {
        self.episodes.len()
    }
}

/// The entry chosen as the match for a query
pub type ResolvedResource = CatalogEntry;
