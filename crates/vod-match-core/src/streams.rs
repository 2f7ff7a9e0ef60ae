use vod_match_models::{CanonicalQuery, ResolvedResource, StreamItem};

pub const DEFAULT_EPISODE_NAME: &str = "正片";
pub const NO_DESCRIPTION: &str = "暂无简介";
pub const QUALITY_TAG: &str = "1080p|aac";
const SEPARATOR: &str = "-----";
const HD_MARKER: &str = "HD";

/// Playable items for a resolved resource
///
/// A series query with an episode number yields only that episode (nothing
/// when it is out of range); otherwise every episode is returned in
/// catalog order. Episodes without a URL are never returned.
pub fn streams_for(resource: &ResolvedResource, query: &CanonicalQuery) -> Vec<StreamItem> {
    let description = describe(resource);

    let episodes = match (query.is_tv(), query.episode) {
        (true, Some(episode)) => episode
            .checked_sub(1)
            .and_then(|index| resource.episodes.get(index as usize))
            .map(std::slice::from_ref)
            .unwrap_or_default(),
        _ => resource.episodes.as_slice(),
    };

    episodes
        .iter()
        .filter(|episode| !episode.url.is_empty())
        .map(|episode| StreamItem {
            name: display_name(&episode.title),
            description: description.clone(),
            url: episode.url.clone(),
        })
        .collect()
}

fn display_name(label: &str) -> String {
    let name = label.replace(HD_MARKER, "");
    let name = name.trim();
    if name.is_empty() {
        DEFAULT_EPISODE_NAME.to_string()
    } else {
        name.to_string()
    }
}

fn describe(resource: &ResolvedResource) -> String {
    let summary = if resource.description.is_empty() {
        NO_DESCRIPTION
    } else {
        resource.description.as_str()
    };
    [resource.title.as_str(), SEPARATOR, summary, SEPARATOR, QUALITY_TAG].join("\n")
}
