// Structural parsing of raw catalog hits and candidate partitioning

use regex::Regex;
use std::sync::LazyLock;
use vod_match_models::{CatalogEntry, Episode, MediaType};
use vod_match_sources::RawCatalogItem;
use crate::title::{compact_title, TitleNormalizer};

/// A play list containing this marker is a series
pub const EPISODE_MARKER: &str = "集";

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?/?>").expect("valid regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Turn a raw hit into a [`CatalogEntry`]
pub fn classify(raw: &RawCatalogItem) -> CatalogEntry {
    let media_type = if raw.vod_play_url.contains(EPISODE_MARKER) {
        MediaType::Tv
    } else {
        MediaType::Movie
    };
    let description = HTML_TAG.replace_all(&raw.vod_content, "");
    let description = WHITESPACE.replace_all(&description, "").into_owned();

    CatalogEntry {
        title: raw.vod_name.clone(),
        subtitle: raw.vod_sub.clone(),
        description,
        genre: raw.vod_class.clone(),
        media_type,
        douban_id: raw.vod_douban_id.clone(),
        episodes: parse_episodes(&raw.vod_play_url),
    }
}

/// Parse `label$url#label$url...`
///
/// Blank segments are dropped. A segment without a URL stays in place with
/// an empty `url` so later episodes keep their numbering.
pub fn parse_episodes(play_url: &str) -> Vec<Episode> {
    play_url
        .split('#')
        .filter(|segment| !segment.trim().is_empty())
        .map(|segment| {
            let (label, url) = segment.split_once('$').unwrap_or((segment, ""));
            Episode {
                title: label.trim().to_string(),
                url: url.trim().to_string(),
            }
        })
        .collect()
}

/// Excluded when any configured genre appears in the entry's genre text
pub fn is_excluded_genre(entry: &CatalogEntry, excluded_genres: &[String]) -> bool {
    excluded_genres
        .iter()
        .any(|genre| !genre.is_empty() && entry.genre.contains(genre.as_str()))
}

/// What a candidate is compared against
#[derive(Debug, Clone)]
pub struct MatchTarget<'a> {
    /// Normalized canonical title
    pub title: &'a str,
    /// Tokens of `title`
    pub tokens: &'a [String],
    pub media_type: MediaType,
    pub season: u32,
    /// Normalized `<title>第X季`, series only
    pub season_title: Option<&'a str>,
}

/// Same-name test
///
/// Movies and first seasons match on the title (exact or with whitespace
/// removed); first seasons also accept the season title. Later seasons
/// only accept the season title.
pub fn is_same_name(normalizer: &TitleNormalizer, target: &MatchTarget<'_>, entry: &CatalogEntry) -> bool {
    let title = normalizer.normalize(&entry.title);
    let compact = compact_title(&title);
    let matches = |expected: &str| title == expected || compact == compact_title(expected);

    let season_match = target.season_title.is_some_and(|season_title| matches(season_title));
    match target.media_type {
        MediaType::Movie => matches(target.title),
        MediaType::Tv if target.season <= 1 => matches(target.title) || season_match,
        MediaType::Tv => season_match,
    }
}

/// Looser relatedness test on the raw title and subtitle
pub fn is_similar(target: &MatchTarget<'_>, entry: &CatalogEntry) -> bool {
    if target.title.is_empty() {
        return false;
    }
    let token_hits = |text: &str| {
        target
            .tokens
            .iter()
            .filter(|token| !token.is_empty() && text.contains(token.as_str()))
            .count()
    };

    entry.subtitle.contains(target.title)
        || entry.title.starts_with(target.title)
        || token_hits(entry.title.as_str()) > 1
        || token_hits(entry.subtitle.as_str()) > 1
}

/// Candidates in priority order: same-name first, then similar
#[derive(Debug, Clone, Default)]
pub struct Candidates {
    pub same_name: Vec<CatalogEntry>,
    pub similar: Vec<CatalogEntry>,
}

impl Candidates {
    pub fn ordered(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.same_name.iter().chain(self.similar.iter())
    }

    pub fn len(&self) -> usize {
        self.same_name.len() + self.similar.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Drop excluded and wrong-type entries, then split the rest
///
/// Entries keep catalog order and an entry sits in at most one list.
/// Identical-looking hits are all kept; they can differ in review-site id.
pub fn partition(
    normalizer: &TitleNormalizer,
    target: &MatchTarget<'_>,
    entries: Vec<CatalogEntry>,
    excluded_genres: &[String],
) -> Candidates {
    let mut candidates = Candidates::default();
    for entry in entries {
        if entry.media_type != target.media_type || is_excluded_genre(&entry, excluded_genres) {
            continue;
        }
        if is_same_name(normalizer, target, &entry) {
            candidates.same_name.push(entry);
        } else if is_similar(target, &entry) {
            candidates.similar.push(entry);
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::entry;
    use crate::title::split_title;

    fn raw(name: &str, play_url: &str) -> RawCatalogItem {
        RawCatalogItem {
            vod_name: name.to_string(),
            vod_play_url: play_url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_classify_detects_series() {
        let series = classify(&raw("示例剧集", "第01集$https://a/1.m3u8#第02集$https://a/2.m3u8"));
        assert_eq!(series.media_type, MediaType::Tv);
        assert_eq!(series.episodes.len(), 2);
        assert_eq!(series.episodes[1].title, "第02集");

        let movie = classify(&raw("示例电影", "HD$https://a/movie.m3u8"));
        assert_eq!(movie.media_type, MediaType::Movie);
        assert_eq!(movie.episodes[0].url, "https://a/movie.m3u8");
    }

    #[test]
    fn test_classify_cleans_description() {
        let mut item = raw("示例", "HD$https://a/1.m3u8");
        item.vod_content = "<p>第一行</p>\n <br/>第二 行".to_string();
        item.vod_douban_id = Some("123".to_string());
        let entry = classify(&item);
        assert_eq!(entry.description, "第一行第二行");
        assert_eq!(entry.douban_id(), Some("123"));
    }

    #[test]
    fn test_parse_episodes_keeps_positions() {
        let episodes = parse_episodes("第1集$https://a/1#第2集$# #第3集$https://a/3#第4集");
        let urls: Vec<_> = episodes.iter().map(|e| e.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a/1", "", "https://a/3", ""]);
        assert_eq!(episodes[3].title, "第4集");
        assert!(parse_episodes("").is_empty());
    }

    #[test]
    fn test_excluded_genre() {
        let mut e = entry("示例", MediaType::Tv, 1);
        e.genre = "短剧,爽文".to_string();
        assert!(is_excluded_genre(&e, &["短剧".to_string()]));
        assert!(!is_excluded_genre(&e, &["纪录片".to_string()]));
    }

    #[test]
    fn test_same_name_rules() {
        let normalizer = TitleNormalizer::default();
        let tokens = split_title("示例剧集");
        let season_one = MatchTarget {
            title: "示例剧集",
            tokens: &tokens,
            media_type: MediaType::Tv,
            season: 1,
            season_title: Some("示例剧集第一季"),
        };
        assert!(is_same_name(&normalizer, &season_one, &entry("示例剧集", MediaType::Tv, 1)));
        assert!(is_same_name(&normalizer, &season_one, &entry("示例 剧集", MediaType::Tv, 1)));
        assert!(is_same_name(&normalizer, &season_one, &entry("示例剧集第一季", MediaType::Tv, 1)));
        assert!(is_same_name(&normalizer, &season_one, &entry("【示例剧集】", MediaType::Tv, 1)));

        let season_two = MatchTarget {
            season: 2,
            season_title: Some("示例剧集第二季"),
            ..season_one.clone()
        };
        assert!(!is_same_name(&normalizer, &season_two, &entry("示例剧集", MediaType::Tv, 1)));
        assert!(is_same_name(&normalizer, &season_two, &entry("示例剧集 第二季", MediaType::Tv, 1)));

        let no_season_title = MatchTarget {
            season_title: None,
            ..season_two
        };
        assert!(!is_same_name(&normalizer, &no_season_title, &entry("示例剧集", MediaType::Tv, 1)));
    }

    #[test]
    fn test_similar_rules() {
        let tokens = split_title("进击的巨人：最终季");
        let target = MatchTarget {
            title: "进击的巨人：最终季",
            tokens: &tokens,
            media_type: MediaType::Tv,
            season: 1,
            season_title: None,
        };
        assert!(is_similar(&target, &entry("进击的巨人：最终季 完结篇", MediaType::Tv, 1)));
        assert!(is_similar(&target, &entry("进击的巨人 最终季", MediaType::Tv, 1)));
        assert!(!is_similar(&target, &entry("进击的巨人", MediaType::Tv, 1)));

        let mut with_subtitle = entry("Attack on Titan", MediaType::Tv, 1);
        with_subtitle.subtitle = "进击的巨人：最终季".to_string();
        assert!(is_similar(&target, &with_subtitle));
    }

    #[test]
    fn test_partition_orders_and_filters() {
        let normalizer = TitleNormalizer::default();
        let tokens = split_title("示例");
        let target = MatchTarget {
            title: "示例",
            tokens: &tokens,
            media_type: MediaType::Movie,
            season: 1,
            season_title: None,
        };
        let mut short = entry("示例", MediaType::Movie, 1);
        short.genre = "短剧".to_string();
        let entries = vec![
            entry("示例续集", MediaType::Movie, 1),
            entry("示例", MediaType::Movie, 1),
            entry("示例", MediaType::Tv, 3),
            short,
            entry("示例", MediaType::Movie, 1),
            entry("无关", MediaType::Movie, 1),
        ];

        let candidates = partition(&normalizer, &target, entries, &["短剧".to_string()]);
        assert_eq!(candidates.same_name.len(), 2);
        assert_eq!(candidates.similar.len(), 1);
        let titles: Vec<_> = candidates.ordered().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["示例", "示例", "示例续集"]);
        assert!(candidates.ordered().all(|e| e.media_type == MediaType::Movie));
    }
}
