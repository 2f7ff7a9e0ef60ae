// Candidate confirmation: industry-id cross-check and the anime heuristic

use tracing::debug;
use vod_match_models::{CatalogEntry, MediaType};
use crate::id_resolver::IdResolver;
use crate::mapping::MappingTables;

/// Exact comparison; a blank target never matches
pub fn ids_match(candidate: &str, target: &str) -> bool {
    !target.is_empty() && candidate == target
}

/// First candidate whose review-site id resolves to `target`
///
/// Candidates are checked one at a time in the given order and the walk
/// stops at the first confirmed match. Candidates without a review-site id
/// are skipped.
pub async fn find_matching_candidate<'c, I>(
    resolver: &IdResolver,
    mappings: &MappingTables,
    candidates: I,
    target: &str,
) -> Option<&'c CatalogEntry>
where
    I: IntoIterator<Item = &'c CatalogEntry>,
{
    for candidate in candidates {
        let Some(douban_id) = candidate.douban_id() else {
            continue;
        };
        if let Some(imdb_id) = resolver.resolve_industry_id(mappings, douban_id).await {
            if ids_match(&imdb_id, target) {
                debug!("Matched '{}' (douban {}) by industry id {}", candidate.title, douban_id, target);
                return Some(candidate);
            }
        }
    }
    None
}

/// Accept the only same-name candidate when both sides say it is Japanese
/// animation
///
/// Catalogs often list anime without a usable industry id, so a lone
/// same-name hit is confirmed through genre and country instead.
pub async fn find_sole_anime_candidate<'c>(
    resolver: &IdResolver,
    media_type: MediaType,
    tmdb_id: &str,
    same_name: &'c [CatalogEntry],
) -> Option<&'c CatalogEntry> {
    let [candidate] = same_name else {
        return None;
    };
    let douban_id = candidate.douban_id()?;

    if !resolver.is_anime_on_metadata(media_type, tmdb_id).await {
        return None;
    }
    if !resolver.is_anime_on_review_site(douban_id).await {
        return None;
    }
    debug!("Matched '{}' (douban {}) as sole anime candidate", candidate.title, douban_id);
    Some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{douban_client, entry, FakeFetcher, FakeMetadata, DOUBAN_DESC};
    use std::sync::Arc;
    use vod_match_models::MetadataDetails;

    fn with_douban(title: &str, douban_id: &str) -> CatalogEntry {
        let mut e = entry(title, MediaType::Tv, 12);
        e.douban_id = Some(douban_id.to_string());
        e
    }

    #[test]
    fn test_ids_match() {
        assert!(ids_match("tt0111161", "tt0111161"));
        assert!(!ids_match("TT0111161", "tt0111161"));
        assert!(!ids_match("tt0111161 ", "tt0111161"));
        assert!(!ids_match("tt0111161", "tt0111162"));
        assert!(!ids_match("", ""));
    }

    #[tokio::test]
    async fn test_first_confirmed_candidate_wins() {
        let fetcher = Arc::new(
            FakeFetcher::new()
                .with_body(&format!("{}/1/desc", DOUBAN_DESC), "IMDb: tt0000001")
                .with_body(&format!("{}/2/desc", DOUBAN_DESC), "IMDb: tt0000002")
                .with_body(&format!("{}/3/desc", DOUBAN_DESC), "IMDb: tt0000002"),
        );
        let resolver = IdResolver::new(Arc::new(FakeMetadata::new()), douban_client(fetcher.clone()));
        let candidates = vec![
            entry("无豆瓣", MediaType::Tv, 1),
            with_douban("甲", "1"),
            with_douban("乙", "2"),
            with_douban("丙", "3"),
        ];

        let found = find_matching_candidate(&resolver, &MappingTables::default(), &candidates, "tt0000002").await;
        assert_eq!(found.map(|e| e.title.as_str()), Some("乙"));
        // The walk stops at the first confirmed candidate
        assert_eq!(fetcher.request_count(), 2);
    }

    #[tokio::test]
    async fn test_sole_anime_candidate() {
        let metadata = FakeMetadata::new().with_details(
            MediaType::Tv,
            "50",
            MetadataDetails {
                genres: vec!["动画".to_string()],
                production_countries: vec!["Japan".to_string()],
                seasons: Vec::new(),
            },
        );
        let fetcher = FakeFetcher::new().with_body(&format!("{}/5/desc", DOUBAN_DESC), "动画 日本");
        let resolver = IdResolver::new(Arc::new(metadata), douban_client(Arc::new(fetcher)));

        let sole = vec![with_douban("示例动画", "5")];
        assert!(find_sole_anime_candidate(&resolver, MediaType::Tv, "50", &sole).await.is_some());
        assert!(find_sole_anime_candidate(&resolver, MediaType::Tv, "51", &sole).await.is_none());

        let two = vec![with_douban("示例动画", "5"), with_douban("示例动画", "6")];
        assert!(find_sole_anime_candidate(&resolver, MediaType::Tv, "50", &two).await.is_none());

        let no_douban = vec![entry("示例动画", MediaType::Tv, 12)];
        assert!(find_sole_anime_candidate(&resolver, MediaType::Tv, "50", &no_douban).await.is_none());
    }
}
