use vod_match_models::{MediaType, ResolvedResource};

const DIGITS: [&str; 10] = ["零", "一", "二", "三", "四", "五", "六", "七", "八", "九"];
const UNITS: [&str; 2] = ["", "十"];

/// Chinese numeral for a season number given as decimal digits
///
/// Covers one and two digit numbers ("10" -> "十", "12" -> "十二",
/// "20" -> "二十"). Anything else is returned unchanged.
pub fn ordinal_label(digits: &str) -> String {
    match digits {
        "0" => return DIGITS[0].to_string(),
        "1" => return DIGITS[1].to_string(),
        _ => {}
    }
    if digits.is_empty() || digits.len() > UNITS.len() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return digits.to_string();
    }

    let width = digits.len();
    let mut label = String::new();
    for (i, c) in digits.chars().enumerate() {
        let digit = c.to_digit(10).unwrap_or(0) as usize;
        label.push_str(DIGITS[digit]);
        if digit != 0 {
            label.push_str(UNITS[width - i - 1]);
        }
    }

    let label = label.strip_prefix(DIGITS[1]).unwrap_or(&label);
    let label = label.strip_suffix(DIGITS[0]).unwrap_or(label);
    label.to_string()
}

/// `第X季`
pub fn season_suffix(season: u32) -> String {
    format!("第{}季", ordinal_label(&season.to_string()))
}

/// Series title with its season suffix appended
pub fn season_title(base: &str, season: u32) -> String {
    format!("{}{}", base, season_suffix(season))
}

/// Movies and first seasons can reuse a caller-supplied industry id
pub fn is_simple_match(media_type: MediaType, season: u32) -> bool {
    media_type == MediaType::Movie || season == 1
}

/// True when the catalog folded the next season into the season-1 entry
///
/// `true_episode_count` is the metadata service's count for season 1; an
/// unknown count (0) never reports a merge.
pub fn detect_merged_season(season_one: &ResolvedResource, true_episode_count: u32) -> bool {
    true_episode_count > 0 && season_one.episode_count() > true_episode_count as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use vod_match_models::{CatalogEntry, Episode};

    fn entry_with_episodes(count: usize) -> ResolvedResource {
        CatalogEntry {
            title: "示例剧集".to_string(),
            subtitle: String::new(),
            description: String::new(),
            genre: "日韩动漫".to_string(),
            media_type: MediaType::Tv,
            douban_id: None,
            episodes: (1..=count)
                .map(|i| Episode {
                    title: format!("第{}集", i),
                    url: format!("https://cdn.example.com/{}.m3u8", i),
                })
                .collect(),
        }
    }

    #[test]
    fn test_ordinal_label() {
        assert_eq!(ordinal_label("0"), "零");
        assert_eq!(ordinal_label("1"), "一");
        assert_eq!(ordinal_label("2"), "二");
        assert_eq!(ordinal_label("9"), "九");
        assert_eq!(ordinal_label("10"), "十");
        assert_eq!(ordinal_label("12"), "十二");
        assert_eq!(ordinal_label("20"), "二十");
        assert_eq!(ordinal_label("35"), "三十五");
    }

    #[test]
    fn test_ordinal_label_passes_through_unsupported_input() {
        assert_eq!(ordinal_label("100"), "100");
        assert_eq!(ordinal_label("x"), "x");
        assert_eq!(ordinal_label(""), "");
    }

    #[test]
    fn test_season_title() {
        assert_eq!(season_suffix(2), "第二季");
        assert_eq!(season_title("示例剧集", 1), "示例剧集第一季");
        assert_eq!(season_title("示例剧集", 11), "示例剧集第十一季");
    }

    #[test]
    fn test_is_simple_match() {
        assert!(is_simple_match(MediaType::Movie, 1));
        assert!(is_simple_match(MediaType::Movie, 3));
        assert!(is_simple_match(MediaType::Tv, 1));
        assert!(!is_simple_match(MediaType::Tv, 2));
    }

    #[test]
    fn test_detect_merged_season() {
        assert!(detect_merged_season(&entry_with_episodes(24), 12));
        assert!(!detect_merged_season(&entry_with_episodes(12), 12));
        assert!(!detect_merged_season(&entry_with_episodes(10), 12));
        assert!(!detect_merged_season(&entry_with_episodes(24), 0));
    }
}
