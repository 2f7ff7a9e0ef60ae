// Title cleanup and tokenization shared by the search and filter stages

use regex::Regex;
use std::sync::LazyLock;
use crate::mapping::MappingTables;

/// Terms removed wherever they appear ("theatrical edition")
pub const DECORATIVE_TERMS: &[&str] = &["剧场版"];

static LEADING_BRACKET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^【+").expect("valid regex"));
static TRAILING_BRACKET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"】+$").expect("valid regex"));
static ANNOTATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"（.+）").expect("valid regex"));
static TRAILING_PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[。！？!?]+$").expect("valid regex"));
static ASCII_TITLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\s]+$").expect("valid regex"));
static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[：:]").expect("valid regex"));
static TRAILING_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+$").expect("valid regex"));

/// Strips decorative markup from titles
#[derive(Debug, Clone)]
pub struct TitleNormalizer {
    decorative_terms: Vec<String>,
}

impl Default for TitleNormalizer {
    fn default() -> Self {
        Self::new(DECORATIVE_TERMS.iter().map(|t| t.to_string()).collect())
    }
}

impl TitleNormalizer {
    pub fn new(decorative_terms: Vec<String>) -> Self {
        Self {
            decorative_terms: decorative_terms.into_iter().filter(|t| !t.is_empty()).collect(),
        }
    }

    fn strip_once(&self, title: &str) -> String {
        let mut cleaned = LEADING_BRACKET.replace(title, "").into_owned();
        cleaned = TRAILING_BRACKET.replace(&cleaned, "").into_owned();
        for term in &self.decorative_terms {
            cleaned = cleaned.replace(term.as_str(), "");
        }
        cleaned = ANNOTATION.replace_all(&cleaned, "").into_owned();
        cleaned = TRAILING_PUNCTUATION.replace(&cleaned, "").into_owned();
        cleaned.trim().to_string()
    }

    /// Remove wrappers, decorative terms, annotations and trailing punctuation
    ///
    /// Runs to a fixpoint: every pass only removes text, so the loop ends and
    /// the result is stable under a second call.
    pub fn normalize(&self, raw: &str) -> String {
        let mut current = raw.trim().to_string();
        loop {
            let next = self.strip_once(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    /// Apply the manual title overrides, then normalize
    pub fn canonical_title(&self, mappings: &MappingTables, series_name: &str, tmdb_id: &str) -> String {
        let title = mappings.title_override(series_name, tmdb_id).unwrap_or(series_name);
        self.normalize(title)
    }
}

/// Split a title into comparison tokens
///
/// Pure ASCII titles stay whole. Otherwise the title is cut on colons and
/// whitespace, and a trailing sequel number is dropped from the first token
/// ("进击的巨人2：最终季" -> ["进击的巨人", "最终季"]).
pub fn split_title(title: &str) -> Vec<String> {
    if ASCII_TITLE.is_match(title) {
        return vec![title.to_string()];
    }

    SEPARATORS
        .replace_all(title, " ")
        .split(char::is_whitespace)
        .enumerate()
        .map(|(i, token)| {
            let token = token.trim();
            if i == 0 && !is_all_digits(token) {
                TRAILING_DIGITS.replace(token, "").into_owned()
            } else {
                token.to_string()
            }
        })
        .filter(|token| !token.is_empty())
        .collect()
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Title with all whitespace removed
pub fn compact_title(title: &str) -> String {
    title.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_normalize_strips_decorations() {
        let normalizer = TitleNormalizer::default();
        assert_eq!(normalizer.normalize("【名侦探柯南】"), "名侦探柯南");
        assert_eq!(normalizer.normalize("名侦探柯南剧场版：黑铁的鱼影"), "名侦探柯南：黑铁的鱼影");
        assert_eq!(normalizer.normalize("示例电影（普通话版）"), "示例电影");
        assert_eq!(normalizer.normalize("你好，李焕英！"), "你好，李焕英");
        assert_eq!(normalizer.normalize("谁是凶手？？"), "谁是凶手");
    }

    #[test]
    fn test_normalize_never_keeps_theatrical_marker() {
        let normalizer = TitleNormalizer::default();
        for title in ["剧场版", "剧场版 示例", "示例剧场版剧场版", "【剧场版】示例。", "剧场剧场版版"] {
            assert!(!normalizer.normalize(title).contains("剧场版"), "{}", title);
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let normalizer = TitleNormalizer::default();
        for title in [
            "【【示例】】",
            "【示例】。",
            "示例（上）！（下）",
            "  示例剧集第二季  ",
            "Example Title!?",
            "",
        ] {
            let once = normalizer.normalize(title);
            assert_eq!(normalizer.normalize(&once), once, "{}", title);
        }
        assert_eq!(normalizer.normalize("【示例】。"), "示例");
    }

    #[test]
    fn test_canonical_title_prefers_overrides() {
        let normalizer = TitleNormalizer::default();
        let mappings = MappingTables {
            ids: HashMap::new(),
            titles: HashMap::from([
                ("Example".to_string(), "示例（国语）".to_string()),
                ("同名(200)".to_string(), "同名剧集".to_string()),
            ]),
        };
        assert_eq!(normalizer.canonical_title(&mappings, "Example", "1"), "示例");
        assert_eq!(normalizer.canonical_title(&mappings, "同名", "200"), "同名剧集");
        assert_eq!(normalizer.canonical_title(&mappings, "同名", "201"), "同名");
    }

    #[test]
    fn test_split_title() {
        assert_eq!(split_title("A：B"), vec!["A", "B"]);
        assert_eq!(split_title("ABC123"), vec!["ABC123"]);
        assert_eq!(split_title("Breaking Bad"), vec!["Breaking Bad"]);
        assert_eq!(split_title("进击的巨人2：最终季"), vec!["进击的巨人", "最终季"]);
        assert_eq!(split_title("请回答1988"), vec!["请回答"]);
        assert_eq!(split_title("2046：重映"), vec!["2046", "重映"]);
        assert_eq!(split_title("名侦探柯南:  黑铁的鱼影 "), vec!["名侦探柯南", "黑铁的鱼影"]);
        assert!(split_title("").is_empty());
    }

    #[test]
    fn test_compact_title() {
        assert_eq!(compact_title("示例 剧集 第二季"), "示例剧集第二季");
        assert_eq!(compact_title("示例\u{3000}剧集"), "示例剧集");
    }
}
