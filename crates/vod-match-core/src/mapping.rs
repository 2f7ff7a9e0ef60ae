use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};
use vod_match_config::MappingConfig;
use vod_match_models::MediaType;
use vod_match_sources::{FetchRequest, HttpFetcher};

/// Manually curated lookup tables
///
/// `ids` maps `douban.<id>`, `tmdb.<id>` and `tmdb.<id>.<season>` to
/// industry ids. `titles` maps a series name (or `<name>(<tmdb id>)`) to
/// the title used on the catalog.
#[derive(Debug, Clone, Default)]
pub struct MappingTables {
    pub ids: HashMap<String, String>,
    pub titles: HashMap<String, String>,
}

impl MappingTables {
    /// Load both tables; a table that cannot be loaded is treated as empty
    pub async fn load(fetcher: &dyn HttpFetcher, config: &MappingConfig) -> Self {
        let ids = load_table(fetcher, config.id_mapping.as_deref(), "id").await;
        let titles = load_table(fetcher, config.title_mapping.as_deref(), "title").await;
        debug!(
            "Loaded mapping tables: {} id entries, {} title entries",
            ids.len(),
            titles.len()
        );
        Self { ids, titles }
    }

    pub fn imdb_for_douban(&self, douban_id: &str) -> Option<&str> {
        self.ids.get(&format!("douban.{}", douban_id)).map(String::as_str)
    }

    pub fn imdb_for_tmdb(&self, media_type: MediaType, tmdb_id: &str, season: u32) -> Option<&str> {
        let key = match media_type {
            MediaType::Movie => format!("tmdb.{}", tmdb_id),
            MediaType::Tv => format!("tmdb.{}.{}", tmdb_id, season),
        };
        self.ids.get(&key).map(String::as_str)
    }

    /// Override for a series name; the bare name wins over `<name>(<tmdb id>)`
    pub fn title_override(&self, series_name: &str, tmdb_id: &str) -> Option<&str> {
        let lookup = |key: &str| self.titles.get(key).map(String::as_str).filter(|title| !title.is_empty());
        lookup(series_name).or_else(|| lookup(&format!("{}({})", series_name, tmdb_id)))
    }
}

async fn load_table(fetcher: &dyn HttpFetcher, source: Option<&str>, label: &str) -> HashMap<String, String> {
    let Some(source) = source.map(str::trim).filter(|s| !s.is_empty()) else {
        return HashMap::new();
    };
    match read_table(fetcher, source).await {
        Ok(table) => table,
        Err(e) => {
            warn!("Failed to load {} mapping from {}: {:#}", label, source, e);
            HashMap::new()
        }
    }
}

async fn read_table(fetcher: &dyn HttpFetcher, source: &str) -> Result<HashMap<String, String>> {
    let value: Value = if source.starts_with("http://") || source.starts_with("https://") {
        fetcher.fetch_json(&FetchRequest::new(source)).await?
    } else {
        let content = tokio::fs::read_to_string(Path::new(source))
            .await
            .with_context(|| format!("Failed to read mapping file: {}", source))?;
        serde_json::from_str(&content).context("Failed to parse mapping file")?
    };
    parse_table(value)
}

/// Keep string values of a flat JSON object
fn parse_table(value: Value) -> Result<HashMap<String, String>> {
    let Value::Object(map) = value else {
        anyhow::bail!("Mapping table is not a JSON object");
    };
    Ok(map
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key, s)),
            _ => None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeFetcher;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_from_url_and_file() {
        let temp = TempDir::new().unwrap();
        let title_file = temp.path().join("titles.json");
        std::fs::write(&title_file, r#"{"Example": "示例", "ignored": 3}"#).unwrap();

        let fetcher = FakeFetcher::new().with_body(
            "https://mappings.example.com/ids.json",
            r#"{"douban.1": "tt0000001", "tmdb.5.2": "tt0000005"}"#,
        );
        let config = MappingConfig {
            id_mapping: Some("https://mappings.example.com/ids.json".to_string()),
            title_mapping: Some(title_file.to_string_lossy().to_string()),
        };

        let tables = MappingTables::load(&fetcher, &config).await;
        assert_eq!(tables.imdb_for_douban("1"), Some("tt0000001"));
        assert_eq!(tables.imdb_for_tmdb(MediaType::Tv, "5", 2), Some("tt0000005"));
        assert_eq!(tables.imdb_for_tmdb(MediaType::Movie, "5", 1), None);
        assert_eq!(tables.title_override("Example", "9"), Some("示例"));
        assert_eq!(tables.titles.len(), 1);
    }

    #[test]
    fn test_empty_bare_override_falls_through() {
        let tables = MappingTables {
            ids: HashMap::new(),
            titles: HashMap::from([
                ("Example".to_string(), String::new()),
                ("Example(9)".to_string(), "示例".to_string()),
            ]),
        };
        assert_eq!(tables.title_override("Example", "9"), Some("示例"));
        assert_eq!(tables.title_override("Example", "10"), None);
    }

    #[tokio::test]
    async fn test_unavailable_tables_are_empty() {
        let config = MappingConfig {
            id_mapping: Some("https://mappings.example.com/missing.json".to_string()),
            title_mapping: Some("/nonexistent/vodmatch/titles.json".to_string()),
        };
        let tables = MappingTables::load(&FakeFetcher::new(), &config).await;
        assert!(tables.ids.is_empty());
        assert!(tables.titles.is_empty());

        let none = MappingConfig {
            id_mapping: None,
            title_mapping: None,
        };
        let tables = MappingTables::load(&FakeFetcher::new(), &none).await;
        assert!(tables.ids.is_empty());
    }

    #[test]
    fn test_parse_table_rejects_non_objects() {
        assert!(parse_table(serde_json::json!(["a", "b"])).is_err());
    }
}
