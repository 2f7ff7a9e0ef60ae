use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One page of a `ac=detail` search response
///
/// Collection sites are inconsistent about number vs. string encoding, so
/// numeric fields are decoded leniently.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogPage {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub code: i64,
    #[serde(default, deserialize_with = "lenient_list")]
    pub list: Vec<RawCatalogItem>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub pagecount: u32,
}

impl CatalogPage {
    /// `code == 1` and at least one item
    pub fn is_success(&self) -> bool {
        self.code == 1 && !self.list.is_empty()
    }
}

/// A raw search hit as returned by the collection API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCatalogItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub vod_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub vod_sub: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub vod_content: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub vod_class: String,
    /// `label$url#label$url...`
    #[serde(default, deserialize_with = "lenient_string")]
    pub vod_play_url: String,
    /// 0, "0" or blank mean "no review-site id"
    #[serde(default, deserialize_with = "lenient_id")]
    pub vod_douban_id: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_i64(deserializer)?;
    Ok(u32::try_from(value).unwrap_or(0))
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = lenient_string(deserializer)?;
    let id = id.trim();
    if id.is_empty() || id == "0" {
        Ok(None)
    } else {
        Ok(Some(id.to_string()))
    }
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<RawCatalogItem>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<RawCatalogItem>>::deserialize(deserializer)?.unwrap_or_default())
}
