use tracing::{debug, warn};
use vod_match_sources::{CatalogClient, RawCatalogItem};

/// Upper bound on pages fetched for one keyword, whatever the catalog reports
pub const MAX_PAGES: u32 = 50;

/// Collect every page of results for a keyword
///
/// Pages are fetched one after another until the reported page count is
/// reached. A failed or unsuccessful page ends the walk; whatever was
/// gathered before it is returned.
pub async fn search_catalog(client: &CatalogClient, keyword: &str) -> Vec<RawCatalogItem> {
    let mut items = Vec::new();
    let mut page = 1;

    loop {
        match client.search_page(keyword, page).await {
            Ok(response) if response.is_success() => {
                debug!(
                    "Catalog page {}/{} for '{}': {} items",
                    page,
                    response.pagecount,
                    keyword,
                    response.list.len()
                );
                items.extend(response.list);
                if page >= response.pagecount {
                    break;
                }
                if page >= MAX_PAGES {
                    warn!("Catalog search for '{}' stopped at page limit {}", keyword, MAX_PAGES);
                    break;
                }
                page += 1;
            }
            Ok(response) => {
                debug!(
                    "Catalog page {} for '{}' returned no results (code {})",
                    page, keyword, response.code
                );
                break;
            }
            Err(e) => {
                warn!("Catalog search for '{}' failed on page {}: {}", keyword, page, e);
                break;
            }
        }
    }

    items
}
