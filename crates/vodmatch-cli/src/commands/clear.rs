use crate::output::Output;
use color_eyre::Result;
use vod_match_config::PathManager;
use vod_match_sources::JsonFileStore;

pub async fn run_clear(cache: bool, output: &Output) -> Result<()> {
    if !cache {
        output.warn("No clear option specified. Use --cache");
        output.println("\nExample: vodmatch clear --cache");
        return Ok(());
    }

    let path_manager = PathManager::default();
    let cache_dir = path_manager.result_cache_dir();
    let store = JsonFileStore::new(&cache_dir);
    let removed = store
        .clear()
        .await
        .map_err(|e| color_eyre::eyre::eyre!("Failed to clear cache at {}: {}", cache_dir.display(), e))?;

    if removed == 0 {
        output.info("No cached results found to clear");
    } else {
        output.success(format!("Cleared {} cached result(s): {}", removed, cache_dir.display()));
    }
    Ok(())
}
