use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use vod_match_config::{Config, PathManager};

pub async fn run_config(cmd: crate::ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { full } => show_config(full, output),
        crate::ConfigCommands::Init { force } => init_config(force, output),
        crate::ConfigCommands::Path => show_paths(output),
    }
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    if !config_file.exists() {
        output.warn(format!("Configuration file not found at: {}", config_file.display()));
        output.info("Showing built-in defaults. Run 'vodmatch config init' to write them to disk.");
    }

    let mut config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    let token = config.metadata.resolved_token();
    if !full {
        config.metadata.api_token = config.metadata.api_token.as_deref().map(mask_string);
    }

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            println!("\n{}", "Configuration".bright_cyan().bold());
            println!("{} {}\n", "File:".dimmed(), config_file.display());

            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            table.set_header(vec![
                Cell::new("Setting").add_attribute(comfy_table::Attribute::Bold),
                Cell::new("Value").add_attribute(comfy_table::Attribute::Bold),
            ]);
            let token_display = match &token {
                Some(t) if full => t.clone(),
                Some(t) => mask_string(t),
                None => "not set".to_string(),
            };
            let rows = [
                ("engine.request_timeout_secs", config.engine.request_timeout_secs.to_string()),
                ("engine.cache_ttl_hours", config.engine.cache_ttl_hours.to_string()),
                ("engine.cache_namespace", config.engine.cache_namespace.clone()),
                ("catalog.endpoint", config.catalog.endpoint.clone()),
                ("catalog.excluded_genres", config.catalog.excluded_genres.join(", ")),
                ("review_site.desc_url_template", config.review_site.desc_url_template.clone()),
                ("metadata.base_url", config.metadata.base_url.clone()),
                ("metadata.language", config.metadata.language.clone()),
                ("metadata token", token_display),
                ("mappings.id_mapping", config.mappings.id_mapping.clone().unwrap_or_else(|| "-".to_string())),
                ("mappings.title_mapping", config.mappings.title_mapping.clone().unwrap_or_else(|| "-".to_string())),
            ];
            for (key, value) in rows {
                table.add_row(vec![Cell::new(key), Cell::new(value)]);
            }
            println!("{}", table);

            if let Err(e) = config.validate() {
                output.warn(format!("Configuration is invalid: {}", e));
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": config_file.display().to_string(),
                "exists": config_file.exists(),
                "metadata_configured": token.is_some(),
                "config": config,
            }));
        }
    }
    Ok(())
}

fn init_config(force: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    if config_file.exists() && !force {
        output.warn(format!("Configuration file already exists at: {}", config_file.display()));
        output.info("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create directories: {}", e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}

fn show_paths(output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    match output.format() {
        OutputFormat::Human => {
            output.println(format!("Config file: {}", path_manager.config_file().display()));
            output.println(format!("Result cache: {}", path_manager.result_cache_dir().display()));
            output.println(format!("Log file: {}", path_manager.log_file().display()));
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": path_manager.config_file().display().to_string(),
                "result_cache_dir": path_manager.result_cache_dir().display().to_string(),
                "log_file": path_manager.log_file().display().to_string(),
            }));
        }
    }
    Ok(())
}

fn mask_string(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
