use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde_json::json;
use vod_match_models::{CanonicalQuery, MediaType, ResolvedResource, StreamItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "✓".green(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                let json = json!({
                    "type": "success",
                    "message": msg.as_ref()
                });
                self.print_json(&json);
            }
        }
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        // Errors should always be shown, even in quiet mode
        match self.format {
            OutputFormat::Human => {
                eprintln!("{} {}", "✗".red(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                let json = json!({
                    "type": "error",
                    "message": msg.as_ref()
                });
                self.print_json(&json);
            }
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{}", msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                let json = json!({
                    "type": "info",
                    "message": msg.as_ref()
                });
                self.print_json(&json);
            }
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "⚠".yellow(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                let json = json!({
                    "type": "warning",
                    "message": msg.as_ref()
                });
                self.print_json(&json);
            }
        }
    }

    pub fn println(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{}", msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                // For plain println in JSON mode, output as info
                let json = json!({
                    "type": "info",
                    "message": msg.as_ref()
                });
                self.print_json(&json);
            }
        }
    }

    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet && self.format != OutputFormat::Human {
            return;
        }

        self.print_json(data);
    }

    /// Outcome of a `resolve` call; a miss is reported as an error
    pub fn resource(&self, query: &CanonicalQuery, resource: Option<&ResolvedResource>) {
        match self.format {
            OutputFormat::Human => {
                let Some(resource) = resource else {
                    self.error(format!("No catalog entry found for {}", describe_query(query)));
                    return;
                };
                if self.quiet {
                    return;
                }
                self.success(format!("{} -> {}", describe_query(query), resource.title.bright_cyan().bold()));
                if !resource.subtitle.is_empty() {
                    println!("  {:<10} {}", "Also:".dimmed(), resource.subtitle);
                }
                println!("  {:<10} {}", "Type:".dimmed(), resource.media_type);
                println!("  {:<10} {}", "Genre:".dimmed(), resource.genre);
                println!("  {:<10} {}", "Douban:".dimmed(), resource.douban_id().unwrap_or("-"));
                println!("  {:<10} {}", "Episodes:".dimmed(), resource.episode_count());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.json(&json!({
                    "type": "resolve",
                    "query": query,
                    "resource": resource,
                }));
            }
        }
    }

    pub fn streams(&self, query: &CanonicalQuery, streams: &[StreamItem]) {
        match self.format {
            OutputFormat::Human => {
                if streams.is_empty() {
                    self.error(format!("No streams found for {}", describe_query(query)));
                    return;
                }
                if self.quiet {
                    return;
                }
                self.success(format!("{} stream(s) for {}", streams.len(), describe_query(query)));
                for stream in streams {
                    println!("  {:<12} {}", stream.name.bright_white(), stream.url);
                }
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.json(&json!({
                    "type": "streams",
                    "query": query,
                    "streams": streams,
                }));
            }
        }
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(data).unwrap_or_default());
            }
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Human => {
                println!("{}", data);
            }
        }
    }
}

fn describe_query(query: &CanonicalQuery) -> String {
    match query.media_type {
        MediaType::Movie => format!("'{}' (tmdb {})", query.series_name, query.tmdb_id),
        MediaType::Tv => format!("'{}' season {} (tmdb {})", query.series_name, query.season, query.tmdb_id),
    }
}
