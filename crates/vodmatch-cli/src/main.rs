use clap::{ArgAction, Parser, Subcommand};
use commands::{clear, config, resolve};
use std::path::PathBuf;
use vod_match_models::MediaType;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "vodmatch")]
#[command(about = "vodmatch - Find the catalog listing behind a movie or episode")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to a daily-rotated file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a movie or series season to a catalog entry
    #[command(long_about = "Search the configured VOD catalog for the entry matching a TMDB item. Candidates are confirmed through their IMDb id (via Douban) or, for a lone Japanese animation hit, through genre and country. Results are cached for the configured TTL.")]
    Resolve {
        /// Series or movie name as known to TMDB
        title: String,

        /// TMDB id of the movie or series
        #[arg(long)]
        tmdb_id: String,

        /// movie or tv
        #[arg(long = "type", value_name = "TYPE", default_value = "movie")]
        media_type: MediaType,

        /// Known IMDb id (used for movies and first seasons)
        #[arg(long)]
        imdb_id: Option<String>,

        /// Season number (series only)
        #[arg(long, default_value_t = 1)]
        season: u32,

        /// Episode number (series only, with --streams)
        #[arg(long)]
        episode: Option<u32>,

        /// Print playable streams instead of the resolved entry
        #[arg(long, action = ArgAction::SetTrue)]
        streams: bool,

        /// Skip the on-disk result cache
        #[arg(long, action = ArgAction::SetTrue)]
        no_cache: bool,
    },
    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Clear cached data
    Clear {
        /// Delete every cached resolution result
        #[arg(long, action = ArgAction::SetTrue)]
        cache: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration (masks the TMDB token)
    Show {
        /// Show the TMDB token unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Print the configuration file location
    Path,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Resolve {
            title,
            tmdb_id,
            media_type,
            imdb_id,
            season,
            episode,
            streams,
            no_cache,
        } => {
            let args = resolve::ResolveArgs {
                title,
                tmdb_id,
                media_type,
                imdb_id,
                season,
                episode,
                streams,
                no_cache,
            };
            resolve::run_resolve(args, &output).await
        }
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &output).await
        }
        Commands::Clear { cache } => clear::run_clear(cache, &output).await,
    }
}
