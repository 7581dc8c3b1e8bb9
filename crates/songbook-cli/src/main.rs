use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use songbook_core::SongDraft;

mod commands;
mod config;

use commands::Output;
use config::Config;

#[derive(Debug, Parser)]
#[command(name = "songbook", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level: trace, debug, info, warn, error (default: info)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Build a catalog entry from flags and print it
    ///
    /// Title and artist are trimmed. The entry is rejected if either is blank,
    /// if the duration is not a positive number of seconds, if the rating is
    /// outside 1..=5, or if two tags are equal ignoring case.
    New {
        #[arg(long)]
        title: String,

        #[arg(long)]
        artist: String,

        /// Duration in seconds
        #[arg(long, allow_negative_numbers = true)]
        duration: i64,

        /// Rating from 1 to 5
        #[arg(long, allow_negative_numbers = true)]
        rating: i64,

        /// Tag to attach (repeatable, kept in order)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Load a catalog entry from a TOML file and print it
    Load {
        /// Path to a TOML file with title, artist, duration_secs, rating and tags
        path: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Args)]
struct OutputArgs {
    /// Also report whether the entry matches this keyword
    #[arg(long = "match", value_name = "KEYWORD")]
    keyword: Option<String>,

    /// Print the entry as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults if it does not exist
    Init,
}

fn init_logging(config: &Config) -> Result<()> {
    let opts = twyg::OptsBuilder::new()
        .coloured(config.log_coloured)
        .level(config.log_level())
        .build()
        .map_err(|e| anyhow::anyhow!("Invalid logging options: {:?}", e))?;
    twyg::setup(opts).map_err(|e| anyhow::anyhow!("Failed to set up logging: {:?}", e))?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let json_flag = match &cli.command {
        Commands::New { output, .. } | Commands::Load { output, .. } => output.json,
        Commands::Config { .. } => false,
    };
    let config = Config::load()?.with_overrides(cli.log_level, json_flag);
    init_logging(&config)?;

    match cli.command {
        Commands::New {
            title,
            artist,
            duration,
            rating,
            tags,
            output,
        } => {
            let draft = SongDraft {
                title,
                artist,
                duration_secs: duration,
                rating,
                tags,
            };
            commands::run_new(&draft, &Output::new(output.keyword, config.json_output))?;
        }
        Commands::Load { path, output } => {
            commands::run_load(&path, &Output::new(output.keyword, config.json_output))?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config(&config),
            ConfigAction::Path => commands::config::show_path(),
            ConfigAction::Example => commands::config::show_example(),
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
