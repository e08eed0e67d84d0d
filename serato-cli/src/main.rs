//! Command-line reader for Serato history and library files

mod config;
mod output;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use config::Config;

#[derive(Parser)]
#[command(name = "serato-history")]
#[command(about = "Read Serato DJ play history and library files")]
#[command(version)]
struct Cli {
    /// Path to the _Serato_ folder (defaults to ~/Music/_Serato_)
    #[arg(short, long, env = "SERATO_DIR", global = true)]
    serato_dir: Option<PathBuf>,

    /// Print JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the raw chunk tree of any Serato file as JSON
    Dump { file: PathBuf },

    /// List sessions from the history index
    Sessions,

    /// List tracks played in one session
    Session {
        /// Session file number, as listed by `sessions`
        number: Option<u32>,

        /// Read this .session file instead
        #[arg(short, long, conflicts_with = "number")]
        file: Option<PathBuf>,
    },

    /// List every session with its tracks
    History,

    /// List library tracks
    Library {
        /// Read this database file instead of `database V2`
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::new(cli.serato_dir, cli.json)?;
    debug!("Serato folder: {:?}", config.serato_dir.root());

    match cli.command {
        Commands::Dump { file } => {
            let tree = serato_core::read_dom_tree(&file)
                .with_context(|| format!("Failed to decode {:?}", file))?;
            output::print_json(&tree)
        }
        Commands::Sessions => {
            let path = config.serato_dir.history_database();
            let entries = serato_core::read_session_entries(&path)
                .with_context(|| format!("Failed to read history index {:?}", path))?;
            output::print_sessions(&config, &entries)
        }
        Commands::Session { number, file } => {
            let path = match (file, number) {
                (Some(file), _) => file,
                (None, Some(n)) => config.serato_dir.session_file(n),
                (None, None) => anyhow::bail!("Pass a session number or --file"),
            };
            let songs = serato_core::read_session_songs(&path)
                .with_context(|| format!("Failed to read session {:?}", path))?;
            output::print_songs(&config, &songs)
        }
        Commands::History => {
            let history = serato_core::read_history(&config.serato_dir)
                .context("Failed to read history")?;
            output::print_history(&config, &history)
        }
        Commands::Library { file } => {
            let path = file.unwrap_or_else(|| config.serato_dir.library_database());
            let tracks = serato_core::read_library(&path)
                .with_context(|| format!("Failed to read library {:?}", path))?;
            output::print_library(&config, &tracks)
        }
    }
}
