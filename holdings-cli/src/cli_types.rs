//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use holdings_media::TargetFormat;

#[derive(Parser)]
#[command(name = "holdings")]
#[command(
    about = "Migrate library holdings spreadsheets into a catalog database",
    long_about = None
)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Google Books options shared by the lookup and cover commands.
#[derive(Args, Clone)]
pub(crate) struct GoogleBooksArgs {
    /// Google Books API key (overrides $GOOGLE_BOOKS_API_KEY and the settings file)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Delay between API requests in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Import a holdings spreadsheet into the catalog database
    Import {
        /// Spreadsheet to import (.xlsx, .xls, .ods or .csv)
        file: PathBuf,

        /// Path to the catalog database file
        #[arg(long)]
        db: Option<PathBuf>,

        /// Directory containing cover images named by ISBN
        #[arg(long)]
        covers_dir: Option<PathBuf>,

        /// Directory for the import audit log
        #[arg(long)]
        log_dir: Option<PathBuf>,

        /// Process every row, then roll all changes back
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Look up ISBNs by title and author and write an enriched spreadsheet
    LookupIsbn {
        /// Input spreadsheet with TITLE and AUTHOR columns
        input: PathBuf,

        /// Output spreadsheet (.xlsx or .csv)
        output: PathBuf,

        #[command(flatten)]
        google: GoogleBooksArgs,

        /// Minimum combined title + author score (0-200) to accept a match
        #[arg(long)]
        threshold: Option<u32>,
    },

    /// Download cover thumbnails for every ISBN in a spreadsheet
    FetchCovers {
        /// Spreadsheet with an ISBN column
        input: PathBuf,

        /// Directory to save covers into
        #[arg(long)]
        dir: Option<PathBuf>,

        #[command(flatten)]
        google: GoogleBooksArgs,
    },

    /// Convert downloaded cover images to another format
    ConvertCovers {
        /// Directory of images to convert
        dir: Option<PathBuf>,

        /// Target format (webp, jpg, png)
        #[arg(long)]
        format: Option<TargetFormat>,

        /// WebP/JPEG quality (1-100)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
        quality: Option<u8>,

        /// Delete each source image after a verified conversion
        #[arg(long)]
        remove_original: bool,
    },

    /// Show catalog statistics and recent import runs
    Stats {
        /// Path to the catalog database file
        #[arg(long)]
        db: Option<PathBuf>,

        /// Number of recent import runs to list
        #[arg(long, default_value_t = 5)]
        runs: usize,
    },

    /// Inspect the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show effective settings and their sources
    Show,

    /// Print the settings file path
    Path,
}
