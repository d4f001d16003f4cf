//! holdings CLI
//!
//! Command-line tools for migrating library holdings spreadsheets: ISBN
//! lookup, cover download and conversion, and the database import.

mod cli_types;
mod commands;
mod error;
mod logging;
mod progress;
mod settings;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cli_types::{Cli, Commands, ConfigAction};
use commands::import::ImportArgs;
pub(crate) use error::CliError;
use settings::Settings;

/// Emit an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!(
            "{} {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            e
        );
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let quiet = cli.quiet;

    if let Commands::Config {
        action: ConfigAction::Path,
    } = cli.command
    {
        return commands::config::run_config_path();
    }

    let settings = Settings::load()?;

    match cli.command {
        Commands::Import {
            file,
            db,
            covers_dir,
            log_dir,
            dry_run,
        } => commands::import::run_import(
            &settings,
            ImportArgs {
                file,
                db,
                covers_dir,
                log_dir,
                dry_run,
            },
            quiet,
        ),
        Commands::LookupIsbn {
            input,
            output,
            google,
            threshold,
        } => commands::lookup::run_lookup_isbn(&settings, input, output, google, threshold, quiet),
        Commands::FetchCovers { input, dir, google } => {
            commands::covers::run_fetch_covers(&settings, input, dir, google, quiet)
        }
        Commands::ConvertCovers {
            dir,
            format,
            quality,
            remove_original,
        } => commands::convert::run_convert_covers(
            &settings,
            dir,
            format,
            quality,
            remove_original,
            quiet,
        ),
        Commands::Stats { db, runs } => commands::stats::run_stats(&settings, db, runs),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&settings),
            ConfigAction::Path => commands::config::run_config_path(),
        },
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_import_with_global_flags() {
        let cli = Cli::try_parse_from([
            "holdings",
            "import",
            "holdings.xlsx",
            "--dry-run",
            "--db",
            "test.db",
            "--quiet",
        ])
        .unwrap();
        assert!(cli.quiet);
        match cli.command {
            Commands::Import { file, db, dry_run, .. } => {
                assert_eq!(file, std::path::PathBuf::from("holdings.xlsx"));
                assert_eq!(db, Some(std::path::PathBuf::from("test.db")));
                assert!(dry_run);
            }
            _ => panic!("expected import command"),
        }
    }

    #[test]
    fn parses_convert_format_and_rejects_bad_quality() {
        let cli = Cli::try_parse_from(["holdings", "convert-covers", "covers", "--format", "jpg"])
            .unwrap();
        match cli.command {
            Commands::ConvertCovers { format, .. } => {
                assert_eq!(format, Some(holdings_media::TargetFormat::Jpeg));
            }
            _ => panic!("expected convert-covers command"),
        }

        assert!(
            Cli::try_parse_from(["holdings", "convert-covers", "--quality", "0"]).is_err()
        );
        assert!(
            Cli::try_parse_from(["holdings", "convert-covers", "--format", "gif"]).is_err()
        );
    }
}
