//! Console logging setup.
//!
//! All user-facing output goes through the `log` facade. Records are written
//! to stdout and, with `--logfile`, mirrored to a file with ANSI codes removed.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Target};
use log::{Level, LevelFilter};

/// Writes every record to stdout and optionally to a plain-text file.
struct TeeWriter {
    console: io::Stdout,
    file: Option<strip_ansi_escapes::Writer<File>>,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.console.write_all(buf)?;
        if let Some(file) = self.file.as_mut() {
            file.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.console.flush()?;
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

/// Level filter for the global flags. `--quiet` wins over `--verbose`.
pub(crate) fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger. `RUST_LOG` directives are applied on top of
/// the level chosen by the flags.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> io::Result<()> {
    let file = match logfile {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            Some(strip_ansi_escapes::Writer::new(File::create(path)?))
        }
        None => None,
    };

    let mut builder = Builder::new();
    builder.filter_level(level_for(quiet, verbose));
    // HTTP internals are noisy at debug.
    builder.filter_module("reqwest", LevelFilter::Warn);
    builder.filter_module("hyper", LevelFilter::Warn);
    builder.filter_module("rustls", LevelFilter::Warn);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    builder.format(move |buf, record| {
        if verbose {
            writeln!(
                buf,
                "{} {:<5} {}",
                buf.timestamp_seconds(),
                record.level(),
                record.args()
            )
        } else {
            match record.level() {
                Level::Error => writeln!(buf, "error: {}", record.args()),
                Level::Warn => writeln!(buf, "warning: {}", record.args()),
                _ => writeln!(buf, "{}", record.args()),
            }
        }
    });

    builder.target(Target::Pipe(Box::new(TeeWriter {
        console: io::stdout(),
        file,
    })));
    builder.init();
    Ok(())
}
