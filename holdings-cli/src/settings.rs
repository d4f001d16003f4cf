//! Settings file (`~/.config/holdings/settings.toml`) and value resolution.
//!
//! Priority for every setting: CLI flag > env var > settings file > default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use holdings_books::{ApiKey, DEFAULT_MATCH_THRESHOLD};
use holdings_media::TargetFormat;

use crate::CliError;

/// Environment variable overriding the database path.
pub(crate) const DB_ENV: &str = "HOLDINGS_DB";

const DEFAULT_COVERS_DIR: &str = "covers";
const DEFAULT_QUALITY: u8 = 90;
const DEFAULT_REQUEST_DELAY_MS: u64 = 1000;

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub paths: PathSettings,
    pub google_books: GoogleBooksSettings,
    pub covers: CoverSettings,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct PathSettings {
    pub database: Option<PathBuf>,
    pub covers_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct GoogleBooksSettings {
    pub api_key: Option<String>,
    pub request_delay_ms: Option<u64>,
    pub match_threshold: Option<u32>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct CoverSettings {
    /// Extension of the cover files the importer links to books.
    pub extension: Option<String>,
    pub quality: Option<u8>,
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Source {
    Flag,
    EnvVar(&'static str),
    ConfigFile,
    Default,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag => write!(f, "command line"),
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Return the path to the settings file.
pub(crate) fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("holdings").join("settings.toml"))
}

/// Default database location: `<data dir>/holdings/holdings.db`.
pub(crate) fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("holdings"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("holdings.db")
}

impl Settings {
    /// Load the settings file. A missing file yields the defaults.
    pub(crate) fn load() -> Result<Self, CliError> {
        match settings_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub(crate) fn load_from(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
            .map_err(|e| CliError::config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    pub(crate) fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub(crate) fn database(&self, flag: Option<PathBuf>) -> (PathBuf, Source) {
        self.database_from(flag, std::env::var_os(DB_ENV).map(PathBuf::from))
    }

    pub(crate) fn database_from(
        &self,
        flag: Option<PathBuf>,
        env: Option<PathBuf>,
    ) -> (PathBuf, Source) {
        if let Some(path) = flag {
            return (path, Source::Flag);
        }
        if let Some(path) = env.filter(|p| !p.as_os_str().is_empty()) {
            return (path, Source::EnvVar(DB_ENV));
        }
        if let Some(path) = &self.paths.database {
            return (path.clone(), Source::ConfigFile);
        }
        (default_db_path(), Source::Default)
    }

    pub(crate) fn covers_dir(&self, flag: Option<PathBuf>) -> (PathBuf, Source) {
        pick(flag, self.paths.covers_dir.clone(), || {
            PathBuf::from(DEFAULT_COVERS_DIR)
        })
    }

    pub(crate) fn log_dir(&self, flag: Option<PathBuf>) -> (PathBuf, Source) {
        pick(flag, self.paths.log_dir.clone(), || PathBuf::from("."))
    }

    pub(crate) fn api_key(&self, flag: Option<String>) -> ApiKey {
        ApiKey::resolve(flag, self.google_books.api_key.clone())
    }

    pub(crate) fn request_delay(&self, flag_ms: Option<u64>) -> Duration {
        let (ms, _) = pick(flag_ms, self.google_books.request_delay_ms, || {
            DEFAULT_REQUEST_DELAY_MS
        });
        Duration::from_millis(ms)
    }

    pub(crate) fn match_threshold(&self, flag: Option<u32>) -> u32 {
        pick(flag, self.google_books.match_threshold, || {
            DEFAULT_MATCH_THRESHOLD
        })
        .0
    }

    /// Cover format: flag, then `[covers] extension`, then WebP.
    pub(crate) fn cover_format(
        &self,
        flag: Option<TargetFormat>,
    ) -> Result<TargetFormat, CliError> {
        if let Some(format) = flag {
            return Ok(format);
        }
        match &self.covers.extension {
            Some(ext) => ext
                .parse()
                .map_err(|e| CliError::config(format!("[covers] extension: {}", e))),
            None => Ok(TargetFormat::default()),
        }
    }

    pub(crate) fn cover_quality(&self, flag: Option<u8>) -> u8 {
        pick(flag, self.covers.quality, || DEFAULT_QUALITY)
            .0
            .clamp(1, 100)
    }
}

fn pick<T>(flag: Option<T>, file: Option<T>, default: impl FnOnce() -> T) -> (T, Source) {
    match (flag, file) {
        (Some(v), _) => (v, Source::Flag),
        (None, Some(v)) => (v, Source::ConfigFile),
        (None, None) => (default(), Source::Default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[paths]
database = "/srv/library/holdings.db"
covers_dir = "/srv/library/covers"

[google_books]
api_key = "from-file"
request_delay_ms = 250

[covers]
extension = "jpg"
"#;

    #[test]
    fn parses_partial_file() {
        let settings = Settings::parse(SAMPLE).unwrap();
        assert_eq!(
            settings.paths.database,
            Some(PathBuf::from("/srv/library/holdings.db"))
        );
        assert_eq!(settings.paths.log_dir, None);
        assert_eq!(settings.google_books.request_delay_ms, Some(250));
        assert_eq!(settings.google_books.match_threshold, None);
        assert_eq!(settings.covers.quality, None);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
    }

    #[test]
    fn missing_file_is_all_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("settings.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[paths\ndatabase = 3").unwrap();
        assert!(matches!(
            Settings::load_from(&path),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn database_priority() {
        let settings = Settings::parse(SAMPLE).unwrap();

        let (path, source) = settings.database_from(
            Some(PathBuf::from("flag.db")),
            Some(PathBuf::from("env.db")),
        );
        assert_eq!((path, source), (PathBuf::from("flag.db"), Source::Flag));

        let (path, source) = settings.database_from(None, Some(PathBuf::from("env.db")));
        assert_eq!((path, source), (PathBuf::from("env.db"), Source::EnvVar(DB_ENV)));

        let (path, source) = settings.database_from(None, None);
        assert_eq!(
            (path, source),
            (PathBuf::from("/srv/library/holdings.db"), Source::ConfigFile)
        );

        let (_, source) = Settings::default().database_from(None, Some(PathBuf::new()));
        assert_eq!(source, Source::Default);
    }

    #[test]
    fn directories_fall_back_to_defaults() {
        let settings = Settings::parse(SAMPLE).unwrap();
        assert_eq!(
            settings.covers_dir(None),
            (PathBuf::from("/srv/library/covers"), Source::ConfigFile)
        );
        assert_eq!(
            settings.covers_dir(Some(PathBuf::from("here"))),
            (PathBuf::from("here"), Source::Flag)
        );
        assert_eq!(settings.log_dir(None), (PathBuf::from("."), Source::Default));
    }

    #[test]
    fn google_books_values() {
        let settings = Settings::parse(SAMPLE).unwrap();
        assert_eq!(settings.request_delay(None), Duration::from_millis(250));
        assert_eq!(settings.request_delay(Some(0)), Duration::ZERO);
        assert_eq!(settings.match_threshold(None), DEFAULT_MATCH_THRESHOLD);
        assert_eq!(settings.match_threshold(Some(150)), 150);
        assert_eq!(
            Settings::default().request_delay(None),
            Duration::from_millis(DEFAULT_REQUEST_DELAY_MS)
        );
    }

    #[test]
    fn cover_format_and_quality() {
        let settings = Settings::parse(SAMPLE).unwrap();
        assert_eq!(settings.cover_format(None).unwrap(), TargetFormat::Jpeg);
        assert_eq!(
            settings.cover_format(Some(TargetFormat::Png)).unwrap(),
            TargetFormat::Png
        );
        assert_eq!(
            Settings::default().cover_format(None).unwrap(),
            TargetFormat::Webp
        );
        assert_eq!(settings.cover_quality(None), DEFAULT_QUALITY);
        assert_eq!(settings.cover_quality(Some(0)), 1);

        let bad = Settings::parse("[covers]\nextension = \"tiff\"").unwrap();
        assert!(bad.cover_format(None).is_err());
    }
}
