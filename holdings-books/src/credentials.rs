//! Google Books API key resolution.
//!
//! The key is optional; anonymous requests work with a lower quota.
//! Priority: explicit value (CLI flag) > env var > settings file.

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GOOGLE_BOOKS_API_KEY";

/// Where the API key came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Passed on the command line.
    Flag,
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the settings file.
    ConfigFile,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag => write!(f, "command line"),
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey {
    pub key: Option<String>,
    pub source: KeySource,
}

impl ApiKey {
    /// Resolve the key from a CLI value, the environment, and the settings file.
    pub fn resolve(flag: Option<String>, config: Option<String>) -> Self {
        Self::resolve_from(flag, std::env::var(API_KEY_ENV).ok(), config)
    }

    /// Resolve with the environment value supplied by the caller.
    pub fn resolve_from(flag: Option<String>, env: Option<String>, config: Option<String>) -> Self {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        if let Some(key) = non_empty(flag) {
            return Self {
                key: Some(key),
                source: KeySource::Flag,
            };
        }
        if let Some(key) = non_empty(env) {
            return Self {
                key: Some(key),
                source: KeySource::EnvVar(API_KEY_ENV),
            };
        }
        if let Some(key) = non_empty(config) {
            return Self {
                key: Some(key),
                source: KeySource::ConfigFile,
            };
        }
        Self {
            key: None,
            source: KeySource::Missing,
        }
    }

    /// The key with all but the last four characters hidden.
    pub fn masked(&self) -> Option<String> {
        self.key.as_ref().map(|k| {
            let chars: Vec<char> = k.chars().collect();
            let visible = chars.len().min(4);
            let hidden = chars.len() - visible;
            let tail: String = chars[hidden..].iter().collect();
            format!("{}{}", "*".repeat(hidden), tail)
        })
    }
}
