use std::str::FromStr;

use crate::MediaError;

/// Output formats cover images can be converted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetFormat {
    #[default]
    Webp,
    Jpeg,
    Png,
}

impl TargetFormat {
    /// File extension written for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            TargetFormat::Webp => "webp",
            TargetFormat::Jpeg => "jpg",
            TargetFormat::Png => "png",
        }
    }

    /// Match a file extension, ignoring case. Unknown extensions give `None`.
    pub fn from_str_lossy(ext: &str) -> Option<Self> {
        ext.parse().ok()
    }
}

impl FromStr for TargetFormat {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "webp" => Ok(TargetFormat::Webp),
            "jpg" | "jpeg" => Ok(TargetFormat::Jpeg),
            "png" => Ok(TargetFormat::Png),
            other => Err(MediaError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}
