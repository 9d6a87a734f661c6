use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("media reference cannot be empty")]
    Empty,

    #[error("invalid media url: {0}")]
    InvalidUrl(String),
}

/// Reference to an audio clip or avatar image.
///
/// Bundled assets are addressed by path (`/audio/sample.mp3`); anything with a
/// scheme is parsed as a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaRef {
    Asset(PathBuf),
    Url(Url),
}

impl MediaRef {
    /// Parses a raw reference.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::Empty` for blank input and `MediaError::InvalidUrl`
    /// when the input has a scheme but does not parse.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, MediaError> {
        let s = raw.as_ref().trim();
        if s.is_empty() {
            return Err(MediaError::Empty);
        }
        if s.contains("://") {
            let url = Url::parse(s).map_err(|e| MediaError::InvalidUrl(e.to_string()))?;
            return Ok(MediaRef::Url(url));
        }
        Ok(MediaRef::Asset(PathBuf::from(s)))
    }

    #[must_use]
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            MediaRef::Asset(p) => Some(p.as_path()),
            MediaRef::Url(_) => None,
        }
    }

    #[must_use]
    pub fn as_url(&self) -> Option<&Url> {
        match self {
            MediaRef::Url(u) => Some(u),
            MediaRef::Asset(_) => None,
        }
    }
}

impl fmt::Display for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaRef::Asset(p) => write!(f, "{}", p.display()),
            MediaRef::Url(u) => f.write_str(u.as_str()),
        }
    }
}
