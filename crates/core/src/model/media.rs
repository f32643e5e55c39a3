use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

//
// ─── ERRORS (domain validation) ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MediaValidationError {
    #[error("audio path cannot be empty")]
    EmptyAudioPath,

    #[error("audio path must be relative to the audio root: {0}")]
    EscapesRoot(String),

    #[error("audio root cannot be empty")]
    EmptyRoot,

    #[error("invalid audio root url: {0}")]
    InvalidRootUrl(String),
}

//
// ─── AUDIO PATH ────────────────────────────────────────────────────────────────
//

/// Relative location of a clip under the audio root, e.g. `driving-1.mp3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AudioPath(String);

impl AudioPath {
    /// Validates a relative clip path.
    ///
    /// # Errors
    ///
    /// Returns `MediaValidationError::EmptyAudioPath` for blank input and
    /// `MediaValidationError::EscapesRoot` for absolute paths, `..` components
    /// or backslash separators.
    pub fn parse(raw: impl Into<String>) -> Result<Self, MediaValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MediaValidationError::EmptyAudioPath);
        }
        if trimmed.contains('\\') || trimmed.starts_with('/') {
            return Err(MediaValidationError::EscapesRoot(trimmed.to_string()));
        }
        let stays_inside = Path::new(trimmed)
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
        if !stays_inside {
            return Err(MediaValidationError::EscapesRoot(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AudioPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for AudioPath {
    type Error = MediaValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<AudioPath> for String {
    fn from(value: AudioPath) -> Self {
        value.0
    }
}

//
// ─── MEDIA LOCATIONS ───────────────────────────────────────────────────────────
//

/// A fully resolved clip location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaUri {
    FilePath(PathBuf),
    Url(Url),
}

impl MediaUri {
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            MediaUri::FilePath(p) => Some(p.as_path()),
            MediaUri::Url(_) => None,
        }
    }

    pub fn as_url(&self) -> Option<&Url> {
        match self {
            MediaUri::Url(u) => Some(u),
            MediaUri::FilePath(_) => None,
        }
    }
}

impl fmt::Display for MediaUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaUri::FilePath(p) => write!(f, "{}", p.display()),
            MediaUri::Url(u) => write!(f, "{u}"),
        }
    }
}

/// Fixed root every lesson clip resolves under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioRoot {
    Dir(PathBuf),
    Url(Url),
}

impl AudioRoot {
    /// Interprets `raw` as a URL when it has an http(s) scheme, otherwise as a
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns `MediaValidationError::EmptyRoot` for blank input and
    /// `MediaValidationError::InvalidRootUrl` when an http(s) value fails to parse.
    pub fn parse(raw: &str) -> Result<Self, MediaValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MediaValidationError::EmptyRoot);
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Self::from_url(trimmed);
        }
        Ok(Self::Dir(PathBuf::from(trimmed)))
    }

    /// # Errors
    ///
    /// Returns `MediaValidationError::InvalidRootUrl` if the url does not parse.
    pub fn from_url(raw: &str) -> Result<Self, MediaValidationError> {
        let mut normalized = raw.trim().to_string();
        // Url::join replaces the last segment unless the base ends in '/'.
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        Url::parse(&normalized)
            .map(Self::Url)
            .map_err(|_| MediaValidationError::InvalidRootUrl(raw.to_string()))
    }

    /// Joins a clip path onto the root.
    ///
    /// # Errors
    ///
    /// Returns `MediaValidationError::InvalidRootUrl` if the joined url is invalid.
    pub fn resolve(&self, path: &AudioPath) -> Result<MediaUri, MediaValidationError> {
        match self {
            AudioRoot::Dir(dir) => Ok(MediaUri::FilePath(dir.join(path.as_str()))),
            AudioRoot::Url(base) => base
                .join(path.as_str())
                .map(MediaUri::Url)
                .map_err(|_| MediaValidationError::InvalidRootUrl(base.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_path_rejects_escapes() {
        assert_eq!(
            AudioPath::parse("  "),
            Err(MediaValidationError::EmptyAudioPath)
        );
        assert!(AudioPath::parse("../secret.mp3").is_err());
        assert!(AudioPath::parse("/etc/passwd").is_err());
        assert!(AudioPath::parse("clips\\a.mp3").is_err());
        assert!(AudioPath::parse("clips/../../a.mp3").is_err());
    }

    #[test]
    fn audio_path_accepts_nested_relative_paths() {
        let path = AudioPath::parse("fr/driving-1_fr.mp3").unwrap();
        assert_eq!(path.as_str(), "fr/driving-1_fr.mp3");
    }

    #[test]
    fn dir_root_joins_path() {
        let root = AudioRoot::parse("audio").unwrap();
        let uri = root.resolve(&AudioPath::parse("driving-1.mp3").unwrap()).unwrap();
        assert_eq!(uri.as_path(), Some(Path::new("audio/driving-1.mp3")));
    }

    #[test]
    fn url_root_keeps_last_segment() {
        let root = AudioRoot::parse("https://cdn.example.com/drill/audio").unwrap();
        let uri = root.resolve(&AudioPath::parse("driving-2.mp3").unwrap()).unwrap();
        assert_eq!(
            uri.as_url().map(Url::as_str),
            Some("https://cdn.example.com/drill/audio/driving-2.mp3")
        );
    }

    #[test]
    fn blank_root_is_rejected() {
        assert_eq!(AudioRoot::parse(" "), Err(MediaValidationError::EmptyRoot));
    }
}
