use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use drill_core::model::MediaUri;
use thiserror::Error;
use url::Url;

/// Pre-flight failures for an audio clip.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProbeError {
    #[error("audio file not found: {0}")]
    NotFound(String),

    #[error("audio file unreachable: {0}")]
    Unreachable(String),
}

/// A clip ready to hand to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioSource {
    /// Bytes read from disk; played through a data url.
    Inline { mime: &'static str, bytes: Vec<u8> },
    /// Remote clip the player streams itself.
    Remote(Url),
}

/// MIME type guessed from the file extension; mp3 when unknown.
#[must_use]
pub fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("wav") => "audio/wav",
        Some("ogg" | "oga") => "audio/ogg",
        Some("m4a" | "mp4") => "audio/mp4",
        Some("webm") => "audio/webm",
        _ => "audio/mpeg",
    }
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Check the clip exists without reading it.
    ///
    /// # Errors
    ///
    /// Returns `ProbeError::NotFound` when the clip is missing and
    /// `ProbeError::Unreachable` for any other failure.
    async fn probe(&self, uri: &MediaUri) -> Result<(), ProbeError>;

    /// Prepare the clip for playback.
    ///
    /// # Errors
    ///
    /// Same as [`MediaStore::probe`].
    async fn load(&self, uri: &MediaUri) -> Result<AudioSource, ProbeError>;
}

/// Reads clips from disk and probes remote clips with `HEAD`.
#[derive(Debug, Clone, Default)]
pub struct LocalMediaStore {
    client: reqwest::Client,
}

impl LocalMediaStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared HTTP client, reused by the lesson repository.
    #[must_use]
    pub fn client(&self) -> reqwest::Client {
        self.client.clone()
    }

    async fn head(&self, url: &Url) -> Result<(), ProbeError> {
        let response = self
            .client
            .head(url.clone())
            .send()
            .await
            .map_err(|e| ProbeError::Unreachable(e.to_string()))?;
        match response.status() {
            status if status.is_success() => Ok(()),
            reqwest::StatusCode::NOT_FOUND | reqwest::StatusCode::GONE => {
                Err(ProbeError::NotFound(url.to_string()))
            }
            status => Err(ProbeError::Unreachable(format!("{url} returned {status}"))),
        }
    }
}

fn io_probe_error(path: &Path, err: &std::io::Error) -> ProbeError {
    if err.kind() == ErrorKind::NotFound {
        ProbeError::NotFound(path.display().to_string())
    } else {
        ProbeError::Unreachable(format!("{}: {err}", path.display()))
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn probe(&self, uri: &MediaUri) -> Result<(), ProbeError> {
        match uri {
            MediaUri::FilePath(path) => {
                let meta = tokio::fs::metadata(path)
                    .await
                    .map_err(|e| io_probe_error(path, &e))?;
                if meta.is_file() {
                    Ok(())
                } else {
                    Err(ProbeError::NotFound(path.display().to_string()))
                }
            }
            MediaUri::Url(url) => self.head(url).await,
        }
    }

    async fn load(&self, uri: &MediaUri) -> Result<AudioSource, ProbeError> {
        match uri {
            MediaUri::FilePath(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .map_err(|e| io_probe_error(path, &e))?;
                Ok(AudioSource::Inline {
                    mime: mime_for(path),
                    bytes,
                })
            }
            MediaUri::Url(url) => Ok(AudioSource::Remote(url.clone())),
        }
    }
}

/// Clips keyed by their resolved uri, for tests.
#[derive(Clone, Default)]
pub struct InMemoryMediaStore {
    clips: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryMediaStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, uri: &MediaUri, bytes: Vec<u8>) {
        if let Ok(mut guard) = self.clips.lock() {
            guard.insert(uri.to_string(), bytes);
        }
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn probe(&self, uri: &MediaUri) -> Result<(), ProbeError> {
        let guard = self
            .clips
            .lock()
            .map_err(|e| ProbeError::Unreachable(e.to_string()))?;
        if guard.contains_key(&uri.to_string()) {
            Ok(())
        } else {
            Err(ProbeError::NotFound(uri.to_string()))
        }
    }

    async fn load(&self, uri: &MediaUri) -> Result<AudioSource, ProbeError> {
        let guard = self
            .clips
            .lock()
            .map_err(|e| ProbeError::Unreachable(e.to_string()))?;
        let bytes = guard
            .get(&uri.to_string())
            .cloned()
            .ok_or_else(|| ProbeError::NotFound(uri.to_string()))?;
        match uri {
            MediaUri::FilePath(path) => Ok(AudioSource::Inline {
                mime: mime_for(path),
                bytes,
            }),
            MediaUri::Url(url) => Ok(AudioSource::Remote(url.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_follows_extension() {
        assert_eq!(mime_for(Path::new("a.MP3")), "audio/mpeg");
        assert_eq!(mime_for(Path::new("a.wav")), "audio/wav");
        assert_eq!(mime_for(Path::new("noext")), "audio/mpeg");
    }

    #[tokio::test]
    async fn in_memory_store_reports_missing_clip() {
        let store = InMemoryMediaStore::new();
        let present = MediaUri::FilePath("audio/driving-1.mp3".into());
        let missing = MediaUri::FilePath("audio/driving-2.mp3".into());
        store.insert(&present, vec![1, 2, 3]);

        assert_eq!(store.probe(&present).await, Ok(()));
        assert_eq!(
            store.probe(&missing).await,
            Err(ProbeError::NotFound("audio/driving-2.mp3".into()))
        );
        assert_eq!(
            store.load(&present).await,
            Ok(AudioSource::Inline {
                mime: "audio/mpeg",
                bytes: vec![1, 2, 3]
            })
        );
    }
}
