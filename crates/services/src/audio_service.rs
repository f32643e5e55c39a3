use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use drill_core::audio::{PlaybackGeneration, PlaybackTicket};
use drill_core::model::MediaUri;
use storage::{AudioSource, MediaStore};
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::AudioError;

/// One clip to play, as produced by the study session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackRequest {
    pub ticket: PlaybackTicket,
    pub uri: MediaUri,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct BackendError(pub String);

/// The thing that actually makes sound.
///
/// Implementations report natural completion out of band, tagged with the
/// ticket's generation.
#[async_trait(?Send)]
pub trait PlaybackBackend: Send + Sync {
    /// # Errors
    ///
    /// Returns `BackendError` when the clip could not be started.
    async fn start(&self, ticket: PlaybackTicket, source: AudioSource) -> Result<(), BackendError>;

    async fn stop(&self);
}

/// Resolves, pre-checks and plays clips. The newest request always wins.
#[derive(Clone)]
pub struct AudioService {
    media: Arc<dyn MediaStore>,
    backend: Arc<dyn PlaybackBackend>,
    latest: Arc<AtomicU64>,
}

impl AudioService {
    #[must_use]
    pub fn new(media: Arc<dyn MediaStore>, backend: Arc<dyn PlaybackBackend>) -> Self {
        Self {
            media,
            backend,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Stop whatever is playing, check the clip, then start it.
    ///
    /// # Errors
    ///
    /// Returns `AudioError::NotFound`/`Unreachable` from the pre-check,
    /// `AudioError::PlaybackFailed` if the backend refuses the clip, and
    /// `AudioError::Superseded` when a newer request arrived meanwhile.
    pub async fn start(&self, request: &PlaybackRequest) -> Result<(), AudioError> {
        let generation = request.ticket.generation.value();
        let previous = self.latest.fetch_max(generation, Ordering::SeqCst);
        if previous > generation {
            return Err(AudioError::Superseded);
        }
        self.backend.stop().await;

        let result = self.prepare(&request.uri).await;
        if self.latest.load(Ordering::SeqCst) != generation {
            debug!(generation, "playback request superseded");
            return Err(AudioError::Superseded);
        }
        let source = result.inspect_err(|err| {
            warn!(uri = %request.uri, error = %err, "audio pre-check failed");
        })?;

        self.backend
            .start(request.ticket, source)
            .await
            .map_err(|err| {
                warn!(uri = %request.uri, error = %err, "audio playback failed");
                AudioError::PlaybackFailed(err.0)
            })?;
        debug!(generation, uri = %request.uri, "playback started");
        Ok(())
    }

    /// Stop playback and drop any request older than `generation`.
    pub async fn stop(&self, generation: PlaybackGeneration) {
        self.latest.fetch_max(generation.value(), Ordering::SeqCst);
        self.backend.stop().await;
    }

    async fn prepare(&self, uri: &MediaUri) -> Result<AudioSource, AudioError> {
        self.media.probe(uri).await?;
        Ok(self.media.load(uri).await?)
    }
}
