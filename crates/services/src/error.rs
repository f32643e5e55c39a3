//! Shared error types for the services crate.

use thiserror::Error;

use drill_core::import::ImportError;
use drill_core::model::{LessonStoreError, MediaValidationError};
use drill_core::quiz::QuizError;
use storage::{ProbeError, StorageError};

/// Errors emitted by `LessonService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LessonServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Store(#[from] LessonStoreError),
    #[error("built-in lessons are unusable: {0}")]
    FallbackUnusable(#[source] LessonStoreError),
}

/// Errors emitted while resolving or playing a clip.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AudioError {
    #[error("No French audio available for this lesson")]
    NoSecondaryAudio,
    #[error("Audio file not found: {0}")]
    NotFound(String),
    #[error("Audio file unreachable: {0}")]
    Unreachable(String),
    #[error("Audio playback failed: {0}")]
    PlaybackFailed(String),
    #[error("Invalid audio location: {0}")]
    InvalidPath(#[from] MediaValidationError),
    #[error("playback superseded by a newer request")]
    Superseded,
}

impl From<ProbeError> for AudioError {
    fn from(err: ProbeError) -> Self {
        match err {
            ProbeError::NotFound(what) => Self::NotFound(what),
            ProbeError::Unreachable(why) => Self::Unreachable(why),
            other => Self::Unreachable(other.to_string()),
        }
    }
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
}

/// Errors emitted by `ImportService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportServiceError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ImportError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
