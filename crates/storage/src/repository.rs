use async_trait::async_trait;
use drill_core::model::LessonDocument;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::http::HttpLessonRepository;
use crate::json_file::JsonFileRepository;
use crate::media::{LocalMediaStore, MediaStore};

/// Errors surfaced by lesson data adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Where the lesson document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonLocation {
    File(std::path::PathBuf),
    Url(url::Url),
}

impl LessonLocation {
    /// `http(s)://...` is a URL, anything else a file path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            if let Ok(url) = url::Url::parse(trimmed) {
                return Self::Url(url);
            }
        }
        Self::File(std::path::PathBuf::from(trimmed))
    }
}

impl std::fmt::Display for LessonLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Read access to the lesson document.
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// Fetch and decode the lesson document.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the resource is missing,
    /// `StorageError::Serialization` if it is malformed, or other storage errors.
    async fn load_document(&self) -> Result<LessonDocument, StorageError>;

    /// Human-readable origin, used in logs and notices.
    fn describe(&self) -> String;
}

/// In-memory document source for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    document: Arc<Mutex<Option<LessonDocument>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_document(document: LessonDocument) -> Self {
        Self {
            document: Arc::new(Mutex::new(Some(document))),
        }
    }

    /// Replace (or clear) the document served by `load_document`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn set_document(&self, document: Option<LessonDocument>) -> Result<(), StorageError> {
        let mut guard = self
            .document
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = document;
        Ok(())
    }
}

#[async_trait]
impl LessonRepository for InMemoryRepository {
    async fn load_document(&self) -> Result<LessonDocument, StorageError> {
        let guard = self
            .document
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .clone()
            .ok_or_else(|| StorageError::NotFound("in-memory lessons".to_string()))
    }

    fn describe(&self) -> String {
        "in-memory lessons".to_string()
    }
}

/// Aggregates the lesson source and media store behind trait objects.
#[derive(Clone)]
pub struct Storage {
    pub lessons: Arc<dyn LessonRepository>,
    pub media: Arc<dyn MediaStore>,
}

impl Storage {
    /// File or HTTP lesson source plus the local media store.
    #[must_use]
    pub fn from_location(location: &LessonLocation) -> Self {
        let media = Arc::new(LocalMediaStore::new());
        let lessons: Arc<dyn LessonRepository> = match location {
            LessonLocation::File(path) => Arc::new(JsonFileRepository::new(path.clone())),
            LessonLocation::Url(url) => {
                Arc::new(HttpLessonRepository::new(url.clone(), media.client()))
            }
        };
        Self { lessons, media }
    }

    #[must_use]
    pub fn in_memory(document: Option<LessonDocument>) -> Self {
        let repo = InMemoryRepository::new();
        let _ = repo.set_document(document);
        Self {
            lessons: Arc::new(repo),
            media: Arc::new(crate::media::InMemoryMediaStore::new()),
        }
    }
}
