use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use drill_core::model::LessonDocument;
use tracing::debug;

use crate::repository::{LessonRepository, StorageError};

/// Lesson document stored as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `document` as pretty JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if encoding fails and
    /// `StorageError::Io` if the file cannot be written.
    pub async fn write_document(&self, document: &LessonDocument) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(document)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::Io(e.to_string()))?;
        }
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;
        debug!(path = %self.path.display(), lessons = document.lessons.len(), "wrote lesson document");
        Ok(())
    }
}

#[async_trait]
impl LessonRepository for JsonFileRepository {
    async fn load_document(&self) -> Result<LessonDocument, StorageError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StorageError::NotFound(self.path.display().to_string())
            } else {
                StorageError::Io(e.to_string())
            }
        })?;
        serde_json::from_slice(&bytes).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
