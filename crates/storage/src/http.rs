use async_trait::async_trait;
use drill_core::model::LessonDocument;
use url::Url;

use crate::repository::{LessonRepository, StorageError};

/// Lesson document fetched over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpLessonRepository {
    url: Url,
    client: reqwest::Client,
}

impl HttpLessonRepository {
    #[must_use]
    pub fn new(url: Url, client: reqwest::Client) -> Self {
        Self { url, client }
    }
}

#[async_trait]
impl LessonRepository for HttpLessonRepository {
    async fn load_document(&self) -> Result<LessonDocument, StorageError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(self.url.to_string()));
        }
        if !response.status().is_success() {
            return Err(StorageError::Connection(format!(
                "{} returned {}",
                self.url,
                response.status()
            )));
        }
        response
            .json::<LessonDocument>()
            .await
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}
