use std::sync::Arc;

use drill_core::model::LessonStore;
use drill_core::quiz::QuizRound;
use services::{
    AppServices, AudioService, LessonServiceError, PlaybackBackend, QuizServiceError,
    StudySession,
};

pub trait UiApp: Send + Sync {
    fn services(&self) -> Arc<AppServices>;
}

#[derive(Clone)]
pub struct AppContext {
    services: Arc<AppServices>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            services: app.services(),
        }
    }

    #[must_use]
    pub fn services(&self) -> Arc<AppServices> {
        Arc::clone(&self.services)
    }

    /// # Errors
    ///
    /// Returns `LessonServiceError` when neither the lesson data nor the
    /// built-in lessons can be loaded.
    pub async fn open_session(&self) -> Result<StudySession, LessonServiceError> {
        self.services.open_session().await
    }

    #[must_use]
    pub fn audio_service(&self, backend: Arc<dyn PlaybackBackend>) -> AudioService {
        self.services.audio_service(backend)
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError` if the round cannot be dealt.
    pub fn start_quiz(&self, store: &LessonStore) -> Result<QuizRound, QuizServiceError> {
        self.services.quiz().start(store)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
