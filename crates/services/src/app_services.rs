use std::sync::Arc;

use drill_core::model::AudioRoot;
use storage::{LessonLocation, MediaStore, Storage};

use crate::Clock;
use crate::audio_service::{AudioService, PlaybackBackend};
use crate::error::LessonServiceError;
use crate::import_service::ImportService;
use crate::lesson_service::LessonService;
use crate::quiz_service::QuizService;
use crate::sessions::StudySession;

/// Assembles app-facing services from storage and the audio root.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    audio_root: AudioRoot,
    lessons: Arc<LessonService>,
    media: Arc<dyn MediaStore>,
    quiz: QuizService,
    import: ImportService,
}

impl AppServices {
    #[must_use]
    pub fn new(storage: Storage, audio_root: AudioRoot, clock: Clock) -> Self {
        Self {
            clock,
            audio_root,
            lessons: Arc::new(LessonService::new(Arc::clone(&storage.lessons))),
            media: Arc::clone(&storage.media),
            quiz: QuizService::new(),
            import: ImportService::new(),
        }
    }

    /// Services reading lessons from a file path or URL.
    #[must_use]
    pub fn from_location(location: &LessonLocation, audio_root: AudioRoot, clock: Clock) -> Self {
        Self::new(Storage::from_location(location), audio_root, clock)
    }

    #[must_use]
    pub fn with_lesson_service(mut self, lessons: LessonService) -> Self {
        self.lessons = Arc::new(lessons);
        self
    }

    /// Load lessons (falling back when needed) and open a study session.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError::FallbackUnusable` when no lessons can be
    /// produced at all.
    pub async fn open_session(&self) -> Result<StudySession, LessonServiceError> {
        let loaded = self.lessons.load().await?;
        Ok(StudySession::from_loaded(
            loaded,
            self.audio_root.clone(),
            self.clock,
        ))
    }

    #[must_use]
    pub fn audio_service(&self, backend: Arc<dyn PlaybackBackend>) -> AudioService {
        AudioService::new(Arc::clone(&self.media), backend)
    }

    #[must_use]
    pub fn audio_root(&self) -> &AudioRoot {
        &self.audio_root
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn quiz(&self) -> QuizService {
        self.quiz
    }

    #[must_use]
    pub fn import(&self) -> ImportService {
        self.import
    }
}
