#![forbid(unsafe_code)]

pub mod app_services;
pub mod audio_service;
pub mod error;
pub mod import_service;
pub mod lesson_service;
pub mod quiz_service;
pub mod sessions;

pub use drill_core::Clock;
pub use sessions as session;

pub use app_services::AppServices;
pub use audio_service::{AudioService, BackendError, PlaybackBackend, PlaybackRequest};
pub use error::{AudioError, ImportServiceError, LessonServiceError, QuizServiceError};
pub use import_service::ImportService;
pub use lesson_service::{LessonOrigin, LessonService, LoadedLessons, fallback_lessons};
pub use quiz_service::QuizService;
pub use sessions::{SessionEffect, SessionIntent, StudySession, ViewMode};
