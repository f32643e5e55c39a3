use std::sync::Arc;

use drill_core::model::{AudioRoot, LessonDocument, LessonDraft};
use drill_core::notice::NoticeLevel;
use drill_core::time::fixed_now;
use services::{AppServices, Clock, LessonOrigin, LessonService, LessonServiceError};
use storage::Storage;
use storage::repository::InMemoryRepository;

fn draft(id: u64) -> LessonDraft {
    LessonDraft {
        id,
        chinese: format!("请打开远光灯{id}"),
        pinyin: format!("Qǐng dǎkāi yuǎnguāngdēng {id}"),
        literal: "Please open far-light-lamp".into(),
        english: "High beam".into(),
        french: None,
        french_audio_file: None,
        audio_file: format!("driving-{id}.mp3"),
        source: Some("chinese-driving".into()),
    }
}

fn document(ids: &[u64]) -> LessonDocument {
    LessonDocument {
        total_lessons: ids.len(),
        lessons_with_french: None,
        total_characters: None,
        lessons: ids.iter().copied().map(draft).collect(),
    }
}

#[tokio::test]
async fn loads_lessons_from_repository() {
    let repo = InMemoryRepository::with_document(document(&[1, 2, 5]));
    let loaded = LessonService::new(Arc::new(repo)).load().await.unwrap();
    assert_eq!(loaded.store.len(), 3);
    assert_eq!(loaded.origin, LessonOrigin::Resource("in-memory lessons".into()));
}

#[tokio::test]
async fn missing_resource_falls_back_to_built_in_lessons() {
    let service = LessonService::new(Arc::new(InMemoryRepository::new()));
    let loaded = service.load().await.unwrap();
    assert!(loaded.origin.is_fallback());
    assert_eq!(loaded.store.len(), 3);
}

#[tokio::test]
async fn invalid_document_falls_back() {
    let bad = document(&[1, 1]);
    let service = LessonService::new(Arc::new(InMemoryRepository::with_document(bad)));
    let loaded = service.load().await.unwrap();
    assert!(loaded.origin.is_fallback());
}

#[tokio::test]
async fn unusable_fallback_is_reported() {
    let service =
        LessonService::new(Arc::new(InMemoryRepository::new())).with_fallback(Vec::new());
    assert!(matches!(
        service.load().await,
        Err(LessonServiceError::FallbackUnusable(_))
    ));
}

#[tokio::test]
async fn degraded_session_opens_with_warning() {
    let services = AppServices::new(
        Storage::in_memory(None),
        AudioRoot::parse("audio").unwrap(),
        Clock::fixed(fixed_now()),
    );
    let session = services.open_session().await.unwrap();
    assert_eq!(session.len(), 3);
    assert_eq!(session.progress().total(), 3);
    let notices = session.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Warning);
}
