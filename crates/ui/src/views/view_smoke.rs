use std::sync::Arc;

use drill_core::model::{LessonDocument, LessonDraft};
use services::LessonService;
use storage::repository::InMemoryRepository;

use super::test_harness::{ViewKind, setup_view_harness, test_services};

fn document() -> LessonDocument {
    let lesson = |id: u64, chinese: &str, english: &str| LessonDraft {
        id,
        chinese: chinese.into(),
        pinyin: format!("pinyin {id}"),
        literal: format!("literal {id}"),
        english: english.into(),
        french: Some(format!("français {id}")),
        french_audio_file: Some(format!("driving-{id}_fr.mp3")),
        audio_file: format!("driving-{id}.mp3"),
        source: Some("chinese-driving".into()),
    };
    LessonDocument {
        total_lessons: 2,
        lessons_with_french: Some(2),
        total_characters: None,
        lessons: vec![
            lesson(3, "夜间通过没有交通信号灯控制的路口", "Alternating beams"),
            lesson(4, "夜间在道路上发生故障", "Width + alarm lights"),
        ],
    }
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_renders_first_lesson() {
    let mut harness = setup_view_harness(ViewKind::Study, test_services(Some(document())));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Lesson 1 of 2"), "missing position in {html}");
    assert!(html.contains("夜间通过没有交通信号灯控制的路口"), "missing lesson in {html}");
    assert!(html.contains("Passing Scenario"), "missing category in {html}");
    assert!(html.contains("français 3"), "missing french in {html}");
    assert!(html.contains("play-secondary"), "missing french audio button in {html}");
    assert!(!html.contains("notice--warning"), "unexpected warning in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_falls_back_with_warning() {
    let mut harness = setup_view_harness(ViewKind::Study, test_services(None));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Lesson 1 of 3"), "missing position in {html}");
    assert!(html.contains("请打开前照灯"), "missing built-in lesson in {html}");
    assert!(html.contains("notice--warning"), "missing warning in {html}");
    assert!(
        !html.contains("play-secondary"),
        "french audio button shown for a lesson without french: {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_smoke_hides_study_card() {
    let mut harness = setup_view_harness(ViewKind::Practice, test_services(Some(document())));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("practice-answer"), "missing answer field in {html}");
    assert!(html.contains("play-primary"), "missing audio trigger in {html}");
    assert!(!html.contains("lesson-pinyin"), "pinyin visible in practice: {html}");
    assert!(!html.contains("lesson-chinese"), "chinese visible in practice: {html}");
    assert!(!html.contains("practice-enter"), "practice button still shown: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_shows_fatal_view_without_lessons() {
    let services = test_services(None).with_lesson_service(
        LessonService::new(Arc::new(InMemoryRepository::new())).with_fallback(Vec::new()),
    );
    let mut harness = setup_view_harness(ViewKind::Study, services);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No lessons could be loaded."), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Quiz, test_services(Some(document())));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Question 1 of 2"), "missing position in {html}");
    assert!(html.contains("Width + alarm lights"), "missing option in {html}");
    assert!(html.contains("Score: 0"), "missing score in {html}");
}
