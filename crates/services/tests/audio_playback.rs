use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use drill_core::audio::{AudioVariant, PlaybackStatus, PlaybackTicket};
use drill_core::model::{AudioRoot, LessonDraft, LessonStore, MediaUri};
use drill_core::time::fixed_clock;
use services::{
    AudioError, AudioService, BackendError, PlaybackBackend, PlaybackRequest, SessionEffect,
    SessionIntent, StudySession,
};
use storage::media::InMemoryMediaStore;
use storage::{AudioSource, MediaStore, ProbeError};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Start(u64),
    Stop,
}

/// Records calls and the number of clips live at once.
#[derive(Default)]
struct RecordingBackend {
    events: Mutex<Vec<Event>>,
    live: Mutex<usize>,
    max_live: Mutex<usize>,
    refuse: bool,
}

#[async_trait(?Send)]
impl PlaybackBackend for RecordingBackend {
    async fn start(&self, ticket: PlaybackTicket, _source: AudioSource) -> Result<(), BackendError> {
        if self.refuse {
            return Err(BackendError("decoder rejected clip".into()));
        }
        self.events
            .lock()
            .unwrap()
            .push(Event::Start(ticket.generation.value()));
        let mut live = self.live.lock().unwrap();
        *live += 1;
        let mut max = self.max_live.lock().unwrap();
        *max = (*max).max(*live);
        Ok(())
    }

    async fn stop(&self) {
        self.events.lock().unwrap().push(Event::Stop);
        *self.live.lock().unwrap() = 0;
    }
}

/// Yields once before loading so two requests can interleave.
struct SlowMediaStore(InMemoryMediaStore);

#[async_trait]
impl MediaStore for SlowMediaStore {
    async fn probe(&self, uri: &MediaUri) -> Result<(), ProbeError> {
        self.0.probe(uri).await
    }

    async fn load(&self, uri: &MediaUri) -> Result<AudioSource, ProbeError> {
        tokio::task::yield_now().await;
        self.0.load(uri).await
    }
}

fn session() -> StudySession {
    let drafts = (1..=2)
        .map(|id| LessonDraft {
            id,
            chinese: format!("请开启近光灯{id}"),
            pinyin: format!("Qǐng kāiqǐ jìnguāngdēng {id}"),
            literal: String::new(),
            english: "Low beam".into(),
            french: None,
            french_audio_file: None,
            audio_file: format!("driving-{id}.mp3"),
            source: None,
        })
        .collect();
    StudySession::new(
        LessonStore::from_drafts(drafts).unwrap(),
        AudioRoot::parse("audio").unwrap(),
        fixed_clock(),
    )
}

fn media_with_clips() -> InMemoryMediaStore {
    let media = InMemoryMediaStore::new();
    for id in 1..=2 {
        media.insert(
            &MediaUri::FilePath(format!("audio/driving-{id}.mp3").into()),
            vec![0xFF, 0xFB],
        );
    }
    media
}

fn request(effect: Option<SessionEffect>) -> PlaybackRequest {
    match effect {
        Some(SessionEffect::StartPlayback(request)) => request,
        other => panic!("expected playback start, got {other:?}"),
    }
}

#[tokio::test]
async fn only_one_clip_is_ever_live() {
    let backend = Arc::new(RecordingBackend::default());
    let audio = AudioService::new(Arc::new(media_with_clips()), backend.clone());
    let mut session = session();

    let first = request(session.dispatch(SessionIntent::PlayAudio(AudioVariant::Primary)));
    audio.start(&first).await.unwrap();
    session.dispatch(SessionIntent::PlaybackStarted(first.ticket.generation));

    let second = request(session.dispatch(SessionIntent::PlayAudio(AudioVariant::Primary)));
    audio.start(&second).await.unwrap();
    session.dispatch(SessionIntent::PlaybackStarted(second.ticket.generation));

    assert_eq!(
        *backend.events.lock().unwrap(),
        vec![
            Event::Stop,
            Event::Start(first.ticket.generation.value()),
            Event::Stop,
            Event::Start(second.ticket.generation.value()),
        ]
    );
    assert_eq!(*backend.max_live.lock().unwrap(), 1);
    assert_eq!(session.playback_status(), PlaybackStatus::Playing(second.ticket));
}

#[tokio::test]
async fn slower_older_request_never_starts() {
    let backend = Arc::new(RecordingBackend::default());
    let audio = AudioService::new(
        Arc::new(SlowMediaStore(media_with_clips())),
        backend.clone(),
    );
    let mut session = session();
    let first = request(session.dispatch(SessionIntent::PlayAudio(AudioVariant::Primary)));
    session.dispatch(SessionIntent::NextLesson);
    let second = request(session.dispatch(SessionIntent::PlayAudio(AudioVariant::Primary)));

    let (older, newer) = tokio::join!(audio.start(&first), audio.start(&second));
    assert_eq!(older, Err(AudioError::Superseded));
    assert_eq!(newer, Ok(()));
    let starts: Vec<_> = backend
        .events
        .lock()
        .unwrap()
        .iter()
        .filter(|event| matches!(event, Event::Start(_)))
        .cloned()
        .collect();
    assert_eq!(starts, vec![Event::Start(second.ticket.generation.value())]);
}

#[tokio::test]
async fn stop_discards_pending_request() {
    let backend = Arc::new(RecordingBackend::default());
    let audio = AudioService::new(
        Arc::new(SlowMediaStore(media_with_clips())),
        backend.clone(),
    );
    let mut session = session();
    let pending = request(session.dispatch(SessionIntent::PlayAudio(AudioVariant::Primary)));
    let Some(SessionEffect::StopPlayback(generation)) = session.dispatch(SessionIntent::NextLesson)
    else {
        panic!("navigation should stop playback");
    };

    let (started, ()) = tokio::join!(audio.start(&pending), audio.stop(generation));
    assert_eq!(started, Err(AudioError::Superseded));
    assert!(
        !backend
            .events
            .lock()
            .unwrap()
            .iter()
            .any(|event| matches!(event, Event::Start(_)))
    );
}

#[tokio::test]
async fn missing_clip_is_reported_before_playback() {
    let backend = Arc::new(RecordingBackend::default());
    let audio = AudioService::new(Arc::new(InMemoryMediaStore::new()), backend.clone());
    let mut session = session();

    let req = request(session.dispatch(SessionIntent::PlayAudio(AudioVariant::Primary)));
    let err = audio.start(&req).await.unwrap_err();
    assert_eq!(err, AudioError::NotFound("audio/driving-1.mp3".into()));

    session.dispatch(SessionIntent::PlaybackFailed(req.ticket.generation, err));
    assert!(matches!(
        session.playback_status(),
        PlaybackStatus::Error { .. }
    ));
    assert_eq!(session.notices()[0].message, "Audio file not found: audio/driving-1.mp3");
}

#[tokio::test]
async fn backend_refusal_maps_to_playback_failed() {
    let backend = Arc::new(RecordingBackend {
        refuse: true,
        ..RecordingBackend::default()
    });
    let audio = AudioService::new(Arc::new(media_with_clips()), backend);
    let mut session = session();
    let req = request(session.dispatch(SessionIntent::PlayAudio(AudioVariant::Primary)));
    assert_eq!(
        audio.start(&req).await,
        Err(AudioError::PlaybackFailed("decoder rejected clip".into()))
    );
}
