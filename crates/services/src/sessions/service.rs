use chrono::{DateTime, Duration, Utc};
use drill_core::Clock;
use drill_core::audio::{AudioVariant, PlaybackSlot, PlaybackStatus};
use drill_core::model::{AudioRoot, Lesson, LessonId, LessonStore};
use drill_core::navigation::Navigator;
use drill_core::notice::{Notice, NoticeLevel, NoticeBoard};
use drill_core::practice::{CheckOutcome, PracticeError, PracticeState};
use drill_core::progress::ProgressTracker;
use tracing::{debug, info, warn};

use super::intent::{SessionEffect, SessionIntent, ViewMode};
use crate::audio_service::PlaybackRequest;
use crate::error::AudioError;
use crate::lesson_service::{LessonOrigin, LoadedLessons};

/// Single owner of all study state.
///
/// Every change goes through [`StudySession::dispatch`]; I/O is returned as a
/// [`SessionEffect`] and its outcome comes back as another intent.
#[derive(Debug, Clone)]
pub struct StudySession {
    clock: Clock,
    store: LessonStore,
    audio_root: AudioRoot,
    nav: Navigator,
    view: ViewMode,
    practice: PracticeState,
    progress: ProgressTracker,
    playback: PlaybackSlot,
    notices: NoticeBoard,
}

impl StudySession {
    #[must_use]
    pub fn new(store: LessonStore, audio_root: AudioRoot, clock: Clock) -> Self {
        let nav = Navigator::new(store.len());
        let progress = ProgressTracker::new(store.len());
        Self {
            clock,
            store,
            audio_root,
            nav,
            view: ViewMode::Study,
            practice: PracticeState::default(),
            progress,
            playback: PlaybackSlot::new(),
            notices: NoticeBoard::new(),
        }
    }

    /// Start from a load result, announcing degraded mode.
    #[must_use]
    pub fn from_loaded(loaded: LoadedLessons, audio_root: AudioRoot, clock: Clock) -> Self {
        let mut session = Self::new(loaded.store, audio_root, clock);
        if let LessonOrigin::Fallback { reason } = &loaded.origin {
            session.post_notice(
                NoticeLevel::Warning,
                format!("Could not load lessons ({reason}); using built-in lessons"),
            );
        }
        session
    }

    // ─── Queries ───────────────────────────────────────────────────────────

    #[must_use]
    pub fn store(&self) -> &LessonStore {
        &self.store
    }

    #[must_use]
    pub fn current_lesson(&self) -> Option<&Lesson> {
        self.store.get(self.nav.index())
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.nav.index()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.nav.can_go_previous()
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.nav.can_go_next()
    }

    #[must_use]
    pub fn progress_percent(&self) -> f32 {
        self.nav.progress_percent()
    }

    #[must_use]
    pub fn view(&self) -> ViewMode {
        self.view
    }

    #[must_use]
    pub fn practice(&self) -> &PracticeState {
        &self.practice
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    #[must_use]
    pub fn playback_status(&self) -> PlaybackStatus {
        self.playback.status_at(self.clock.now())
    }

    /// Notices still visible now, oldest first.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.active(self.clock.now()).cloned().collect()
    }

    /// Tests drive a fixed clock forward through this.
    pub fn advance_clock(&mut self, delta: Duration) {
        self.clock.advance(delta);
    }

    /// Earliest moment a notice or the error label is due to expire.
    #[must_use]
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        match (self.notices.next_expiry(), self.playback.error_until()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Whether a [`SessionIntent::Tick`] would change anything right now.
    #[must_use]
    pub fn tick_due(&self) -> bool {
        self.next_deadline()
            .is_some_and(|deadline| deadline <= self.clock.now())
    }

    pub fn post_notice(&mut self, level: NoticeLevel, message: impl Into<String>) {
        let now = self.clock.now();
        self.notices.post(level, message, now);
    }

    // ─── Dispatch ──────────────────────────────────────────────────────────

    /// Apply one intent. The returned effect, if any, must be carried out by
    /// the caller.
    pub fn dispatch(&mut self, intent: SessionIntent) -> Option<SessionEffect> {
        if intent != SessionIntent::Tick {
            debug!(?intent, "session intent");
        }
        match intent {
            SessionIntent::NextLesson => self.navigate(Navigator::next),
            SessionIntent::PreviousLesson => self.navigate(Navigator::previous),
            SessionIntent::JumpTo(index) => self.navigate(|nav| nav.go_to(index).is_ok()),
            SessionIntent::PlayAudio(variant) => {
                let id = self.current_lesson()?.id();
                self.request_playback(id, variant)
            }
            SessionIntent::PlayLessonAudio(id, variant) => self.request_playback(id, variant),
            SessionIntent::EnterPractice => {
                self.view = ViewMode::Practice;
                self.practice.reset();
                None
            }
            SessionIntent::ExitPractice => {
                self.view = ViewMode::Study;
                self.practice.reset();
                None
            }
            SessionIntent::SetPracticeMode(mode) => {
                self.practice.switch_mode(mode);
                None
            }
            SessionIntent::EditAnswer(text) => {
                self.practice.set_input(text);
                None
            }
            SessionIntent::CheckAnswer => {
                self.check_answer();
                None
            }
            SessionIntent::ShowAnswer => {
                if self.view == ViewMode::Practice
                    && let Some(lesson) = self.store.get(self.nav.index())
                {
                    self.practice.reveal(lesson);
                }
                None
            }
            SessionIntent::Advance => self.advance(),
            SessionIntent::PlaybackStarted(generation) => {
                self.playback.started(generation);
                None
            }
            SessionIntent::PlaybackFinished(generation) => {
                if self.playback.finished(generation) {
                    debug!(generation = generation.value(), "playback finished");
                }
                None
            }
            SessionIntent::PlaybackFailed(generation, error) => {
                let now = self.clock.now();
                if self.playback.failed(generation, now) {
                    self.notices.post(NoticeLevel::Error, error.to_string(), now);
                }
                None
            }
            SessionIntent::DismissNotice(id) => {
                self.notices.dismiss(id);
                None
            }
            SessionIntent::Tick => {
                let now = self.clock.now();
                self.notices.prune(now);
                self.playback.expire(now);
                None
            }
        }
    }

    fn navigate(&mut self, step: impl FnOnce(&mut Navigator) -> bool) -> Option<SessionEffect> {
        if !step(&mut self.nav) {
            return None;
        }
        self.practice.reset();
        self.stop_playback()
    }

    fn stop_playback(&mut self) -> Option<SessionEffect> {
        self.playback
            .release()
            .then(|| SessionEffect::StopPlayback(self.playback.generation()))
    }

    fn request_playback(&mut self, id: LessonId, variant: AudioVariant) -> Option<SessionEffect> {
        let Some(lesson) = self.store.find(id) else {
            warn!(lesson = %id, "playback requested for unknown lesson");
            return None;
        };
        let Some(path) = variant.path(lesson) else {
            self.post_notice(NoticeLevel::Warning, AudioError::NoSecondaryAudio.to_string());
            return None;
        };
        let uri = match self.audio_root.resolve(path) {
            Ok(uri) => uri,
            Err(err) => {
                warn!(lesson = %id, error = %err, "cannot resolve audio path");
                self.post_notice(NoticeLevel::Error, AudioError::from(err).to_string());
                return None;
            }
        };
        let ticket = self.playback.begin(id, variant);
        Some(SessionEffect::StartPlayback(PlaybackRequest { ticket, uri }))
    }

    fn check_answer(&mut self) {
        if self.view != ViewMode::Practice {
            return;
        }
        let Some(lesson) = self.store.get(self.nav.index()) else {
            return;
        };
        match self.practice.check(lesson) {
            Err(PracticeError::EmptyAnswer) => {
                self.post_notice(NoticeLevel::Warning, "Please enter an answer");
            }
            Ok(CheckOutcome::Correct(id)) => {
                if self.progress.mark_completed(id) {
                    info!(
                        lesson = %id,
                        completed = self.progress.completed_count(),
                        "lesson completed"
                    );
                }
                self.post_notice(NoticeLevel::Success, "Correct!");
            }
            Ok(CheckOutcome::Incorrect) => {}
        }
    }

    fn advance(&mut self) -> Option<SessionEffect> {
        if !self.practice.can_advance() {
            return None;
        }
        if self.nav.can_go_next() {
            return self.navigate(Navigator::next);
        }
        self.post_notice(NoticeLevel::Info, "You have reached the last lesson");
        None
    }
}
