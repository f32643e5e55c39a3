use drill_core::audio::{AudioVariant, PlaybackGeneration};
use drill_core::model::LessonId;
use drill_core::notice::NoticeId;
use drill_core::practice::PracticeMode;

use crate::audio_service::PlaybackRequest;
use crate::error::AudioError;

/// Which screen the study session is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Study,
    Practice,
}

/// Everything that can change a study session. UI events and async results
/// both arrive as intents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionIntent {
    NextLesson,
    PreviousLesson,
    JumpTo(usize),
    PlayAudio(AudioVariant),
    /// Play a clip for a lesson other than the current one (quiz).
    PlayLessonAudio(LessonId, AudioVariant),
    EnterPractice,
    ExitPractice,
    SetPracticeMode(PracticeMode),
    EditAnswer(String),
    CheckAnswer,
    ShowAnswer,
    /// "Next" from the practice feedback panel.
    Advance,
    PlaybackStarted(PlaybackGeneration),
    PlaybackFailed(PlaybackGeneration, AudioError),
    PlaybackFinished(PlaybackGeneration),
    DismissNotice(NoticeId),
    /// Clock heartbeat; expires notices and the error label.
    Tick,
}

/// Side effects the caller must perform after a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    StartPlayback(PlaybackRequest),
    StopPlayback(PlaybackGeneration),
}
