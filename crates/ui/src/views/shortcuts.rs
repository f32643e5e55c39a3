use dioxus::prelude::{Code, Key};
use drill_core::audio::AudioVariant;
use services::{SessionIntent, ViewMode};

/// Global study shortcuts. The answer field swallows its own key events, so
/// these never fire while typing an answer.
pub(super) fn shortcut_intent(key: &Key, code: Code, view: ViewMode) -> Option<SessionIntent> {
    match key {
        Key::ArrowLeft => Some(SessionIntent::PreviousLesson),
        Key::ArrowRight => Some(SessionIntent::NextLesson),
        Key::Escape if view == ViewMode::Practice => Some(SessionIntent::ExitPractice),
        Key::Character(value) if value.eq_ignore_ascii_case("p") && view == ViewMode::Study => {
            Some(SessionIntent::EnterPractice)
        }
        _ if code == Code::Space => Some(SessionIntent::PlayAudio(AudioVariant::Primary)),
        _ => None,
    }
}
