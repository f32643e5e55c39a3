use drill_core::audio::{AudioVariant, PlaybackStatus};
use drill_core::model::CommandCategory;
use services::StudySession;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayButtonVm {
    pub label: &'static str,
    pub class: &'static str,
    pub busy: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LessonCardVm {
    pub id_label: String,
    pub position_label: String,
    pub category_label: &'static str,
    pub chinese: String,
    pub pinyin: String,
    pub literal: Option<String>,
    pub english: String,
    pub french: Option<String>,
    pub progress_style: String,
    pub completed_label: String,
    pub is_completed: bool,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

#[must_use]
pub fn map_lesson_card(session: &StudySession) -> Option<LessonCardVm> {
    let lesson = session.current_lesson()?;
    let progress = session.progress();
    Some(LessonCardVm {
        id_label: format!("#{}", lesson.id()),
        position_label: format!(
            "Lesson {} of {}",
            session.current_index() + 1,
            session.len()
        ),
        category_label: CommandCategory::classify(lesson).label(),
        chinese: lesson.chinese().to_string(),
        pinyin: lesson.pinyin().to_string(),
        literal: Some(lesson.literal().to_string()).filter(|text| !text.is_empty()),
        english: lesson.english().to_string(),
        french: lesson.french().map(str::to_string),
        progress_style: format!("width: {:.0}%", session.progress_percent()),
        completed_label: format!(
            "Completed: {} / {}",
            progress.completed_count(),
            progress.total()
        ),
        is_completed: progress.contains(lesson.id()),
        can_go_previous: session.can_go_previous(),
        can_go_next: session.can_go_next(),
    })
}

/// Label for the play control of `variant` given the shared playback status.
#[must_use]
pub fn play_button(status: PlaybackStatus, variant: AudioVariant) -> PlayButtonVm {
    let idle_label = match variant {
        AudioVariant::Primary => "▶ Play Chinese",
        AudioVariant::Secondary => "▶ Play French",
    };
    let (label, class, busy) = match status {
        PlaybackStatus::Loading(ticket) if ticket.variant == variant => {
            ("Loading…", "play play--loading", true)
        }
        PlaybackStatus::Playing(ticket) if ticket.variant == variant => {
            ("🔊 Playing…", "play play--playing", true)
        }
        PlaybackStatus::Error { ticket, .. } if ticket.variant == variant => {
            ("⚠ Error", "play play--error", false)
        }
        _ => (idle_label, "play", false),
    };
    PlayButtonVm { label, class, busy }
}
