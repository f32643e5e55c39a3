use dioxus::document::eval;
use dioxus::prelude::*;
use drill_core::audio::{AudioVariant, PlaybackStatus};
use services::{SessionIntent, StudySession, ViewMode};

use crate::views::shortcuts::shortcut_intent;
use crate::views::{PracticePanel, StudyHandle};
use crate::vm::{map_lesson_card, map_practice, play_button};

#[component]
pub fn StudyView() -> Element {
    let handle = use_context::<StudyHandle>();
    let dispatch = handle.dispatch;

    use_effect(|| {
        let _ = eval("document.getElementById('study-root')?.focus();");
    });

    let (card, practice, view, status) = {
        let guard = handle.session.read();
        let Some(session) = guard.as_ref() else {
            return rsx! {};
        };
        (
            map_lesson_card(session),
            map_practice(session),
            session.view(),
            session.playback_status(),
        )
    };
    let Some(card) = card else {
        return rsx! {};
    };
    let primary = play_button(status, AudioVariant::Primary);
    let secondary = play_button(status, AudioVariant::Secondary);
    let audio_class = if matches!(status, PlaybackStatus::Playing(_)) {
        "audio-controls audio-controls--playing"
    } else {
        "audio-controls"
    };
    let card_class = if card.is_completed {
        "lesson-card lesson-card--done"
    } else {
        "lesson-card"
    };

    let on_key = move |evt: KeyboardEvent| {
        let modifiers = evt.data.modifiers();
        if modifiers.contains(Modifiers::CONTROL) || modifiers.contains(Modifiers::META) {
            return;
        }
        let view = handle
            .session
            .read()
            .as_ref()
            .map(StudySession::view)
            .unwrap_or_default();
        if let Some(intent) = shortcut_intent(&evt.data.key(), evt.data.code(), view) {
            evt.prevent_default();
            dispatch.call(intent);
        }
    };

    rsx! {
        div { class: "page page--study", id: "study-root", tabindex: "0", onkeydown: on_key,
            header { class: "lesson-header",
                span { class: "lesson-position", "{card.position_label}" }
                span { class: "lesson-id", "{card.id_label}" }
                span { class: "badge", "{card.category_label}" }
                span { class: "lesson-completed", "{card.completed_label}" }
            }
            div { class: "progress",
                div { class: "progress__bar", style: "{card.progress_style}" }
            }

            if view == ViewMode::Study {
                article { class: card_class,
                    p { class: "lesson-chinese", lang: "zh", "{card.chinese}" }
                    p { class: "lesson-pinyin", "{card.pinyin}" }
                    if let Some(literal) = card.literal.as_ref() {
                        p { class: "lesson-literal", "{literal}" }
                    }
                    p { class: "lesson-english", "{card.english}" }
                    if let Some(french) = card.french.as_ref() {
                        p { class: "lesson-french", lang: "fr", "{french}" }
                    }
                }
            }

            div { class: audio_class,
                button {
                    class: "{primary.class}",
                    id: "play-primary",
                    "aria-busy": "{primary.busy}",
                    onclick: move |_| dispatch.call(SessionIntent::PlayAudio(AudioVariant::Primary)),
                    "{primary.label}"
                }
                if card.french.is_some() {
                    button {
                        class: "{secondary.class}",
                        id: "play-secondary",
                        "aria-busy": "{secondary.busy}",
                        onclick: move |_| dispatch.call(SessionIntent::PlayAudio(AudioVariant::Secondary)),
                        "{secondary.label}"
                    }
                }
            }

            nav { class: "lesson-nav",
                button {
                    class: "btn",
                    id: "lesson-previous",
                    disabled: !card.can_go_previous,
                    onclick: move |_| dispatch.call(SessionIntent::PreviousLesson),
                    "← Previous"
                }
                if view == ViewMode::Study {
                    button {
                        class: "btn btn-primary",
                        id: "practice-enter",
                        onclick: move |_| dispatch.call(SessionIntent::EnterPractice),
                        "Practice"
                    }
                }
                button {
                    class: "btn",
                    id: "lesson-next",
                    disabled: !card.can_go_next,
                    onclick: move |_| dispatch.call(SessionIntent::NextLesson),
                    "Next →"
                }
            }

            if view == ViewMode::Practice {
                if let Some(practice) = practice {
                    PracticePanel { vm: practice, dispatch: dispatch }
                }
            }

            p { class: "shortcuts-hint",
                "← → navigate · Space play · P practice · Esc exit practice"
            }
        }
    }
}
