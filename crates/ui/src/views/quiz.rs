use dioxus::prelude::*;
use drill_core::audio::AudioVariant;
use drill_core::quiz::QuizRound;
use services::SessionIntent;
use tracing::warn;

use crate::context::AppContext;
use crate::views::{StudyHandle, ViewError};
use crate::vm::{map_quiz_question, map_quiz_result};

fn deal(ctx: &AppContext, handle: StudyHandle) -> Result<QuizRound, ViewError> {
    let guard = handle.session.read();
    let session = guard.as_ref().ok_or(ViewError::LessonsUnavailable)?;
    ctx.start_quiz(session.store()).map_err(|err| {
        warn!(error = %err, "cannot start quiz");
        ViewError::Unknown
    })
}

fn last_result_class(correct: bool) -> &'static str {
    if correct {
        "quiz-last quiz-last--correct"
    } else {
        "quiz-last quiz-last--wrong"
    }
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let handle = use_context::<StudyHandle>();
    let mut round = use_signal({
        let ctx = ctx.clone();
        move || deal(&ctx, handle)
    });

    let restart = use_callback(move |()| round.set(deal(&ctx, handle)));
    let answer = use_callback(move |option: &'static str| {
        let guard = handle.session.read();
        let Some(session) = guard.as_ref() else {
            return;
        };
        round.with_mut(|current| {
            if let Ok(current) = current {
                let _ = current.submit(session.store(), option);
            }
        });
    });

    let (question, result, current_lesson) = {
        let guard = handle.session.read();
        let Some(session) = guard.as_ref() else {
            return rsx! {};
        };
        match &*round.read() {
            Ok(current) => (
                map_quiz_question(current, session.store()),
                map_quiz_result(current),
                current.current(session.store()).map(|lesson| lesson.id()),
            ),
            Err(err) => {
                let message = err.message();
                return rsx! {
                    div { class: "page page--quiz",
                        p { class: "error", "{message}" }
                    }
                };
            }
        }
    };

    rsx! {
        div { class: "page page--quiz",
            h2 { "Light Test" }
            p { class: "quiz-intro", "Listen to the command and pick the correct light action." }
            if let Some(question) = question {
                div { class: "quiz-question",
                    header { class: "quiz-header",
                        span { "{question.position_label}" }
                        span { "{question.score_label}" }
                    }
                    if let Some(lesson_id) = current_lesson {
                        button {
                            class: "play",
                            id: "quiz-play",
                            onclick: move |_| {
                                handle
                                    .dispatch
                                    .call(SessionIntent::PlayLessonAudio(lesson_id, AudioVariant::Primary))
                            },
                            "▶ Play Command"
                        }
                    }
                    div { class: "quiz-options",
                        for option in question.options.iter().copied() {
                            button {
                                key: "{option}",
                                class: "btn quiz-option",
                                onclick: move |_| answer.call(option),
                                "{option}"
                            }
                        }
                    }
                    if let Some((correct, text)) = question.last_result.as_ref() {
                        p { class: last_result_class(*correct),
                            "{text}"
                        }
                    }
                }
            }
            if let Some(result) = result {
                div { class: "{result.class}",
                    h3 { "Test Complete" }
                    p { class: "quiz-score", "{result.score_label}" }
                    p { "{result.message}" }
                    button {
                        class: "btn btn-primary",
                        id: "quiz-restart",
                        onclick: move |_| restart.call(()),
                        "Try Again"
                    }
                }
            }
        }
    }
}
