use dioxus::prelude::*;
use drill_core::practice::PracticeMode;
use services::SessionIntent;

use crate::vm::PracticeVm;

#[component]
pub fn PracticePanel(vm: PracticeVm, dispatch: Callback<SessionIntent>) -> Element {
    let can_check = vm.can_check;
    let mode_class = |mode: PracticeMode| {
        if vm.mode == mode {
            "mode-toggle mode-toggle--active"
        } else {
            "mode-toggle"
        }
    };

    rsx! {
        section { class: "practice",
            div { class: "practice__modes",
                for mode in [PracticeMode::Pinyin, PracticeMode::Chinese] {
                    button {
                        key: "{mode.label()}",
                        class: mode_class(mode),
                        onclick: move |_| dispatch.call(SessionIntent::SetPracticeMode(mode)),
                        "{mode.label()}"
                    }
                }
            }
            p { class: "practice__prompt", "{vm.prompt}" }
            if !vm.hint.is_empty() {
                p { class: "practice__hint", "{vm.hint}" }
            }
            input {
                id: "practice-answer",
                class: "practice__input",
                r#type: "text",
                autocomplete: "off",
                placeholder: "{vm.placeholder}",
                value: "{vm.input}",
                oninput: move |evt| dispatch.call(SessionIntent::EditAnswer(evt.value())),
                onkeydown: move |evt: KeyboardEvent| {
                    evt.stop_propagation();
                    if evt.data.key() == Key::Enter && can_check {
                        evt.prevent_default();
                        dispatch.call(SessionIntent::CheckAnswer);
                    }
                },
            }
            div { class: "practice__actions",
                button {
                    class: "btn btn-primary",
                    id: "practice-check",
                    disabled: !vm.can_check,
                    onclick: move |_| dispatch.call(SessionIntent::CheckAnswer),
                    "Check"
                }
                button {
                    class: "btn",
                    id: "practice-show",
                    disabled: vm.can_advance,
                    onclick: move |_| dispatch.call(SessionIntent::ShowAnswer),
                    "Show Answer"
                }
                button {
                    class: "btn",
                    id: "practice-next",
                    disabled: !vm.can_advance,
                    onclick: move |_| dispatch.call(SessionIntent::Advance),
                    "Next"
                }
                button {
                    class: "btn btn-ghost",
                    id: "practice-exit",
                    onclick: move |_| dispatch.call(SessionIntent::ExitPractice),
                    "Exit"
                }
            }
            if let Some(feedback) = vm.feedback.as_ref() {
                div { class: "{feedback.class}",
                    strong { "{feedback.title}" }
                    if let Some(given) = feedback.given.as_ref() {
                        div { class: "feedback__row",
                            span { class: "feedback__label", "Your answer" }
                            span { class: "feedback__given", "{given}" }
                        }
                    }
                    if let Some(expected) = feedback.expected.as_ref() {
                        div { class: "feedback__row",
                            span { class: "feedback__label", "Correct answer" }
                            span { class: "feedback__expected", "{expected}" }
                        }
                    }
                }
            }
        }
    }
}
