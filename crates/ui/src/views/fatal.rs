use dioxus::prelude::*;

use crate::views::ViewError;

#[component]
pub fn FatalView(error: ViewError, on_retry: EventHandler<MouseEvent>) -> Element {
    rsx! {
        div { class: "fatal",
            h2 { "Unable to start" }
            p { "{error.message()}" }
            button {
                class: "btn btn-primary",
                id: "fatal-retry",
                onclick: move |evt| on_retry.call(evt),
                "Retry"
            }
        }
    }
}
