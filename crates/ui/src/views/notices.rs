use dioxus::prelude::*;
use services::SessionIntent;

use crate::views::StudyHandle;

#[component]
pub fn NoticeStack() -> Element {
    let handle = use_context::<StudyHandle>();
    let notices = handle
        .session
        .read()
        .as_ref()
        .map(|session| session.notices())
        .unwrap_or_default();

    rsx! {
        div { class: "notices", role: "status",
            for notice in notices {
                div {
                    key: "{notice.id.value()}",
                    class: "notice {notice.level.css_class()}",
                    span { class: "notice__message", "{notice.message}" }
                    button {
                        class: "notice__close",
                        title: "Dismiss",
                        onclick: move |_| handle.dispatch.call(SessionIntent::DismissNotice(notice.id)),
                        "×"
                    }
                }
            }
        }
    }
}
