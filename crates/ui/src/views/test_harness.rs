use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use drill_core::model::{AudioRoot, LessonDocument};
use drill_core::time::fixed_now;
use services::{AppServices, Clock, SessionIntent};
use storage::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::{QuizView, SessionHost, StudyHandle, StudyView};

#[derive(Clone)]
struct TestApp {
    services: Arc<AppServices>,
}

impl UiApp for TestApp {
    fn services(&self) -> Arc<AppServices> {
        Arc::clone(&self.services)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Study,
    /// Study view after an `EnterPractice` intent.
    Practice,
    Quiz,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Study => rsx! { SessionHost { StudyView {} } },
        ViewKind::Practice => rsx! {
            SessionHost {
                EnterPracticeOnMount {}
                StudyView {}
            }
        },
        ViewKind::Quiz => rsx! { SessionHost { QuizView {} } },
    }
}

#[component]
fn EnterPracticeOnMount() -> Element {
    let handle = use_context::<StudyHandle>();
    use_hook(|| handle.dispatch.call(SessionIntent::EnterPractice));
    rsx! {}
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild and let the lesson load settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..5 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn test_services(document: Option<LessonDocument>) -> AppServices {
    AppServices::new(
        Storage::in_memory(document),
        AudioRoot::parse("audio").expect("audio root"),
        Clock::fixed(fixed_now()),
    )
}

pub fn setup_view_harness(view: ViewKind, services: AppServices) -> ViewHarness {
    let app = Arc::new(TestApp {
        services: Arc::new(services),
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom }
}
