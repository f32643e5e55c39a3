use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;
use services::{AudioError, SessionEffect, SessionIntent, StudySession};
use tokio::sync::mpsc::{UnboundedSender, unbounded_channel};
use tracing::error;

use crate::context::AppContext;
use crate::playback::WebviewPlayback;
use crate::views::{FatalView, NoticeStack, ViewError, ViewState, view_state_from_resource};

/// Heartbeat for notice and error-label expiry.
const TICK_INTERVAL: Duration = Duration::from_millis(500);

/// Shared by every view below [`SessionHost`].
#[derive(Clone, Copy)]
pub struct StudyHandle {
    pub session: Signal<Option<StudySession>>,
    pub dispatch: Callback<SessionIntent>,
}

/// Owns the intent queue: applies intents in order and runs the effects
/// they return. Async results re-enter the queue as intents.
fn start_session_driver(
    ctx: &AppContext,
    mut session: Signal<Option<StudySession>>,
) -> UnboundedSender<SessionIntent> {
    let (tx, mut rx) = unbounded_channel::<SessionIntent>();
    let audio = ctx.audio_service(Arc::new(WebviewPlayback::new(tx.clone())));
    let feedback = tx.clone();

    spawn(async move {
        while let Some(intent) = rx.recv().await {
            if intent == SessionIntent::Tick
                && !session.peek().as_ref().is_some_and(StudySession::tick_due)
            {
                continue;
            }
            let effect = session.with_mut(|current| {
                current
                    .as_mut()
                    .and_then(|session| session.dispatch(intent))
            });
            match effect {
                Some(SessionEffect::StartPlayback(request)) => {
                    let audio = audio.clone();
                    let feedback = feedback.clone();
                    spawn(async move {
                        let generation = request.ticket.generation;
                        let reply = match audio.start(&request).await {
                            Ok(()) => Some(SessionIntent::PlaybackStarted(generation)),
                            Err(AudioError::Superseded) => None,
                            Err(err) => Some(SessionIntent::PlaybackFailed(generation, err)),
                        };
                        if let Some(reply) = reply {
                            let _ = feedback.send(reply);
                        }
                    });
                }
                Some(SessionEffect::StopPlayback(generation)) => {
                    let audio = audio.clone();
                    spawn(async move { audio.stop(generation).await });
                }
                None => {}
            }
        }
    });
    tx
}

#[component]
pub fn SessionHost(children: Element) -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_signal(|| None::<StudySession>);
    let intents = use_hook(|| start_session_driver(&ctx, session));
    let dispatch = use_callback(move |intent: SessionIntent| {
        let _ = intents.send(intent);
    });
    use_context_provider(|| StudyHandle { session, dispatch });

    let mut resource = use_resource(move || {
        let ctx = ctx.clone();
        let mut session = session;
        async move {
            let opened = ctx.open_session().await.map_err(|err| {
                error!(error = %err, "no lessons available");
                ViewError::LessonsUnavailable
            })?;
            session.set(Some(opened));
            Ok::<_, ViewError>(())
        }
    });

    use_future(move || async move {
        loop {
            tokio::time::sleep(TICK_INTERVAL).await;
            dispatch.call(SessionIntent::Tick);
        }
    });

    match view_state_from_resource(&resource) {
        ViewState::Idle | ViewState::Loading => rsx! {
            p { class: "loading", "Loading lessons…" }
        },
        ViewState::Error(err) => rsx! {
            FatalView { error: err, on_retry: move |_| resource.restart() }
        },
        ViewState::Ready(()) => rsx! {
            {children}
            NoticeStack {}
        },
    }
}
