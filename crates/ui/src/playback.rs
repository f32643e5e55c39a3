//! Audio playback inside the webview.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use dioxus::document::eval;
use dioxus::prelude::*;
use drill_core::audio::PlaybackTicket;
use serde::Deserialize;
use services::{BackendError, PlaybackBackend, SessionIntent};
use storage::AudioSource;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum PlayerMessage {
    Started,
    Ended,
    Error { message: String },
}

const PLAY_SCRIPT_TEMPLATE: &str = r#"
    const state = window.__drillAudio || (window.__drillAudio = { audio: null, generation: 0 });
    if (state.audio) {
        state.audio.pause();
        state.audio.removeAttribute("src");
        state.audio = null;
    }
    const generation = {generation};
    const audio = new Audio({src});
    state.audio = audio;
    state.generation = generation;
    audio.addEventListener("ended", () => {
        if (state.generation === generation) {
            state.audio = null;
            dioxus.send({ kind: "ended" });
        }
    });
    audio.play()
        .then(() => dioxus.send({ kind: "started" }))
        .catch((err) => dioxus.send({ kind: "error", message: String((err && err.message) || err) }));
"#;

const STOP_SCRIPT: &str = r#"
    const state = window.__drillAudio;
    if (state && state.audio) {
        state.audio.pause();
        state.audio.removeAttribute("src");
        state.audio = null;
    }
    if (state) { state.generation = -1; }
"#;

/// `src` attribute for a clip: a data url for local bytes, the url itself
/// for remote clips.
#[must_use]
pub fn source_url(source: &AudioSource) -> String {
    match source {
        AudioSource::Inline { mime, bytes } => {
            format!("data:{mime};base64,{}", STANDARD.encode(bytes))
        }
        AudioSource::Remote(url) => url.to_string(),
    }
}

fn play_script(generation: u64, src: &str) -> Result<String, serde_json::Error> {
    let quoted = serde_json::to_string(src)?;
    Ok(PLAY_SCRIPT_TEMPLATE
        .replace("{generation}", &generation.to_string())
        .replace("{src}", &quoted))
}

/// Plays clips through an `Audio` element and reports natural completion
/// back as [`SessionIntent::PlaybackFinished`].
#[derive(Clone)]
pub struct WebviewPlayback {
    intents: UnboundedSender<SessionIntent>,
}

impl WebviewPlayback {
    #[must_use]
    pub fn new(intents: UnboundedSender<SessionIntent>) -> Self {
        Self { intents }
    }
}

#[async_trait(?Send)]
impl PlaybackBackend for WebviewPlayback {
    async fn start(&self, ticket: PlaybackTicket, source: AudioSource) -> Result<(), BackendError> {
        let script = play_script(ticket.generation.value(), &source_url(&source))
            .map_err(|err| BackendError(err.to_string()))?;
        let mut player = eval(&script);
        match player.recv::<PlayerMessage>().await {
            Ok(PlayerMessage::Started) => {}
            Ok(PlayerMessage::Error { message }) => return Err(BackendError(message)),
            Ok(PlayerMessage::Ended) => {
                let _ = self
                    .intents
                    .send(SessionIntent::PlaybackFinished(ticket.generation));
                return Ok(());
            }
            Err(err) => return Err(BackendError(err.to_string())),
        }

        let intents = self.intents.clone();
        spawn(async move {
            if let Ok(PlayerMessage::Ended) = player.recv::<PlayerMessage>().await {
                debug!(generation = ticket.generation.value(), "clip ended");
                let _ = intents.send(SessionIntent::PlaybackFinished(ticket.generation));
            }
        });
        Ok(())
    }

    async fn stop(&self) {
        let _ = eval(STOP_SCRIPT).await;
    }
}
