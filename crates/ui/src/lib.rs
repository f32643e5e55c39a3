pub mod app;
pub mod context;
pub mod playback;
pub mod routes;
pub mod views;
pub mod vm;

pub use app::App;
pub use context::{AppContext, UiApp, build_app_context};
pub use playback::WebviewPlayback;
