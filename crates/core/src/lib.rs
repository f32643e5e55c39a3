#![forbid(unsafe_code)]

pub mod audio;
pub mod import;
pub mod model;
pub mod navigation;
pub mod notice;
pub mod practice;
pub mod progress;
pub mod quiz;
pub mod time;

pub use time::Clock;
