#![forbid(unsafe_code)]

pub mod http;
pub mod json_file;
pub mod media;
pub mod repository;

pub use media::{AudioSource, LocalMediaStore, MediaStore, ProbeError};
pub use repository::{LessonLocation, LessonRepository, Storage, StorageError};
