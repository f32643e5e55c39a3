mod category;
mod ids;
mod lesson;
mod media;
mod store;

pub use category::CommandCategory;
pub use ids::{LessonId, ParseIdError};
pub use lesson::{Lesson, LessonDraft, LessonError};
pub use media::{AudioPath, AudioRoot, MediaUri, MediaValidationError};
pub use store::{LessonDocument, LessonStore, LessonStoreError};
