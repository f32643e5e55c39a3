use drill_core::model::LessonStore;
use drill_core::quiz::QuizRound;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::error::QuizServiceError;

/// Deals quiz rounds over every lesson in random order.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuizService;

impl QuizService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError` if the round cannot be built.
    pub fn start(&self, store: &LessonStore) -> Result<QuizRound, QuizServiceError> {
        self.start_with_rng(store, &mut rand::rng())
    }

    /// Same as [`QuizService::start`] with a caller-provided rng.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError` if the round cannot be built.
    pub fn start_with_rng<R: Rng + ?Sized>(
        &self,
        store: &LessonStore,
        rng: &mut R,
    ) -> Result<QuizRound, QuizServiceError> {
        let mut order: Vec<usize> = (0..store.len()).collect();
        order.shuffle(rng);
        debug!(questions = order.len(), "quiz round dealt");
        Ok(QuizRound::new(order, store.len())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson_service::fallback_lessons;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn round_covers_every_lesson_once() {
        let store = LessonStore::from_drafts(fallback_lessons()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let mut round = QuizService::new().start_with_rng(&store, &mut rng).unwrap();
        assert_eq!(round.total(), 3);

        let mut seen = Vec::new();
        while let Some(lesson) = round.current(&store) {
            seen.push(lesson.id());
            let english = lesson.english().to_string();
            assert!(round.submit(&store, &english).unwrap());
        }
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 3);
        assert_eq!(round.score(), 3);
        assert!(round.is_finished());
    }

    #[test]
    fn same_seed_deals_same_order() {
        let store = LessonStore::from_drafts(fallback_lessons()).unwrap();
        let service = QuizService::new();
        let first = service
            .start_with_rng(&store, &mut StdRng::seed_from_u64(42))
            .unwrap();
        let second = service
            .start_with_rng(&store, &mut StdRng::seed_from_u64(42))
            .unwrap();
        assert_eq!(first.current(&store), second.current(&store));
    }
}
