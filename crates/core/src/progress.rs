use std::collections::BTreeSet;

use crate::model::LessonId;

/// Lessons answered correctly at least once this session. Only grows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressTracker {
    completed: BTreeSet<LessonId>,
    total: usize,
}

impl ProgressTracker {
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            completed: BTreeSet::new(),
            total,
        }
    }

    /// Returns `true` when the id was not already completed.
    pub fn mark_completed(&mut self, id: LessonId) -> bool {
        self.completed.insert(id)
    }

    #[must_use]
    pub fn contains(&self, id: LessonId) -> bool {
        self.completed.contains(&id)
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marking_twice_counts_once() {
        let mut progress = ProgressTracker::new(3);
        assert!(progress.mark_completed(LessonId::new(2)));
        assert!(!progress.mark_completed(LessonId::new(2)));
        assert_eq!(progress.completed_count(), 1);
        assert_eq!(progress.total(), 3);
        assert!(progress.contains(LessonId::new(2)));
    }
}
