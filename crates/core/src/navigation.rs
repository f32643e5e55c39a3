use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    #[error("lesson index {index} is outside 0..{len}")]
    OutOfRange { index: usize, len: usize },
}

/// Cursor into a non-empty lesson store. Never wraps around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    index: usize,
    len: usize,
}

impl Navigator {
    /// Cursor at the first lesson. `len` is clamped to at least 1 so the index
    /// invariant `index < len` always holds.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            index: 0,
            len: len.max(1),
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// # Errors
    ///
    /// Returns `NavigationError::OutOfRange` and leaves the cursor untouched when
    /// `index` is not a valid position.
    pub fn go_to(&mut self, index: usize) -> Result<usize, NavigationError> {
        if index >= self.len {
            return Err(NavigationError::OutOfRange {
                index,
                len: self.len,
            });
        }
        self.index = index;
        Ok(index)
    }

    /// Returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        self.index
            .checked_add(1)
            .is_some_and(|target| self.go_to(target).is_ok())
    }

    /// Returns whether the cursor moved.
    pub fn previous(&mut self) -> bool {
        self.index
            .checked_sub(1)
            .is_some_and(|target| self.go_to(target).is_ok())
    }

    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.index > 0
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.index + 1 < self.len
    }

    /// `(index + 1) / len * 100`
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_percent(&self) -> f32 {
        (self.index + 1) as f32 / self.len as f32 * 100.0
    }
}
