//! Single-level undo for schedule edits.
//!
//! [`EditHistory`] is a persistent value: applying an edit never touches the
//! history it was called on, it returns a new one holding the edited value and
//! a snapshot of the value before the edit. Undo restores that snapshot. Only
//! one level is kept, so undoing twice in a row is not possible.

use std::sync::Arc;

use crate::models::Schedule;

/// Undo history for schedule edits.
pub type ScheduleHistory = EditHistory<Schedule>;

/// A value together with the snapshot taken before its last edit.
#[derive(Debug)]
pub struct EditHistory<T> {
    current: Arc<T>,
    previous: Option<Arc<T>>,
}

impl<T> Clone for EditHistory<T> {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
            previous: self.previous.clone(),
        }
    }
}

impl<T: Clone> EditHistory<T> {
    /// Start a history with nothing to undo.
    pub fn new(value: T) -> Self {
        Self {
            current: Arc::new(value),
            previous: None,
        }
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn can_undo(&self) -> bool {
        self.previous.is_some()
    }

    /// Apply `edit` to a copy of the current value.
    ///
    /// On success the returned history holds the edited value and can undo
    /// back to the current one. On failure the error is returned and `self`
    /// remains usable as-is.
    pub fn apply<R, E, F>(&self, edit: F) -> Result<(Self, R), E>
    where
        F: FnOnce(&mut T) -> Result<R, E>,
    {
        let mut next = T::clone(&self.current);
        let outcome = edit(&mut next)?;
        Ok((
            Self {
                current: Arc::new(next),
                previous: Some(Arc::clone(&self.current)),
            },
            outcome,
        ))
    }

    /// History restored to the value before the last edit, or `None` when
    /// there is nothing to undo.
    pub fn undo(&self) -> Option<Self> {
        self.previous.as_ref().map(|previous| Self {
            current: Arc::clone(previous),
            previous: None,
        })
    }

    /// Take the current value out of the history.
    pub fn into_current(self) -> T {
        Arc::try_unwrap(self.current).unwrap_or_else(|shared| T::clone(&shared))
    }
}
