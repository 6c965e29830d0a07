//! Last-submitted-wins slot for deferred recomputation.
//!
//! The page defers re-rendering the dependent fields so the field being
//! typed in stays responsive. There is no queue and no backpressure: a
//! newer edit simply supersedes a pending one, and the only guarantee is
//! that the latest submitted edit is the one eventually applied.

/// A single-slot holder for the next edit to apply.
#[derive(Debug, Default)]
pub struct PendingEdit<T> {
    slot: Option<T>,
}

impl<T> PendingEdit<T> {
    pub fn new() -> Self {
        PendingEdit { slot: None }
    }

    /// Schedules `edit`, cancelling any pending one. Returns the edit that
    /// was superseded, if there was one.
    pub fn submit(&mut self, edit: T) -> Option<T> {
        self.slot.replace(edit)
    }

    /// Hands the latest edit to the applier, leaving the slot idle.
    pub fn take(&mut self) -> Option<T> {
        self.slot.take()
    }

    pub fn is_idle(&self) -> bool {
        self.slot.is_none()
    }
}
