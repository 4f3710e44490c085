use std::cell::RefCell;
use std::rc::Rc;

use super::error::VizError;

/// One-shot slot for a value produced asynchronously, such as a GPU renderer
/// whose adapter request resolves a few frames after mount.
///
/// The producer keeps a clone and calls `resolve`; the consumer polls with
/// `take` from its frame step.
pub struct Deferred<T> {
    slot: Rc<RefCell<Option<Result<T, VizError>>>>,
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self::pending()
    }
}

impl<T> Deferred<T> {
    pub fn pending() -> Self {
        Self {
            slot: Rc::new(RefCell::new(None)),
        }
    }

    pub fn ready(value: T) -> Self {
        let d = Self::pending();
        d.resolve(Ok(value));
        d
    }

    pub fn failed(err: VizError) -> Self {
        let d = Self::pending();
        d.resolve(Err(err));
        d
    }

    pub fn resolve(&self, result: Result<T, VizError>) {
        *self.slot.borrow_mut() = Some(result);
    }

    pub fn is_resolved(&self) -> bool {
        self.slot.borrow().is_some()
    }

    pub fn take(&self) -> Option<Result<T, VizError>> {
        self.slot.borrow_mut().take()
    }

    /// True when no one else holds the slot, i.e. the consumer went away.
    pub fn is_abandoned(&self) -> bool {
        Rc::strong_count(&self.slot) == 1
    }
}
