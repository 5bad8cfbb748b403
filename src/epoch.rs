//! Generation counter for discarding stale background results.
//!
//! Work handed to a background thread is stamped with the epoch current at
//! the time it was issued. When the UI context changes (a new root is opened)
//! the epoch is bumped and any result still in flight under the old epoch is
//! dropped on arrival.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Epoch(u64);

impl Epoch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Advance to the next generation and return it.
    pub fn bump(&mut self) -> Epoch {
        self.0 = self.0.wrapping_add(1);
        *self
    }

    pub fn stamp<T>(&self, value: T) -> Stamped<T> {
        Stamped { epoch: *self, value }
    }

    /// Whether a result issued under `stamped.epoch` is still current.
    pub fn accepts<T>(&self, stamped: &Stamped<T>) -> bool {
        stamped.epoch == *self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamped<T> {
    pub epoch: Epoch,
    pub value: T,
}

impl<T> Stamped<T> {
    pub fn into_inner(self) -> T {
        self.value
    }
}
