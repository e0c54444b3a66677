//! Shared handle for callers that hand one acset to several threads.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::acset::ACSet;
use crate::error::AcsetResult;

/// A cloneable handle to an acset behind a reader-writer lock.
///
/// [`ACSet`] itself does no locking. Holding the write guard for a whole
/// sequence of mutations keeps other callers from observing it half done.
#[derive(Debug, Clone)]
pub struct SharedACSet {
    inner: Arc<RwLock<ACSet>>,
}

impl SharedACSet {
    pub fn new(acset: ACSet) -> Self {
        Self {
            inner: Arc::new(RwLock::new(acset)),
        }
    }

    /// Lock for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, ACSet> {
        self.inner.read()
    }

    /// Lock for writing.
    pub fn write(&self) -> RwLockWriteGuard<'_, ACSet> {
        self.inner.write()
    }

    /// Run a sequence of mutations under one write lock.
    pub fn update<T>(&self, f: impl FnOnce(&mut ACSet) -> AcsetResult<T>) -> AcsetResult<T> {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    /// Take a copy of the current state.
    pub fn snapshot(&self) -> ACSet {
        self.inner.read().clone()
    }
}

impl From<ACSet> for SharedACSet {
    fn from(acset: ACSet) -> Self {
        Self::new(acset)
    }
}
