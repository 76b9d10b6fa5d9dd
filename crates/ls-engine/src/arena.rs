//! Per-worker scratch space.
//!
//! One slot per pool thread, addressed by [`WorkerId`].  Each slot has its
//! own `Mutex`; a worker only ever locks its own slot, so the locks are
//! never contended.

use std::sync::{Mutex, MutexGuard, PoisonError};

use ls_core::WorkerId;

use crate::{EngineError, EngineResult};

/// Worker id of the calling thread inside a Rayon pool.  Outside any pool
/// (sequential fallback) this is worker 0.
#[inline]
pub(crate) fn current_worker() -> WorkerId {
    WorkerId(rayon::current_thread_index().unwrap_or(0) as u32)
}

pub struct WorkerArenas<T> {
    slots: Vec<Mutex<T>>,
}

impl<T> WorkerArenas<T> {
    /// Allocate `workers` slots (at least one), each from `init`.
    pub fn new(workers: usize, mut init: impl FnMut() -> T) -> Self {
        Self { slots: (0..workers.max(1)).map(|_| Mutex::new(init())).collect() }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Lock the slot belonging to `worker`.
    pub fn lock(&self, worker: WorkerId) -> EngineResult<MutexGuard<'_, T>> {
        let slot = self.slots.get(worker.index()).ok_or(EngineError::WorkerOutOfRange {
            worker,
            workers: self.slots.len(),
        })?;
        Ok(slot.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Exclusive access to every slot, for the sequential reduce step.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.slots
            .iter_mut()
            .map(|m| m.get_mut().unwrap_or_else(PoisonError::into_inner))
    }
}
