// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-schedule write locks.
//!
//! Writers for the same `(staff, date)` run one at a time. Writers for
//! different schedules never wait on each other. A write that touches two
//! schedules takes both locks in key order, so two opposite moves cannot
//! deadlock.
//!
//! A table entry lives only while some writer holds or waits on it; the
//! guard removes its own entries on drop, whichever way the write ends.

use dashmap::DashMap;
use shearbook::ScheduleKey;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::trace;

/// Holds the locks for a set of schedules until dropped.
#[derive(Debug)]
pub struct ScheduleGuard<'a> {
    table: &'a ScheduleLocks,
    keys: Vec<ScheduleKey>,
    guards: Vec<OwnedMutexGuard<()>>,
}

impl ScheduleGuard<'_> {
    /// The locked schedules, in acquisition order.
    #[must_use]
    pub fn keys(&self) -> &[ScheduleKey] {
        &self.keys
    }

    /// Returns `true` if `key` is held by this guard.
    #[must_use]
    pub fn covers(&self, key: ScheduleKey) -> bool {
        self.keys.binary_search(&key).is_ok()
    }
}

impl Drop for ScheduleGuard<'_> {
    fn drop(&mut self) {
        // Unlock first so the entries below are no longer referenced by us
        self.guards.clear();
        for key in &self.keys {
            self.table.release(*key);
        }
    }
}

/// Lock table keyed by schedule.
#[derive(Debug, Default)]
pub struct ScheduleLocks {
    locks: DashMap<ScheduleKey, Arc<Mutex<()>>>,
}

impl ScheduleLocks {
    /// Creates an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, key: ScheduleKey) -> Arc<Mutex<()>> {
        // Clone out of the map so no shard lock is held across an await
        Arc::clone(&self.locks.entry(key).or_default())
    }

    /// Removes the entry for `key` unless another writer holds or waits on it.
    ///
    /// `lock_for` clones under the same shard lock, so a count of one here
    /// means nobody can pick the entry up before it is gone.
    fn release(&self, key: ScheduleKey) {
        if self
            .locks
            .remove_if(&key, |_, lock| Arc::strong_count(lock) == 1)
            .is_some()
        {
            trace!(schedule = %key, "Released schedule lock entry");
        }
    }

    /// Acquires the locks for every key, sorted and deduplicated.
    pub async fn acquire(&self, keys: &[ScheduleKey]) -> ScheduleGuard<'_> {
        let mut keys: Vec<ScheduleKey> = keys.to_vec();
        keys.sort_unstable();
        keys.dedup();

        let mut guards: Vec<OwnedMutexGuard<()>> = Vec::with_capacity(keys.len());
        for key in &keys {
            let lock: Arc<Mutex<()>> = self.lock_for(*key);
            guards.push(lock.lock_owned().await);
            trace!(schedule = %key, "Acquired schedule lock");
        }

        ScheduleGuard {
            table: self,
            keys,
            guards,
        }
    }

    /// Number of schedules currently tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Returns `true` if no schedule is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
