// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    num::NonZeroU64,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use tokio::{sync::RwLock, task::spawn_blocking, time::timeout};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

use super::{ConnectionPool, PooledConnection, get_pooled_connection};

/// Manage database connections for asynchronous tasks
///
/// Only a single writer is allowed to access the `SQLite` database
/// at any given time. This is required to prevent both synchronous
/// locking when obtaining a connection and timeouts when concurrently
/// trying to execute write operations on a shared `SQLite` database
/// instance. Readers may run concurrently.
#[allow(missing_debug_implementations)]
pub struct Gatekeeper {
    connection_pool: RwLock<ConnectionPool>,
    acquire_read_timeout: Duration,
    acquire_write_timeout: Duration,
    pending_counters: Arc<PendingCounters>,
    decommissioned: AtomicBool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskMode {
    Read,
    Write,
}

#[derive(Debug, Default)]
struct PendingCounters {
    read: AtomicUsize,
    write: AtomicUsize,
}

impl PendingCounters {
    fn counter(&self, mode: TaskMode) -> &AtomicUsize {
        match mode {
            TaskMode::Read => &self.read,
            TaskMode::Write => &self.write,
        }
    }
}

/// Counts a task as pending until dropped
struct PendingScope {
    counters: Arc<PendingCounters>,
    mode: TaskMode,
}

impl PendingScope {
    fn enter(counters: Arc<PendingCounters>, mode: TaskMode) -> Self {
        let pending_before = counters.counter(mode).fetch_add(1, Ordering::Relaxed);
        log::debug!(
            "Starting {mode:?} task: {pending} pending {mode:?} task(s)",
            pending = pending_before + 1
        );
        Self { counters, mode }
    }
}

impl Drop for PendingScope {
    fn drop(&mut self) {
        let Self { counters, mode } = self;
        let pending_before = counters.counter(*mode).fetch_sub(1, Ordering::Relaxed);
        debug_assert!(pending_before > 0);
        log::debug!(
            "Finished {mode:?} task: {pending} pending {mode:?} task(s)",
            pending = pending_before - 1
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTasks {
    pub read: usize,
    pub write: usize,
}

fn database_locked() -> Error {
    Error::TaskTimeout {
        reason: "database is locked".to_owned(),
    }
}

impl Gatekeeper {
    #[must_use]
    pub fn new(connection_pool: ConnectionPool, config: Config) -> Self {
        let Config {
            acquire_read_timeout_millis,
            acquire_write_timeout_millis,
        } = config;
        Self {
            connection_pool: RwLock::new(connection_pool),
            acquire_read_timeout: Duration::from_millis(acquire_read_timeout_millis.get()),
            acquire_write_timeout: Duration::from_millis(acquire_write_timeout_millis.get()),
            pending_counters: Default::default(),
            decommissioned: AtomicBool::new(false),
        }
    }

    /// Reject all subsequent tasks
    ///
    /// Tasks that are already running are not affected.
    pub fn decommission(&self) {
        self.decommissioned.store(true, Ordering::Release);
    }

    fn check_not_decommissioned(&self) -> Result<()> {
        if self.decommissioned.load(Ordering::Acquire) {
            return Err(Error::TaskTimeout {
                reason: "connection pool has been decommissioned".to_owned(),
            });
        }
        Ok(())
    }

    pub async fn spawn_blocking_read_task<H, R>(&self, connection_handler: H) -> Result<R>
    where
        H: FnOnce(PooledConnection) -> R + Send + 'static,
        R: Send + 'static,
    {
        self.check_not_decommissioned()?;
        let _pending_scope = PendingScope::enter(Arc::clone(&self.pending_counters), TaskMode::Read);
        let guard = timeout(self.acquire_read_timeout, self.connection_pool.read())
            .await
            .map_err(|_elapsed| database_locked())?;
        self.run_blocking(&guard, connection_handler).await
    }

    pub async fn spawn_blocking_write_task<H, R>(&self, connection_handler: H) -> Result<R>
    where
        H: FnOnce(PooledConnection) -> R + Send + 'static,
        R: Send + 'static,
    {
        self.check_not_decommissioned()?;
        let _pending_scope =
            PendingScope::enter(Arc::clone(&self.pending_counters), TaskMode::Write);
        let guard = timeout(self.acquire_write_timeout, self.connection_pool.write())
            .await
            .map_err(|_elapsed| database_locked())?;
        self.run_blocking(&guard, connection_handler).await
    }

    // The lock guard that protects the pool must be held until the task has finished.
    async fn run_blocking<H, R>(&self, pool: &ConnectionPool, connection_handler: H) -> Result<R>
    where
        H: FnOnce(PooledConnection) -> R + Send + 'static,
        R: Send + 'static,
    {
        self.check_not_decommissioned()?;
        let connection = get_pooled_connection(pool)?;
        spawn_blocking(move || connection_handler(connection))
            .await
            .map_err(Error::TaskScheduling)
    }

    #[must_use]
    pub fn pending_tasks(&self) -> PendingTasks {
        PendingTasks {
            read: self.pending_counters.read.load(Ordering::Relaxed),
            write: self.pending_counters.write.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    pub acquire_read_timeout_millis: NonZeroU64,
    pub acquire_write_timeout_millis: NonZeroU64,
}
