// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::num::NonZeroU32;

use diesel::{Connection as _, r2d2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Result;

use super::Storage;

pub type ConnectionManager = r2d2::ConnectionManager<diesel::SqliteConnection>;

pub type ConnectionPool = r2d2::Pool<ConnectionManager>;

pub type PooledConnection = r2d2::PooledConnection<ConnectionManager>;

#[cfg(feature = "tokio")]
pub mod gatekeeper;

pub fn create_connection_pool(storage: &Storage, max_size: NonZeroU32) -> Result<ConnectionPool> {
    let url = storage.to_url();
    // Establish a test connection before creating the connection pool to fail early.
    // If the given file is inaccessible r2d2 seems to do multiple retries and logs
    // errors instead of simply failing and returning an error immediately.
    std::mem::drop(diesel::SqliteConnection::establish(&url)?);
    // Each in-memory connection would open a separate, empty database.
    let max_size = if storage.is_in_memory() && max_size.get() > 1 {
        log::info!("Limiting connection pool size for in-memory database from {max_size} to 1");
        NonZeroU32::MIN
    } else {
        max_size
    };
    let manager = ConnectionManager::new(url);
    let mut builder = ConnectionPool::builder().max_size(max_size.get());
    if storage.is_in_memory() {
        // Closing the only connection would discard all data.
        builder = builder.idle_timeout(None).max_lifetime(None);
    }
    let pool = builder.build(manager)?;
    Ok(pool)
}

pub fn get_pooled_connection(pool: &ConnectionPool) -> Result<PooledConnection> {
    pool.get().map_err(Into::into)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    pub max_size: NonZeroU32,

    #[cfg(feature = "tokio")]
    pub gatekeeper: self::gatekeeper::Config,
}
