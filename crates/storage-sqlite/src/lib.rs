// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! SQLite storage for tone records
//!
//! Connection setup, pooling and the gatekeeper that serializes
//! writers while admitting concurrent readers.

use diesel::{RunQueryDsl as _, SqliteConnection};
use thiserror::Error;

pub mod connection;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Database(#[from] diesel::result::Error),

    #[error(transparent)]
    DatabaseConnection(#[from] diesel::ConnectionError),

    #[error(transparent)]
    DatabaseConnectionPool(#[from] r2d2::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),

    #[cfg(feature = "tokio")]
    #[error("timeout: {reason}")]
    TaskTimeout { reason: String },

    #[cfg(feature = "tokio")]
    #[error(transparent)]
    TaskScheduling(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Gather statistics about the schema and let SQLite apply
/// the optimizations it recommends for the query planner.
///
/// Runs once after migrations on startup.
///
/// See also:
/// - <https://www.sqlite.org/lang_analyze.html>
/// - <https://www.sqlite.org/pragma.html#pragma_optimize>
pub fn analyze_and_optimize_database_stats(connection: &mut SqliteConnection) -> Result<()> {
    diesel::dsl::sql_query("ANALYZE").execute(connection)?;
    diesel::dsl::sql_query("PRAGMA optimize").execute(connection)?;
    Ok(())
}
