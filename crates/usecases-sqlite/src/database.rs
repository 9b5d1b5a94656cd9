// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use tones_repo_sqlite::{initialize_database, run_migrations};

use super::*;

/// Configure the database engine for the given connection
pub fn initialize(connection: &mut DbConnection) -> Result<()> {
    initialize_database(connection).map_err(StorageError::from)?;
    Ok(())
}

pub fn migrate_schema(connection: &mut DbConnection) -> Result<()> {
    for migration_version in run_migrations(connection)
        .map_err(|err| anyhow::anyhow!(err))
        .map_err(Error::DatabaseMigration)?
    {
        log::info!("Applied migration '{migration_version}'");
    }
    Ok(())
}

pub fn analyze_and_optimize_stats(connection: &mut DbConnection) -> Result<()> {
    tones_storage_sqlite::analyze_and_optimize_database_stats(connection)?;
    Ok(())
}
