// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::Connection as _;

use tones_core::plugin::{MAINTENANCE_VERSION, maintenance_version_option_name};
use tones_repo::option::OptionRepo as _;

use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// The persisted version before running any steps
    pub previous_version: u32,

    /// The persisted version afterwards
    pub current_version: u32,
}

impl Outcome {
    #[must_use]
    pub const fn steps_applied(&self) -> u32 {
        self.current_version.saturating_sub(self.previous_version)
    }
}

/// Parse a persisted version number
///
/// Missing or malformed values are treated as version 0, i.e.
/// all steps will be applied.
fn parse_version(value: Option<&str>) -> u32 {
    let Some(value) = value else {
        return 0;
    };
    value.trim().parse().unwrap_or_else(|err| {
        log::warn!("Invalid maintenance version \"{value}\": {err}");
        0
    })
}

fn run_step(version: u32) {
    match version {
        1 => {
            // Initial version, nothing to migrate.
            log::info!("Maintenance step {version}: nothing to do");
        }
        _ => unreachable!("undefined maintenance step {version}"),
    }
}

/// Run all pending one-time maintenance steps in order
///
/// Each step runs exactly once per database. The target version is
/// persisted after all pending steps succeeded.
pub fn run_pending(connection: &mut DbConnection) -> Result<Outcome> {
    let option_name = maintenance_version_option_name();
    connection
        .transaction::<_, TransactionError, _>(|connection| {
            let mut repo = RepoConnection::new(connection);
            let stored_value = repo.load_option_value(&option_name)?;
            let previous_version = parse_version(stored_value.as_deref());
            if previous_version > MAINTENANCE_VERSION {
                log::warn!(
                    "Persisted maintenance version {previous_version} is newer than \
                     {MAINTENANCE_VERSION}"
                );
            }
            for version in previous_version + 1..=MAINTENANCE_VERSION {
                run_step(version);
            }
            let current_version = MAINTENANCE_VERSION;
            let current_value = current_version.to_string();
            if stored_value.as_deref() != Some(current_value.as_str()) {
                repo.store_option_value(&option_name, &current_value)?;
            }
            Ok(Outcome {
                previous_version,
                current_version,
            })
        })
        .map_err(Into::into)
}
