// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, path::PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod pool;

const IN_MEMORY_STORAGE: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Storage {
    /// Volatile database, lost on exit
    InMemory,

    File { path: PathBuf },
}

impl Storage {
    /// Parse a database URL as accepted by `SQLite`
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        let url = url.trim();
        if url.is_empty() || url == IN_MEMORY_STORAGE {
            Self::InMemory
        } else {
            Self::File {
                path: url.strip_prefix("file:").unwrap_or(url).into(),
            }
        }
    }

    #[must_use]
    pub const fn is_in_memory(&self) -> bool {
        matches!(self, Self::InMemory)
    }

    #[must_use]
    pub fn to_url(&self) -> String {
        match self {
            Self::InMemory => IN_MEMORY_STORAGE.to_owned(),
            Self::File { path } => path.display().to_string(),
        }
    }
}

impl fmt::Display for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InMemory => f.write_str(IN_MEMORY_STORAGE),
            Self::File { path } => path.display().fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    pub storage: Storage,
    pub pool: pool::Config,
}
