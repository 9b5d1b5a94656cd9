// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::path::PathBuf;

use crate::util::url::BaseUrl;

/// Current version of the one-time upgrade steps
///
/// Bump this number when adding a new step.
pub const MAINTENANCE_VERSION: u32 = 1;

/// Prefix of persisted option names
pub const OPTION_TOKEN: &str = "mad_tones";

#[must_use]
pub fn maintenance_version_option_name() -> String {
    format!("{OPTION_TOKEN}_maint_version")
}

/// Read-only properties of the running instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    pub version: &'static str,

    /// Unique name of the instance
    pub basename: String,

    /// Public URL of the installation directory
    ///
    /// Audio assets are published below this URL.
    pub url: BaseUrl,

    /// Installation directory in the local file system
    pub path: PathBuf,
}

impl PluginInfo {
    #[must_use]
    pub fn new(basename: String, url: BaseUrl, path: PathBuf) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            basename,
            url,
            path,
        }
    }
}
