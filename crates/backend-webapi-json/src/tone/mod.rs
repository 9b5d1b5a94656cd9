// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use tones_core::{Tone, util::url::BaseUrl};
use tones_repo::record::{RecordHeader, RecordId};

use super::*;

pub mod create;
pub mod list;
pub mod load_one;
pub mod purge;
pub mod save;

/// A tone as listed by the public API
///
/// Absent fields are represented by empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToneListItem {
    pub id: i64,
    pub title: String,
    pub frequency: String,
    pub file: String,
    pub full_url: String,
}

impl ToneListItem {
    #[must_use]
    pub fn new(header: &RecordHeader, tone: Tone, base_url: &BaseUrl) -> Self {
        let full_url = tone.asset_url(base_url);
        let Tone {
            title,
            frequency,
            file,
        } = tone;
        Self {
            id: header.id.to_inner(),
            title,
            frequency: frequency.unwrap_or_default(),
            file: file.unwrap_or_default(),
            full_url,
        }
    }
}

#[cfg(test)]
mod tests;
