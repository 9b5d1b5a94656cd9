// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use tones_repo::record::RecordOrdering;
use tones_usecases_sqlite::tone as uc;

use super::*;

pub type ResponseBody = Vec<ToneListItem>;

/// List all tones, newest first
pub fn handle_request(connection: &mut DbConnection, base_url: &BaseUrl) -> Result<ResponseBody> {
    let entries = connection.transaction::<_, Error, _>(|connection| {
        uc::load_all(connection, RecordOrdering::CreatedAtDesc).map_err(Into::into)
    })?;
    log::debug!("Listing {num_entries} tone(s)", num_entries = entries.len());
    let response_body = entries
        .into_iter()
        .map(|(header, tone)| ToneListItem::new(&header, tone, base_url))
        .collect();
    Ok(response_body)
}
