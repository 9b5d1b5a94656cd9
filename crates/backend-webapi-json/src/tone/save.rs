// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::HashMap;

use jiff::Timestamp;

use tones_core::schema::Registry;
use tones_usecases_sqlite::tone as uc;

use super::*;

/// Submitted form fields
pub type RequestBody = HashMap<String, String>;

pub type ResponseBody = (RecordHeader, Tone);

pub fn handle_request(
    connection: &mut DbConnection,
    registry: &Registry,
    id: RecordId,
    request_body: &RequestBody,
) -> Result<ResponseBody> {
    connection.transaction::<_, Error, _>(|connection| {
        uc::save_submitted_fields(connection, registry, id, request_body, Timestamp::now())
            .map_err(Into::into)
    })
}
