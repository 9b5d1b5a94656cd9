// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use jiff::Timestamp;

use tones_usecases_sqlite::tone as uc;

use super::*;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestBody {
    pub title: String,

    #[serde(default)]
    pub frequency: Option<String>,

    #[serde(default)]
    pub file: Option<String>,
}

impl From<RequestBody> for Tone {
    fn from(from: RequestBody) -> Self {
        let RequestBody {
            title,
            frequency,
            file,
        } = from;
        Self {
            title,
            frequency,
            file,
        }
    }
}

pub type ResponseBody = ToneListItem;

pub fn handle_request(
    connection: &mut DbConnection,
    base_url: &BaseUrl,
    request_body: RequestBody,
) -> Result<ResponseBody> {
    let new_tone = request_body.into();
    let (header, tone) = connection.transaction::<_, Error, _>(|connection| {
        uc::create(connection, Timestamp::now(), &new_tone).map_err(Into::into)
    })?;
    Ok(ToneListItem::new(&header, tone, base_url))
}
