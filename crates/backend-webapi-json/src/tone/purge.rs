// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use tones_usecases_sqlite::tone as uc;

use super::*;

pub type ResponseBody = ();

pub fn handle_request(connection: &mut DbConnection, id: RecordId) -> Result<ResponseBody> {
    connection.transaction::<_, Error, _>(|connection| uc::purge(connection, id).map_err(Into::into))
}
