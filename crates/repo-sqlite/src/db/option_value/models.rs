// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::{schema::*, *};

#[derive(Debug, Insertable)]
#[diesel(table_name = option_value)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) name: &'a str,
    pub(crate) value: &'a str,
}
