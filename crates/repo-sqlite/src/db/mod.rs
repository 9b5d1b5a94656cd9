// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

pub(crate) mod option_value;
pub(crate) mod record;
pub(crate) mod record_meta;

mod join {
    use crate::db::{record::schema::*, record_meta::schema::*};

    diesel::joinable!(record_meta -> record (record_id));

    diesel::allow_tables_to_appear_in_same_query!(record, record_meta,);
}
