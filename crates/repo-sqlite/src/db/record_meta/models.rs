// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use tones_repo::meta::MetaValue;

use super::{schema::*, *};

#[derive(Debug, Queryable)]
pub(crate) struct QueryableRecord {
    pub(crate) meta_key: String,
    pub(crate) meta_value: String,
}

impl From<QueryableRecord> for MetaValue {
    fn from(from: QueryableRecord) -> Self {
        let QueryableRecord {
            meta_key,
            meta_value,
        } = from;
        Self {
            key: meta_key,
            value: meta_value,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = record_meta)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) record_id: RowId,
    pub(crate) meta_key: &'a str,
    pub(crate) meta_value: &'a str,
}

impl<'a> InsertableRecord<'a> {
    pub(crate) fn bind(record_id: RowId, meta_key: &'a str, meta_value: &'a str) -> Self {
        Self {
            record_id,
            meta_key,
            meta_value,
        }
    }
}
