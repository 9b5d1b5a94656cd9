// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use tones_repo::record::{Record, RecordHeader};

use super::{schema::*, *};

#[derive(Debug, Queryable, Identifiable)]
#[diesel(table_name = record)]
pub(crate) struct QueryableRecord {
    pub(crate) id: RowId,
    pub(crate) row_created_ms: TimestampMillis,
    pub(crate) row_updated_ms: TimestampMillis,
    pub(crate) record_type: String,
    pub(crate) title: String,
}

impl From<QueryableRecord> for (RecordHeader, Record) {
    fn from(from: QueryableRecord) -> Self {
        let QueryableRecord {
            id,
            row_created_ms,
            row_updated_ms,
            record_type,
            title,
        } = from;
        let header = RecordHeader {
            id: id.into(),
            created_at: decode_timestamp(row_created_ms),
            updated_at: decode_timestamp(row_updated_ms),
        };
        let record = Record { record_type, title };
        (header, record)
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = record)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) row_created_ms: TimestampMillis,
    pub(crate) row_updated_ms: TimestampMillis,
    pub(crate) record_type: &'a str,
    pub(crate) title: &'a str,
}

impl<'a> InsertableRecord<'a> {
    pub(crate) fn bind(created_at: jiff::Timestamp, record: &'a Record) -> Self {
        let row_created_updated_ms = encode_timestamp(created_at);
        let Record { record_type, title } = record;
        Self {
            row_created_ms: row_created_updated_ms,
            row_updated_ms: row_created_updated_ms,
            record_type,
            title,
        }
    }
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = record)]
pub(crate) struct TouchableRecord {
    pub(crate) row_updated_ms: TimestampMillis,
}

impl TouchableRecord {
    pub(crate) fn bind(updated_at: jiff::Timestamp) -> Self {
        Self {
            row_updated_ms: encode_timestamp(updated_at),
        }
    }
}
