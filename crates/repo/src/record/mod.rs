// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use jiff::Timestamp;

use crate::prelude::*;

record_id_newtype!(RecordId);

pub type RecordHeader = crate::RecordHeader<RecordId>;

/// Core attributes of a content record
///
/// Additional values are stored separately as metadata,
/// see [`crate::meta::MetaRepo`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub record_type: String,
    pub title: String,
}

/// Order of records when loading multiple records
///
/// There is no implicit default, callers must choose explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordOrdering {
    /// Most recently created first, ties broken by id (descending)
    CreatedAtDesc,

    /// Least recently created first, ties broken by id (ascending)
    CreatedAtAsc,

    /// Alphabetically by title, ties broken by id (ascending)
    TitleAsc,
}

pub trait EntityRepo {
    fn insert_record(&mut self, created_at: Timestamp, record: &Record) -> RepoResult<RecordId>;

    fn load_record(&mut self, id: RecordId) -> RepoResult<(RecordHeader, Record)>;

    fn touch_record(&mut self, id: RecordId, updated_at: Timestamp) -> RepoResult<()>;

    /// Load all records of the given type without any limit
    fn load_records(
        &mut self,
        record_type: &str,
        ordering: RecordOrdering,
        collector: &mut dyn ReservableRecordCollector<Header = RecordHeader, Record = Record>,
    ) -> RepoResult<()>;

    /// Delete the record and all its metadata
    fn purge_record(&mut self, id: RecordId) -> RepoResult<()>;
}
