// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::{prelude::*, record::RecordId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetaValue {
    pub key: String,
    pub value: String,
}

/// Single-valued metadata of records
pub trait MetaRepo {
    fn load_meta_value(&mut self, record_id: RecordId, key: &str) -> RepoResult<Option<String>>;

    /// All metadata of a record, ordered by key
    fn load_meta_values(&mut self, record_id: RecordId) -> RepoResult<Vec<MetaValue>>;

    /// Insert or overwrite a value
    ///
    /// The last write wins.
    fn store_meta_value(&mut self, record_id: RecordId, key: &str, value: &str) -> RepoResult<()>;
}
