// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use tones_repo::{
    meta::{MetaRepo, MetaValue},
    record::RecordId,
};

use crate::{
    db::{
        record::schema::*,
        record_meta::{models::*, schema::*},
    },
    prelude::*,
};

impl MetaRepo for crate::Connection<'_> {
    fn load_meta_value(&mut self, record_id: RecordId, key: &str) -> RepoResult<Option<String>> {
        record_meta::table
            .select(record_meta::meta_value)
            .filter(record_meta::record_id.eq(RowId::from(record_id)))
            .filter(record_meta::meta_key.eq(key))
            .first::<String>(self.as_mut())
            .map_err(repo_error)
            .optional()
    }

    fn load_meta_values(&mut self, record_id: RecordId) -> RepoResult<Vec<MetaValue>> {
        let records = record_meta::table
            .select((record_meta::meta_key, record_meta::meta_value))
            .filter(record_meta::record_id.eq(RowId::from(record_id)))
            .order_by(record_meta::meta_key)
            .load::<QueryableRecord>(self.as_mut())
            .map_err(repo_error)?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    fn store_meta_value(&mut self, record_id: RecordId, key: &str, value: &str) -> RepoResult<()> {
        let row_id = RowId::from(record_id);
        let record_exists = diesel::select(diesel::dsl::exists(
            record::table.filter(record::row_id.eq(row_id)),
        ))
        .get_result::<bool>(self.as_mut())
        .map_err(repo_error)?;
        if !record_exists {
            return Err(RepoError::NotFound);
        }
        let insertable = InsertableRecord::bind(row_id, key, value);
        let rows_affected = diesel::insert_into(record_meta::table)
            .values(&insertable)
            .on_conflict((record_meta::record_id, record_meta::meta_key))
            .do_update()
            .set(record_meta::meta_value.eq(value))
            .execute(self.as_mut())
            .map_err(repo_error)?;
        debug_assert_eq!(1, rows_affected);
        Ok(())
    }
}
