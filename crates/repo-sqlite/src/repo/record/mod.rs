// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use jiff::Timestamp;

use tones_repo::record::*;

use crate::{
    db::{
        record::{models::*, schema::*},
        record_meta::schema::*,
    },
    prelude::*,
};

impl EntityRepo for crate::Connection<'_> {
    fn insert_record(&mut self, created_at: Timestamp, created: &Record) -> RepoResult<RecordId> {
        let insertable = InsertableRecord::bind(created_at, created);
        let row_id = diesel::insert_into(record::table)
            .values(&insertable)
            .returning(record::row_id)
            .get_result::<RowId>(self.as_mut())
            .map_err(repo_error)?;
        Ok(row_id.into())
    }

    fn load_record(&mut self, id: RecordId) -> RepoResult<(RecordHeader, Record)> {
        record::table
            .filter(record::row_id.eq(RowId::from(id)))
            .first::<QueryableRecord>(self.as_mut())
            .map_err(repo_error)
            .map(Into::into)
    }

    fn touch_record(&mut self, id: RecordId, updated_at: Timestamp) -> RepoResult<()> {
        let touchable = TouchableRecord::bind(updated_at);
        let target = record::table.filter(record::row_id.eq(RowId::from(id)));
        let query = diesel::update(target).set(&touchable);
        let rows_affected: usize = query.execute(self.as_mut()).map_err(repo_error)?;
        debug_assert!(rows_affected <= 1);
        if rows_affected < 1 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    fn load_records(
        &mut self,
        record_type: &str,
        ordering: RecordOrdering,
        collector: &mut dyn ReservableRecordCollector<Header = RecordHeader, Record = Record>,
    ) -> RepoResult<()> {
        let target = record::table
            .filter(record::record_type.eq(record_type))
            .into_boxed();
        let target = match ordering {
            RecordOrdering::CreatedAtDesc => {
                target.order_by((record::row_created_ms.desc(), record::row_id.desc()))
            }
            RecordOrdering::CreatedAtAsc => {
                target.order_by((record::row_created_ms.asc(), record::row_id.asc()))
            }
            RecordOrdering::TitleAsc => target.order_by((record::title.asc(), record::row_id.asc())),
        };
        let records = target
            .load::<QueryableRecord>(self.as_mut())
            .map_err(repo_error)?;
        collector.reserve(records.len());
        for record in records {
            let (header, record) = record.into();
            collector.collect(header, record);
        }
        Ok(())
    }

    fn purge_record(&mut self, id: RecordId) -> RepoResult<()> {
        let row_id = RowId::from(id);
        // Foreign key constraints are not enabled on every pooled connection
        // and must not be relied on for cascading deletes.
        let meta_rows_deleted =
            diesel::delete(record_meta::table.filter(record_meta::record_id.eq(row_id)))
                .execute(self.as_mut())
                .map_err(repo_error)?;
        let rows_affected = diesel::delete(record::table.filter(record::row_id.eq(row_id)))
            .execute(self.as_mut())
            .map_err(repo_error)?;
        debug_assert!(rows_affected <= 1);
        if rows_affected < 1 {
            debug_assert_eq!(0, meta_rows_deleted);
            return Err(RepoError::NotFound);
        }
        log::debug!("Purged record {id} with {meta_rows_deleted} metadata row(s)");
        Ok(())
    }
}
