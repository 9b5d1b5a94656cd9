// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::HashMap;

use jiff::Timestamp;

use tones_core::{
    Tone,
    schema::Registry,
    tone::{CONTENT_TYPE, FILE_FIELD_KEY, FREQUENCY_FIELD_KEY},
};
use tones_repo::{
    meta::MetaRepo as _,
    record::{EntityRepo as _, Record, RecordHeader, RecordId, RecordOrdering},
};

use super::*;

pub type Entry = (RecordHeader, Tone);

fn load_tone_record(repo: &mut RepoConnection<'_>, id: RecordId) -> Result<(RecordHeader, Record)> {
    let (header, record) = repo.load_record(id)?;
    if record.record_type != CONTENT_TYPE {
        return Err(Error::NotATone {
            id,
            record_type: record.record_type,
        });
    }
    Ok((header, record))
}

fn load_fields(repo: &mut RepoConnection<'_>, id: RecordId, title: String) -> Result<Tone> {
    let mut tone = Tone {
        title,
        ..Default::default()
    };
    for meta_value in repo.load_meta_values(id)? {
        let key = meta_value.key;
        if !tone.set_field_value(&key, meta_value.value) {
            log::debug!("Ignoring metadata \"{key}\" of record {id}");
        }
    }
    Ok(tone)
}

pub fn load_one(connection: &mut DbConnection, id: RecordId) -> Result<Entry> {
    let mut repo = RepoConnection::new(connection);
    let (header, record) = load_tone_record(&mut repo, id)?;
    let tone = load_fields(&mut repo, id, record.title)?;
    Ok((header, tone))
}

/// Load all tones without any limit
pub fn load_all(connection: &mut DbConnection, ordering: RecordOrdering) -> Result<Vec<Entry>> {
    let mut repo = RepoConnection::new(connection);
    let mut records: Vec<(RecordHeader, Record)> = Vec::new();
    repo.load_records(CONTENT_TYPE, ordering, &mut records)?;
    let mut entries = Vec::with_capacity(records.len());
    for (header, record) in records {
        debug_assert_eq!(CONTENT_TYPE, record.record_type);
        let tone = load_fields(&mut repo, header.id, record.title)?;
        entries.push((header, tone));
    }
    Ok(entries)
}

/// Create a new tone
///
/// Only the fields that are present are stored.
pub fn create(connection: &mut DbConnection, created_at: Timestamp, new_tone: &Tone) -> Result<Entry> {
    let mut repo = RepoConnection::new(connection);
    let record = Record {
        record_type: CONTENT_TYPE.to_owned(),
        title: new_tone.title.clone(),
    };
    let id = repo.insert_record(created_at, &record)?;
    for key in [FREQUENCY_FIELD_KEY, FILE_FIELD_KEY] {
        if let Some(value) = new_tone.field_value(key) {
            repo.store_meta_value(id, key, value)?;
        }
    }
    log::info!("Created tone {id}: \"{title}\"", title = new_tone.title);
    let (header, record) = load_tone_record(&mut repo, id)?;
    let tone = load_fields(&mut repo, id, record.title)?;
    Ok((header, tone))
}

/// Store the submitted values of all declared fields
///
/// Values are stored verbatim. Fields that have not been submitted
/// keep their current value. Submitted keys that have not been
/// declared for tones are ignored.
pub fn save_submitted_fields(
    connection: &mut DbConnection,
    registry: &Registry,
    id: RecordId,
    submitted: &HashMap<String, String>,
    updated_at: Timestamp,
) -> Result<Entry> {
    let mut repo = RepoConnection::new(connection);
    load_tone_record(&mut repo, id)?;
    for field in registry.fields_of(CONTENT_TYPE) {
        let Some(value) = submitted.get(&field.key) else {
            continue;
        };
        log::debug!("Saving {key} = \"{value}\" of tone {id}", key = field.key);
        repo.store_meta_value(id, &field.key, value)?;
    }
    repo.touch_record(id, updated_at)?;
    let (header, record) = load_tone_record(&mut repo, id)?;
    let tone = load_fields(&mut repo, id, record.title)?;
    Ok((header, tone))
}

/// Delete a tone together with all its metadata
pub fn purge(connection: &mut DbConnection, id: RecordId) -> Result<()> {
    let mut repo = RepoConnection::new(connection);
    load_tone_record(&mut repo, id)?;
    repo.purge_record(id)?;
    log::info!("Purged tone {id}");
    Ok(())
}
