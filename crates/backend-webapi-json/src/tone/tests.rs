// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::HashMap;

use tones_core::{schema::Registry, tone::register_schema};
use tones_usecases_sqlite::database;

use super::*;

type TestResult<T> = anyhow::Result<T>;

fn establish_connection() -> TestResult<DbConnection> {
    let mut connection = DbConnection::establish(":memory:")?;
    database::initialize(&mut connection)?;
    database::migrate_schema(&mut connection)?;
    Ok(connection)
}

fn base_url() -> BaseUrl {
    BaseUrl::parse_strict("https://example.com/wp-content/plugins/tones/").unwrap()
}

fn create_tone(
    connection: &mut DbConnection,
    title: &str,
    frequency: Option<&str>,
    file: Option<&str>,
) -> TestResult<ToneListItem> {
    let request_body = create::RequestBody {
        title: title.to_owned(),
        frequency: frequency.map(ToOwned::to_owned),
        file: file.map(ToOwned::to_owned),
    };
    let item = create::handle_request(connection, &base_url(), request_body)?;
    Ok(item)
}

#[test]
fn serialize_list_item() -> TestResult<()> {
    let item = ToneListItem {
        id: 12,
        title: "A4".to_owned(),
        frequency: "440".to_owned(),
        file: "A4_440Hz".to_owned(),
        full_url: "https://example.com/wp-content/plugins/tones/assets/mp3/A4_440Hz_-6dBFS_5s.mp3"
            .to_owned(),
    };
    assert_eq!(
        serde_json::json!({
            "id": 12,
            "title": "A4",
            "frequency": "440",
            "file": "A4_440Hz",
            "full_url": "https://example.com/wp-content/plugins/tones/assets/mp3/A4_440Hz_-6dBFS_5s.mp3",
        }),
        serde_json::to_value(&item)?
    );
    Ok(())
}

#[test]
fn list_empty() -> TestResult<()> {
    let mut connection = establish_connection()?;
    let response_body = list::handle_request(&mut connection, &base_url())?;
    assert!(response_body.is_empty());
    assert_eq!("[]", serde_json::to_string(&response_body)?);
    Ok(())
}

#[test]
fn list_tone_with_absent_fields() -> TestResult<()> {
    let mut connection = establish_connection()?;
    let created = create_tone(&mut connection, "Silence", None, None)?;
    let response_body = list::handle_request(&mut connection, &base_url())?;
    assert_eq!(vec![created.clone()], response_body);
    assert_eq!("", created.frequency);
    assert_eq!("", created.file);
    assert_eq!(
        "https://example.com/wp-content/plugins/tones/assets/mp3/_-6dBFS_5s.mp3",
        created.full_url
    );
    Ok(())
}

#[test]
fn list_sanitizes_file_name_in_url_only() -> TestResult<()> {
    let mut connection = establish_connection()?;
    create_tone(&mut connection, "Escape", Some("440"), Some("../../etc"))?;
    let response_body = list::handle_request(&mut connection, &base_url())?;
    let [item] = response_body.as_slice() else {
        panic!("expected exactly one item");
    };
    assert_eq!("../../etc", item.file);
    assert_eq!(
        "https://example.com/wp-content/plugins/tones/assets/mp3/etc_-6dBFS_5s.mp3",
        item.full_url
    );
    Ok(())
}

#[test]
fn save_then_list() -> TestResult<()> {
    let mut connection = establish_connection()?;
    let mut registry = Registry::new();
    register_schema(&mut registry)?;
    let created = create_tone(&mut connection, "A4", None, None)?;
    let submitted: HashMap<_, _> = [
        ("tone_freq".to_owned(), "440".to_owned()),
        ("tone_file".to_owned(), "A4_440Hz".to_owned()),
        ("tone_color".to_owned(), "blue".to_owned()),
    ]
    .into_iter()
    .collect();
    save::handle_request(
        &mut connection,
        &registry,
        RecordId::new(created.id),
        &submitted,
    )?;
    let response_body = list::handle_request(&mut connection, &base_url())?;
    assert_eq!(
        vec![ToneListItem {
            id: created.id,
            title: "A4".to_owned(),
            frequency: "440".to_owned(),
            file: "A4_440Hz".to_owned(),
            full_url:
                "https://example.com/wp-content/plugins/tones/assets/mp3/A4_440Hz_-6dBFS_5s.mp3"
                    .to_owned(),
        }],
        response_body
    );
    Ok(())
}

#[test]
fn purge_then_list() -> TestResult<()> {
    let mut connection = establish_connection()?;
    let created = create_tone(&mut connection, "A4", Some("440"), None)?;
    purge::handle_request(&mut connection, RecordId::new(created.id))?;
    assert!(list::handle_request(&mut connection, &base_url())?.is_empty());
    assert!(matches!(
        purge::handle_request(&mut connection, RecordId::new(created.id)),
        Err(Error::UseCase(uc::Error::Repository(
            tones_repo::RepoError::NotFound
        )))
    ));
    Ok(())
}
