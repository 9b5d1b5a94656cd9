// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use base64::{Engine as _, engine::general_purpose::STANDARD};
use tokio::sync::mpsc;
use warp::{http::StatusCode, test::request};

use tones_websrv_warp_sqlite::handle_rejection;

use crate::{config::Config, runtime::startup};

use super::*;

const ACCESS_TOKEN: &str = "s3cr3t";

fn new_filters_with_shutdown(
    access_token: Option<&str>,
) -> (
    impl Filter<Extract = (impl warp::Reply,), Error = std::convert::Infallible> + Clone + 'static,
    mpsc::UnboundedReceiver<()>,
) {
    let mut config = Config::default();
    config.editor.access_token = access_token.map(ToOwned::to_owned);
    let context = startup(&config).unwrap();
    let (server_shutdown_tx, server_shutdown_rx) = mpsc::unbounded_channel();
    let filters = create_filters(Arc::new(context), server_shutdown_tx).recover(handle_rejection);
    (filters, server_shutdown_rx)
}

fn new_filters(
    access_token: Option<&str>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = std::convert::Infallible> + Clone + 'static
{
    new_filters_with_shutdown(access_token).0
}

fn authorization() -> String {
    format!("Bearer {ACCESS_TOKEN}")
}

/// Credentials as sent by a browser after the Basic challenge
fn basic_authorization(user: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{password}")))
}

fn json_body(response: &warp::http::Response<warp::hyper::body::Bytes>) -> serde_json::Value {
    serde_json::from_slice(response.body()).unwrap()
}

#[tokio::test]
async fn list_empty() {
    let filters = new_filters(None);
    let response = request()
        .method("GET")
        .path("/tones/v1/list")
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::OK, response.status());
    assert_eq!(serde_json::json!([]), json_body(&response));
}

#[tokio::test]
async fn editor_not_mounted_without_access_token() {
    let filters = new_filters(None);
    let response = request()
        .method("GET")
        .path("/editor/tones/1")
        .header("authorization", authorization())
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::NOT_FOUND, response.status());
}

#[tokio::test]
async fn editor_rejects_missing_or_wrong_token() {
    let filters = new_filters(Some(ACCESS_TOKEN));

    let response = request()
        .method("GET")
        .path("/editor/tones/1")
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::UNAUTHORIZED, response.status());

    let response = request()
        .method("DELETE")
        .path("/editor/tones/1")
        .header("authorization", "Bearer wrong")
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::UNAUTHORIZED, response.status());

    let response = request()
        .method("POST")
        .path("/editor/tones")
        .header("authorization", ACCESS_TOKEN)
        .json(&serde_json::json!({"title": "A4"}))
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::UNAUTHORIZED, response.status());
}

#[tokio::test]
async fn create_save_list_purge() {
    let filters = new_filters(Some(ACCESS_TOKEN));

    let response = request()
        .method("POST")
        .path("/editor/tones")
        .header("authorization", authorization())
        .json(&serde_json::json!({"title": "A4"}))
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::CREATED, response.status());
    let created = json_body(&response);
    let id = created["id"].as_i64().unwrap();
    assert_eq!("", created["frequency"]);

    let response = request()
        .method("GET")
        .path(&format!("/editor/tones/{id}"))
        .header("authorization", authorization())
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::OK, response.status());
    let html = String::from_utf8_lossy(response.body());
    assert!(html.contains(r#"name="tone_freq" id="tone_freq" value="""#));

    let response = request()
        .method("POST")
        .path(&format!("/editor/tones/{id}"))
        .header("authorization", authorization())
        .header("content-type", "application/x-www-form-urlencoded")
        .body("tone_freq=440&tone_file=A4_440Hz&unknown=ignored")
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::OK, response.status());
    let html = String::from_utf8_lossy(response.body());
    assert!(html.contains(r#"id="tone_freq" value="440""#));
    assert!(html.contains(r#"id="tone_file" value="A4_440Hz""#));

    let response = request()
        .method("GET")
        .path("/tones/v1/list")
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::OK, response.status());
    assert_eq!(
        serde_json::json!([{
            "id": id,
            "title": "A4",
            "frequency": "440",
            "file": "A4_440Hz",
            "full_url": "http://localhost:8080/assets/mp3/A4_440Hz_-6dBFS_5s.mp3",
        }]),
        json_body(&response)
    );

    let response = request()
        .method("DELETE")
        .path(&format!("/editor/tones/{id}"))
        .header("authorization", authorization())
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::NO_CONTENT, response.status());

    let response = request()
        .method("DELETE")
        .path(&format!("/editor/tones/{id}"))
        .header("authorization", authorization())
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::NOT_FOUND, response.status());

    let response = request()
        .method("GET")
        .path("/tones/v1/list")
        .reply(&filters)
        .await;
    assert_eq!(serde_json::json!([]), json_body(&response));
}

#[tokio::test]
async fn save_unknown_tone() {
    let filters = new_filters(Some(ACCESS_TOKEN));
    let response = request()
        .method("POST")
        .path("/editor/tones/42")
        .header("authorization", authorization())
        .header("content-type", "application/x-www-form-urlencoded")
        .body("tone_freq=440")
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::NOT_FOUND, response.status());
    assert_eq!(404, json_body(&response)["code"]);
}

#[tokio::test]
async fn unauthorized_editor_request_is_challenged() {
    let filters = new_filters(Some(ACCESS_TOKEN));
    let response = request()
        .method("POST")
        .path("/editor/tones/1")
        .header("content-type", "application/x-www-form-urlencoded")
        .body("tone_freq=440")
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::UNAUTHORIZED, response.status());
    assert_eq!(
        r#"Basic realm="tones""#,
        response.headers()["www-authenticate"]
    );

    let response = request()
        .method("GET")
        .path("/editor/tones/1")
        .header("authorization", basic_authorization("editor", "wrong"))
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::UNAUTHORIZED, response.status());
}

#[tokio::test]
async fn save_form_from_browser_with_basic_credentials() {
    let filters = new_filters(Some(ACCESS_TOKEN));

    let response = request()
        .method("POST")
        .path("/editor/tones")
        .header("authorization", authorization())
        .json(&serde_json::json!({"title": "C5"}))
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::CREATED, response.status());
    let id = json_body(&response)["id"].as_i64().unwrap();

    // Browsers reuse the Basic credentials for the form submission
    // of the page they have loaded.
    let credentials = basic_authorization("editor", ACCESS_TOKEN);
    let response = request()
        .method("GET")
        .path(&format!("/editor/tones/{id}"))
        .header("authorization", &credentials)
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::OK, response.status());
    let html = String::from_utf8_lossy(response.body());
    assert!(html.contains(&format!(r#"action="/editor/tones/{id}""#)));

    let response = request()
        .method("POST")
        .path(&format!("/editor/tones/{id}"))
        .header("authorization", &credentials)
        .header("content-type", "application/x-www-form-urlencoded")
        .body("tone_freq=523.25&tone_file=C5_523Hz")
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::OK, response.status());
    let html = String::from_utf8_lossy(response.body());
    assert!(html.contains(r#"id="tone_freq" value="523.25""#));

    let response = request()
        .method("GET")
        .path("/tones/v1/list")
        .reply(&filters)
        .await;
    assert_eq!("523.25", json_body(&response)[0]["frequency"]);
}

#[tokio::test]
async fn blank_access_token_disables_editor() {
    let filters = new_filters(Some("  "));
    let response = request()
        .method("GET")
        .path("/editor/tones/1")
        .header("authorization", "Bearer ")
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::NOT_FOUND, response.status());
}

#[tokio::test]
async fn shutdown_not_mounted_without_access_token() {
    let (filters, _server_shutdown_rx) = new_filters_with_shutdown(None);
    let response = request()
        .method("POST")
        .path("/shutdown")
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::NOT_FOUND, response.status());
}

#[tokio::test]
async fn shutdown_requires_access_token() {
    let (filters, mut server_shutdown_rx) = new_filters_with_shutdown(Some(ACCESS_TOKEN));

    let response = request()
        .method("POST")
        .path("/shutdown")
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::UNAUTHORIZED, response.status());
    assert!(server_shutdown_rx.try_recv().is_err());

    let response = request()
        .method("POST")
        .path("/shutdown")
        .header("authorization", "Bearer wrong")
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::UNAUTHORIZED, response.status());
    assert!(server_shutdown_rx.try_recv().is_err());

    let response = request()
        .method("POST")
        .path("/shutdown")
        .header("authorization", authorization())
        .reply(&filters)
        .await;
    assert_eq!(StatusCode::ACCEPTED, response.status());
    assert_eq!(Ok(()), server_shutdown_rx.try_recv());
}
