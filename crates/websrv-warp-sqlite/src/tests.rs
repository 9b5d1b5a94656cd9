// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use warp::{Filter as _, hyper::body::to_bytes};

use tones_repo::record::RecordId;

use super::*;

async fn render_rejection(reject: Rejection) -> (StatusCode, serde_json::Value) {
    let response = handle_rejection(reject).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body()).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn render_missing_tone() {
    let err = uc::Error::Repository(RepoError::NotFound);
    let (status, body) = render_rejection(reject_on_error(err)).await;
    assert_eq!(StatusCode::NOT_FOUND, status);
    assert_eq!(
        serde_json::json!({"code": 404, "message": "no such tone"}),
        body
    );
}

#[tokio::test]
async fn render_unauthorized_with_challenge() {
    let response = handle_rejection(reject_on_error(Error::Unauthorized))
        .await
        .unwrap();
    assert_eq!(StatusCode::UNAUTHORIZED, response.status());
    assert_eq!(
        Some(r#"Basic realm="tones""#),
        response
            .headers()
            .get(WWW_AUTHENTICATE)
            .and_then(|value| value.to_str().ok())
    );
}

#[tokio::test]
async fn no_challenge_unless_unauthorized() {
    let response = handle_rejection(reject_on_error(Error::Conflict))
        .await
        .unwrap();
    assert_eq!(StatusCode::CONFLICT, response.status());
    assert!(response.headers().get(WWW_AUTHENTICATE).is_none());
}

#[tokio::test]
async fn render_timeout() {
    let err = db::Error::TaskTimeout {
        reason: "database is locked".to_owned(),
    };
    let (status, body) = render_rejection(reject_on_error(err)).await;
    assert_eq!(StatusCode::REQUEST_TIMEOUT, status);
    assert_eq!("database is locked", body["message"]);
}

#[tokio::test]
async fn render_record_of_other_type() {
    let err = uc::Error::NotATone {
        id: RecordId::new(1),
        record_type: "post".to_owned(),
    };
    let (status, body) = render_rejection(reject_on_error(err)).await;
    assert_eq!(StatusCode::BAD_REQUEST, status);
    assert_eq!(
        r#"record 1 is of type "post" and not a tone"#,
        body["message"]
    );
}

#[tokio::test]
async fn render_use_case_errors() {
    let err = uc::Error::Repository(RepoError::Conflict);
    let (status, _) = render_rejection(reject_on_error(err)).await;
    assert_eq!(StatusCode::CONFLICT, status);

    let err = uc::Error::Repository(RepoError::Aborted);
    let (status, _) = render_rejection(reject_on_error(err)).await;
    assert_eq!(StatusCode::SERVICE_UNAVAILABLE, status);

    let err = api::Error::BadRequest(anyhow::anyhow!("invalid title"));
    let (status, body) = render_rejection(reject_on_error(err)).await;
    assert_eq!(StatusCode::BAD_REQUEST, status);
    assert_eq!("invalid title", body["message"]);

    let err = api::Error::Other(anyhow::anyhow!("boom"));
    let (status, _) = render_rejection(reject_on_error(err)).await;
    assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status);
}

#[tokio::test]
async fn render_unmatched_route() {
    let (status, body) = render_rejection(warp::reject::not_found()).await;
    assert_eq!(StatusCode::NOT_FOUND, status);
    assert_eq!(
        serde_json::json!({"code": 404, "message": "no such route"}),
        body
    );
}

#[tokio::test]
async fn render_oversized_form() {
    let filter = warp::post()
        .and(warp::body::content_length_limit(4))
        .and(warp::body::form())
        .map(|_: std::collections::HashMap<String, String>| warp::reply());
    let response = warp::test::request()
        .method("POST")
        .header("content-type", "application/x-www-form-urlencoded")
        .body("tone_freq=440")
        .filter(&filter)
        .await;
    let Err(rejection) = response else {
        panic!("request body exceeds the limit");
    };
    let (status, body) = render_rejection(rejection).await;
    assert_eq!(StatusCode::PAYLOAD_TOO_LARGE, status);
    assert_eq!(413, body["code"]);
}

#[test]
fn nested_results_after_blocking_task() {
    let ok: StdResult<StdResult<u8, uc::Error>, db::Error> = Ok(Ok(7));
    assert_eq!(7, after_blocking_task_finished(ok).unwrap());
    let failed: StdResult<StdResult<u8, uc::Error>, db::Error> =
        Ok(Err(uc::Error::Repository(RepoError::NotFound)));
    let rejection = after_blocking_task_finished(failed).unwrap_err();
    assert!(matches!(rejection.find::<Error>(), Some(Error::NotFound)));
}
