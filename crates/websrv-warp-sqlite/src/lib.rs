// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Mapping of request failures onto HTTP responses
//!
//! Request handlers run on a blocking thread while holding a pooled
//! database connection. All failures are turned into warp rejections
//! and finally rendered as JSON by [`handle_rejection`].

use std::{convert::Infallible, error::Error as StdError, result::Result as StdResult};

use serde::Serialize;
use thiserror::Error;
use warp::{
    Reply as _,
    body::BodyDeserializeError,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    reject::{
        self, InvalidHeader, LengthRequired, MethodNotAllowed, PayloadTooLarge, Reject, Rejection,
        UnsupportedMediaType,
    },
    reply::Response,
};

use tones_backend_webapi_json as api;
use tones_repo::prelude::RepoError;
use tones_storage_sqlite::{
    self as db,
    connection::pool::{PooledConnection, gatekeeper::Gatekeeper as DatabaseConnectionGatekeeper},
};
use tones_usecases_sqlite as uc;

/// Challenge that makes browsers ask for the editor credentials
pub const AUTHENTICATION_CHALLENGE: &str = r#"Basic realm="tones""#;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    BadRequest(anyhow::Error),

    #[error("missing or invalid editor credentials")]
    Unauthorized,

    #[error("no such tone")]
    NotFound,

    /// The addressed record is not a tone
    #[error("{0}")]
    NotATone(String),

    #[error("conflicting modification")]
    Conflict,

    #[error("database is busy")]
    ServiceUnavailable,

    #[error("{reason}")]
    Timeout { reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::NotATone(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
            Self::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<api::Error> for Error {
    fn from(err: api::Error) -> Self {
        match err {
            api::Error::BadRequest(err) => Self::BadRequest(err),
            api::Error::UseCase(err) => err.into(),
            api::Error::DatabaseTransaction(err) => Self::Other(err.into()),
            api::Error::Other(err) => Self::Other(err),
        }
    }
}

impl From<uc::Error> for Error {
    fn from(err: uc::Error) -> Self {
        match err {
            err @ uc::Error::NotATone { .. } => Self::NotATone(err.to_string()),
            uc::Error::Storage(err) => err.into(),
            uc::Error::Repository(RepoError::NotFound) => Self::NotFound,
            uc::Error::Repository(RepoError::Conflict) => Self::Conflict,
            uc::Error::Repository(RepoError::Aborted) => Self::ServiceUnavailable,
            uc::Error::Repository(RepoError::Other(err))
            | uc::Error::DatabaseMigration(err)
            | uc::Error::Other(err) => Self::Other(err),
        }
    }
}

impl From<db::Error> for Error {
    fn from(err: db::Error) -> Self {
        match err {
            db::Error::TaskTimeout { reason } => Self::Timeout { reason },
            err => Self::Other(err.into()),
        }
    }
}

pub type Result<T> = StdResult<T, Error>;

impl Reject for Error {}

pub fn reject_on_error(err: impl Into<Error>) -> Rejection {
    reject::custom(err.into())
}

pub fn after_blocking_task_finished<T, E1, E2>(
    res: StdResult<StdResult<T, E1>, E2>,
) -> StdResult<T, Rejection>
where
    E1: Into<Error>,
    E2: Into<Error>,
{
    res.map_err(reject_on_error)
        .and_then(|res| res.map_err(reject_on_error))
}

pub async fn spawn_blocking_write_task<H, T, E>(
    gatekeeper: &DatabaseConnectionGatekeeper,
    handler: H,
) -> StdResult<T, Rejection>
where
    H: FnOnce(PooledConnection) -> StdResult<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<Error> + Send + 'static,
{
    after_blocking_task_finished(gatekeeper.spawn_blocking_write_task(handler).await)
}

pub async fn spawn_blocking_read_task<H, T, E>(
    gatekeeper: &DatabaseConnectionGatekeeper,
    handler: H,
) -> StdResult<T, Rejection>
where
    H: FnOnce(PooledConnection) -> StdResult<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<Error> + Send + 'static,
{
    after_blocking_task_finished(gatekeeper.spawn_blocking_read_task(handler).await)
}

#[derive(Debug, Serialize)]
struct ErrorResponseBody {
    code: u16,
    message: String,
}

fn source_message(err: &(dyn StdError + 'static)) -> String {
    err.source()
        .map_or_else(|| err.to_string(), ToString::to_string)
}

fn status_and_message(rejection: &Rejection) -> (StatusCode, String) {
    if rejection.is_not_found() {
        return (StatusCode::NOT_FOUND, "no such route".to_owned());
    }
    // Custom errors take precedence over the rejections of all
    // other routes that did not match the request.
    if let Some(err) = rejection.find::<Error>() {
        if let Error::Other(err) = err {
            log::warn!("Internal server error: {err:#}");
        }
        return (err.status_code(), err.to_string());
    }
    if let Some(err) = rejection.find::<BodyDeserializeError>() {
        return (StatusCode::BAD_REQUEST, source_message(err));
    }
    if let Some(err) = rejection.find::<InvalidHeader>() {
        return (StatusCode::BAD_REQUEST, err.to_string());
    }
    if let Some(err) = rejection.find::<UnsupportedMediaType>() {
        return (StatusCode::UNSUPPORTED_MEDIA_TYPE, err.to_string());
    }
    if let Some(err) = rejection.find::<PayloadTooLarge>() {
        return (StatusCode::PAYLOAD_TOO_LARGE, err.to_string());
    }
    if let Some(err) = rejection.find::<LengthRequired>() {
        return (StatusCode::LENGTH_REQUIRED, err.to_string());
    }
    // Least priority, most rejections contain a MethodNotAllowed element
    if let Some(err) = rejection.find::<MethodNotAllowed>() {
        return (StatusCode::METHOD_NOT_ALLOWED, err.to_string());
    }
    log::error!("Unhandled rejection {rejection:?}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("{rejection:?}"),
    )
}

/// Render a rejection as JSON `{"code": ..., "message": ...}`
///
/// Unauthorized requests are answered with a Basic authentication
/// challenge.
#[allow(clippy::unused_async)] // async needed for warp filter
pub async fn handle_rejection(rejection: Rejection) -> StdResult<Response, Infallible> {
    let (code, message) = status_and_message(&rejection);
    let body = ErrorResponseBody {
        code: code.as_u16(),
        message,
    };
    let mut response = warp::reply::with_status(warp::reply::json(&body), code).into_response();
    if code == StatusCode::UNAUTHORIZED {
        response.headers_mut().insert(
            WWW_AUTHENTICATE,
            HeaderValue::from_static(AUTHENTICATION_CHALLENGE),
        );
    }
    Ok(response)
}

#[cfg(test)]
mod tests;
