// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use base64::{Engine as _, engine::general_purpose::STANDARD};
use warp::{Filter, reject::Rejection};

use tones_websrv_warp_sqlite::{self as websrv, reject_on_error};

/// Only the digest of the configured token is kept
///
/// Digests are compared in constant time.
#[derive(Clone, Copy)]
pub(crate) struct AccessToken {
    digest: blake3::Hash,
}

impl AccessToken {
    #[must_use]
    pub(crate) fn new(token: &str) -> Self {
        Self {
            digest: blake3::hash(token.as_bytes()),
        }
    }

    #[must_use]
    pub(crate) fn matches(&self, token: &str) -> bool {
        blake3::hash(token.as_bytes()) == self.digest
    }
}

/// Extract the token from an `Authorization` header value
///
/// Accepts both `Bearer <token>` and `Basic <base64(user:token)>`.
/// The user name of Basic credentials is ignored.
#[must_use]
pub(crate) fn presented_token(authorization: &str) -> Option<String> {
    let (scheme, credentials) = authorization.trim().split_once(' ')?;
    let credentials = credentials.trim();
    if scheme.eq_ignore_ascii_case("bearer") {
        return Some(credentials.to_owned());
    }
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(credentials).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (_user, password) = decoded.split_once(':')?;
    Some(password.to_owned())
}

pub(crate) fn authorize(
    access_token: AccessToken,
) -> impl Filter<Extract = (), Error = Rejection> + Clone {
    warp::header::optional::<String>("authorization")
        .and_then(move |authorization: Option<String>| async move {
            let authorized = authorization
                .as_deref()
                .and_then(presented_token)
                .is_some_and(|token| access_token.matches(&token));
            if authorized {
                Ok(())
            } else {
                log::debug!("Rejecting unauthorized request");
                Err(reject_on_error(websrv::Error::Unauthorized))
            }
        })
        .untuple_one()
}
