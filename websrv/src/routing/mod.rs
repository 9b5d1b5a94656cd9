// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use tokio::sync::mpsc;
use warp::{Filter, Reply as _, filters::BoxedFilter, http::StatusCode, reply::Response};

use crate::runtime::AppContext;

use self::auth::{AccessToken, authorize};

mod api;
mod auth;
mod editor;

// POST /shutdown
fn shutdown_filter(
    access_token: AccessToken,
    server_shutdown_tx: mpsc::UnboundedSender<()>,
) -> BoxedFilter<(Response,)> {
    warp::post()
        .and(warp::path("shutdown"))
        .and(warp::path::end())
        .and(authorize(access_token))
        .map(move || {
            if server_shutdown_tx.send(()).is_ok() {
                log::info!("Shutdown requested");
                StatusCode::ACCEPTED.into_response()
            } else {
                log::warn!("Failed to forward shutdown request");
                StatusCode::BAD_GATEWAY.into_response()
            }
        })
        .boxed()
}

/// All routes that depend on the application context
///
/// The editor and shutdown routes are only mounted if an access
/// token has been configured. Both require this token.
pub(crate) fn create_filters(
    context: Arc<AppContext>,
    server_shutdown_tx: mpsc::UnboundedSender<()>,
) -> BoxedFilter<(Response,)> {
    let assets = warp::get()
        .and(warp::path("assets"))
        .and(warp::fs::dir(context.plugin_info.path.join("assets")))
        .map(|file: warp::fs::File| file.into_response());
    let public = api::create_filters(Arc::clone(&context))
        .or(assets)
        .unify();
    let Some(access_token) = context.editor_access_token.as_deref().map(AccessToken::new) else {
        return public.boxed();
    };
    log::info!("Mounting editor and shutdown routes");
    public
        .or(editor::create_filters(context, access_token))
        .unify()
        .or(shutdown_filter(access_token, server_shutdown_tx))
        .unify()
        .boxed()
}

#[cfg(test)]
mod tests;
