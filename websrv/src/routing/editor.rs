// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use warp::{
    Filter, Reply as _,
    filters::BoxedFilter,
    http::StatusCode,
    reject::Rejection,
    reply::Response,
};

use tones_backend_webapi_json as api;
use tones_core::tone::CONTENT_TYPE;
use tones_repo::record::RecordId;
use tones_websrv_warp_sqlite as websrv;

use super::auth::{AccessToken, authorize};
use crate::{editor::render_form, runtime::AppContext};

const REQUEST_BODY_LIMIT: u64 = 64 * 1024;

fn editor_path(id: RecordId) -> String {
    format!("/editor/tones/{id}")
}

fn render_editor_page(context: &AppContext, entry: &api::tone::load_one::ResponseBody) -> Response {
    let (header, tone) = entry;
    let html = render_form(
        &editor_path(header.id),
        header,
        tone,
        context.registry.fields_of(CONTENT_TYPE),
    );
    warp::reply::html(html).into_response()
}

pub(super) fn create_filters(
    context: Arc<AppContext>,
    access_token: AccessToken,
) -> BoxedFilter<(Response,)> {
    let context = warp::any().map(move || Arc::clone(&context));
    let authorized = authorize(access_token);

    log::info!("Creating editor routes");

    // GET /editor/tones/{id}
    let tones_load = warp::get()
        .and(warp::path!("editor" / "tones" / i64))
        .and(authorized.clone())
        .and(context.clone())
        .and_then(|id, context: Arc<AppContext>| async move {
            let id = RecordId::new(id);
            websrv::spawn_blocking_read_task(&context.gatekeeper, move |mut pooled_connection| {
                api::tone::load_one::handle_request(&mut pooled_connection, id)
            })
            .await
            .map(|entry| render_editor_page(&context, &entry))
        });

    // POST /editor/tones/{id}
    let tones_save = warp::post()
        .and(warp::path!("editor" / "tones" / i64))
        .and(authorized.clone())
        .and(warp::body::content_length_limit(REQUEST_BODY_LIMIT))
        .and(warp::body::form())
        .and(context.clone())
        .and_then(
            |id, request_body: api::tone::save::RequestBody, context: Arc<AppContext>| async move {
                let id = RecordId::new(id);
                let entry = websrv::spawn_blocking_write_task(&context.gatekeeper, {
                    let context = Arc::clone(&context);
                    move |mut pooled_connection| {
                        api::tone::save::handle_request(
                            &mut pooled_connection,
                            &context.registry,
                            id,
                            &request_body,
                        )
                    }
                })
                .await?;
                log::info!("Saved fields of tone {id}");
                Ok::<_, Rejection>(render_editor_page(&context, &entry))
            },
        );

    // POST /editor/tones
    let tones_create = warp::post()
        .and(warp::path!("editor" / "tones"))
        .and(authorized.clone())
        .and(warp::body::content_length_limit(REQUEST_BODY_LIMIT))
        .and(warp::body::json())
        .and(context.clone())
        .and_then(
            |request_body: api::tone::create::RequestBody, context: Arc<AppContext>| async move {
                let base_url = context.plugin_info.url.clone();
                websrv::spawn_blocking_write_task(&context.gatekeeper, move |mut pooled_connection| {
                    api::tone::create::handle_request(&mut pooled_connection, &base_url, request_body)
                })
                .await
                .map(|response_body| {
                    warp::reply::with_status(warp::reply::json(&response_body), StatusCode::CREATED)
                        .into_response()
                })
            },
        );

    // DELETE /editor/tones/{id}
    let tones_purge = warp::delete()
        .and(warp::path!("editor" / "tones" / i64))
        .and(authorized)
        .and(context)
        .and_then(|id, context: Arc<AppContext>| async move {
            let id = RecordId::new(id);
            websrv::spawn_blocking_write_task(&context.gatekeeper, move |mut pooled_connection| {
                api::tone::purge::handle_request(&mut pooled_connection, id)
            })
            .await
            .map(|()| StatusCode::NO_CONTENT.into_response())
        });

    tones_load
        .or(tones_save)
        .unify()
        .or(tones_create)
        .unify()
        .or(tones_purge)
        .unify()
        .boxed()
}
