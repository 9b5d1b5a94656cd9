// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use warp::{Filter, Reply as _, filters::BoxedFilter, reply::Response};

use tones_backend_webapi_json as api;
use tones_websrv_warp_sqlite as websrv;

use crate::runtime::AppContext;

pub(super) fn create_filters(context: Arc<AppContext>) -> BoxedFilter<(Response,)> {
    let context = warp::any().map(move || Arc::clone(&context));

    log::info!("Creating API routes");

    // GET /tones/v1/list
    warp::get()
        .and(warp::path!("tones" / "v1" / "list"))
        .and(context)
        .and_then(|context: Arc<AppContext>| async move {
            let base_url = context.plugin_info.url.clone();
            websrv::spawn_blocking_read_task(&context.gatekeeper, move |mut pooled_connection| {
                api::tone::list::handle_request(&mut pooled_connection, &base_url)
            })
            .await
            .map(|response_body| warp::reply::json(&response_body).into_response())
        })
        .boxed()
}
