// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{sync::Arc, time::Duration};

use jiff::Timestamp;
use tokio::{sync::mpsc, time::sleep};
use warp::Filter;

use tones_core::{
    plugin::PluginInfo,
    schema::Registry,
    tone::{CONTENT_TYPE, register_schema},
};
use tones_storage_sqlite::connection::pool::{
    create_connection_pool, gatekeeper::Gatekeeper as DatabaseConnectionGatekeeper,
    get_pooled_connection,
};
use tones_usecases_sqlite as uc;
use tones_websrv_warp_sqlite::handle_rejection;

use crate::{
    app_name,
    config::{Config, DatabaseConfig},
    routing,
};

const WEB_SERVER_LISTENING_DELAY: Duration = Duration::from_millis(250);

/// Shared state of all request handlers
#[allow(missing_debug_implementations)]
pub(crate) struct AppContext {
    pub(crate) plugin_info: PluginInfo,
    pub(crate) registry: Registry,
    pub(crate) gatekeeper: DatabaseConnectionGatekeeper,

    /// The editor and shutdown routes are only mounted if present
    pub(crate) editor_access_token: Option<String>,
}

fn provision_database(config: &DatabaseConfig) -> anyhow::Result<DatabaseConnectionGatekeeper> {
    log::info!(
        "Commissioning SQLite database: {storage}",
        storage = config.connection.storage,
    );

    // The maximum size of the pool defines the maximum number of
    // allowed readers while writers require exclusive access.
    let pool_max_size = config.connection.pool.max_size;
    log::info!("Creating connection pool of max. size {pool_max_size}");
    let connection_pool = create_connection_pool(&config.connection.storage, pool_max_size)?;

    {
        let mut connection = get_pooled_connection(&connection_pool)?;

        log::info!("Initializing database");
        uc::database::initialize(&mut connection)?;

        if config.migrate_schema_on_startup {
            log::info!("Migrating database schema");
            uc::database::migrate_schema(&mut connection)?;
        }

        let outcome = uc::maintenance::run_pending(&mut connection)?;
        if outcome.steps_applied() > 0 {
            log::info!(
                "Upgraded maintenance version from {previous} to {current}",
                previous = outcome.previous_version,
                current = outcome.current_version,
            );
        } else {
            log::debug!(
                "Maintenance version {current} is up to date",
                current = outcome.current_version
            );
        }

        log::info!("Analyzing and optimizing database statistics");
        uc::database::analyze_and_optimize_stats(&mut connection)?;
    }

    Ok(DatabaseConnectionGatekeeper::new(
        connection_pool,
        config.connection.pool.gatekeeper,
    ))
}

fn register_content_types() -> anyhow::Result<Registry> {
    let mut registry = Registry::new();
    register_schema(&mut registry)?;
    log::info!(
        "Registered content type \"{CONTENT_TYPE}\" with {num_fields} field(s)",
        num_fields = registry.fields_of(CONTENT_TYPE).count(),
    );
    Ok(registry)
}

/// Prepare everything that is needed for serving requests
pub(crate) fn startup(config: &Config) -> anyhow::Result<AppContext> {
    let gatekeeper = provision_database(&config.database)?;
    let registry = register_content_types()?;
    let plugin_info = PluginInfo::new(
        app_name().to_owned(),
        config.plugin.base_url.clone(),
        config.plugin.path.clone(),
    );
    log::info!(
        "Publishing assets from {path} at {url}",
        path = plugin_info.path.display(),
        url = plugin_info.url,
    );
    let editor_access_token = config.editor.enabled_access_token().map(ToOwned::to_owned);
    if editor_access_token.is_none() {
        log::warn!("Editor is disabled, no access token configured");
    }
    Ok(AppContext {
        plugin_info,
        registry,
        gatekeeper,
        editor_access_token,
    })
}

pub(crate) async fn run(
    config: Config,
    mut shutdown_rx: mpsc::UnboundedReceiver<()>,
) -> anyhow::Result<()> {
    let launched_at = Timestamp::now();

    log::info!("Launching");
    let context = Arc::new(startup(&config)?);

    let about_json = serde_json::json!({
        "name": app_name(),
        "description": env!("CARGO_PKG_DESCRIPTION"),
        "version": context.plugin_info.version,
        "instance": {
            "basename": context.plugin_info.basename,
            "launched_at": launched_at,
        },
    });

    log::info!("Creating service routes");

    let (server_shutdown_tx, mut server_shutdown_rx) = mpsc::unbounded_channel::<()>();

    // GET /about
    let about_filter = warp::get()
        .and(warp::path("about"))
        .and(warp::path::end())
        .map(move || warp::reply::json(&about_json));

    let all_filters =
        routing::create_filters(Arc::clone(&context), server_shutdown_tx).or(about_filter);

    log::info!("Initializing server");

    let server = warp::serve(
        all_filters
            .with(warp::cors().allow_any_origin())
            .recover(handle_rejection),
    );

    log::info!("Starting");

    let (socket_addr, server_listener) =
        server.try_bind_with_graceful_shutdown(config.network.endpoint.socket_addr(), async move {
            tokio::select! {
                Some(()) = server_shutdown_rx.recv() => (),
                Some(()) = shutdown_rx.recv() => (),
                else => (),
            }
        })?;

    // Give the server some time to become ready and start listening
    // before announcing the actual endpoint address. Unfortunately warp
    // does not provide any signal when the server has started listening.
    sleep(WEB_SERVER_LISTENING_DELAY).await;

    log::info!("Listening on {socket_addr}");

    server_listener.await;

    log::info!("Stopping");

    context.gatekeeper.decommission();
    let pending_tasks = context.gatekeeper.pending_tasks();
    if pending_tasks.read > 0 || pending_tasks.write > 0 {
        log::warn!(
            "Abandoning {read} read and {write} write task(s)",
            read = pending_tasks.read,
            write = pending_tasks.write,
        );
    }

    log::info!("Terminating");

    Ok(())
}
