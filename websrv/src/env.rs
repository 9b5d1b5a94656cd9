// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{env, net::IpAddr, num::NonZeroU32, path::PathBuf, str::ParseBoolError};

use anyhow::Error;
use tracing::{Subscriber, subscriber::set_global_default};
use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;

use tones_core::util::url::BaseUrl;
use tones_storage_sqlite::connection::Storage;

use crate::config::Config;

pub(crate) fn init_environment() {
    if let Ok(path) = dotenvy::dotenv() {
        // Print to stderr because logging has not been initialized yet
        eprintln!("Loaded environment from dotenv file {}", path.display());
    }
}

const TRACING_SUBSCRIBER_ENV_FILTER_DEFAULT: &str = "info";

fn create_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|err| {
        let rust_log_from_env = env::var("RUST_LOG").ok();
        if let Some(rust_log_from_env) = rust_log_from_env {
            if !rust_log_from_env.is_empty() {
                eprintln!(
                    "Failed to parse RUST_LOG environment variable '{rust_log_from_env}': {err}"
                );
            }
        }
        EnvFilter::new(TRACING_SUBSCRIBER_ENV_FILTER_DEFAULT)
    })
}

fn create_tracing_subscriber() -> impl Subscriber {
    let env_filter = create_env_filter();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish()
}

pub(crate) fn init_tracing_and_logging() -> anyhow::Result<()> {
    // Capture and redirect all log messages as tracing events
    LogTracer::init()?;

    let subscriber = create_tracing_subscriber();
    set_global_default(subscriber)?;

    Ok(())
}

fn parse_bool_var(var: &str) -> Result<bool, ParseBoolError> {
    var.to_lowercase().parse::<bool>().or_else(|err| {
        if let Ok(val) = var.parse::<u8>() {
            match val {
                0 => return Ok(false),
                1 => return Ok(true),
                _ => (),
            }
        }
        Err(err)
    })
}

/// Read and parse an environment variable
///
/// Unset or empty variables are ignored. Parse errors are logged
/// and the variable is ignored.
fn parse_var<T>(name: &str, parse: impl FnOnce(&str) -> anyhow::Result<T>) -> Option<T> {
    let var = env::var(name).ok()?;
    tracing::debug!("{name} = {var}");
    parse(non_blank(&var)?)
        .map_err(|err| {
            tracing::warn!("Failed to parse {name} = {var}: {err}");
        })
        .ok()
}

fn non_blank(var: &str) -> Option<&str> {
    Some(var.trim()).filter(|trimmed| !trimmed.is_empty())
}

const LAUNCH_DEFAULT_CONFIG_ENV: &str = "LAUNCH_DEFAULT_CONFIG";

pub(crate) fn parse_default_config() -> Option<bool> {
    parse_var(LAUNCH_DEFAULT_CONFIG_ENV, |var| {
        parse_bool_var(var).map_err(Error::from)
    })
}

const ENDPOINT_IP_ENV: &str = "ENDPOINT_IP";

fn parse_endpoint_ip() -> Option<IpAddr> {
    parse_var(ENDPOINT_IP_ENV, |var| var.parse().map_err(Error::from))
}

const ENDPOINT_PORT_ENV: &str = "ENDPOINT_PORT";

fn parse_endpoint_port() -> Option<u16> {
    parse_var(ENDPOINT_PORT_ENV, |var| var.parse().map_err(Error::from))
}

const DATABASE_URL_ENV: &str = "DATABASE_URL";

fn parse_database_storage() -> Option<Storage> {
    parse_var(DATABASE_URL_ENV, |var| Ok(Storage::from_url(var)))
}

const DATABASE_CONNECTION_POOL_SIZE_ENV: &str = "DATABASE_CONNECTION_POOL_SIZE";

fn parse_database_connection_pool_size() -> Option<NonZeroU32> {
    parse_var(DATABASE_CONNECTION_POOL_SIZE_ENV, |var| {
        var.parse().map_err(Error::from)
    })
}

const DATABASE_MIGRATE_SCHEMA_ON_STARTUP_ENV: &str = "DATABASE_MIGRATE_SCHEMA_ON_STARTUP";

fn parse_database_migrate_schema_on_startup() -> Option<bool> {
    parse_var(DATABASE_MIGRATE_SCHEMA_ON_STARTUP_ENV, |var| {
        parse_bool_var(var).map_err(Error::from)
    })
}

const PLUGIN_BASE_URL_ENV: &str = "PLUGIN_BASE_URL";

fn parse_plugin_base_url() -> Option<BaseUrl> {
    parse_var(PLUGIN_BASE_URL_ENV, |var| {
        BaseUrl::parse_lazy(var).map_err(Error::from)
    })
}

const PLUGIN_PATH_ENV: &str = "PLUGIN_PATH";

fn parse_plugin_path() -> Option<PathBuf> {
    parse_var(PLUGIN_PATH_ENV, |var| Ok(PathBuf::from(var)))
}

const EDITOR_ACCESS_TOKEN_ENV: &str = "EDITOR_ACCESS_TOKEN";

/// The value is never logged
fn parse_editor_access_token() -> Option<String> {
    let var = env::var(EDITOR_ACCESS_TOKEN_ENV).ok()?;
    let Some(token) = non_blank(&var) else {
        tracing::debug!("{EDITOR_ACCESS_TOKEN_ENV} is blank");
        return None;
    };
    tracing::debug!("{EDITOR_ACCESS_TOKEN_ENV} is set");
    Some(token.to_owned())
}

/// Override configuration values with environment variables
pub(crate) fn parse_config_into(config: &mut Config) {
    if let Some(ip_addr) = parse_endpoint_ip() {
        config.network.endpoint.ip_addr = ip_addr;
    }
    if let Some(port) = parse_endpoint_port() {
        config.network.endpoint.port = port;
    }
    if let Some(storage) = parse_database_storage() {
        config.database.connection.storage = storage;
    }
    if let Some(max_size) = parse_database_connection_pool_size() {
        config.database.connection.pool.max_size = max_size;
    }
    if let Some(migrate_schema_on_startup) = parse_database_migrate_schema_on_startup() {
        config.database.migrate_schema_on_startup = migrate_schema_on_startup;
    }
    if let Some(base_url) = parse_plugin_base_url() {
        config.plugin.base_url = base_url;
    }
    if let Some(path) = parse_plugin_path() {
        config.plugin.path = path;
    }
    if let Some(access_token) = parse_editor_access_token() {
        config.editor.access_token = Some(access_token);
    }
}
