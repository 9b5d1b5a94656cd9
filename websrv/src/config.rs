// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    fmt,
    net::{IpAddr, Ipv6Addr, SocketAddr},
    num::{NonZeroU32, NonZeroU64},
    path::PathBuf,
    time::Duration,
};

use serde::{Deserialize, Serialize};

use tones_core::util::url::BaseUrl;
use tones_storage_sqlite::connection::{
    Config as DatabaseConnectionConfig, Storage,
    pool::{
        Config as DatabaseConnectionPoolConfig,
        gatekeeper::Config as DatabaseConnectionGatekeeperConfig,
    },
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Config {
    pub(crate) network: NetworkConfig,
    pub(crate) database: DatabaseConfig,
    pub(crate) plugin: PluginConfig,

    #[serde(default)]
    pub(crate) editor: EditorConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct NetworkConfig {
    pub(crate) endpoint: EndpointConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct EndpointConfig {
    pub(crate) ip_addr: IpAddr,
    pub(crate) port: u16,
}

pub(crate) const ENDPOINT_PORT_DEFAULT: u16 = 8080;

impl EndpointConfig {
    pub(crate) const fn new_v6() -> Self {
        Self {
            ip_addr: IpAddr::V6(Ipv6Addr::UNSPECIFIED),
            port: ENDPOINT_PORT_DEFAULT,
        }
    }

    pub(crate) fn socket_addr(self) -> SocketAddr {
        let Self { ip_addr, port } = self;
        SocketAddr::new(ip_addr, port)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::new_v6()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct DatabaseConfig {
    pub(crate) connection: DatabaseConnectionConfig,
    pub(crate) migrate_schema_on_startup: bool,
}

const DEFAULT_DATABASE_CONNECTION_POOL_SIZE: NonZeroU32 = NonZeroU32::new(8).unwrap();

const DEFAULT_DATABASE_CONNECTION_TIMEOUT_ACQUIRE_READ: Duration = Duration::from_secs(10);

const DEFAULT_DATABASE_CONNECTION_TIMEOUT_ACQUIRE_WRITE: Duration = Duration::from_secs(30);

const fn non_zero_duration_as_millis(duration: Duration) -> NonZeroU64 {
    let millis = duration.as_millis() as u64;
    NonZeroU64::new(millis).unwrap()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            connection: DatabaseConnectionConfig {
                storage: Storage::InMemory,
                pool: DatabaseConnectionPoolConfig {
                    max_size: DEFAULT_DATABASE_CONNECTION_POOL_SIZE,
                    gatekeeper: DatabaseConnectionGatekeeperConfig {
                        acquire_read_timeout_millis: non_zero_duration_as_millis(
                            DEFAULT_DATABASE_CONNECTION_TIMEOUT_ACQUIRE_READ,
                        ),
                        acquire_write_timeout_millis: non_zero_duration_as_millis(
                            DEFAULT_DATABASE_CONNECTION_TIMEOUT_ACQUIRE_WRITE,
                        ),
                    },
                },
            },
            migrate_schema_on_startup: true,
        }
    }
}

/// Location of the installation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct PluginConfig {
    /// Public URL under which the files in `path` are published
    pub(crate) base_url: BaseUrl,

    /// Directory that contains the `assets/` folder
    pub(crate) path: PathBuf,
}

const DEFAULT_PLUGIN_BASE_URL: &str = "http://localhost:8080/";

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            base_url: BaseUrl::parse_strict(DEFAULT_PLUGIN_BASE_URL)
                .unwrap_or_else(|err| unreachable!("invalid default base URL: {err}")),
            path: PathBuf::from("."),
        }
    }
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct EditorConfig {
    /// Token that grants access to the editor and the shutdown route
    ///
    /// Both are disabled if no token is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) access_token: Option<String>,
}

impl fmt::Debug for EditorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorConfig")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl EditorConfig {
    /// The trimmed access token, blank tokens disable the editor
    #[must_use]
    pub(crate) fn enabled_access_token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}
