// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! REST client for a Moxa ioLogik E1214 Remote Ethernet I/O server.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::config::ControllerConfig;
use crate::error::GatewayError;
use crate::gateway::Gateway;
use crate::types::RelayChannel;

/// The API version the E1214 expects in the `Accept` header.
const ACCEPT_HEADER: &str = "vdn.dac.v1";

/// REST client for the ioLogik E1214 I/O API.
///
/// All I/O lives on slot 0 of the module. Each operation is an independent
/// HTTP request; the client keeps no connection state beyond reqwest's pool.
///
/// # Examples
///
/// ```no_run
/// use doorlogik_lib::gateway::{Gateway, IoLogikClient};
///
/// # async fn example() -> doorlogik_lib::Result<()> {
/// let client = IoLogikClient::new("192.168.1.30")?;
/// let inputs = client.read_digital_inputs().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct IoLogikClient {
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl IoLogikClient {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a new client for the module at the specified host.
    ///
    /// # Arguments
    ///
    /// * `host` - The hostname or IP address of the I/O module
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidAddress`] for an empty host and
    /// [`GatewayError::Transport`] if the HTTP client cannot be created.
    pub fn new(host: impl Into<String>) -> Result<Self, GatewayError> {
        Self::with_timeout(host, Self::DEFAULT_TIMEOUT)
    }

    /// Creates a new client with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidAddress`] for an empty host and
    /// [`GatewayError::Transport`] if the HTTP client cannot be created.
    pub fn with_timeout(
        host: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let host = host.into();
        if host.trim().is_empty() {
            return Err(GatewayError::InvalidAddress("host is required".to_string()));
        }

        let base_url = if host.starts_with("http://") {
            host
        } else {
            format!("http://{host}")
        };

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(GatewayError::Transport)?;

        Ok(Self {
            base_url,
            client,
            timeout,
        })
    }

    /// Creates a client from a controller configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the client cannot be created.
    pub fn from_config(config: &ControllerConfig) -> Result<Self, GatewayError> {
        let host = if config.port() == ControllerConfig::DEFAULT_PORT {
            config.host().to_string()
        } else {
            format!("{}:{}", config.host(), config.port())
        };
        Self::with_timeout(host, config.timeout())
    }

    /// Returns the base URL of the module.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn classify(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout(u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX))
        } else {
            GatewayError::Transport(err)
        }
    }

    async fn get(&self, path: &str) -> Result<String, GatewayError> {
        let url = format!("{}{path}", self.base_url);

        tracing::debug!(url = %url, "GET");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, ACCEPT_HEADER)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        if !response.status().is_success() {
            return Err(GatewayError::Status(response.status().as_u16()));
        }

        response.text().await.map_err(|e| self.classify(e))
    }

    async fn put(&self, path: &str, body: &Value) -> Result<(), GatewayError> {
        let url = format!("{}{path}", self.base_url);

        tracing::debug!(url = %url, "PUT");

        let response = self
            .client
            .put(&url)
            .header(reqwest::header::ACCEPT, ACCEPT_HEADER)
            .json(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        if !response.status().is_success() {
            return Err(GatewayError::Status(response.status().as_u16()));
        }

        Ok(())
    }

    fn parse<T: for<'de> Deserialize<'de>>(body: &str) -> Result<T, GatewayError> {
        serde_json::from_str(body).map_err(|e| GatewayError::Protocol(e.to_string()))
    }
}

impl Gateway for IoLogikClient {
    async fn read_system_info(&self) -> Result<BTreeMap<String, String>, GatewayError> {
        let body = self.get("/api/slot/0/sysInfo").await?;
        let envelope: SysInfoEnvelope = Self::parse(&body)?;

        let device = envelope
            .sys_info
            .device
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::Protocol("sysInfo.device is empty".to_string()))?;

        let mut info = BTreeMap::new();
        for (key, value) in device.into_iter().chain(envelope.sys_info.network.lan) {
            info.insert(key, stringify(&value));
        }
        Ok(info)
    }

    async fn read_digital_inputs(&self) -> Result<Vec<bool>, GatewayError> {
        let body = self.get("/api/slot/0/io/di").await?;
        let envelope: DiEnvelope = Self::parse(&body)?;

        let mut channels = Vec::new();
        for point in envelope.io.di {
            if point.index >= channels.len() {
                channels.resize(point.index + 1, false);
            }
            channels[point.index] = point.status != 0;
        }
        Ok(channels)
    }

    async fn read_digital_outputs(&self) -> Result<Vec<bool>, GatewayError> {
        let body = self.get("/api/slot/0/io/relay").await?;
        let envelope: RelayEnvelope = Self::parse(&body)?;

        let mut channels = Vec::new();
        for point in envelope.io.relay {
            if point.index >= channels.len() {
                channels.resize(point.index + 1, false);
            }
            // Pulse-mode relays report their pulse status instead
            let status = if point.mode == 0 {
                point.status
            } else {
                point.pulse_status
            };
            channels[point.index] = status != 0;
        }
        Ok(channels)
    }

    async fn pulse_output(&self, channel: RelayChannel) -> Result<(), GatewayError> {
        let index = channel.index();

        let mut relay = Map::new();
        relay.insert(index.to_string(), json!({ "relayPulseStatus": 1 }));
        let body = json!({ "slot": 0, "io": { "relay": relay } });

        self.put(&format!("/api/slot/0/io/relay/{index}/relayPulseStatus"), &body)
            .await
    }
}

/// Renders a JSON value the way the device UI shows it (no quotes on
/// strings).
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// =============================================================================
// Wire format
// =============================================================================

#[derive(Debug, Deserialize)]
struct SysInfoEnvelope {
    #[serde(rename = "sysInfo")]
    sys_info: SysInfoBody,
}

#[derive(Debug, Deserialize)]
struct SysInfoBody {
    device: Vec<Map<String, Value>>,
    network: SysInfoNetwork,
}

#[derive(Debug, Deserialize)]
struct SysInfoNetwork {
    #[serde(rename = "LAN")]
    lan: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct DiEnvelope {
    io: DiIo,
}

#[derive(Debug, Deserialize)]
struct DiIo {
    di: Vec<DiPoint>,
}

#[derive(Debug, Deserialize)]
struct DiPoint {
    #[serde(rename = "diIndex")]
    index: usize,
    #[serde(rename = "diStatus")]
    status: u8,
}

#[derive(Debug, Deserialize)]
struct RelayEnvelope {
    io: RelayIo,
}

#[derive(Debug, Deserialize)]
struct RelayIo {
    relay: Vec<RelayPoint>,
}

#[derive(Debug, Deserialize)]
struct RelayPoint {
    #[serde(rename = "relayIndex")]
    index: usize,
    #[serde(rename = "relayMode", default)]
    mode: u8,
    #[serde(rename = "relayStatus", default)]
    status: u8,
    #[serde(rename = "relayPulseStatus", default)]
    pulse_status: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_prefixes_scheme() {
        let client = IoLogikClient::new("192.168.1.30").unwrap();
        assert_eq!(client.base_url(), "http://192.168.1.30");
    }

    #[test]
    fn new_keeps_explicit_scheme() {
        let client = IoLogikClient::new("http://192.168.1.30:8080").unwrap();
        assert_eq!(client.base_url(), "http://192.168.1.30:8080");
    }

    #[test]
    fn new_rejects_empty_host() {
        let result = IoLogikClient::new("");
        assert!(matches!(result, Err(GatewayError::InvalidAddress(_))));
    }

    #[test]
    fn from_config_appends_custom_port() {
        let config = ControllerConfig::new("192.168.1.30").with_port(8080);
        let client = IoLogikClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "http://192.168.1.30:8080");
    }

    #[test]
    fn stringify_strips_quotes() {
        assert_eq!(stringify(&json!("E1214")), "E1214");
        assert_eq!(stringify(&json!(42)), "42");
    }

    #[test]
    fn parse_rejects_malformed_body() {
        let result: Result<DiEnvelope, _> = IoLogikClient::parse("{\"io\":{}}");
        assert!(matches!(result, Err(GatewayError::Protocol(_))));
    }
}
