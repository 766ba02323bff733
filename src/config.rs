// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controller configuration.

use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for a garage door controller.
///
/// Holds the network address of the remote I/O module and the timing
/// parameters of the door and light state machine. There are no hidden
/// fallbacks: the host is required and every duration must be non-zero,
/// enforced by [`validate`](Self::validate) when the controller is built.
///
/// The channel-index mapping for digital inputs and relay outputs is fixed
/// by the hardware wiring convention and is deliberately not configurable
/// (see [`DiChannel`](crate::types::DiChannel) and
/// [`RelayChannel`](crate::types::RelayChannel)).
///
/// # Examples
///
/// ```
/// use doorlogik_lib::ControllerConfig;
/// use std::time::Duration;
///
/// // Simple configuration
/// let config = ControllerConfig::new("192.168.1.30");
///
/// // With all options
/// let config = ControllerConfig::new("192.168.1.30")
///     .with_port(8080)
///     .with_timeout(Duration::from_secs(5))
///     .with_poll_interval(Duration::from_secs(2))
///     .with_move_duration(Duration::from_secs(30));
/// ```
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    host: String,
    port: u16,
    timeout: Duration,
    poll_interval: Duration,
    move_duration: Duration,
    light_moved_duration: Duration,
    light_switched_duration: Duration,
}

impl ControllerConfig {
    /// Default HTTP port of the I/O module.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Default interval between successive polls of the door position.
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
    /// Default time the door needs to fully open or fully close.
    pub const DEFAULT_MOVE_DURATION: Duration = Duration::from_secs(25);
    /// Default light switch-off delay after door movement.
    pub const DEFAULT_LIGHT_MOVED_DURATION: Duration = Duration::from_secs(300);
    /// Default illumination time when the light is switched on explicitly.
    pub const DEFAULT_LIGHT_SWITCHED_DURATION: Duration = Duration::from_secs(900);

    /// Creates a new configuration for the I/O module at the specified host.
    ///
    /// # Arguments
    ///
    /// * `host` - The hostname or IP address of the remote I/O module
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            timeout: Self::DEFAULT_TIMEOUT,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            move_duration: Self::DEFAULT_MOVE_DURATION,
            light_moved_duration: Self::DEFAULT_LIGHT_MOVED_DURATION,
            light_switched_duration: Self::DEFAULT_LIGHT_SWITCHED_DURATION,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the HTTP request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the interval between successive door position polls.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the time after which an unconfirmed door movement is considered
    /// stopped.
    #[must_use]
    pub fn with_move_duration(mut self, duration: Duration) -> Self {
        self.move_duration = duration;
        self
    }

    /// Sets the light switch-off delay after door movement.
    #[must_use]
    pub fn with_light_moved_duration(mut self, duration: Duration) -> Self {
        self.light_moved_duration = duration;
        self
    }

    /// Sets the illumination time when the light is switched on explicitly.
    #[must_use]
    pub fn with_light_switched_duration(mut self, duration: Duration) -> Self {
        self.light_switched_duration = duration;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the HTTP request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the poll interval.
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Returns the move duration.
    #[must_use]
    pub fn move_duration(&self) -> Duration {
        self.move_duration
    }

    /// Returns the movement-triggered light switch-off delay.
    #[must_use]
    pub fn light_moved_duration(&self) -> Duration {
        self.light_moved_duration
    }

    /// Returns the externally-triggered light switch-off delay.
    #[must_use]
    pub fn light_switched_duration(&self) -> Duration {
        self.light_switched_duration
    }

    /// Builds the base URL of the I/O module's REST API.
    #[must_use]
    pub fn base_url(&self) -> String {
        if self.port == Self::DEFAULT_PORT {
            format!("http://{}", self.host)
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingHost`] if the host is empty and
    /// [`ConfigError::ZeroDuration`] if any timing parameter is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::MissingHost);
        }
        for (name, duration) in [
            ("timeout", self.timeout),
            ("poll_interval", self.poll_interval),
            ("move_duration", self.move_duration),
            ("light_moved_duration", self.light_moved_duration),
            ("light_switched_duration", self.light_switched_duration),
        ] {
            if duration.is_zero() {
                return Err(ConfigError::ZeroDuration(name));
            }
        }
        Ok(())
    }
}
