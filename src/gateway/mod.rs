// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gateway to the remote I/O module.
//!
//! The controller talks to the physical world exclusively through the
//! [`Gateway`] trait: four stateless request/response operations, each of
//! which may independently fail or time out. The [`IoLogikClient`] is the
//! production implementation for a Moxa ioLogik E1214 Remote Ethernet I/O
//! server; tests substitute a scripted mock.

#[cfg(feature = "http")]
mod iologik;

#[cfg(feature = "http")]
pub use iologik::IoLogikClient;

use std::collections::BTreeMap;
use std::future::Future;

use crate::error::GatewayError;
use crate::types::RelayChannel;

/// Operations offered by a remote I/O module.
///
/// All futures are `Send` so the controller task holding a gateway can be
/// spawned onto the runtime.
pub trait Gateway: Send + Sync {
    /// Reads device and network information, for diagnostics only.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails or the response is
    /// malformed.
    fn read_system_info(
        &self,
    ) -> impl Future<Output = Result<BTreeMap<String, String>, GatewayError>> + Send;

    /// Reads the state of all digital input channels, indexed by channel.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails or the response is
    /// malformed.
    fn read_digital_inputs(&self) -> impl Future<Output = Result<Vec<bool>, GatewayError>> + Send;

    /// Reads the state of all digital output relay channels, indexed by
    /// channel.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails or the response is
    /// malformed.
    fn read_digital_outputs(&self) -> impl Future<Output = Result<Vec<bool>, GatewayError>> + Send;

    /// Momentarily activates one relay channel.
    ///
    /// The device itself handles deactivation; there is nothing to release.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails.
    fn pulse_output(
        &self,
        channel: RelayChannel,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;
}
