// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `DoorLogik` library.
//!
//! This module provides the error hierarchy for handling failures across the
//! library: gateway communication, configuration validation, and controller
//! lifecycle.

use thiserror::Error;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when controlling
/// a garage door through a remote I/O module.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred while communicating with the remote I/O module.
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Error occurred during configuration validation.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error occurred during value parsing.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The controller task has stopped and can no longer accept commands.
    #[error("controller is not running")]
    ControllerStopped,
}

/// Errors related to communication with the remote I/O gateway.
///
/// Every variant is non-fatal to the controller: a failed poll is reported
/// and retried at the next cadence, and a failed command pulse is surfaced
/// to the caller without corrupting stored state.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP transport failed (connection refused, DNS, broken body).
    #[cfg(feature = "http")]
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The device answered with a non-success HTTP status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// Malformed or unexpected response shape.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to controller configuration.
///
/// These errors occur when constructing a controller from an invalid
/// [`ControllerConfig`](crate::ControllerConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No device host was provided.
    #[error("device host must not be empty")]
    MissingHost,

    /// A duration that drives a timer was set to zero.
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

/// Errors related to parsing domain values from text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The string is not a recognized target door state.
    #[error("invalid target door state: {0}")]
    InvalidTargetDoorState(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
