// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `DoorLogik` Lib - A Rust library to control a garage door through a
//! remote I/O module.
//!
//! This library infers and controls the state of a garage door and its
//! courtesy light wired to a Moxa ioLogik E1214 Remote Ethernet I/O server:
//! two digital inputs report the door's end positions, four relay outputs
//! pulse the opener's toggles (open, partial open, close, light).
//!
//! # How it works
//!
//! The [`DoorController`] polls the digital inputs on a fixed cadence and
//! reconciles the two noisy binary sensors into a full
//! [`DoorState`](types::DoorState) (`open`, `closed`, `opening`, `closing`,
//! `stopped`) with time-based transitions: a door that leaves an end
//! position is inferred to be moving, and a movement that never reaches the
//! opposite end position is declared stopped after a configurable duration.
//! Commands pulse a relay once and update the state optimistically; the
//! next polls confirm or correct. Every state change is broadcast as a
//! [`DoorEvent`](event::DoorEvent) for an accessory layer (HomeKit bridge,
//! MQTT adapter, ...) to mirror.
//!
//! # Quick Start
//!
//! ```no_run
//! use doorlogik_lib::{ControllerConfig, DoorController};
//! use doorlogik_lib::gateway::IoLogikClient;
//! use doorlogik_lib::types::TargetDoorState;
//!
//! #[tokio::main]
//! async fn main() -> doorlogik_lib::Result<()> {
//!     let config = ControllerConfig::new("192.168.1.30");
//!     let gateway = IoLogikClient::from_config(&config)?;
//!     let controller = DoorController::spawn(config, gateway)?;
//!
//!     let mut events = controller.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("{event:?}");
//!         }
//!     });
//!
//!     controller.set_target_door_state(TargetDoorState::Open).await?;
//!     controller.set_light_on(true).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Custom gateways
//!
//! The controller is generic over the [`gateway::Gateway`] trait, so a
//! different I/O module (or a test double) can stand in for the ioLogik
//! client. The `http` feature (enabled by default) gates the reqwest-based
//! [`gateway::IoLogikClient`]; the controller core builds without it.

mod config;
mod controller;
pub mod error;
pub mod event;
pub mod gateway;
pub mod types;

pub use config::ControllerConfig;
pub use controller::{DoorController, DoorStatus, next_door_state};
pub use error::{ConfigError, Error, GatewayError, Result, ValueError};
pub use event::{DoorEvent, EventBus};
pub use types::{DiChannel, DoorReading, DoorState, RelayChannel, TargetDoorState};
