// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event system for controller notifications.
//!
//! The controller publishes [`DoorEvent`]s through an [`EventBus`] built on
//! tokio's broadcast channel. An accessory-layer adapter subscribes and
//! mirrors door state, light state, and gateway errors.
//!
//! # Examples
//!
//! ```
//! use doorlogik_lib::event::{DoorEvent, EventBus};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(DoorEvent::light_state_changed(true));
//! ```

mod door_event;
mod event_bus;

pub use door_event::DoorEvent;
pub use event_bus::EventBus;
