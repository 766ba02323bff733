// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for garage door control.
//!
//! # Types
//!
//! - [`DoorState`] - The controller's belief about the physical door
//! - [`TargetDoorState`] - The commanded or inferred end state
//! - [`DoorReading`] - Raw door position interpretation, possibly unknown
//! - [`DiChannel`] - Digital input channels (position sensors)
//! - [`RelayChannel`] - Digital output relay channels (momentary toggles)

mod channel;
mod door;

pub use channel::{DiChannel, RelayChannel};
pub use door::{DoorReading, DoorState, TargetDoorState};
