// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The door state-transition function.
//!
//! This is pure logic with no I/O or timers: given the stored [`DoorState`]
//! and a fresh [`DoorReading`], compute the next stored state. Everything
//! else the controller does (timers, target updates, light coupling,
//! notifications) keys off whether the result differs from the stored state.

use crate::types::{DoorReading, DoorState};

/// Computes the next door state from the current state and a new reading.
///
/// Rules:
///
/// - A definite reading is adopted unless it is an implausible flip for a
///   physically moving door: `Open` while `Closing` and `Closed` while
///   `Opening` are sensor noise (a door cannot jump between its extremes),
///   and `Opening` while `Open` / `Closing` while `Closed` are rejected for
///   symmetry. Rejected readings leave the state unchanged.
/// - `Stopped` is always adopted.
/// - `Unknown` (neither end sensor asserted) means motion has started if the
///   door was resting: `Open` becomes `Closing`, `Closed` becomes `Opening`.
///   From any other state the motion is already accounted for and nothing
///   changes.
///
/// Returning the current state unchanged is the idempotence guarantee: the
/// caller applies no side effects in that case.
#[must_use]
pub fn next_door_state(current: DoorState, reading: DoorReading) -> DoorState {
    match reading {
        DoorReading::Open if current != DoorState::Closing => DoorState::Open,
        DoorReading::Opening if current != DoorState::Open => DoorState::Opening,
        DoorReading::Closing if current != DoorState::Closed => DoorState::Closing,
        DoorReading::Closed if current != DoorState::Opening => DoorState::Closed,
        DoorReading::Stopped => DoorState::Stopped,
        DoorReading::Unknown => match current {
            DoorState::Open => DoorState::Closing,
            DoorState::Closed => DoorState::Opening,
            other => other,
        },
        _ => current,
    }
}
