// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Door state types.
//!
//! The controller keeps a [`DoorState`] as its best belief about the physical
//! door. Raw sensor snapshots only ever yield a [`DoorReading`], which may be
//! [`DoorReading::Unknown`] when the door is somewhere between its end
//! positions; `Unknown` is resolved within the same inference step and is
//! never stored.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;
use crate::types::DiChannel;

/// The controller's belief about the physical door position and motion.
///
/// # Examples
///
/// ```
/// use doorlogik_lib::types::{DoorState, TargetDoorState};
///
/// assert!(DoorState::Opening.is_in_motion());
/// assert_eq!(DoorState::Opening.target(), Some(TargetDoorState::Open));
/// assert_eq!(DoorState::Stopped.target(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorState {
    /// Door is resting fully open.
    Open,
    /// Door is resting fully closed.
    Closed,
    /// Door is moving towards fully open.
    Opening,
    /// Door is moving towards fully closed.
    Closing,
    /// Door halted somewhere between its end positions.
    Stopped,
}

impl DoorState {
    /// Returns the lowercase string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Opening => "opening",
            Self::Closing => "closing",
            Self::Stopped => "stopped",
        }
    }

    /// Returns `true` if the door is opening or closing.
    #[must_use]
    pub const fn is_in_motion(&self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }

    /// Returns the target implied by this state.
    ///
    /// `Stopped` does not imply a target and returns `None`.
    #[must_use]
    pub const fn target(&self) -> Option<TargetDoorState> {
        match self {
            Self::Open | Self::Opening => Some(TargetDoorState::Open),
            Self::Closed | Self::Closing => Some(TargetDoorState::Closed),
            Self::Stopped => None,
        }
    }
}

impl fmt::Display for DoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The last commanded or inferred intended end state of the door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetDoorState {
    /// The door should end up fully open.
    Open,
    /// The door should end up fully closed.
    Closed,
}

impl TargetDoorState {
    /// Returns the lowercase string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    /// Returns the resting state corresponding to this target.
    #[must_use]
    pub const fn resting_state(&self) -> DoorState {
        match self {
            Self::Open => DoorState::Open,
            Self::Closed => DoorState::Closed,
        }
    }

    /// Returns the in-motion state heading towards this target.
    #[must_use]
    pub const fn motion_state(&self) -> DoorState {
        match self {
            Self::Open => DoorState::Opening,
            Self::Closed => DoorState::Closing,
        }
    }
}

impl fmt::Display for TargetDoorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TargetDoorState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            other => Err(ValueError::InvalidTargetDoorState(other.to_string())),
        }
    }
}

/// A raw interpretation of the door position, fed into the state machine.
///
/// Unlike [`DoorState`] this includes [`Unknown`](Self::Unknown) for the
/// case where neither end sensor is asserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoorReading {
    /// The fully-open sensor is asserted.
    Open,
    /// The fully-closed sensor is asserted.
    Closed,
    /// Motion towards open was commanded or inferred.
    Opening,
    /// Motion towards closed was commanded or inferred.
    Closing,
    /// Motion ceased without reaching an end position.
    Stopped,
    /// Neither end sensor is asserted.
    Unknown,
}

impl DoorReading {
    /// Interprets a digital input snapshot as a door reading.
    ///
    /// The fully-closed sensor wins if both channels are asserted (a wiring
    /// fault); channels missing from a short snapshot read as not asserted.
    #[must_use]
    pub fn from_inputs(inputs: &[bool]) -> Self {
        let asserted = |channel: DiChannel| inputs.get(channel.index()).copied().unwrap_or(false);

        if asserted(DiChannel::FullyClosed) {
            Self::Closed
        } else if asserted(DiChannel::FullyOpen) {
            Self::Open
        } else {
            Self::Unknown
        }
    }

    /// Returns the lowercase string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Opening => "opening",
            Self::Closing => "closing",
            Self::Stopped => "stopped",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DoorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<DoorState> for DoorReading {
    fn from(state: DoorState) -> Self {
        match state {
            DoorState::Open => Self::Open,
            DoorState::Closed => Self::Closed,
            DoorState::Opening => Self::Opening,
            DoorState::Closing => Self::Closing,
            DoorState::Stopped => Self::Stopped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn door_state_as_str() {
        assert_eq!(DoorState::Open.as_str(), "open");
        assert_eq!(DoorState::Closed.as_str(), "closed");
        assert_eq!(DoorState::Opening.as_str(), "opening");
        assert_eq!(DoorState::Closing.as_str(), "closing");
        assert_eq!(DoorState::Stopped.as_str(), "stopped");
    }

    #[test]
    fn door_state_motion() {
        assert!(DoorState::Opening.is_in_motion());
        assert!(DoorState::Closing.is_in_motion());
        assert!(!DoorState::Open.is_in_motion());
        assert!(!DoorState::Closed.is_in_motion());
        assert!(!DoorState::Stopped.is_in_motion());
    }

    #[test]
    fn door_state_target() {
        assert_eq!(DoorState::Open.target(), Some(TargetDoorState::Open));
        assert_eq!(DoorState::Opening.target(), Some(TargetDoorState::Open));
        assert_eq!(DoorState::Closed.target(), Some(TargetDoorState::Closed));
        assert_eq!(DoorState::Closing.target(), Some(TargetDoorState::Closed));
        assert_eq!(DoorState::Stopped.target(), None);
    }

    #[test]
    fn target_door_state_from_str() {
        assert_eq!("open".parse::<TargetDoorState>(), Ok(TargetDoorState::Open));
        assert_eq!(
            "CLOSED".parse::<TargetDoorState>(),
            Ok(TargetDoorState::Closed)
        );
        assert!("stopped".parse::<TargetDoorState>().is_err());
    }

    #[test]
    fn target_door_state_related_states() {
        assert_eq!(TargetDoorState::Open.resting_state(), DoorState::Open);
        assert_eq!(TargetDoorState::Open.motion_state(), DoorState::Opening);
        assert_eq!(TargetDoorState::Closed.resting_state(), DoorState::Closed);
        assert_eq!(TargetDoorState::Closed.motion_state(), DoorState::Closing);
    }

    #[test]
    fn reading_from_inputs_fully_closed() {
        // Channel 0 = fully open, channel 1 = fully closed
        assert_eq!(
            DoorReading::from_inputs(&[false, true]),
            DoorReading::Closed
        );
    }

    #[test]
    fn reading_from_inputs_fully_open() {
        assert_eq!(DoorReading::from_inputs(&[true, false]), DoorReading::Open);
    }

    #[test]
    fn reading_from_inputs_between_positions() {
        assert_eq!(
            DoorReading::from_inputs(&[false, false]),
            DoorReading::Unknown
        );
    }

    #[test]
    fn reading_from_inputs_closed_sensor_wins() {
        assert_eq!(DoorReading::from_inputs(&[true, true]), DoorReading::Closed);
    }

    #[test]
    fn reading_from_inputs_short_snapshot() {
        assert_eq!(DoorReading::from_inputs(&[true]), DoorReading::Open);
        assert_eq!(DoorReading::from_inputs(&[]), DoorReading::Unknown);
    }

    #[test]
    fn reading_from_door_state() {
        assert_eq!(DoorReading::from(DoorState::Stopped), DoorReading::Stopped);
        assert_eq!(DoorReading::from(DoorState::Opening), DoorReading::Opening);
    }

    #[test]
    fn door_state_serde_roundtrip() {
        let json = serde_json::to_string(&DoorState::Opening).unwrap();
        assert_eq!(json, "\"opening\"");
        let state: DoorState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, DoorState::Opening);
    }
}
