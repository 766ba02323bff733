// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Notification types emitted by the controller.

use crate::types::{DoorState, TargetDoorState};

/// Notifications emitted by a door controller.
///
/// These events let an accessory layer (HomeKit bridge, MQTT adapter, web
/// UI) mirror the controller's state. Delivery is fire-and-forget: an event
/// never blocks or aborts the controller.
///
/// # Examples
///
/// ```
/// use doorlogik_lib::event::DoorEvent;
/// use doorlogik_lib::types::{DoorState, TargetDoorState};
///
/// let event = DoorEvent::DoorStateChanged {
///     current: DoorState::Opening,
///     target: TargetDoorState::Open,
/// };
/// assert!(event.is_state_change());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DoorEvent {
    /// The stored door state changed.
    DoorStateChanged {
        /// The new current door state.
        current: DoorState,
        /// The target implied by the new state.
        target: TargetDoorState,
    },

    /// The stored light state changed.
    LightStateChanged {
        /// Whether the light is now on.
        on: bool,
    },

    /// A gateway operation failed.
    ///
    /// Gateway failures never terminate the controller; they are reported
    /// here and, for commands, returned to the caller as well.
    Error {
        /// Human-readable description of the failure.
        message: String,
    },
}

impl DoorEvent {
    /// Returns `true` if this is a door state change.
    #[must_use]
    pub fn is_state_change(&self) -> bool {
        matches!(self, Self::DoorStateChanged { .. })
    }

    /// Returns `true` if this is a light state change.
    #[must_use]
    pub fn is_light_change(&self) -> bool {
        matches!(self, Self::LightStateChanged { .. })
    }

    /// Returns `true` if this reports a gateway failure.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Creates a door state change event.
    #[must_use]
    pub fn door_state_changed(current: DoorState, target: TargetDoorState) -> Self {
        Self::DoorStateChanged { current, target }
    }

    /// Creates a light state change event.
    #[must_use]
    pub fn light_state_changed(on: bool) -> Self {
        Self::LightStateChanged { on }
    }

    /// Creates an error event from any displayable error.
    #[must_use]
    pub fn error(error: &impl std::fmt::Display) -> Self {
        Self::Error {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kind_predicates() {
        let door = DoorEvent::door_state_changed(DoorState::Open, TargetDoorState::Open);
        assert!(door.is_state_change());
        assert!(!door.is_light_change());
        assert!(!door.is_error());

        let light = DoorEvent::light_state_changed(true);
        assert!(light.is_light_change());

        let error = DoorEvent::Error {
            message: "boom".to_string(),
        };
        assert!(error.is_error());
    }

    #[test]
    fn error_event_from_display() {
        let err = crate::error::GatewayError::Status(500);
        let event = DoorEvent::error(&err);
        assert_eq!(
            event,
            DoorEvent::Error {
                message: "unexpected HTTP status 500".to_string()
            }
        );
    }

    #[test]
    fn event_serde_roundtrip() {
        let event = DoorEvent::door_state_changed(DoorState::Closing, TargetDoorState::Closed);
        let json = serde_json::to_string(&event).unwrap();
        let back: DoorEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
