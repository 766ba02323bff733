// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event bus for broadcasting controller notifications.

use tokio::sync::broadcast;

use super::DoorEvent;

/// Default channel capacity for the event bus.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Event bus for broadcasting [`DoorEvent`]s to multiple subscribers.
///
/// Built on tokio's broadcast channel: every subscriber receives its own
/// copy of each event, in publish order. If a slow subscriber falls more
/// than the channel capacity behind, its oldest events are dropped and it
/// observes a `RecvError::Lagged`.
///
/// # Examples
///
/// ```
/// use doorlogik_lib::event::{DoorEvent, EventBus};
///
/// let bus = EventBus::new();
/// let _subscriber = bus.subscribe();
///
/// bus.publish(DoorEvent::light_state_changed(true));
/// ```
#[derive(Debug)]
pub struct EventBus {
    sender: broadcast::Sender<DoorEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a new event bus with the specified capacity.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of events buffered per subscriber
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes to controller events.
    ///
    /// The receiver sees all events published after the subscription is
    /// created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DoorEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes an event to all subscribers.
    ///
    /// If there are no subscribers, the event is silently discarded.
    pub fn publish(&self, event: DoorEvent) {
        // Ignore errors (no subscribers or channel closed)
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DoorState, TargetDoorState};

    #[test]
    fn new_bus_has_no_subscribers() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn subscribe_and_drop_tracks_count() {
        let bus = EventBus::new();

        let rx1 = bus.subscribe();
        let _rx2 = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        drop(rx1);
        assert_eq!(bus.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn publish_delivers_to_all_subscribers() {
        let bus = EventBus::new();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let event = DoorEvent::door_state_changed(DoorState::Opening, TargetDoorState::Open);
        bus.publish(event.clone());

        assert_eq!(rx1.recv().await.unwrap(), event);
        assert_eq!(rx2.recv().await.unwrap(), event);
    }

    #[tokio::test]
    async fn publish_preserves_order() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.publish(DoorEvent::light_state_changed(true));
        bus.publish(DoorEvent::light_state_changed(false));

        assert_eq!(rx.recv().await.unwrap(), DoorEvent::light_state_changed(true));
        assert_eq!(
            rx.recv().await.unwrap(),
            DoorEvent::light_state_changed(false)
        );
    }

    #[test]
    fn publish_without_subscribers_is_discarded() {
        let bus = EventBus::new();
        bus.publish(DoorEvent::light_state_changed(true));
    }

    #[test]
    fn clone_shares_same_channel() {
        let bus1 = EventBus::new();
        let bus2 = bus1.clone();

        let _rx = bus1.subscribe();
        assert_eq!(bus2.subscriber_count(), 1);
    }
}
