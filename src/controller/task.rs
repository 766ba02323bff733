// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The controller task.
//!
//! All door and light state lives inside a single spawned task. Commands,
//! poll results and timer expiries are serialized through one `select!`
//! loop, so every mutation completes atomically between suspension points
//! and no locking is needed.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};

use crate::config::ControllerConfig;
use crate::error::{Error, GatewayError, Result};
use crate::event::{DoorEvent, EventBus};
use crate::gateway::Gateway;
use crate::types::{DoorReading, DoorState, RelayChannel, TargetDoorState};

use super::DoorStatus;
use super::timer::{TimerSlot, sleep_or_pending};
use super::transition::next_door_state;

/// Requests flowing into the controller task.
pub(crate) enum ControllerRequest {
    /// Command: drive the door towards a target state.
    SetTargetDoorState {
        target: TargetDoorState,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Command: switch the light on or off.
    SetLightOn {
        on: bool,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Query the current state snapshot.
    Status { reply: oneshot::Sender<DoorStatus> },
    /// A poll produced a fresh door reading.
    Reading(DoorReading),
    /// A poll failed; stored state is left untouched.
    PollFailed(GatewayError),
}

/// The state-owning controller task.
pub(crate) struct ControllerTask<G> {
    config: ControllerConfig,
    gateway: Arc<G>,
    events: EventBus,
    requests: mpsc::Receiver<ControllerRequest>,
    door_state: DoorState,
    target_state: TargetDoorState,
    light_on: bool,
    move_timer: TimerSlot,
    light_timer: TimerSlot,
}

impl<G: Gateway> ControllerTask<G> {
    pub(crate) fn new(
        config: ControllerConfig,
        gateway: Arc<G>,
        events: EventBus,
        requests: mpsc::Receiver<ControllerRequest>,
    ) -> Self {
        Self {
            config,
            gateway,
            events,
            requests,
            // Optimistic default until the first poll corrects it
            door_state: DoorState::Closed,
            target_state: TargetDoorState::Closed,
            light_on: false,
            move_timer: TimerSlot::new(),
            light_timer: TimerSlot::new(),
        }
    }

    /// Runs until every controller handle has been dropped.
    pub(crate) async fn run(mut self) {
        loop {
            let move_deadline = self.move_timer.deadline();
            let light_deadline = self.light_timer.deadline();

            tokio::select! {
                request = self.requests.recv() => {
                    let Some(request) = request else { break };
                    self.handle_request(request).await;
                }
                () = sleep_or_pending(move_deadline) => {
                    tracing::debug!("move timer elapsed without reaching an end position");
                    self.move_timer.cancel();
                    self.apply_reading(DoorReading::Stopped);
                }
                () = sleep_or_pending(light_deadline) => {
                    tracing::info!("light switched off after timeout");
                    self.light_timer.cancel();
                    self.update_light(false, None);
                }
            }
        }

        tracing::debug!("controller task stopped");
    }

    async fn handle_request(&mut self, request: ControllerRequest) {
        match request {
            ControllerRequest::SetTargetDoorState { target, reply } => {
                let result = self.set_target_door_state(target).await;
                let _ = reply.send(result);
            }
            ControllerRequest::SetLightOn { on, reply } => {
                let result = self.set_light_on(on).await;
                let _ = reply.send(result);
            }
            ControllerRequest::Status { reply } => {
                let _ = reply.send(DoorStatus {
                    door: self.door_state,
                    target: self.target_state,
                    light_on: self.light_on,
                });
            }
            ControllerRequest::Reading(reading) => self.apply_reading(reading),
            ControllerRequest::PollFailed(error) => {
                tracing::warn!(error = %error, "door position poll failed");
                self.events.publish(DoorEvent::error(&error));
            }
        }
    }

    /// Drives the door towards `target` with a single relay pulse.
    ///
    /// A no-op (without a pulse) when the door is already at or moving
    /// towards the target; on success the motion is applied optimistically
    /// and the poll loop later confirms or corrects it.
    async fn set_target_door_state(&mut self, target: TargetDoorState) -> Result<()> {
        if self.door_state == target.resting_state() || self.door_state == target.motion_state() {
            tracing::debug!(state = %self.door_state, "door is already {target}");
            return Ok(());
        }

        let relay = match target {
            TargetDoorState::Open => RelayChannel::Open,
            TargetDoorState::Closed => RelayChannel::Close,
        };

        tracing::info!(relay = %relay, target = %target, "pulsing door relay");
        if let Err(error) = self.gateway.pulse_output(relay).await {
            tracing::warn!(error = %error, relay = %relay, "door relay pulse failed");
            self.events.publish(DoorEvent::error(&error));
            return Err(Error::Gateway(error));
        }

        self.apply_reading(DoorReading::from(target.motion_state()));
        Ok(())
    }

    /// Switches the light on or off with a single relay pulse.
    async fn set_light_on(&mut self, on: bool) -> Result<()> {
        if self.light_on == on {
            tracing::debug!(on, "light is already in the requested state");
            return Ok(());
        }

        tracing::info!(on, "pulsing light relay");
        if let Err(error) = self.gateway.pulse_output(RelayChannel::Light).await {
            tracing::warn!(error = %error, "light relay pulse failed");
            self.events.publish(DoorEvent::error(&error));
            return Err(Error::Gateway(error));
        }

        let auto_off = on.then(|| self.config.light_switched_duration());
        self.update_light(on, auto_off);
        Ok(())
    }

    /// Feeds a reading through the transition function and applies the
    /// resulting state change, if any.
    fn apply_reading(&mut self, reading: DoorReading) {
        let next = next_door_state(self.door_state, reading);
        if next == self.door_state {
            return;
        }

        // The door only keeps moving for a bounded period
        if next.is_in_motion() {
            self.move_timer.arm(self.config.move_duration());
        } else {
            self.move_timer.cancel();
        }

        if let Some(target) = next.target() {
            self.target_state = target;
        }

        // Door movement switches the light on in the hardware
        self.update_light(true, Some(self.config.light_moved_duration()));

        self.door_state = next;
        tracing::info!(current = %next, target = %self.target_state, "door state changed");
        self.events
            .publish(DoorEvent::door_state_changed(next, self.target_state));
    }

    /// Stores the light state and reschedules its auto-off deadline.
    ///
    /// Arming is last-write-wins: a movement-triggered deadline replaces a
    /// longer externally-triggered one, never the maximum of the two.
    fn update_light(&mut self, on: bool, auto_off: Option<Duration>) {
        if self.light_on != on {
            self.light_on = on;
            tracing::info!(on, "light state changed");
            self.events.publish(DoorEvent::light_state_changed(on));
        }

        match auto_off {
            Some(duration) => self.light_timer.arm(duration),
            None => self.light_timer.cancel(),
        }
    }
}

/// Polls the door position on a fixed cadence.
///
/// The next poll is scheduled after the previous one completes, so drift
/// from call latency is expected; the cadence never pauses or backs off on
/// errors. The task winds down once every controller handle is gone.
pub(crate) async fn poll_door_position<G: Gateway>(
    gateway: Arc<G>,
    requests: mpsc::WeakSender<ControllerRequest>,
    interval: Duration,
) {
    loop {
        let request = match gateway.read_digital_inputs().await {
            Ok(inputs) => ControllerRequest::Reading(DoorReading::from_inputs(&inputs)),
            Err(error) => ControllerRequest::PollFailed(error),
        };

        let Some(sender) = requests.upgrade() else {
            break;
        };
        if sender.send(request).await.is_err() {
            break;
        }
        drop(sender);

        tokio::time::sleep(interval).await;
    }
}

/// Reads and logs the module's system information once, for diagnostics.
pub(crate) async fn log_device_info<G: Gateway>(gateway: Arc<G>, events: EventBus) {
    match gateway.read_system_info().await {
        Ok(info) => {
            for (key, value) in info {
                tracing::info!("{key}: {value}");
            }
        }
        Err(error) => {
            tracing::warn!(error = %error, "failed to read system information");
            events.publish(DoorEvent::error(&error));
        }
    }
}
