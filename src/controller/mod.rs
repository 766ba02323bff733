// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The door/light controller.
//!
//! [`DoorController::spawn`] starts three tasks on the tokio runtime: the
//! state-owning controller task, a poll task that reads the door position
//! sensors on a fixed cadence, and a one-shot diagnostic read of the
//! module's system information. The returned handle is cheap to clone;
//! dropping the last handle winds all of them down.
//!
//! # Examples
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
//!     // Mirror notifications
//!     let mut events = controller.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("{event:?}");
//!         }
//!     });
//!
//!     controller.set_target_door_state(TargetDoorState::Open).await?;
//!     Ok(())
//! }
//! ```

mod task;
mod timer;
mod transition;

pub use transition::next_door_state;

use tokio::sync::{broadcast, mpsc, oneshot};

use crate::config::ControllerConfig;
use crate::error::{Error, Result};
use crate::event::{DoorEvent, EventBus};
use crate::gateway::Gateway;
use crate::types::{DoorState, TargetDoorState};

use task::{ControllerRequest, ControllerTask, log_device_info, poll_door_position};

/// Capacity of the command/poll channel into the controller task.
const REQUEST_CHANNEL_CAPACITY: usize = 32;

/// A snapshot of the controller's stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DoorStatus {
    /// The current door state.
    pub door: DoorState,
    /// The target door state.
    pub target: TargetDoorState,
    /// Whether the light is on.
    pub light_on: bool,
}

/// Handle to a running door/light controller.
///
/// The controller starts with an optimistic belief of a closed door and the
/// light off; the first poll corrects the door state within one cadence.
/// Gateway failures never terminate the controller: failed polls are
/// retried on cadence and failed command pulses are reported both as an
/// [`DoorEvent::Error`] notification and as the command's return value.
#[derive(Debug, Clone)]
pub struct DoorController {
    requests: mpsc::Sender<ControllerRequest>,
    events: EventBus,
}

impl DoorController {
    /// Validates the configuration and spawns the controller tasks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid.
    ///
    /// # Panics
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<G: Gateway + 'static>(config: ControllerConfig, gateway: G) -> Result<Self> {
        config.validate()?;

        let gateway = std::sync::Arc::new(gateway);
        let events = EventBus::new();
        let (requests, receiver) = mpsc::channel(REQUEST_CHANNEL_CAPACITY);

        tracing::info!(host = config.host(), "starting door controller");

        tokio::spawn(log_device_info(gateway.clone(), events.clone()));
        tokio::spawn(poll_door_position(
            gateway.clone(),
            requests.downgrade(),
            config.poll_interval(),
        ));
        tokio::spawn(ControllerTask::new(config, gateway, events.clone(), receiver).run());

        Ok(Self { requests, events })
    }

    /// Drives the door towards the given target state.
    ///
    /// Issues at most one relay pulse. Reports success without pulsing when
    /// the door is already at, or moving towards, the target.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Gateway`] if the relay pulse fails (stored state is
    /// left untouched; the command is not retried) and
    /// [`Error::ControllerStopped`] if the controller task is gone.
    pub async fn set_target_door_state(&self, target: TargetDoorState) -> Result<()> {
        let (reply, response) = oneshot::channel();
        self.request(ControllerRequest::SetTargetDoorState { target, reply }, response)
            .await?
    }

    /// Switches the light on or off.
    ///
    /// Issues at most one relay pulse; a no-op when the light is already in
    /// the requested state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Gateway`] if the relay pulse fails and
    /// [`Error::ControllerStopped`] if the controller task is gone.
    pub async fn set_light_on(&self, on: bool) -> Result<()> {
        let (reply, response) = oneshot::channel();
        self.request(ControllerRequest::SetLightOn { on, reply }, response)
            .await?
    }

    /// Returns a snapshot of the stored door, target, and light state.
    ///
    /// The snapshot is taken by the controller task itself, so it can never
    /// observe a half-applied update.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ControllerStopped`] if the controller task is gone.
    pub async fn status(&self) -> Result<DoorStatus> {
        let (reply, response) = oneshot::channel();
        self.request(ControllerRequest::Status { reply }, response)
            .await
    }

    /// Subscribes to controller notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DoorEvent> {
        self.events.subscribe()
    }

    async fn request<T>(
        &self,
        request: ControllerRequest,
        response: oneshot::Receiver<T>,
    ) -> Result<T> {
        self.requests
            .send(request)
            .await
            .map_err(|_| Error::ControllerStopped)?;
        response.await.map_err(|_| Error::ControllerStopped)
    }
}
