// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Single-slot timers.
//!
//! The controller owns exactly one move timer and one light timer. A
//! [`TimerSlot`] holds at most one deadline, and arming always supersedes
//! the previous one, so the "at most one live instance" invariant holds
//! structurally instead of by convention.

use std::time::Duration;

use tokio::time::Instant;

/// A deadline slot holding at most one pending timer.
#[derive(Debug, Default)]
pub(crate) struct TimerSlot {
    deadline: Option<Instant>,
}

impl TimerSlot {
    /// Creates an empty, disarmed slot.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Arms the slot to fire after `duration`, superseding any prior
    /// deadline.
    pub(crate) fn arm(&mut self, duration: Duration) {
        self.deadline = Some(Instant::now() + duration);
    }

    /// Cancels any pending deadline.
    pub(crate) fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns `true` if a deadline is pending.
    pub(crate) fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns the pending deadline, if any.
    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

/// Sleeps until the given deadline, or forever when there is none.
///
/// Lets a disarmed [`TimerSlot`] participate in a `tokio::select!` without
/// ever winning the race.
pub(crate) async fn sleep_or_pending(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_slot_is_disarmed() {
        let slot = TimerSlot::new();
        assert!(!slot.is_armed());
        assert!(slot.deadline().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn arm_sets_deadline() {
        let mut slot = TimerSlot::new();
        slot.arm(Duration::from_secs(25));

        assert!(slot.is_armed());
        assert_eq!(
            slot.deadline(),
            Some(Instant::now() + Duration::from_secs(25))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn arm_supersedes_previous_deadline() {
        let mut slot = TimerSlot::new();
        slot.arm(Duration::from_secs(25));

        tokio::time::advance(Duration::from_secs(10)).await;
        slot.arm(Duration::from_secs(25));

        // Only the most recent deadline is live
        assert_eq!(
            slot.deadline(),
            Some(Instant::now() + Duration::from_secs(25))
        );
    }

    #[test]
    fn cancel_disarms() {
        let mut slot = TimerSlot::new();
        slot.arm(Duration::from_secs(1));
        slot.cancel();
        assert!(!slot.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn sleep_or_pending_fires_at_deadline() {
        let mut slot = TimerSlot::new();
        slot.arm(Duration::from_secs(5));

        let sleep = sleep_or_pending(slot.deadline());
        tokio::pin!(sleep);

        tokio::time::advance(Duration::from_secs(4)).await;
        assert!(
            futures_not_ready(&mut sleep),
            "timer fired before its deadline"
        );

        tokio::time::advance(Duration::from_secs(2)).await;
        sleep.await;
    }

    #[tokio::test(start_paused = true)]
    async fn sleep_or_pending_never_fires_when_disarmed() {
        let sleep = sleep_or_pending(None);
        tokio::pin!(sleep);

        tokio::time::advance(Duration::from_secs(3600)).await;
        assert!(futures_not_ready(&mut sleep));
    }

    fn futures_not_ready(fut: &mut (impl std::future::Future<Output = ()> + Unpin)) -> bool {
        use std::task::{Context, Poll, Waker};

        let mut cx = Context::from_waker(Waker::noop());
        matches!(std::pin::Pin::new(fut).poll(&mut cx), Poll::Pending)
    }
}
