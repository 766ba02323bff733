// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Channel assignments on the remote I/O module.
//!
//! The indices are fixed by the wiring between the I/O module and the door
//! opener's adapter print and must not be changed: channel meanings are a
//! hardware property, not a configuration option.

use std::fmt;

/// Digital input channels (door position sensors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiChannel {
    /// Sensor asserted when the door is fully open.
    FullyOpen,
    /// Sensor asserted when the door is fully closed.
    FullyClosed,
}

impl DiChannel {
    /// Returns the channel index on the I/O module.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::FullyOpen => 0,
            Self::FullyClosed => 1,
        }
    }
}

impl fmt::Display for DiChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullyOpen => write!(f, "fully-open (DI{})", self.index()),
            Self::FullyClosed => write!(f, "fully-closed (DI{})", self.index()),
        }
    }
}

/// Digital output relay channels (momentary toggles on the door opener).
///
/// Relays are pulse-only: the controller momentarily activates a channel and
/// the device handles deactivation. There is no persistent "set" operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelayChannel {
    /// Toggle opening the door.
    Open,
    /// Toggle partially opening the door.
    PartialOpen,
    /// Toggle closing the door.
    Close,
    /// Toggle the light.
    Light,
}

impl RelayChannel {
    /// Returns the relay index on the I/O module.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Open => 2,
            Self::PartialOpen => 3,
            Self::Close => 4,
            Self::Light => 5,
        }
    }
}

impl fmt::Display for RelayChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Open => "open",
            Self::PartialOpen => "partial-open",
            Self::Close => "close",
            Self::Light => "light",
        };
        write!(f, "{name} (DO{})", self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn di_channel_indices_match_wiring() {
        assert_eq!(DiChannel::FullyOpen.index(), 0);
        assert_eq!(DiChannel::FullyClosed.index(), 1);
    }

    #[test]
    fn relay_channel_indices_match_wiring() {
        assert_eq!(RelayChannel::Open.index(), 2);
        assert_eq!(RelayChannel::PartialOpen.index(), 3);
        assert_eq!(RelayChannel::Close.index(), 4);
        assert_eq!(RelayChannel::Light.index(), 5);
    }

    #[test]
    fn channel_display() {
        assert_eq!(DiChannel::FullyClosed.to_string(), "fully-closed (DI1)");
        assert_eq!(RelayChannel::Light.to_string(), "light (DO5)");
    }
}
