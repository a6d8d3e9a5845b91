// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The timer negotiator.

use ignition_core::platform::{TimerRange, TimerResolution};
use std::fmt;

/// What happened to the system timer resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOutcome {
    /// High-resolution timing is turned off by configuration.
    Disabled,
    /// The OS does not expose the capability.
    Unavailable,
    /// The OS refused to report or change the resolution.
    Refused,
    /// The finest period was requested.
    Applied {
        /// Periods reported before the request.
        range: TimerRange,
        /// Period in effect after the request.
        current: u32,
    },
}

impl fmt::Display for TimerOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerOutcome::Disabled => write!(f, "high-resolution timer disabled"),
            TimerOutcome::Unavailable => write!(f, "timer resolution capability unavailable"),
            TimerOutcome::Refused => write!(f, "timer resolution request refused"),
            TimerOutcome::Applied { range, current } => write!(
                f,
                "timer resolution {:?} -> {:?}",
                TimerRange::to_duration(range.current),
                TimerRange::to_duration(*current)
            ),
        }
    }
}

/// Asks for the finest timer period, if enabled and available.
///
/// Never fails: every branch is a normal outcome.
pub fn negotiate(capability: Option<&dyn TimerResolution>, enabled: bool) -> TimerOutcome {
    if !enabled {
        return TimerOutcome::Disabled;
    }
    let Some(timer) = capability else {
        return TimerOutcome::Unavailable;
    };
    let Some(range) = timer.query() else {
        return TimerOutcome::Refused;
    };
    match timer.request(range.maximum) {
        Some(current) => TimerOutcome::Applied { range, current },
        None => TimerOutcome::Refused,
    }
}
