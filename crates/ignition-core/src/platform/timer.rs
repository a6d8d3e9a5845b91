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

//! System timer resolution capability.

use std::time::Duration;

/// The system timer resolutions reported by the kernel, in 100ns units.
///
/// Following kernel naming, `maximum` is the *finest* period (smallest
/// value) and `minimum` the coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRange {
    /// Coarsest supported period.
    pub minimum: u32,
    /// Finest supported period.
    pub maximum: u32,
    /// Period in effect right now.
    pub current: u32,
}

impl TimerRange {
    /// Converts a period in 100ns units to a [`Duration`].
    pub fn to_duration(period: u32) -> Duration {
        Duration::from_nanos(u64::from(period) * 100)
    }
}

/// An optional OS facility that changes the system timer period.
pub trait TimerResolution {
    /// Reads the supported and current periods.
    fn query(&self) -> Option<TimerRange>;

    /// Requests `desired` for the rest of the process lifetime and returns
    /// the period actually in effect afterward.
    fn request(&self, desired: u32) -> Option<u32>;
}
