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

//! Kernel timer resolution through undocumented `ntdll` exports.
//!
//! The exports are looked up at runtime; when they are missing the
//! capability simply does not exist.

use ignition_core::platform::{TimerRange, TimerResolution};
use libloading::Library;

type NtQueryTimerResolutionFn =
    unsafe extern "system" fn(minimum: *mut u32, maximum: *mut u32, current: *mut u32) -> i32;
type NtSetTimerResolutionFn =
    unsafe extern "system" fn(desired: u32, set: u8, current: *mut u32) -> i32;

/// The `NtQueryTimerResolution` / `NtSetTimerResolution` pair.
pub struct NtTimerResolution {
    query: NtQueryTimerResolutionFn,
    set: NtSetTimerResolutionFn,
    // Keeps the function pointers above valid.
    _ntdll: Library,
}

impl NtTimerResolution {
    /// Looks up both exports. Returns `None` if either is unavailable.
    pub fn resolve() -> Option<Self> {
        // SAFETY: ntdll is mapped into every process; loading it runs no
        // initialization code.
        let ntdll = unsafe { Library::new("ntdll.dll") }.ok()?;
        // SAFETY: the signatures match the exported functions.
        let query = unsafe { ntdll.get::<NtQueryTimerResolutionFn>(b"NtQueryTimerResolution\0") }
            .map(|symbol| *symbol)
            .ok()?;
        // SAFETY: as above.
        let set = unsafe { ntdll.get::<NtSetTimerResolutionFn>(b"NtSetTimerResolution\0") }
            .map(|symbol| *symbol)
            .ok()?;
        Some(Self {
            query,
            set,
            _ntdll: ntdll,
        })
    }
}

fn nt_success(status: i32) -> bool {
    status >= 0
}

impl TimerResolution for NtTimerResolution {
    fn query(&self) -> Option<TimerRange> {
        let (mut minimum, mut maximum, mut current) = (0u32, 0u32, 0u32);
        // SAFETY: three valid out pointers.
        let status = unsafe { (self.query)(&mut minimum, &mut maximum, &mut current) };
        nt_success(status).then_some(TimerRange {
            minimum,
            maximum,
            current,
        })
    }

    fn request(&self, desired: u32) -> Option<u32> {
        let mut current = 0u32;
        // SAFETY: valid out pointer; `1` asks the kernel to apply the value.
        let status = unsafe { (self.set)(desired, 1, &mut current) };
        nt_success(status).then_some(current)
    }
}
