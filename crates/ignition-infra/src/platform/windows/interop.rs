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

//! COM initialization for the main thread.

use ignition_core::platform::InteropStatus;
use windows_sys::Win32::Foundation::{RPC_E_CHANGED_MODE, S_FALSE, S_OK};
use windows_sys::Win32::System::Com::{CoInitializeEx, COINIT_MULTITHREADED};

/// Initializes COM in the multithreaded apartment.
///
/// A parent process or an earlier caller may have initialized COM already,
/// possibly in another apartment mode; both count as already initialized.
pub fn initialize_com() -> InteropStatus {
    // SAFETY: reserved pointer must be null; called on the initial thread.
    let hr = unsafe { CoInitializeEx(std::ptr::null(), COINIT_MULTITHREADED as _) };
    classify(hr)
}

fn classify(hr: i32) -> InteropStatus {
    match hr {
        S_OK => InteropStatus::Initialized,
        S_FALSE | RPC_E_CHANGED_MODE => InteropStatus::AlreadyInitialized,
        failure => InteropStatus::Failed(failure),
    }
}
