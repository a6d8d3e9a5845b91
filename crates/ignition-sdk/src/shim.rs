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

//! The OS entry shims.
//!
//! Both shims do nothing but forward to [`run`], so console and windowed
//! builds behave identically once the process is running.

use crate::dispatcher::Dispatcher;
use ignition_core::console::CONSOLE_STATE;
use ignition_core::entry::EntryInfo;
use ignition_core::options::LAUNCH_OPTIONS;
use ignition_infra::{ClapOptionService, WindowsPlatform};
use ignition_telemetry::LogService;

/// Runs the bootstrap sequence against the real OS and returns the exit
/// status for the process.
pub fn run(entry: &EntryInfo) -> i32 {
    let mut platform = WindowsPlatform::new(entry.name.clone());
    let mut logging = LogService::new();
    let options = match &entry.build_info {
        Some(build_info) => ClapOptionService::new().with_version(build_info.to_string()),
        None => ClapOptionService::new(),
    };

    Dispatcher::new(
        &mut platform,
        &mut logging,
        &options,
        &CONSOLE_STATE,
        &LAUNCH_OPTIONS,
    )
    .dispatch(entry)
}

/// Entry shim for console-subsystem builds.
pub fn console_main(entry: &EntryInfo) -> i32 {
    run(entry)
}

/// Entry shim for windowed-subsystem builds.
pub fn windowed_main(entry: &EntryInfo) -> i32 {
    run(entry)
}

/// Declares `fn main` for an application, routing it through the shim that
/// matches the build's subsystem.
///
/// ```ignore
/// ignition_sdk::bootstrap_main!(ignition_sdk::EntryInfo::new("app", app_main));
/// ```
#[macro_export]
macro_rules! bootstrap_main {
    ($entry:expr) => {
        fn main() {
            let entry = $entry;
            #[cfg(debug_assertions)]
            let status = $crate::console_main(&entry);
            #[cfg(not(debug_assertions))]
            let status = $crate::windowed_main(&entry);
            ::std::process::exit(status)
        }
    };
}
