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

//! The public-facing bootstrap crate.
//!
//! Applications describe themselves with an [`EntryInfo`] and hand it to one
//! of the OS entry shims. Everything between process creation and the entry
//! function (and back) happens in [`Dispatcher::dispatch`].

pub mod acquire;
pub mod console;
pub mod dispatcher;
pub mod gate;
pub mod session;
#[cfg(windows)]
pub mod shim;
pub mod timer;

pub use dispatcher::{BootPhase, BootReport, Dispatcher};
pub use ignition_core::{Args, BuildInfo, EntryInfo, PullRequestInfo};
#[cfg(windows)]
pub use shim::{console_main, run, windowed_main};

pub mod prelude {
    //! Everything an application needs to declare its entry point.
    pub use ignition_core::{
        has_console_attached, launch_option, Args, BuildInfo, EntryInfo, PullRequestInfo,
    };
    pub use ignition_telemetry::{log_buffer, LogBuffer};
}
