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

//! The Windows host platform.
//!
//! Each submodule wraps one group of Win32 calls; [`WindowsPlatform`]
//! bundles them behind the `Platform` trait.

pub mod command_line;
pub mod console;
pub mod fatal;
pub mod interop;
pub mod timer;

use crate::cpu::HostCpu;
use ignition_core::console::ConsoleAttachment;
use ignition_core::error::BootstrapError;
use ignition_core::platform::{
    CommandLineSource, ConsoleHost, CpuFeature, CpuProbe, FatalReporter, InteropHost,
    InteropStatus, Platform, TimerResolution,
};
use timer::NtTimerResolution;

/// The real OS, as seen from the bootstrap sequence.
pub struct WindowsPlatform {
    cpu: HostCpu,
    timer: Option<NtTimerResolution>,
    caption: String,
}

impl WindowsPlatform {
    /// Resolves optional OS capabilities once. `caption` titles fatal
    /// message boxes.
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            cpu: HostCpu,
            timer: NtTimerResolution::resolve(),
            caption: caption.into(),
        }
    }
}

impl CommandLineSource for WindowsPlatform {
    fn command_line(&self) -> Result<Vec<String>, BootstrapError> {
        command_line::split_process_command_line()
    }
}

impl ConsoleHost for WindowsPlatform {
    fn attach_parent_console(&mut self) -> bool {
        console::attach_parent_console()
    }

    fn has_shell_environment(&self) -> bool {
        crate::platform::shell::has_shell_environment_variable()
    }

    fn allocate_console(&mut self) -> bool {
        console::allocate_console()
    }

    fn redirect_standard_streams(&mut self) -> std::io::Result<()> {
        console::redirect_standard_streams()
    }
}

impl InteropHost for WindowsPlatform {
    fn initialize_interop(&mut self) -> InteropStatus {
        interop::initialize_com()
    }
}

impl CpuProbe for WindowsPlatform {
    fn has_feature(&self, feature: CpuFeature) -> bool {
        self.cpu.has_feature(feature)
    }
}

impl FatalReporter for WindowsPlatform {
    fn report_fatal(&self, message: &str, console: ConsoleAttachment) {
        fatal::report(&self.caption, message, console);
    }
}

impl Platform for WindowsPlatform {
    fn timer_resolution(&self) -> Option<&dyn TimerResolution> {
        self.timer.as_ref().map(|timer| timer as &dyn TimerResolution)
    }
}
