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

//! Provides abstractions over the OS facilities the bootstrap sequence uses.
//!
//! Each concern gets its own small trait. A concrete platform implements all
//! of them and is handed to the dispatcher as one [`Platform`].

pub mod timer;

pub use timer::{TimerRange, TimerResolution};

use crate::console::ConsoleAttachment;
use crate::error::BootstrapError;
use std::fmt;

/// CPU instruction-set extensions the capability gate can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CpuFeature {
    /// Advanced Vector Extensions.
    Avx,
    /// Advanced Vector Extensions 2.
    Avx2,
    /// SSE 4.2 string and CRC instructions.
    Sse42,
}

impl fmt::Display for CpuFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CpuFeature::Avx => "AVX",
            CpuFeature::Avx2 => "AVX2",
            CpuFeature::Sse42 => "SSE4.2",
        };
        f.write_str(name)
    }
}

/// Answers questions about the host CPU.
pub trait CpuProbe {
    /// Returns `true` if the host CPU supports `feature`.
    fn has_feature(&self, feature: CpuFeature) -> bool;
}

/// Source of the raw process command line.
pub trait CommandLineSource {
    /// Splits the OS command line into tokens following OS quoting rules.
    fn command_line(&self) -> Result<Vec<String>, BootstrapError>;
}

/// Console ownership operations.
pub trait ConsoleHost {
    /// Tries to attach to the console of the parent process.
    fn attach_parent_console(&mut self) -> bool;

    /// Returns `true` if the environment shows an interactive shell launch.
    fn has_shell_environment(&self) -> bool;

    /// Allocates a console for the process.
    fn allocate_console(&mut self) -> bool;

    /// Points standard output and standard error at the console.
    fn redirect_standard_streams(&mut self) -> std::io::Result<()>;
}

/// Result of initializing the OS component-interop subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteropStatus {
    /// This call initialized the subsystem.
    Initialized,
    /// Someone (typically the parent) initialized it already.
    AlreadyInitialized,
    /// Initialization failed with the given OS status code.
    Failed(i32),
}

/// Component-interop initialization.
pub trait InteropHost {
    /// Initializes the interop subsystem for the calling thread.
    fn initialize_interop(&mut self) -> InteropStatus;
}

/// Delivers unrecoverable diagnostics straight to the user.
pub trait FatalReporter {
    /// Shows `message`. `console` tells whether stderr is visible.
    fn report_fatal(&self, message: &str, console: ConsoleAttachment);
}

/// Everything the entry dispatcher needs from the host OS.
pub trait Platform: CommandLineSource + ConsoleHost + InteropHost + CpuProbe + FatalReporter {
    /// The timer-resolution capability, if the OS exposes one.
    ///
    /// Resolved once when the platform is created.
    fn timer_resolution(&self) -> Option<&dyn TimerResolution>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_feature_names() {
        assert_eq!(CpuFeature::Avx.to_string(), "AVX");
        assert_eq!(CpuFeature::Avx2.to_string(), "AVX2");
        assert_eq!(CpuFeature::Sse42.to_string(), "SSE4.2");
    }
}
