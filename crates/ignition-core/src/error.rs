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

//! Errors that end the bootstrap sequence before the application runs.

use crate::console::ConsoleAttachment;
use crate::exit;
use crate::options::OptionsError;
use crate::platform::CpuFeature;
use std::fmt;

/// A failure that aborts bootstrap early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapError {
    /// The OS could not split the command line into tokens.
    CommandLine {
        /// OS error code reported by the split call.
        os_error: i32,
    },
    /// The option service rejected the command line, or asked for help.
    Options(OptionsError),
    /// The console attachment state was already sealed by someone else.
    ConsoleAlreadyDecided(ConsoleAttachment),
    /// The launch options were already sealed by an earlier bootstrap.
    LaunchOptionsAlreadySealed,
    /// A mandatory CPU feature is not available on this machine.
    CapabilityMissing {
        /// The missing feature.
        feature: CpuFeature,
    },
}

impl BootstrapError {
    /// The process exit status this failure maps to.
    pub fn exit_code(&self) -> i32 {
        match self {
            BootstrapError::CommandLine { .. }
            | BootstrapError::ConsoleAlreadyDecided(_)
            | BootstrapError::LaunchOptionsAlreadySealed => exit::ARGUMENTS_FAILED,
            BootstrapError::Options(error) => error.exit_code(),
            BootstrapError::CapabilityMissing { .. } => exit::CAPABILITY_MISSING,
        }
    }
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapError::CommandLine { os_error } => {
                write!(f, "Failed to split the command line (os error {os_error})")
            }
            BootstrapError::Options(error) => write!(f, "{error}"),
            BootstrapError::ConsoleAlreadyDecided(state) => {
                write!(f, "Console attachment was already decided as {state:?}")
            }
            BootstrapError::LaunchOptionsAlreadySealed => {
                write!(f, "Launch options were already sealed for this process")
            }
            BootstrapError::CapabilityMissing { feature } => {
                write!(f, "Required CPU feature {feature} is not available")
            }
        }
    }
}

impl std::error::Error for BootstrapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BootstrapError::Options(error) => Some(error),
            _ => None,
        }
    }
}

impl From<OptionsError> for BootstrapError {
    fn from(error: OptionsError) -> Self {
        BootstrapError::Options(error)
    }
}
