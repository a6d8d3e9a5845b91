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

//! # Ignition Core
//!
//! Foundational crate containing the entry contract, the platform traits the
//! bootstrap sequence talks to, and the plain data types that flow between
//! its stages.

#![warn(missing_docs)]

pub mod build_info;
pub mod config;
pub mod console;
pub mod entry;
pub mod error;
pub mod exit;
pub mod logging;
pub mod options;
pub mod platform;
pub mod utils;

pub use build_info::{BuildInfo, PullRequestInfo};
pub use config::{BootstrapConfig, LoggingConfig};
pub use console::{has_console_attached, ConsoleAttachment, ConsoleStateCell, CONSOLE_STATE};
pub use entry::{Args, EntryFn, EntryInfo};
pub use error::BootstrapError;
pub use logging::{LoggingError, LoggingLifecycle};
pub use options::{
    launch_option, LaunchOptions, LaunchOptionsCell, OptionService, OptionsError, LAUNCH_OPTIONS,
};
pub use utils::stopwatch::Stopwatch;
