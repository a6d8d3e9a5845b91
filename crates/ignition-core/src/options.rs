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

//! The contract of the launch option service.
//!
//! Option definitions and their validation live behind [`OptionService`];
//! the bootstrap sequence only consumes the resulting [`LaunchOptions`].

use crate::entry::{Args, EntryInfo};
use crate::exit;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Globally recognized flags extracted from the command line.
///
/// `None` means the flag was not given and the configured value applies.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LaunchOptions {
    /// Override for `win32_high_freq`.
    pub win32_high_freq: Option<bool>,
    /// Override for `enable_console`.
    pub enable_console: Option<bool>,
    /// Configuration file to load before applying the overrides.
    pub config_path: Option<PathBuf>,
    /// Values of the entry contract's positional options, by name.
    pub positional: BTreeMap<String, String>,
}

impl LaunchOptions {
    /// The value given for the positional option `name`, if any.
    pub fn positional(&self, name: &str) -> Option<&str> {
        self.positional.get(name).map(String::as_str)
    }
}

/// A write-once holder for the launch options the application runs with.
#[derive(Debug, Default)]
pub struct LaunchOptionsCell {
    options: OnceLock<LaunchOptions>,
}

impl LaunchOptionsCell {
    /// Creates an unsealed cell.
    pub const fn new() -> Self {
        Self {
            options: OnceLock::new(),
        }
    }

    /// Seals the cell with `options`.
    ///
    /// Hands `options` back if the cell was sealed before.
    pub fn seal(&self, options: LaunchOptions) -> Result<(), LaunchOptions> {
        self.options.set(options)
    }

    /// The sealed options, or `None` before bootstrap parsed them.
    pub fn get(&self) -> Option<&LaunchOptions> {
        self.options.get()
    }

    /// The value of positional option `name` in the sealed options.
    pub fn positional(&self, name: &str) -> Option<&str> {
        self.get().and_then(|options| options.positional(name))
    }
}

/// The cell the OS entry shims seal for the running process.
pub static LAUNCH_OPTIONS: LaunchOptionsCell = LaunchOptionsCell::new();

/// The value of the running process's positional option `name`.
pub fn launch_option(name: &str) -> Option<&'static str> {
    LAUNCH_OPTIONS.positional(name)
}

/// Why the option service did not produce [`LaunchOptions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// Help was requested; carries the rendered help text.
    Help(String),
    /// Version was requested; carries the rendered version text.
    Version(String),
    /// The command line or the configuration file is invalid.
    Invalid(String),
}

impl OptionsError {
    /// The process exit status for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            OptionsError::Help(_) | OptionsError::Version(_) => exit::SUCCESS,
            OptionsError::Invalid(_) => exit::ARGUMENTS_FAILED,
        }
    }

    /// Informational outcomes go to stdout, failures to stderr.
    pub fn is_informational(&self) -> bool {
        !matches!(self, OptionsError::Invalid(_))
    }
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsError::Help(text) | OptionsError::Version(text) => write!(f, "{text}"),
            OptionsError::Invalid(msg) => write!(f, "Invalid launch options: {msg}"),
        }
    }
}

impl std::error::Error for OptionsError {}

/// Extracts globally recognized flags from the command line.
pub trait OptionService {
    /// Parses `args` for the application described by `entry`.
    ///
    /// Implementations must not reorder or consume tokens: the full sequence
    /// is still handed to the application afterward.
    fn parse(&self, args: &Args, entry: &EntryInfo) -> Result<LaunchOptions, OptionsError>;
}
