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

//! Bootstrap configuration.
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! launch flags, in that order of precedence.

use crate::options::LaunchOptions;
use anyhow::{Context, Result};
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Settings for the logging lifecycle.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter used when `RUST_LOG` is not set.
    pub level: String,
    /// Log file path. `None` means `<name>.log` in the working directory.
    pub log_file: Option<PathBuf>,
    /// Whether log lines are also written to a file.
    pub log_to_file: bool,
    /// Number of recent lines kept in the in-process buffer.
    pub buffer_lines: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_file: None,
            log_to_file: true,
            buffer_lines: 256,
        }
    }
}

impl LoggingConfig {
    /// Parses [`LoggingConfig::level`], falling back to `Info` when the
    /// value is not a level name.
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.level).unwrap_or(LevelFilter::Info)
    }

    /// The file log lines go to for an application called `name`, if any.
    pub fn resolve_log_file(&self, name: &str) -> Option<PathBuf> {
        if !self.log_to_file {
            return None;
        }
        Some(
            self.log_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(format!("{name}.log"))),
        )
    }
}

/// Options that steer the bootstrap sequence itself.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Ask the kernel for the finest timer resolution.
    pub win32_high_freq: bool,
    /// Attach an interactive console when launched from a shell.
    pub enable_console: bool,
    /// Logging lifecycle settings.
    pub logging: LoggingConfig,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            win32_high_freq: true,
            enable_console: false,
            logging: LoggingConfig::default(),
        }
    }
}

impl BootstrapConfig {
    /// Parses a configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid bootstrap configuration")
    }

    /// Reads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }

    /// Applies launch flag overrides on top of this configuration.
    pub fn apply(&mut self, options: &LaunchOptions) {
        if let Some(high_freq) = options.win32_high_freq {
            self.win32_high_freq = high_freq;
        }
        if let Some(enable_console) = options.enable_console {
            self.enable_console = enable_console;
        }
    }
}
