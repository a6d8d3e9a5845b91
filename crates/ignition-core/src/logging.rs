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


//! Lifecycle contract for the logging backend.
//!
//! Only the two lifecycle calls belong to bootstrap. Formatting and sinks
//! are the backend's business.

use crate::config::LoggingConfig;
use std::fmt;

/// An error raised by a logging lifecycle call.
#[derive(Debug)]
pub enum LoggingError {
    /// `initialize` was called a second time in this process.
    AlreadyInitialized,
    /// The log file could not be opened.
    Sink(String),
    /// The global logger could not be installed.
    Install(String),
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggingError::AlreadyInitialized => write!(f, "Logging was already initialized"),
            LoggingError::Sink(msg) => write!(f, "Failed to open log sink: {msg}"),
            LoggingError::Install(msg) => write!(f, "Failed to install logger: {msg}"),
        }
    }
}

impl std::error::Error for LoggingError {}

/// Brackets the application entry function with logging setup and teardown.
pub trait LoggingLifecycle {
    /// Establishes sinks and the in-process buffer for application `name`.
    fn initialize(&mut self, name: &str, config: &LoggingConfig) -> Result<(), LoggingError>;

    /// Flushes and releases every sink.
    fn shutdown(&mut self);
}
