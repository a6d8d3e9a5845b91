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

//! Service managing the logging lifecycle of the process.

use crate::buffer::LogBuffer;
use crate::sink::{SharedFile, TeeSink};
use env_logger::{Builder, Env, Target, WriteStyle};
use ignition_core::config::LoggingConfig;
use ignition_core::logging::{LoggingError, LoggingLifecycle};
use std::sync::OnceLock;

static LOG_BUFFER: OnceLock<LogBuffer> = OnceLock::new();

/// The buffer of the process logger, once one is installed.
///
/// Lets the application snapshot recent log lines, for example to attach
/// them to a crash report.
pub fn log_buffer() -> Option<&'static LogBuffer> {
    LOG_BUFFER.get()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Idle,
    Active,
    ShutDown,
}

/// Installs the process logger and tears it down again.
///
/// Each lifecycle call takes effect at most once per process.
#[derive(Debug)]
pub struct LogService {
    lifecycle: Lifecycle,
    echo_stderr: bool,
    file: SharedFile,
    buffer: Option<LogBuffer>,
}

impl LogService {
    /// Creates a service that also echoes records to stderr.
    pub fn new() -> Self {
        Self {
            lifecycle: Lifecycle::Idle,
            echo_stderr: true,
            file: SharedFile::none(),
            buffer: None,
        }
    }

    /// Disables the stderr copy; only the file and the buffer receive records.
    pub fn without_stderr(mut self) -> Self {
        self.echo_stderr = false;
        self
    }

    /// Returns `true` between a successful `initialize` and `shutdown`.
    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    /// The in-process buffer of recent lines, once initialized.
    pub fn buffer(&self) -> Option<&LogBuffer> {
        self.buffer.as_ref()
    }
}

impl Default for LogService {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggingLifecycle for LogService {
    fn initialize(&mut self, name: &str, config: &LoggingConfig) -> Result<(), LoggingError> {
        if self.lifecycle != Lifecycle::Idle {
            return Err(LoggingError::AlreadyInitialized);
        }

        let log_file = config.resolve_log_file(name);
        let file = match &log_file {
            Some(path) => SharedFile::create(path).map_err(|e| LoggingError::Sink(format!("{e:#}")))?,
            None => SharedFile::none(),
        };
        let buffer = LogBuffer::new(config.buffer_lines);
        let sink = TeeSink::new(self.echo_stderr, file.clone(), buffer.clone());

        Builder::from_env(Env::default().default_filter_or(config.level_filter().as_str()))
            .write_style(WriteStyle::Never)
            .target(Target::Pipe(Box::new(sink)))
            .try_init()
            .map_err(|e| LoggingError::Install(e.to_string()))?;

        // The logger above is process-wide, so the buffer is published once.
        let _ = LOG_BUFFER.set(buffer.clone());
        self.file = file;
        self.buffer = Some(buffer);
        self.lifecycle = Lifecycle::Active;

        match &log_file {
            Some(path) => log::info!("Logging initialized for {name} ({})", path.display()),
            None => log::info!("Logging initialized for {name}"),
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        if self.lifecycle != Lifecycle::Active {
            return;
        }
        log::info!("Shutting down logging");
        log::logger().flush();
        if let Err(e) = self.file.close() {
            eprintln!("[LOG] Failed to close log file: {e}");
        }
        self.lifecycle = Lifecycle::ShutDown;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_initialize_publishes_no_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            log_file: Some(dir.path().join("missing").join("app.log")),
            ..LoggingConfig::default()
        };
        let _ = LogService::new().without_stderr().initialize("app", &config);
        assert!(log_buffer().is_none());
    }

    #[test]
    fn shutdown_before_initialize_is_a_no_op() {
        let mut service = LogService::new();
        service.shutdown();
        assert!(!service.is_active());
        assert!(service.buffer().is_none());
    }

    #[test]
    fn bad_log_file_path_fails_before_installing_logger() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            log_file: Some(dir.path().join("missing").join("app.log")),
            ..LoggingConfig::default()
        };
        let mut service = LogService::new().without_stderr();

        let result = service.initialize("app", &config);
        assert!(matches!(result, Err(LoggingError::Sink(_))));
        assert!(!service.is_active());
    }
}
