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

//! RAII bracket around the logging lifecycle.

use ignition_core::config::LoggingConfig;
use ignition_core::logging::{LoggingError, LoggingLifecycle};

/// Shuts logging down when finished or dropped, whichever comes first.
///
/// This guarantees teardown on every path once logging has started,
/// including early returns and panics in the application.
pub struct LoggingSession<'a, L: LoggingLifecycle + ?Sized> {
    logging: Option<&'a mut L>,
}

impl<'a, L: LoggingLifecycle + ?Sized> LoggingSession<'a, L> {
    /// Initializes logging for application `name`.
    pub fn start(
        logging: &'a mut L,
        name: &str,
        config: &LoggingConfig,
    ) -> Result<Self, LoggingError> {
        logging.initialize(name, config)?;
        Ok(Self {
            logging: Some(logging),
        })
    }

    /// Shuts logging down now.
    pub fn finish(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(logging) = self.logging.take() {
            logging.shutdown();
        }
    }
}

impl<L: LoggingLifecycle + ?Sized> Drop for LoggingSession<'_, L> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
