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

//! Spy doubles for the platform and the logging backend.

#![allow(dead_code)]

use ignition_core::config::LoggingConfig;
use ignition_core::console::ConsoleAttachment;
use ignition_core::entry::Args;
use ignition_core::error::BootstrapError;
use ignition_core::logging::{LoggingError, LoggingLifecycle};
use ignition_core::platform::{
    CommandLineSource, ConsoleHost, CpuFeature, CpuProbe, FatalReporter, InteropHost,
    InteropStatus, Platform, TimerRange, TimerResolution,
};
use std::cell::{Cell, RefCell};

// --- Timer ---

pub struct SpyTimer {
    pub range: Option<TimerRange>,
    pub refuse_request: bool,
    pub queries: Cell<usize>,
    pub requests: RefCell<Vec<u32>>,
}

impl SpyTimer {
    pub fn with_range(minimum: u32, maximum: u32, current: u32) -> Self {
        Self {
            range: Some(TimerRange {
                minimum,
                maximum,
                current,
            }),
            refuse_request: false,
            queries: Cell::new(0),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.queries.get() + self.requests.borrow().len()
    }
}

impl TimerResolution for SpyTimer {
    fn query(&self) -> Option<TimerRange> {
        self.queries.set(self.queries.get() + 1);
        self.range
    }

    fn request(&self, desired: u32) -> Option<u32> {
        self.requests.borrow_mut().push(desired);
        if self.refuse_request {
            None
        } else {
            Some(desired)
        }
    }
}

// --- Platform ---

pub struct SpyPlatform {
    pub tokens: Result<Vec<String>, BootstrapError>,
    pub parent_console: bool,
    pub shell: bool,
    pub features: Vec<CpuFeature>,
    pub interop: InteropStatus,
    pub timer: Option<SpyTimer>,

    pub attach_calls: usize,
    pub allocations: usize,
    pub redirects: usize,
    pub interop_calls: usize,
    pub feature_checks: Cell<usize>,
    pub fatal_reports: RefCell<Vec<(String, ConsoleAttachment)>>,
}

impl SpyPlatform {
    /// A capable machine launched with `tokens`.
    pub fn with_tokens(tokens: &[&str]) -> Self {
        Self {
            tokens: Ok(tokens.iter().map(|t| t.to_string()).collect()),
            parent_console: false,
            shell: false,
            features: vec![CpuFeature::Avx, CpuFeature::Avx2, CpuFeature::Sse42],
            interop: InteropStatus::Initialized,
            timer: Some(SpyTimer::with_range(156_250, 5_000, 156_250)),
            attach_calls: 0,
            allocations: 0,
            redirects: 0,
            interop_calls: 0,
            feature_checks: Cell::new(0),
            fatal_reports: RefCell::new(Vec::new()),
        }
    }

    pub fn without_features(mut self) -> Self {
        self.features.clear();
        self
    }

    pub fn launched_from_shell(mut self) -> Self {
        self.parent_console = true;
        self.shell = true;
        self
    }
}

impl CommandLineSource for SpyPlatform {
    fn command_line(&self) -> Result<Vec<String>, BootstrapError> {
        self.tokens.clone()
    }
}

impl ConsoleHost for SpyPlatform {
    fn attach_parent_console(&mut self) -> bool {
        self.attach_calls += 1;
        self.parent_console
    }

    fn has_shell_environment(&self) -> bool {
        self.shell
    }

    fn allocate_console(&mut self) -> bool {
        self.allocations += 1;
        true
    }

    fn redirect_standard_streams(&mut self) -> std::io::Result<()> {
        self.redirects += 1;
        Ok(())
    }
}

impl InteropHost for SpyPlatform {
    fn initialize_interop(&mut self) -> InteropStatus {
        self.interop_calls += 1;
        self.interop
    }
}

impl CpuProbe for SpyPlatform {
    fn has_feature(&self, feature: CpuFeature) -> bool {
        self.feature_checks.set(self.feature_checks.get() + 1);
        self.features.contains(&feature)
    }
}

impl FatalReporter for SpyPlatform {
    fn report_fatal(&self, message: &str, console: ConsoleAttachment) {
        self.fatal_reports
            .borrow_mut()
            .push((message.to_string(), console));
    }
}

impl Platform for SpyPlatform {
    fn timer_resolution(&self) -> Option<&dyn TimerResolution> {
        self.timer.as_ref().map(|timer| timer as &dyn TimerResolution)
    }
}

// --- Logging ---

#[derive(Default)]
pub struct SpyLogging {
    pub fail_initialize: bool,
    pub initialized_for: Vec<String>,
    pub shutdowns: usize,
}

impl SpyLogging {
    pub fn failing() -> Self {
        Self {
            fail_initialize: true,
            ..Self::default()
        }
    }

    pub fn initializations(&self) -> usize {
        self.initialized_for.len()
    }
}

impl LoggingLifecycle for SpyLogging {
    fn initialize(&mut self, name: &str, _config: &LoggingConfig) -> Result<(), LoggingError> {
        if self.fail_initialize {
            return Err(LoggingError::Sink("spy refuses".to_string()));
        }
        self.initialized_for.push(name.to_string());
        Ok(())
    }

    fn shutdown(&mut self) {
        self.shutdowns += 1;
    }
}

// --- Entry functions ---

thread_local! {
    static RECEIVED: RefCell<Option<Args>> = const { RefCell::new(None) };
}

/// Records its arguments for [`received_args`] and succeeds.
pub fn recording_entry(args: Args) -> i32 {
    RECEIVED.with(|received| *received.borrow_mut() = Some(args));
    0
}

/// The arguments the last [`recording_entry`] call on this thread received.
pub fn received_args() -> Option<Args> {
    RECEIVED.with(|received| received.borrow_mut().take())
}
