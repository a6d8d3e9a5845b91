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

//! The entry dispatcher: the single orchestration point of the bootstrap
//! sequence.
//!
//! Steps run strictly in order on the calling thread and are never retried.
//! Any failure before the application runs ends the sequence with a
//! non-zero status and the application is not invoked.

use crate::acquire::acquire_arguments;
use crate::console::attach_console;
use crate::gate::{check_capability, REQUIRED_FEATURE};
use crate::session::LoggingSession;
use crate::timer::negotiate;
use ignition_core::config::BootstrapConfig;
use ignition_core::console::{ConsoleAttachment, ConsoleStateCell};
use ignition_core::entry::EntryInfo;
use ignition_core::error::BootstrapError;
use ignition_core::logging::LoggingLifecycle;
use ignition_core::options::{LaunchOptionsCell, OptionService};
use ignition_core::platform::{CpuFeature, InteropStatus, Platform};
use ignition_core::utils::stopwatch::Stopwatch;
use std::time::Duration;

/// The states of the bootstrap sequence, in the order they are reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BootPhase {
    /// Nothing has happened yet.
    Start,
    /// The command line was split and the options extracted.
    ArgumentsAcquired,
    /// The console controller ran (only when enabled).
    ConsoleAttached,
    /// The interop subsystem initialization was attempted.
    InteropReady,
    /// The mandatory CPU feature is present.
    CapabilityChecked,
    /// The logger is installed.
    LoggingActive,
    /// The timer negotiator ran.
    TimerNegotiated,
    /// The application entry function is running.
    ApplicationRunning,
    /// The logger was shut down.
    LoggingShutdown,
    /// The sequence completed normally.
    Done,
    /// The sequence stopped before the application ran.
    AbortedEarly,
}

/// The phases a dispatch went through, with the time spent reaching each.
#[derive(Debug, Clone, Default)]
pub struct BootReport {
    phases: Vec<(BootPhase, Duration)>,
}

impl BootReport {
    fn enter(&mut self, phase: BootPhase, stopwatch: &mut Stopwatch) {
        log::trace!("Boot phase {phase:?}");
        self.phases.push((phase, stopwatch.lap()));
    }

    /// The phases in the order they were reached.
    pub fn phases(&self) -> Vec<BootPhase> {
        self.phases.iter().map(|(phase, _)| *phase).collect()
    }

    /// Returns `true` if `phase` was reached.
    pub fn reached(&self, phase: BootPhase) -> bool {
        self.phases.iter().any(|(reached, _)| *reached == phase)
    }

    /// The time between the previous phase and `phase`.
    pub fn time_to(&self, phase: BootPhase) -> Option<Duration> {
        self.phases
            .iter()
            .find(|(reached, _)| *reached == phase)
            .map(|(_, duration)| *duration)
    }

    /// The terminal phase, if the dispatch has finished.
    pub fn outcome(&self) -> Option<BootPhase> {
        self.phases
            .last()
            .map(|(phase, _)| *phase)
            .filter(|phase| matches!(phase, BootPhase::Done | BootPhase::AbortedEarly))
    }
}

/// Runs the bootstrap sequence against a platform and a logging backend.
pub struct Dispatcher<'a, P, L>
where
    P: Platform + ?Sized,
    L: LoggingLifecycle + ?Sized,
{
    platform: &'a mut P,
    logging: &'a mut L,
    options: &'a dyn OptionService,
    console_state: &'a ConsoleStateCell,
    launch_options: &'a LaunchOptionsCell,
    config: BootstrapConfig,
    required_feature: CpuFeature,
    report: BootReport,
}

impl<'a, P, L> Dispatcher<'a, P, L>
where
    P: Platform + ?Sized,
    L: LoggingLifecycle + ?Sized,
{
    /// Creates a dispatcher with the default configuration.
    ///
    /// `console_state` receives the console decision and `launch_options`
    /// the parsed launch options; the OS shims pass the process-wide cells.
    pub fn new(
        platform: &'a mut P,
        logging: &'a mut L,
        options: &'a dyn OptionService,
        console_state: &'a ConsoleStateCell,
        launch_options: &'a LaunchOptionsCell,
    ) -> Self {
        Self {
            platform,
            logging,
            options,
            console_state,
            launch_options,
            config: BootstrapConfig::default(),
            required_feature: REQUIRED_FEATURE,
            report: BootReport::default(),
        }
    }

    /// Replaces the configuration that launch flags are applied on top of.
    pub fn with_config(mut self, config: BootstrapConfig) -> Self {
        self.config = config;
        self
    }

    /// Changes the CPU feature the capability gate requires.
    pub fn with_required_feature(mut self, feature: CpuFeature) -> Self {
        self.required_feature = feature;
        self
    }

    /// The phases reached by the last dispatch.
    pub fn report(&self) -> &BootReport {
        &self.report
    }

    /// Runs the whole sequence and returns the process exit status.
    ///
    /// The application's status is returned unchanged. Bootstrap failures
    /// map to their own statuses (see `ignition_core::exit`).
    pub fn dispatch(&mut self, entry: &EntryInfo) -> i32 {
        let mut report = BootReport::default();
        let mut stopwatch = Stopwatch::start();
        report.enter(BootPhase::Start, &mut stopwatch);

        let status = match self.run_sequence(entry, &mut report, &mut stopwatch) {
            Ok(status) => {
                report.enter(BootPhase::Done, &mut stopwatch);
                status
            }
            Err(error) => {
                report_abort(&error);
                report.enter(BootPhase::AbortedEarly, &mut stopwatch);
                error.exit_code()
            }
        };
        self.report = report;
        status
    }

    fn run_sequence(
        &mut self,
        entry: &EntryInfo,
        report: &mut BootReport,
        stopwatch: &mut Stopwatch,
    ) -> Result<i32, BootstrapError> {
        let acquired = acquire_arguments(&*self.platform, self.options, entry, &self.config)?;
        let config = acquired.config;
        self.launch_options
            .seal(acquired.launch)
            .map_err(|_| BootstrapError::LaunchOptionsAlreadySealed)?;
        report.enter(BootPhase::ArgumentsAcquired, stopwatch);

        let console = if config.enable_console {
            let console = attach_console(&mut *self.platform);
            report.enter(BootPhase::ConsoleAttached, stopwatch);
            console
        } else {
            ConsoleAttachment::default()
        };
        self.console_state
            .seal(console)
            .map_err(BootstrapError::ConsoleAlreadyDecided)?;

        let interop = self.platform.initialize_interop();
        report.enter(BootPhase::InteropReady, stopwatch);

        check_capability(&*self.platform, entry, self.required_feature, console)?;
        report.enter(BootPhase::CapabilityChecked, stopwatch);

        let session = match LoggingSession::start(&mut *self.logging, &entry.name, &config.logging) {
            Ok(session) => {
                report.enter(BootPhase::LoggingActive, stopwatch);
                Some(session)
            }
            Err(e) => {
                eprintln!("[BOOT] {e}; continuing without logging");
                None
            }
        };

        if let Some(build_info) = &entry.build_info {
            log::info!("{}", build_info.log_line());
        }
        match interop {
            InteropStatus::Initialized => log::debug!("COM initialized (multithreaded)"),
            InteropStatus::AlreadyInitialized => log::debug!("COM was already initialized"),
            InteropStatus::Failed(code) => {
                log::warn!("COM initialization failed (0x{code:08X}); continuing")
            }
        }

        let timer = negotiate(self.platform.timer_resolution(), config.win32_high_freq);
        log::debug!("{timer}");
        report.enter(BootPhase::TimerNegotiated, stopwatch);

        log::info!(
            "Bootstrap of {} completed in {} ms (console {})",
            entry.name,
            stopwatch.elapsed_ms(),
            if console.is_attached() { "attached" } else { "detached" }
        );
        report.enter(BootPhase::ApplicationRunning, stopwatch);
        let status = entry.invoke(acquired.args);
        log::info!("{} exited with status {status}", entry.name);

        if let Some(session) = session {
            session.finish();
            report.enter(BootPhase::LoggingShutdown, stopwatch);
        }
        Ok(status)
    }
}

/// Tells the user why bootstrap stopped, where that is not already done.
fn report_abort(error: &BootstrapError) {
    match error {
        // Too early for any output channel.
        BootstrapError::CommandLine { .. } => {}
        BootstrapError::Options(options) if options.is_informational() => print!("{options}"),
        BootstrapError::Options(options) => eprintln!("{options}"),
        BootstrapError::ConsoleAlreadyDecided(_) | BootstrapError::LaunchOptionsAlreadySealed => {
            eprintln!("[BOOT] {error}")
        }
        // The capability gate delivered its own diagnostic.
        BootstrapError::CapabilityMissing { .. } => {}
    }
}
