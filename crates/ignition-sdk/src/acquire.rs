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

//! Argument acquisition: the first step of the bootstrap sequence.

use ignition_core::config::BootstrapConfig;
use ignition_core::entry::{Args, EntryInfo};
use ignition_core::error::BootstrapError;
use ignition_core::options::{LaunchOptions, OptionService, OptionsError};
use ignition_core::platform::CommandLineSource;

/// The normalized command line and the configuration it selects.
#[derive(Debug, Clone, PartialEq)]
pub struct Acquired {
    /// Every OS token, in order, for the application.
    pub args: Args,
    /// Defaults, then the config file, then launch flag overrides.
    pub config: BootstrapConfig,
    /// What the option service extracted; empty for transparent options.
    pub launch: LaunchOptions,
}

/// Splits the command line and, unless the application parses its own
/// options, extracts the bootstrap flags from it.
///
/// The returned [`Args`] always hold the complete token sequence.
pub fn acquire_arguments<S>(
    source: &S,
    options: &dyn OptionService,
    entry: &EntryInfo,
    base: &BootstrapConfig,
) -> Result<Acquired, BootstrapError>
where
    S: CommandLineSource + ?Sized,
{
    let args = Args::new(source.command_line()?);
    if entry.transparent_options {
        return Ok(Acquired {
            args,
            config: base.clone(),
            launch: LaunchOptions::default(),
        });
    }

    let launch = options.parse(&args, entry)?;
    let mut config = match &launch.config_path {
        Some(path) => BootstrapConfig::load(path)
            .map_err(|e| OptionsError::Invalid(format!("{e:#}")))?,
        None => base.clone(),
    };
    config.apply(&launch);
    Ok(Acquired {
        args,
        config,
        launch,
    })
}
