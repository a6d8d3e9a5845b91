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

//! Launch option service built on `clap`.
//!
//! Only the globally recognized bootstrap flags, `--help`, `--version` and
//! the entry contract's positional options are handed to `clap`. Every other
//! token belongs to the application and is skipped here.

use clap::builder::{ArgAction, PossibleValuesParser};
use clap::error::ErrorKind;
use clap::{value_parser, Arg, ArgMatches, Command};
use ignition_core::entry::{Args, EntryInfo};
use ignition_core::options::{LaunchOptions, OptionService, OptionsError};
use std::path::PathBuf;

const HIGH_FREQ: &str = "win32_high_freq";
const ENABLE_CONSOLE: &str = "enable_console";
const CONFIG: &str = "config";

/// Parses the bootstrap flags with `clap`.
#[derive(Debug, Clone, Default)]
pub struct ClapOptionService {
    version: Option<String>,
}

impl ClapOptionService {
    /// Creates a service without a `--version` flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables `--version`, printing `version`.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Builds the `clap` command describing every recognized option.
    pub fn command(&self, entry: &EntryInfo) -> Command {
        let mut command = Command::new(entry.name.clone())
            // A repeated flag keeps its last value.
            .args_override_self(true)
            .arg(bool_flag(HIGH_FREQ, "Requests high performance from the NT kernel"))
            .arg(bool_flag(
                ENABLE_CONSOLE,
                "Open a console window with the main window",
            ))
            .arg(
                Arg::new(CONFIG)
                    .long(CONFIG)
                    .value_name("PATH")
                    .value_parser(value_parser!(PathBuf))
                    .help("Bootstrap configuration file (TOML)"),
            );

        command = match &self.version {
            Some(version) => command.version(version.clone()),
            None => command.disable_version_flag(true),
        };

        if let Some(usage) = &entry.positional_usage {
            command = command.override_usage(format!("{} [OPTIONS] {usage}", entry.name));
        }
        for (index, name) in positional_names(entry).iter().enumerate() {
            command = command.arg(
                Arg::new(name.clone())
                    .index(index + 1)
                    .required(false)
                    .action(ArgAction::Set),
            );
        }
        command
    }

    /// Selects the tokens `command` recognizes, keeping their order.
    ///
    /// Token 0 (the program path) is always kept. Flag values given as a
    /// separate token stay attached to their flag. Bare tokens fill the
    /// positional slots in order; once they are full, or after `--`, the
    /// remaining tokens belong to the application.
    fn recognized_tokens(command: &Command, args: &Args, program: &str) -> Vec<String> {
        let positional_slots = command.get_positionals().count();
        let mut recognized = vec![args.program().unwrap_or(program).to_string()];
        let mut positionals = 0;
        let mut tokens = args.iter().skip(1);

        while let Some(token) = tokens.next() {
            if token == "--" {
                break;
            }
            if let Some(long) = token.strip_prefix("--") {
                let (name, inline_value) = match long.split_once('=') {
                    Some((name, _)) => (name, true),
                    None => (long, false),
                };
                match classify_long(command, name) {
                    LongFlag::Unknown => log::trace!("Leaving '{token}' to the application"),
                    LongFlag::Switch => recognized.push(token.to_string()),
                    LongFlag::WithValue => {
                        recognized.push(token.to_string());
                        if !inline_value {
                            recognized.extend(tokens.next().map(str::to_string));
                        }
                    }
                }
                continue;
            }
            if let Some(short) = token.strip_prefix('-').filter(|s| !s.is_empty()) {
                if is_builtin_short(command, short) {
                    recognized.push(token.to_string());
                }
                continue;
            }
            if positionals < positional_slots {
                recognized.push(token.to_string());
                positionals += 1;
            }
        }
        recognized
    }
}

/// A boolean cvar-style flag: `--name` means true, `--name=false` disables.
fn bool_flag(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .num_args(0..=1)
        .require_equals(true)
        .default_missing_value("true")
        .value_parser(PossibleValuesParser::new(["true", "false", "1", "0"]))
        .help(help)
}

fn positional_names(entry: &EntryInfo) -> Vec<String> {
    entry.positional_options.clone().unwrap_or_default()
}

/// How a `--name` token is treated.
enum LongFlag {
    /// Not ours; the token belongs to the application.
    Unknown,
    /// Recognized, with no value or an inline `=value`.
    Switch,
    /// Recognized and may take the following token as its value.
    WithValue,
}

fn classify_long(command: &Command, name: &str) -> LongFlag {
    // Built-in flags are only materialized when `clap` builds the command.
    if name == "help" || (name == "version" && command.get_version().is_some()) {
        return LongFlag::Switch;
    }
    match command.get_arguments().find(|arg| arg.get_long() == Some(name)) {
        Some(arg) if !arg.is_require_equals_set() && arg.get_action().takes_values() => {
            LongFlag::WithValue
        }
        Some(_) => LongFlag::Switch,
        None => LongFlag::Unknown,
    }
}

fn is_builtin_short(command: &Command, short: &str) -> bool {
    short == "h" || (short == "V" && command.get_version().is_some())
}

fn parse_bool(matches: &ArgMatches, name: &str) -> Option<bool> {
    matches
        .get_one::<String>(name)
        .map(|value| value == "true" || value == "1")
}

impl OptionService for ClapOptionService {
    fn parse(&self, args: &Args, entry: &EntryInfo) -> Result<LaunchOptions, OptionsError> {
        let command = self.command(entry);
        let tokens = Self::recognized_tokens(&command, args, &entry.name);

        let matches = command.try_get_matches_from(tokens).map_err(|error| {
            let text = error.render().to_string();
            match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    OptionsError::Help(text)
                }
                ErrorKind::DisplayVersion => OptionsError::Version(text),
                _ => OptionsError::Invalid(text.trim_end().to_string()),
            }
        })?;

        let positional = positional_names(entry)
            .into_iter()
            .filter_map(|name| {
                let value = matches.get_one::<String>(&name).cloned()?;
                Some((name, value))
            })
            .collect();

        Ok(LaunchOptions {
            win32_high_freq: parse_bool(&matches, HIGH_FREQ),
            enable_console: parse_bool(&matches, ENABLE_CONSOLE),
            config_path: matches.get_one::<PathBuf>(CONFIG).cloned(),
            positional,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> EntryInfo {
        EntryInfo::new("demo", |_| 0).with_positional("[target]", &["target"])
    }

    fn args(tokens: &[&str]) -> Args {
        Args::from(tokens.iter().map(|t| t.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn no_flags_leave_every_override_unset() {
        let options = ClapOptionService::new()
            .parse(&args(&["demo.exe"]), &entry())
            .expect("parses");
        assert_eq!(options, LaunchOptions::default());
    }

    #[test]
    fn bare_bool_flag_means_true() {
        let options = ClapOptionService::new()
            .parse(&args(&["demo.exe", "--enable_console"]), &entry())
            .expect("parses");
        assert_eq!(options.enable_console, Some(true));
        assert_eq!(options.win32_high_freq, None);
    }

    #[test]
    fn bool_flag_accepts_explicit_value() {
        let options = ClapOptionService::new()
            .parse(&args(&["demo.exe", "--win32_high_freq=false"]), &entry())
            .expect("parses");
        assert_eq!(options.win32_high_freq, Some(false));
    }

    #[test]
    fn unknown_flags_are_left_to_the_application() {
        let options = ClapOptionService::new()
            .parse(
                &args(&["demo.exe", "--flag", "--enable_console=1", "game.iso"]),
                &entry(),
            )
            .expect("parses");
        assert_eq!(options.enable_console, Some(true));
        assert_eq!(options.positional.get("target").map(String::as_str), Some("game.iso"));
    }

    #[test]
    fn config_takes_separate_value() {
        let options = ClapOptionService::new()
            .parse(&args(&["demo.exe", "--config", "boot.toml"]), &entry())
            .expect("parses");
        assert_eq!(options.config_path, Some(PathBuf::from("boot.toml")));
        assert!(options.positional.is_empty());
    }

    #[test]
    fn invalid_bool_value_is_rejected() {
        let result =
            ClapOptionService::new().parse(&args(&["demo.exe", "--enable_console=maybe"]), &entry());
        assert!(matches!(result, Err(OptionsError::Invalid(_))));
    }

    #[test]
    fn help_is_informational() {
        let result = ClapOptionService::new().parse(&args(&["demo.exe", "--help"]), &entry());
        match result {
            Err(OptionsError::Help(text)) => assert!(text.contains("enable_console")),
            other => panic!("expected help, got {other:?}"),
        }
    }

    #[test]
    fn version_flag_only_exists_when_configured() {
        let service = ClapOptionService::new().with_version("1.2.3");
        let result = service.parse(&args(&["demo.exe", "--version"]), &entry());
        assert!(matches!(result, Err(OptionsError::Version(text)) if text.contains("1.2.3")));

        let options = ClapOptionService::new()
            .parse(&args(&["demo.exe", "--version"]), &entry())
            .expect("unknown flag is skipped");
        assert_eq!(options, LaunchOptions::default());
    }

    #[test]
    fn repeated_flag_keeps_the_last_value() {
        let options = ClapOptionService::new()
            .parse(
                &args(&["demo.exe", "--enable_console", "--enable_console=false"]),
                &entry(),
            )
            .expect("repeated flags are not an error");
        assert_eq!(options.enable_console, Some(false));
    }

    #[test]
    fn flag_values_never_fill_positional_slots() {
        let options = ClapOptionService::new()
            .parse(
                &args(&["demo.exe", "--config", "boot.toml", "level2"]),
                &entry(),
            )
            .expect("parses");
        assert_eq!(options.config_path, Some(PathBuf::from("boot.toml")));
        assert_eq!(options.positional("target"), Some("level2"));
    }

    #[test]
    fn tokens_after_double_dash_are_not_parsed() {
        let options = ClapOptionService::new()
            .parse(&args(&["demo.exe", "--", "--enable_console"]), &entry())
            .expect("parses");
        assert_eq!(options.enable_console, None);
    }
}
