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

//! The application entry contract.

use crate::build_info::BuildInfo;
use std::fmt;

/// The signature every application entry function must have.
///
/// It receives the normalized argument sequence by value and returns the
/// process exit status.
pub type EntryFn = fn(Args) -> i32;

/// The ordered, immutable sequence of command-line tokens.
///
/// Index 0 is, by convention, the path the program was invoked with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Args {
    tokens: Vec<String>,
}

impl Args {
    /// Wraps an already tokenized command line.
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// The number of tokens, including the program path.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the OS reported no tokens at all.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The invoked program path, if present.
    pub fn program(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    /// Returns the token at `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Iterates over every token in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Borrows the tokens as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    /// Consumes the sequence and returns the owned tokens.
    pub fn into_vec(self) -> Vec<String> {
        self.tokens
    }
}

impl From<Vec<String>> for Args {
    fn from(tokens: Vec<String>) -> Self {
        Self::new(tokens)
    }
}

impl IntoIterator for Args {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

/// Describes how the bootstrap sequence should hand control to the application.
///
/// Supplied once by the application and never modified afterward.
#[derive(Clone)]
pub struct EntryInfo {
    /// Display name, used for the log file and user-facing diagnostics.
    pub name: String,
    /// The function invoked once all bootstrap steps have succeeded.
    pub entry_point: EntryFn,
    /// When `true` the option service is never consulted; the application
    /// parses the whole command line itself.
    pub transparent_options: bool,
    /// Usage string for positional arguments, shown in help output.
    pub positional_usage: Option<String>,
    /// Names of positional options, in the order they appear.
    pub positional_options: Option<Vec<String>>,
    /// Where users should look when the hardware requirement is not met.
    pub support_url: Option<String>,
    /// Build metadata announced once logging is active.
    pub build_info: Option<BuildInfo>,
}

impl EntryInfo {
    /// Creates an entry contract with option parsing enabled and no
    /// positional options.
    pub fn new(name: impl Into<String>, entry_point: EntryFn) -> Self {
        Self {
            name: name.into(),
            entry_point,
            transparent_options: false,
            positional_usage: None,
            positional_options: None,
            support_url: None,
            build_info: None,
        }
    }

    /// Defers all option parsing to the application.
    pub fn with_transparent_options(mut self) -> Self {
        self.transparent_options = true;
        self
    }

    /// Declares the positional options and their usage line.
    pub fn with_positional(mut self, usage: impl Into<String>, options: &[&str]) -> Self {
        self.positional_usage = Some(usage.into());
        self.positional_options = Some(options.iter().map(|name| name.to_string()).collect());
        self
    }

    /// Sets the help URL quoted by fatal hardware diagnostics.
    pub fn with_support_url(mut self, url: impl Into<String>) -> Self {
        self.support_url = Some(url.into());
        self
    }

    /// Attaches the build metadata to announce in the log.
    pub fn with_build_info(mut self, build_info: BuildInfo) -> Self {
        self.build_info = Some(build_info);
        self
    }

    /// Invokes the application entry function.
    pub fn invoke(&self, args: Args) -> i32 {
        (self.entry_point)(args)
    }
}

impl fmt::Debug for EntryInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryInfo")
            .field("name", &self.name)
            .field("transparent_options", &self.transparent_options)
            .field("positional_usage", &self.positional_usage)
            .field("positional_options", &self.positional_options)
            .field("support_url", &self.support_url)
            .field("build_info", &self.build_info)
            .finish_non_exhaustive()
    }
}
