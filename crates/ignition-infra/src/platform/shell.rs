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

//! Detection of launches from an interactive shell.

use std::ffi::OsStr;

/// The variable shells such as bash or MSYS export and plain launchers do not.
pub const SHELL_VARIABLE: &str = "SHELL";

/// Returns `true` if the process environment carries a non-empty `SHELL`.
pub fn has_shell_environment_variable() -> bool {
    is_shell_value(std::env::var_os(SHELL_VARIABLE).as_deref())
}

/// Decides whether a `SHELL` value counts as evidence of a shell launch.
pub fn is_shell_value(value: Option<&OsStr>) -> bool {
    value.is_some_and(|value| !value.is_empty())
}
