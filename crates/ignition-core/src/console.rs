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

//! Process-wide console attachment state.
//!
//! The state is decided once during bootstrap and sealed into a
//! [`ConsoleStateCell`]. Everything that runs afterward only reads it.

use std::sync::OnceLock;

/// Whether standard output currently reaches an interactive console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleAttachment {
    /// Output is interactive. This is also the optimistic default used
    /// before (or without) a console decision.
    #[default]
    Attached,
    /// The process was not launched from an interactive shell.
    Detached,
}

impl ConsoleAttachment {
    /// Returns `true` for [`ConsoleAttachment::Attached`].
    pub fn is_attached(self) -> bool {
        matches!(self, ConsoleAttachment::Attached)
    }
}

/// A write-once holder for the console attachment decision.
#[derive(Debug, Default)]
pub struct ConsoleStateCell {
    state: OnceLock<ConsoleAttachment>,
}

impl ConsoleStateCell {
    /// Creates an unsealed cell.
    pub const fn new() -> Self {
        Self {
            state: OnceLock::new(),
        }
    }

    /// Seals the cell with `state`.
    ///
    /// Returns the already sealed value as the error if a decision was made
    /// before.
    pub fn seal(&self, state: ConsoleAttachment) -> Result<(), ConsoleAttachment> {
        self.state.set(state).map_err(|_| self.get())
    }

    /// The sealed value, or the optimistic default if nothing was sealed yet.
    pub fn get(&self) -> ConsoleAttachment {
        self.state.get().copied().unwrap_or_default()
    }

    /// Returns `true` once a decision has been sealed.
    pub fn is_sealed(&self) -> bool {
        self.state.get().is_some()
    }
}

/// The cell the OS entry shims seal for the running process.
pub static CONSOLE_STATE: ConsoleStateCell = ConsoleStateCell::new();

/// Whether the running process has an interactive console attached.
pub fn has_console_attached() -> bool {
    CONSOLE_STATE.get().is_attached()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsealed_cell_reports_optimistic_default() {
        let cell = ConsoleStateCell::new();
        assert!(!cell.is_sealed());
        assert_eq!(cell.get(), ConsoleAttachment::Attached);
    }

    #[test]
    fn cell_can_only_be_sealed_once() {
        let cell = ConsoleStateCell::new();
        assert!(cell.seal(ConsoleAttachment::Detached).is_ok());
        assert_eq!(
            cell.seal(ConsoleAttachment::Attached),
            Err(ConsoleAttachment::Detached)
        );
        assert_eq!(cell.get(), ConsoleAttachment::Detached);
        assert!(!cell.get().is_attached());
    }
}
