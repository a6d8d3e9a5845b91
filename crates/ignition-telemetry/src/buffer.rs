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

//! Bounded in-process buffer of recent log lines.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Keeps the most recent log lines in memory.
///
/// Cloning yields another handle to the same buffer, so the sink can push
/// while the application takes snapshots.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    lines: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl LogBuffer {
    /// Creates a buffer that keeps at most `capacity` lines.
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// The maximum number of lines kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends a line, evicting the oldest one when full.
    pub fn push_line(&self, line: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        if let Ok(mut lines) = self.lines.lock() {
            if lines.len() == self.capacity {
                lines.pop_front();
            }
            lines.push_back(line.into());
        }
    }

    /// The number of lines currently held.
    pub fn len(&self) -> usize {
        self.lines.lock().map(|lines| lines.len()).unwrap_or(0)
    }

    /// Returns `true` if no line has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies the held lines, oldest first.
    pub fn snapshot(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_most_recent_lines() {
        let buffer = LogBuffer::new(2);
        buffer.push_line("one");
        buffer.push_line("two");
        buffer.push_line("three");

        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.snapshot(), ["two", "three"]);
    }

    #[test]
    fn clones_share_storage() {
        let buffer = LogBuffer::new(4);
        let writer = buffer.clone();
        writer.push_line("from sink");

        assert_eq!(buffer.snapshot(), ["from sink"]);
    }

    #[test]
    fn zero_capacity_records_nothing() {
        let buffer = LogBuffer::new(0);
        buffer.push_line("dropped");
        assert!(buffer.is_empty());
    }
}
