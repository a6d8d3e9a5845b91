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


//! Monotonic timing for measuring bootstrap phases.

use std::time::{Duration, Instant};

/// Measures total elapsed time and the time between successive laps.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    start_time: Instant,
    last_lap: Instant,
}

impl Stopwatch {
    /// Creates a new Stopwatch that starts immediately.
    /// ## Returns
    /// A running stopwatch whose first lap begins now.
    #[inline]
    pub fn start() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_lap: now,
        }
    }

    /// Returns the time elapsed since the stopwatch was started.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Returns the elapsed time in milliseconds.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    /// Closes the current lap and starts the next one.
    /// ## Returns
    /// The duration of the lap that just ended.
    #[inline]
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let lap = now.duration_since(self.last_lap);
        self.last_lap = now;
        lap
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    const SLEEP_DURATION_MS: u64 = 20;

    /// A freshly started stopwatch reports a near-zero elapsed time.
    #[test]
    fn stopwatch_starts_near_zero() {
        let watch = Stopwatch::start();
        assert!(
            watch.elapsed() < Duration::from_millis(SLEEP_DURATION_MS),
            "Initial elapsed duration should be very small"
        );
    }

    /// Laps partition the total elapsed time.
    #[test]
    fn laps_never_exceed_total() {
        let mut watch = Stopwatch::start();
        thread::sleep(Duration::from_millis(SLEEP_DURATION_MS));
        let first = watch.lap();
        let second = watch.lap();

        assert!(
            first >= Duration::from_millis(SLEEP_DURATION_MS),
            "First lap ({first:?}) should include the sleep"
        );
        assert!(second < first, "Second lap ({second:?}) should be shorter");
        assert!(first + second <= watch.elapsed());
        assert!(watch.elapsed_ms() >= SLEEP_DURATION_MS);
    }
}
