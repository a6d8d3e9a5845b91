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

use ignition_core::config::LoggingConfig;
use ignition_core::logging::{LoggingError, LoggingLifecycle};
use ignition_telemetry::{log_buffer, LogService};

// The global logger can only be installed once per process, so the whole
// lifecycle is exercised by a single test in its own test binary.
#[test]
fn test_log_service_full_lifecycle() {
    // --- 1. ARRANGE ---
    let dir = tempfile::tempdir().expect("temp dir");
    let log_path = dir.path().join("lifecycle.log");
    let config = LoggingConfig {
        level: "info".to_string(),
        log_file: Some(log_path.clone()),
        log_to_file: true,
        buffer_lines: 16,
    };
    let mut service = LogService::new().without_stderr();

    assert!(log_buffer().is_none(), "Nothing is published before initialize");

    // --- 2. ACT ---
    service
        .initialize("lifecycle", &config)
        .expect("first initialize succeeds");
    log::warn!("application says hello");

    let second = service.initialize("lifecycle", &config);
    service.shutdown();
    log::warn!("written after shutdown");
    service.shutdown();

    // --- 3. ASSERT ---
    assert!(
        matches!(second, Err(LoggingError::AlreadyInitialized)),
        "A second initialize must be rejected"
    );
    assert!(!service.is_active(), "Service should be shut down");

    let buffer = service.buffer().expect("buffer exists after initialize");
    let lines = buffer.snapshot();
    assert!(
        lines.iter().any(|line| line.contains("application says hello")),
        "Buffer should hold the application line, got {lines:?}"
    );

    let published = log_buffer().expect("buffer is published process-wide");
    assert_eq!(
        published.snapshot(),
        lines,
        "The published handle shares the service's buffer"
    );

    let contents = std::fs::read_to_string(&log_path).expect("log file readable");
    assert!(contents.contains("application says hello"));
    assert!(
        !contents.contains("written after shutdown"),
        "The file is closed by shutdown"
    );
}
