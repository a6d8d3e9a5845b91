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

//! The writer `env_logger` pipes formatted records into.

use crate::buffer::LogBuffer;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// A log file shared between the sink and the service that closes it.
#[derive(Debug, Clone, Default)]
pub struct SharedFile {
    inner: Arc<Mutex<Option<BufWriter<File>>>>,
}

impl SharedFile {
    /// A handle with no file behind it; writes are discarded.
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates (or truncates) the file at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file '{}'", path.display()))?;
        Ok(Self {
            inner: Arc::new(Mutex::new(Some(BufWriter::new(file)))),
        })
    }

    /// Returns `true` while a file is open.
    pub fn is_open(&self) -> bool {
        self.inner.lock().map(|file| file.is_some()).unwrap_or(false)
    }

    fn write_all(&self, buf: &[u8]) -> io::Result<()> {
        match self.inner.lock() {
            Ok(mut file) => match file.as_mut() {
                Some(writer) => writer.write_all(buf),
                None => Ok(()),
            },
            Err(_) => Err(io::Error::other("log file lock poisoned")),
        }
    }

    /// Flushes buffered bytes to disk.
    pub fn flush(&self) -> io::Result<()> {
        match self.inner.lock() {
            Ok(mut file) => match file.as_mut() {
                Some(writer) => writer.flush(),
                None => Ok(()),
            },
            Err(_) => Err(io::Error::other("log file lock poisoned")),
        }
    }

    /// Flushes and closes the file. Later writes are discarded.
    pub fn close(&self) -> io::Result<()> {
        let writer = match self.inner.lock() {
            Ok(mut file) => file.take(),
            Err(_) => None,
        };
        match writer {
            Some(mut writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

/// Copies every formatted record to stderr, the log file and the buffer.
#[derive(Debug)]
pub struct TeeSink {
    echo_stderr: bool,
    file: SharedFile,
    buffer: LogBuffer,
    pending: Vec<u8>,
}

impl TeeSink {
    /// Creates a sink over the given destinations.
    pub fn new(echo_stderr: bool, file: SharedFile, buffer: LogBuffer) -> Self {
        Self {
            echo_stderr,
            file,
            buffer,
            pending: Vec::new(),
        }
    }

    fn collect_lines(&mut self, buf: &[u8]) {
        self.pending.extend_from_slice(buf);
        while let Some(end) = self.pending.iter().position(|&byte| byte == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=end).collect();
            let text = String::from_utf8_lossy(&line);
            self.buffer.push_line(text.trim_end_matches(['\r', '\n']));
        }
    }
}

impl Write for TeeSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.collect_lines(buf);
        self.file.write_all(buf)?;
        // Windowed processes may have no stderr at all.
        if self.echo_stderr {
            let _ = io::stderr().write_all(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.echo_stderr {
            let _ = io::stderr().flush();
        }
        self.file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_records_into_buffer_lines() {
        let buffer = LogBuffer::new(8);
        let mut sink = TeeSink::new(false, SharedFile::none(), buffer.clone());

        sink.write_all(b"[INFO] first\r\n[WARN] sec").unwrap();
        assert_eq!(buffer.snapshot(), ["[INFO] first"]);

        sink.write_all(b"ond\n").unwrap();
        assert_eq!(buffer.snapshot(), ["[INFO] first", "[WARN] second"]);
    }

    #[test]
    fn writes_reach_the_file_until_closed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sink.log");
        let file = SharedFile::create(&path).unwrap();
        let mut sink = TeeSink::new(false, file.clone(), LogBuffer::new(4));

        sink.write_all(b"kept\n").unwrap();
        sink.flush().unwrap();
        file.close().unwrap();
        assert!(!file.is_open());

        sink.write_all(b"discarded\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "kept\n");
    }

    #[test]
    fn poisoned_file_lock_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = SharedFile::create(&dir.path().join("poisoned.log")).unwrap();
        let held = file.clone();
        let _ = std::thread::spawn(move || {
            let _guard = held.inner.lock().unwrap();
            panic!("poison the log file lock");
        })
        .join();

        let mut sink = TeeSink::new(false, file.clone(), LogBuffer::new(4));
        let error = sink.write_all(b"lost\n").unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::Other);
        assert_eq!(error.to_string(), "log file lock poisoned");
        assert_eq!(file.flush().unwrap_err().kind(), io::ErrorKind::Other);
    }

    #[test]
    fn create_reports_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing").join("app.log");
        let error = SharedFile::create(&missing).unwrap_err();
        assert!(error.to_string().contains("app.log"));
    }
}
