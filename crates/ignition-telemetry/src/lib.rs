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

//! Logging for the bootstrap sequence and the application it launches.
//!
//! [`LogService`] installs an `env_logger` backend whose output is teed to
//! stderr, an optional log file, and a bounded in-process [`LogBuffer`].

#![warn(missing_docs)]

pub mod buffer;
pub mod service;
pub mod sink;

pub use buffer::LogBuffer;
pub use service::{log_buffer, LogService};
pub use sink::{SharedFile, TeeSink};
