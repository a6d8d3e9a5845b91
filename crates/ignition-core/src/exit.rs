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

//! Exit statuses produced by the bootstrap sequence itself.
//!
//! Any other status comes from the application entry function and is passed
//! through unchanged.

/// Help or version output was printed; the application did not run.
pub const SUCCESS: i32 = 0;

/// The command line could not be acquired or the launch options are invalid.
pub const ARGUMENTS_FAILED: i32 = 1;

/// A mandatory CPU feature is missing.
pub const CAPABILITY_MISSING: i32 = -1;
