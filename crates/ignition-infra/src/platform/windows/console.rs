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

//! Console attachment and standard stream redirection.

use std::fs::OpenOptions;
use std::io;
use std::os::windows::io::IntoRawHandle;
use windows_sys::Win32::System::Console::{
    AllocConsole, AttachConsole, SetStdHandle, ATTACH_PARENT_PROCESS, STD_ERROR_HANDLE,
    STD_HANDLE, STD_OUTPUT_HANDLE,
};

/// The device name of the active console's output buffer.
const CONSOLE_OUTPUT: &str = "CONOUT$";

/// Attaches to the console of the parent process, if it has one.
pub fn attach_parent_console() -> bool {
    // SAFETY: plain Win32 call without pointers.
    unsafe { AttachConsole(ATTACH_PARENT_PROCESS) != 0 }
}

/// Allocates a console. Fails harmlessly if one is already attached.
pub fn allocate_console() -> bool {
    // SAFETY: plain Win32 call without pointers.
    unsafe { AllocConsole() != 0 }
}

/// Points stdout and stderr at the console output buffer.
///
/// Rust's standard streams look the handles up on every write, so the
/// redirection takes effect immediately.
pub fn redirect_standard_streams() -> io::Result<()> {
    redirect(STD_OUTPUT_HANDLE)?;
    redirect(STD_ERROR_HANDLE)
}

fn redirect(stream: STD_HANDLE) -> io::Result<()> {
    let console = OpenOptions::new()
        .read(true)
        .write(true)
        .open(CONSOLE_OUTPUT)?;
    // The handle now belongs to the process standard stream table.
    let handle = console.into_raw_handle();
    // SAFETY: `handle` is an open console handle we no longer own.
    if unsafe { SetStdHandle(stream, handle) } == 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}
