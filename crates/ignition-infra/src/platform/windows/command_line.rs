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

//! Command line acquisition through `CommandLineToArgvW`.

use ignition_core::error::BootstrapError;
use std::ffi::OsString;
use std::os::windows::ffi::OsStringExt;
use windows_sys::core::PWSTR;
use windows_sys::Win32::Foundation::{GetLastError, LocalFree};
use windows_sys::Win32::System::Environment::GetCommandLineW;
use windows_sys::Win32::UI::Shell::CommandLineToArgvW;

/// Owns the array returned by `CommandLineToArgvW` and frees it on drop.
struct ArgvGuard {
    argv: *mut PWSTR,
    count: usize,
}

impl ArgvGuard {
    fn tokens(&self) -> impl Iterator<Item = OsString> + '_ {
        (0..self.count).map(move |index| {
            // SAFETY: `index < count`, and every entry is a NUL-terminated
            // wide string inside the array owned by this guard.
            unsafe {
                let token = *self.argv.add(index);
                let len = (0..).take_while(|&i| *token.add(i) != 0).count();
                OsString::from_wide(std::slice::from_raw_parts(token, len))
            }
        })
    }
}

impl Drop for ArgvGuard {
    fn drop(&mut self) {
        // SAFETY: `argv` came from `CommandLineToArgvW` and is freed once.
        unsafe {
            LocalFree(self.argv.cast());
        }
    }
}

/// Splits the process command line following the OS quoting rules.
///
/// Wide tokens are converted to UTF-8; unpaired surrogates are replaced.
pub fn split_process_command_line() -> Result<Vec<String>, BootstrapError> {
    let mut count: i32 = 0;
    // SAFETY: `GetCommandLineW` returns a pointer valid for the process
    // lifetime; `count` is a valid out pointer.
    let argv = unsafe { CommandLineToArgvW(GetCommandLineW(), &mut count) };
    if argv.is_null() {
        // SAFETY: reads the calling thread's last-error value.
        let os_error = unsafe { GetLastError() } as i32;
        return Err(BootstrapError::CommandLine { os_error });
    }

    let guard = ArgvGuard {
        argv,
        count: usize::try_from(count).unwrap_or(0),
    };
    Ok(guard
        .tokens()
        .map(|token| token.to_string_lossy().into_owned())
        .collect())
}
