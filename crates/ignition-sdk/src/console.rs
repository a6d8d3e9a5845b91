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

//! The console controller.

use ignition_core::console::ConsoleAttachment;
use ignition_core::platform::ConsoleHost;

/// Decides whether the process gets an interactive console.
///
/// A console is only created when the parent process has one *and* the
/// environment shows a shell launch. Otherwise nothing is allocated and the
/// process is treated as non-interactive. Must be called at most once.
pub fn attach_console<H>(host: &mut H) -> ConsoleAttachment
where
    H: ConsoleHost + ?Sized,
{
    let has_parent_console = host.attach_parent_console();
    if !has_parent_console || !host.has_shell_environment() {
        return ConsoleAttachment::Detached;
    }

    host.allocate_console();
    if let Err(e) = host.redirect_standard_streams() {
        // Logging is not up yet; this is the only channel left.
        eprintln!("[BOOT] Failed to redirect standard streams: {e}");
    }
    ConsoleAttachment::Attached
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[derive(Default)]
    struct FakeHost {
        parent: bool,
        shell: bool,
        fail_redirect: bool,
        allocations: usize,
        redirects: usize,
    }

    impl ConsoleHost for FakeHost {
        fn attach_parent_console(&mut self) -> bool {
            self.parent
        }

        fn has_shell_environment(&self) -> bool {
            self.shell
        }

        fn allocate_console(&mut self) -> bool {
            self.allocations += 1;
            true
        }

        fn redirect_standard_streams(&mut self) -> io::Result<()> {
            self.redirects += 1;
            if self.fail_redirect {
                Err(io::Error::new(io::ErrorKind::NotFound, "no CONOUT$"))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn requires_both_parent_console_and_shell() {
        for (parent, shell) in [(false, false), (false, true), (true, false)] {
            let mut host = FakeHost {
                parent,
                shell,
                ..FakeHost::default()
            };
            assert_eq!(attach_console(&mut host), ConsoleAttachment::Detached);
            assert_eq!(host.allocations, 0);
        }
    }

    #[test]
    fn shell_launch_allocates_and_redirects() {
        let mut host = FakeHost {
            parent: true,
            shell: true,
            ..FakeHost::default()
        };
        assert_eq!(attach_console(&mut host), ConsoleAttachment::Attached);
        assert_eq!((host.allocations, host.redirects), (1, 1));
    }

    #[test]
    fn redirect_failure_keeps_the_console() {
        let mut host = FakeHost {
            parent: true,
            shell: true,
            fail_redirect: true,
            ..FakeHost::default()
        };
        assert_eq!(attach_console(&mut host), ConsoleAttachment::Attached);
    }
}
