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

//! A minimal application wired through the bootstrap sequence.
//!
//! Debug builds use the console subsystem, release builds the windowed one.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use ignition_sdk::prelude::*;

const SUPPORT_URL: &str = "https://example.com/sandbox/faq";

fn build_info() -> BuildInfo {
    let info = BuildInfo::new(env!("GIT_BRANCH"), env!("GIT_HASH"), env!("BUILD_DATE"));
    match (
        option_env!("PR_NUMBER"),
        option_env!("PR_REPO"),
        option_env!("PR_BRANCH"),
        option_env!("PR_COMMIT"),
    ) {
        (Some(number), Some(repo), Some(branch), Some(commit)) => {
            info.with_pull_request(PullRequestInfo {
                number: number.to_string(),
                repo: repo.to_string(),
                branch: branch.to_string(),
                commit_short: commit.to_string(),
            })
        }
        _ => info,
    }
}

fn sandbox_entry() -> EntryInfo {
    EntryInfo::new("Sandbox", sandbox_main)
        .with_positional("[SCENE]", &["scene"])
        .with_support_url(SUPPORT_URL)
        .with_build_info(build_info())
}

fn sandbox_main(args: Args) -> i32 {
    log::info!("Sandbox started with {} argument(s)", args.len());
    for (index, arg) in args.iter().enumerate().skip(1) {
        log::debug!("  [{index}] {arg}");
    }

    let scene = launch_option("scene").unwrap_or("default");
    if has_console_attached() {
        println!("Loading scene '{scene}'");
    }
    log::info!("Scene '{scene}' finished");

    if let Some(buffer) = log_buffer() {
        if has_console_attached() {
            println!("Last {} log line(s):", buffer.len());
            for line in buffer.snapshot() {
                println!("  {line}");
            }
        }
    }
    0
}

#[cfg(windows)]
ignition_sdk::bootstrap_main!(sandbox_entry());

#[cfg(not(windows))]
fn main() {
    let _ = sandbox_entry();
    eprintln!("The sandbox only runs on Windows.");
    std::process::exit(1);
}
