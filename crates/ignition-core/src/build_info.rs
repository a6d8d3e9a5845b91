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

//! Build metadata announced at startup.
//!
//! The strings are produced by the application's build script and treated
//! as opaque here.

use std::fmt;

/// Identifies the pull request a build was produced from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestInfo {
    /// Pull request number.
    pub number: String,
    /// Repository the pull request comes from.
    pub repo: String,
    /// Source branch of the pull request.
    pub branch: String,
    /// Abbreviated head commit of the pull request.
    pub commit_short: String,
}

/// Branch, commit and date of the running binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    /// Branch the binary was built from.
    pub branch: String,
    /// Abbreviated commit hash.
    pub commit_short: String,
    /// Build date.
    pub date: String,
    /// Set when the binary was built from a pull request.
    pub pull_request: Option<PullRequestInfo>,
}

impl BuildInfo {
    /// Creates metadata for a regular branch build.
    pub fn new(
        branch: impl Into<String>,
        commit_short: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            branch: branch.into(),
            commit_short: commit_short.into(),
            date: date.into(),
            pull_request: None,
        }
    }

    /// Marks the build as coming from a pull request.
    pub fn with_pull_request(mut self, pull_request: PullRequestInfo) -> Self {
        self.pull_request = Some(pull_request);
        self
    }

    /// The informational line written to the log once logging is active.
    pub fn log_line(&self) -> String {
        format!("Build: {self}")
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(pr) = &self.pull_request {
            write!(
                f,
                "PR#{} {} {}@{} against ",
                pr.number, pr.repo, pr.branch, pr.commit_short
            )?;
        }
        write!(f, "{}@{} on {}", self.branch, self.commit_short, self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_build_line() {
        let info = BuildInfo::new("master", "1a2b3c4", "2025-03-01");
        assert_eq!(info.log_line(), "Build: master@1a2b3c4 on 2025-03-01");
    }

    #[test]
    fn pull_request_build_line() {
        let info = BuildInfo::new("master", "1a2b3c4", "2025-03-01").with_pull_request(
            PullRequestInfo {
                number: "42".to_string(),
                repo: "someone/fork".to_string(),
                branch: "feature".to_string(),
                commit_short: "deadbee".to_string(),
            },
        );
        assert_eq!(
            info.log_line(),
            "Build: PR#42 someone/fork feature@deadbee against master@1a2b3c4 on 2025-03-01"
        );
    }
}
