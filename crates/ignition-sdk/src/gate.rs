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

//! The capability gate: a hard hardware precondition.

use ignition_core::console::ConsoleAttachment;
use ignition_core::entry::EntryInfo;
use ignition_core::error::BootstrapError;
use ignition_core::platform::{CpuFeature, CpuProbe, FatalReporter};

/// The feature every build requires unless configured otherwise.
pub const REQUIRED_FEATURE: CpuFeature = CpuFeature::Avx;

/// The user-directed message shown when `feature` is missing.
pub fn diagnostic(entry: &EntryInfo, feature: CpuFeature) -> String {
    let mut message = format!(
        "Your CPU does not support {feature}, which is required by {}.",
        entry.name
    );
    if let Some(url) = &entry.support_url {
        message.push_str(&format!(" See the FAQ for system requirements at {url}"));
    }
    message
}

/// Checks `feature` once and reports a fatal diagnostic if it is missing.
pub fn check_capability<P>(
    platform: &P,
    entry: &EntryInfo,
    feature: CpuFeature,
    console: ConsoleAttachment,
) -> Result<(), BootstrapError>
where
    P: CpuProbe + FatalReporter + ?Sized,
{
    if platform.has_feature(feature) {
        return Ok(());
    }
    platform.report_fatal(&diagnostic(entry, feature), console);
    Err(BootstrapError::CapabilityMissing { feature })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ignition_core::entry::Args;
    use std::cell::RefCell;

    fn noop(_: Args) -> i32 {
        0
    }

    struct FakeCpu {
        avx: bool,
        reports: RefCell<Vec<String>>,
    }

    impl CpuProbe for FakeCpu {
        fn has_feature(&self, feature: CpuFeature) -> bool {
            feature == CpuFeature::Avx && self.avx
        }
    }

    impl FatalReporter for FakeCpu {
        fn report_fatal(&self, message: &str, _console: ConsoleAttachment) {
            self.reports.borrow_mut().push(message.to_string());
        }
    }

    #[test]
    fn diagnostic_names_feature_application_and_url() {
        let entry = EntryInfo::new("Sandbox", noop);
        assert_eq!(
            diagnostic(&entry, CpuFeature::Avx),
            "Your CPU does not support AVX, which is required by Sandbox."
        );

        let entry = entry.with_support_url("https://example.org/faq");
        assert!(diagnostic(&entry, CpuFeature::Avx2)
            .ends_with("See the FAQ for system requirements at https://example.org/faq"));
    }

    #[test]
    fn present_feature_reports_nothing() {
        let cpu = FakeCpu {
            avx: true,
            reports: RefCell::new(Vec::new()),
        };
        let entry = EntryInfo::new("app", noop);
        assert!(check_capability(&cpu, &entry, CpuFeature::Avx, ConsoleAttachment::Attached).is_ok());
        assert!(cpu.reports.borrow().is_empty());
    }

    #[test]
    fn missing_feature_reports_once_and_fails() {
        let cpu = FakeCpu {
            avx: false,
            reports: RefCell::new(Vec::new()),
        };
        let entry = EntryInfo::new("app", noop);
        let result = check_capability(&cpu, &entry, REQUIRED_FEATURE, ConsoleAttachment::Detached);

        assert_eq!(
            result,
            Err(BootstrapError::CapabilityMissing {
                feature: CpuFeature::Avx
            })
        );
        assert_eq!(cpu.reports.borrow().len(), 1);
    }
}
