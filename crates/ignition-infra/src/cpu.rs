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

//! Runtime CPU feature detection.

use ignition_core::platform::{CpuFeature, CpuProbe};

/// Probes the CPU the process is running on.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostCpu;

impl CpuProbe for HostCpu {
    fn has_feature(&self, feature: CpuFeature) -> bool {
        detect(feature)
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn detect(feature: CpuFeature) -> bool {
    match feature {
        CpuFeature::Avx => std::is_x86_feature_detected!("avx"),
        CpuFeature::Avx2 => std::is_x86_feature_detected!("avx2"),
        CpuFeature::Sse42 => std::is_x86_feature_detected!("sse4.2"),
    }
}

// None of the supported features exist outside x86.
#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
fn detect(_feature: CpuFeature) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avx2_implies_avx() {
        let cpu = HostCpu;
        if cpu.has_feature(CpuFeature::Avx2) {
            assert!(cpu.has_feature(CpuFeature::Avx));
        }
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn agrees_with_compile_time_baseline() {
        // SSE4.2 is only guaranteed when the build targets it.
        if cfg!(target_feature = "sse4.2") {
            assert!(HostCpu.has_feature(CpuFeature::Sse42));
        }
    }
}
