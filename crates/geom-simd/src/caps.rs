//! Hardware vector-feature detection, cached for the process lifetime.
//!
//! - x86_64: AVX2 and AVX-512F are queried independently.
//! - aarch64: NEON (Advanced SIMD) is architecturally guaranteed, so it is
//!   reported without a runtime query.
//!
//! Detection runs at most once; `OnceLock` makes concurrent first callers
//! block on a single initialization and never observe a partial value.

use std::sync::OnceLock;

/// Vector-feature flags, one per supported width tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimdCapabilities {
    /// 256-bit AVX2 (4 × f64).
    pub avx2: bool,
    /// 512-bit AVX-512F (8 × f64).
    pub avx512: bool,
    /// 128-bit NEON (2 × f64).
    pub neon: bool,
}

impl SimdCapabilities {
    /// Flags set in both `self` and `other`.
    #[inline]
    pub fn intersect(self, other: SimdCapabilities) -> SimdCapabilities {
        SimdCapabilities {
            avx2: self.avx2 && other.avx2,
            avx512: self.avx512 && other.avx512,
            neon: self.neon && other.neon,
        }
    }
}

static CAPABILITIES: OnceLock<SimdCapabilities> = OnceLock::new();

/// Capabilities of the running CPU. Computed on first call, cached afterwards.
#[inline]
pub fn get_capabilities() -> SimdCapabilities {
    *CAPABILITIES.get_or_init(|| {
        let caps = detect_cpu();
        tracing::debug!(
            avx2 = caps.avx2,
            avx512 = caps.avx512,
            neon = caps.neon,
            "simd capabilities detected"
        );
        caps
    })
}

fn detect_cpu() -> SimdCapabilities {
    #[allow(unused_mut)]
    let mut caps = SimdCapabilities::default();

    #[cfg(target_arch = "x86_64")]
    {
        caps.avx2 = std::arch::is_x86_feature_detected!("avx2");
        caps.avx512 = std::arch::is_x86_feature_detected!("avx512f");
    }

    #[cfg(target_arch = "aarch64")]
    {
        caps.neon = true;
    }

    caps
}
