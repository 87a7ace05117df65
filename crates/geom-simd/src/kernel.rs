//! Kernel registry: which vector backends exist in this binary and which one
//! to run.
//!
//! Resolution is two-layered:
//! 1. build-time inclusion (`compiled_kernels`): cargo feature AND target arch;
//! 2. run-time support (`caps::get_capabilities`): what the CPU offers.
//!
//! An explicit request rejected by layer 1 is `UnsupportedFeature`; one that
//! passes layer 1 but fails layer 2 is `RuntimeUnsupported`. `Auto` never
//! fails and walks from the widest backend down to scalar.

use std::fmt;
use std::str::FromStr;

use crate::caps::{get_capabilities, SimdCapabilities};
use crate::error::GeomError;

/// Caller-facing backend selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Widest usable backend, falling back to scalar.
    #[default]
    Auto,
    Scalar,
    Avx2,
    Avx512,
    Neon,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Auto,
        Algorithm::Scalar,
        Algorithm::Avx2,
        Algorithm::Avx512,
        Algorithm::Neon,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Auto => "auto",
            Algorithm::Scalar => "scalar",
            Algorithm::Avx2 => "avx2",
            Algorithm::Avx512 => "avx512",
            Algorithm::Neon => "neon",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = GeomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == lower)
            .ok_or_else(|| {
                GeomError::invalid(format!(
                    "unknown algorithm '{s}' (expected auto|scalar|avx2|avx512|neon)"
                ))
            })
    }
}

/// A resolved backend that is both compiled in and supported by the CPU.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kernel {
    Scalar,
    Avx2,
    Avx512,
    Neon,
}

impl Kernel {
    /// Batch width in f64 lanes.
    #[inline]
    pub fn lanes(self) -> usize {
        match self {
            Kernel::Scalar => 1,
            Kernel::Avx2 => 4,
            Kernel::Avx512 => 8,
            Kernel::Neon => 2,
        }
    }

    pub fn algorithm(self) -> Algorithm {
        match self {
            Kernel::Scalar => Algorithm::Scalar,
            Kernel::Avx2 => Algorithm::Avx2,
            Kernel::Avx512 => Algorithm::Avx512,
            Kernel::Neon => Algorithm::Neon,
        }
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.algorithm().name())
    }
}

/// Vector backends compiled into this binary.
pub fn compiled_kernels() -> SimdCapabilities {
    SimdCapabilities {
        avx2: cfg!(all(feature = "avx2", target_arch = "x86_64")),
        avx512: cfg!(all(feature = "avx512", target_arch = "x86_64")),
        neon: cfg!(all(feature = "neon", target_arch = "aarch64")),
    }
}

/// Resolve `algorithm` against this build and the running CPU.
pub fn select_kernel(algorithm: Algorithm) -> Result<Kernel, GeomError> {
    let kernel = resolve(algorithm, compiled_kernels(), get_capabilities())?;
    tracing::debug!(%algorithm, %kernel, "kernel selected");
    Ok(kernel)
}

/// Pure resolution rule behind `select_kernel`.
pub fn resolve(
    algorithm: Algorithm,
    compiled: SimdCapabilities,
    cpu: SimdCapabilities,
) -> Result<Kernel, GeomError> {
    let check = |built: bool, supported: bool, kernel: Kernel| {
        if !built {
            Err(GeomError::UnsupportedFeature { algorithm })
        } else if !supported {
            Err(GeomError::RuntimeUnsupported { algorithm })
        } else {
            Ok(kernel)
        }
    };
    match algorithm {
        Algorithm::Auto => {
            let usable = compiled.intersect(cpu);
            Ok(if usable.avx512 {
                Kernel::Avx512
            } else if usable.avx2 {
                Kernel::Avx2
            } else if usable.neon {
                Kernel::Neon
            } else {
                Kernel::Scalar
            })
        }
        Algorithm::Scalar => Ok(Kernel::Scalar),
        Algorithm::Avx2 => check(compiled.avx2, cpu.avx2, Kernel::Avx2),
        Algorithm::Avx512 => check(compiled.avx512, cpu.avx512, Kernel::Avx512),
        Algorithm::Neon => check(compiled.neon, cpu.neon, Kernel::Neon),
    }
}
