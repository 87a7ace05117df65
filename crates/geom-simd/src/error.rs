//! Error type shared by the simplification engine, the kernel registry and
//! the batched edge tests.

use std::fmt;

use crate::kernel::Algorithm;

/// Errors surfaced by the public operations.
///
/// All failures are synchronous; no partial result accompanies an error.
#[derive(Clone, Debug, PartialEq)]
pub enum GeomError {
    /// A caller-supplied value is outside the operation's domain
    /// (non-positive tolerance, mismatched coordinate sequences).
    InvalidArgument { reason: String },
    /// The requested kernel was not compiled into this build.
    UnsupportedFeature { algorithm: Algorithm },
    /// The requested kernel is compiled in but the running CPU lacks it.
    RuntimeUnsupported { algorithm: Algorithm },
    /// A batched edge window `[start, start + lanes]` runs past the vertices.
    EdgeRange {
        start: usize,
        lanes: usize,
        vertices: usize,
    },
}

impl GeomError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GeomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            Self::UnsupportedFeature { algorithm } => {
                write!(f, "{algorithm} kernel was not compiled into this build")
            }
            Self::RuntimeUnsupported { algorithm } => {
                write!(f, "{algorithm} is not supported by this CPU")
            }
            Self::EdgeRange {
                start,
                lanes,
                vertices,
            } => write!(
                f,
                "edge window of {lanes} starting at {start} runs past {vertices} vertices"
            ),
        }
    }
}

impl std::error::Error for GeomError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_range_message_names_its_fields() {
        let e = GeomError::EdgeRange {
            start: 3,
            lanes: 4,
            vertices: 6,
        };
        assert_eq!(
            e.to_string(),
            "edge window of 4 starting at 3 runs past 6 vertices"
        );
    }

    #[test]
    fn edge_range_message_at_usize_max() {
        let e = GeomError::EdgeRange {
            start: usize::MAX,
            lanes: 8,
            vertices: 2,
        };
        assert!(e.to_string().contains(&usize::MAX.to_string()));
    }

    #[test]
    fn other_variants_display() {
        assert_eq!(
            GeomError::invalid("bad").to_string(),
            "invalid argument: bad"
        );
        assert!(GeomError::RuntimeUnsupported {
            algorithm: Algorithm::Avx512
        }
        .to_string()
        .starts_with("avx512"));
    }
}
