//! Tolerance defaults for the 2D kernels (internal).
//!
//! Policy
//! - Fixed constants shared by the scalar and vector paths. A vector kernel
//!   that used a different threshold than its scalar counterpart would break
//!   lane-for-lane equivalence, so there is exactly one definition of each.

/// Squared chord length below which a chord is treated as a single point.
pub(crate) const DEGENERATE_CHORD_EPS: f64 = 1e-10;
/// Squared first/last vertex distance below which a polygon counts as closed.
pub(crate) const CLOSED_EPS: f64 = 1e-10;
/// `|d_a × d_b|` below which two segments are treated as parallel.
pub(crate) const PARALLEL_EPS: f64 = 1e-10;
/// Twice-area magnitude below which a centroid is undefined.
pub(crate) const CENTROID_AREA_EPS: f64 = 1e-18;
