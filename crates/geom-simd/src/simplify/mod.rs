//! Douglas-Peucker polyline reduction.
//!
//! Purpose
//! - Reduce a polyline to the points that deviate more than `tolerance` from
//!   the chord of their enclosing kept pair.
//! - Run the max-distance search on the widest vector kernel available, with
//!   output identical to the scalar kernel.
//!
//! Algorithm
//! - Work-list over inclusive index ranges `[start, end]`, seeded with the
//!   whole input. For each range the kernel returns the interior point of
//!   maximum squared perpendicular distance from the chord `start → end`;
//!   if it exceeds `tolerance²` it is kept and both halves are queued,
//!   otherwise the whole open interior is dropped.
//! - The tolerance is squared once; no square root is ever taken.
//! - An explicit stack replaces recursion so adversarial inputs (depth linear
//!   in the length) cannot exhaust the native call stack.
//!
//! Code cross-refs: `kernel::{Algorithm, select_kernel}`, `scalar::Chord`

mod scalar;

#[cfg(all(feature = "avx2", target_arch = "x86_64"))]
mod avx2;
#[cfg(all(feature = "avx512", target_arch = "x86_64"))]
mod avx512;
#[cfg(all(feature = "neon", target_arch = "aarch64"))]
mod neon;

use scalar::{Chord, ScalarDistance};

use crate::error::GeomError;
use crate::kernel::{select_kernel, Algorithm, Kernel};
use crate::types::{Point, Polyline};

/// Max-distance search over the open interior of a chord.
pub(crate) trait DistanceKernel {
    /// `(max_dist_sq, max_idx)` over `start+1..end` against chord
    /// `start → end`. Returns `(0.0, start)` when no interior point has a
    /// positive distance. Among equal maxima the lowest index wins.
    fn farthest(&self, line: &Polyline, start: usize, end: usize) -> (f64, usize);
}

/// Interior point of maximum deviation from a chord.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Farthest {
    pub index: usize,
    pub dist_sq: f64,
}

/// Squared perpendicular distance of `p` from the line through `a` and `b`.
///
/// Falls back to the squared distance to `a` when `|b - a|² < 1e-10`.
#[inline]
pub fn perpendicular_distance_sq(p: Point, a: Point, b: Point) -> f64 {
    Chord::new(a, b).distance_sq(p.x, p.y)
}

/// Simplify `input` with Douglas-Peucker at `tolerance`.
///
/// Pre: `tolerance > 0` (checked once the input has more than two points;
/// inputs of 0, 1 or 2 points are returned unchanged).
/// Post: order preserved; first and last point kept; `2 <= len <= input.len()`.
pub fn simplify(
    input: &Polyline,
    tolerance: f64,
    algorithm: Algorithm,
) -> Result<Polyline, GeomError> {
    if input.len() <= 2 {
        return Ok(input.clone());
    }
    // `!(t > 0)` also rejects NaN.
    if !(tolerance > 0.0) {
        return Err(GeomError::invalid(format!(
            "tolerance must be positive, got {tolerance}"
        )));
    }
    let kernel = select_kernel(algorithm)?;
    let keep = reduce_with(input, tolerance * tolerance, kernel);
    let out = input.filter_kept(&keep);
    tracing::trace!(%kernel, points_in = input.len(), points_out = out.len(), "simplified");
    Ok(out)
}

/// Array-of-points convenience wrapper around [`simplify`].
pub fn simplify_points(
    input: &[Point],
    tolerance: f64,
    algorithm: Algorithm,
) -> Result<Vec<Point>, GeomError> {
    simplify(&Polyline::from_points(input), tolerance, algorithm).map(|p| p.to_points())
}

/// Run a single max-distance search on `[start, end]` with the chosen kernel.
///
/// Returns `None` when every interior point lies on the chord (or there is
/// no interior). Fails if `start >= end` or `end` is out of bounds.
pub fn farthest_point(
    line: &Polyline,
    start: usize,
    end: usize,
    algorithm: Algorithm,
) -> Result<Option<Farthest>, GeomError> {
    if start >= end || end >= line.len() {
        return Err(GeomError::invalid(format!(
            "range [{start}, {end}] is not a chord of a {}-point polyline",
            line.len()
        )));
    }
    let kernel = select_kernel(algorithm)?;
    let (dist_sq, index) = farthest_with(line, start, end, kernel);
    Ok((index != start).then_some(Farthest { index, dist_sq }))
}

/// Keep-mask for `line` (len >= 2) at squared tolerance.
pub(crate) fn reduce<K: DistanceKernel>(
    line: &Polyline,
    tolerance_sq: f64,
    kernel: &K,
) -> Vec<bool> {
    let n = line.len();
    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;
    let mut work: Vec<(usize, usize)> = vec![(0, n - 1)];
    while let Some((start, end)) = work.pop() {
        if end <= start + 1 {
            continue;
        }
        let (max_dist_sq, max_idx) = kernel.farthest(line, start, end);
        if max_dist_sq > tolerance_sq {
            keep[max_idx] = true;
            work.push((max_idx, end));
            work.push((start, max_idx));
        }
    }
    keep
}

// Each arm re-checks its token; a `Kernel` the CPU cannot run degrades to scalar.
fn reduce_with(line: &Polyline, tolerance_sq: f64, kernel: Kernel) -> Vec<bool> {
    match kernel {
        #[cfg(all(feature = "avx512", target_arch = "x86_64"))]
        Kernel::Avx512 => {
            if let Some(k) = avx512::Avx512Distance::detect() {
                return reduce(line, tolerance_sq, &k);
            }
        }
        #[cfg(all(feature = "avx2", target_arch = "x86_64"))]
        Kernel::Avx2 => {
            if let Some(k) = avx2::Avx2Distance::detect() {
                return reduce(line, tolerance_sq, &k);
            }
        }
        #[cfg(all(feature = "neon", target_arch = "aarch64"))]
        Kernel::Neon => {
            if let Some(k) = neon::NeonDistance::detect() {
                return reduce(line, tolerance_sq, &k);
            }
        }
        _ => {}
    }
    reduce(line, tolerance_sq, &ScalarDistance)
}

fn farthest_with(line: &Polyline, start: usize, end: usize, kernel: Kernel) -> (f64, usize) {
    match kernel {
        #[cfg(all(feature = "avx512", target_arch = "x86_64"))]
        Kernel::Avx512 => {
            if let Some(k) = avx512::Avx512Distance::detect() {
                return k.farthest(line, start, end);
            }
        }
        #[cfg(all(feature = "avx2", target_arch = "x86_64"))]
        Kernel::Avx2 => {
            if let Some(k) = avx2::Avx2Distance::detect() {
                return k.farthest(line, start, end);
            }
        }
        #[cfg(all(feature = "neon", target_arch = "aarch64"))]
        Kernel::Neon => {
            if let Some(k) = neon::NeonDistance::detect() {
                return k.farthest(line, start, end);
            }
        }
        _ => {}
    }
    ScalarDistance.farthest(line, start, end)
}
