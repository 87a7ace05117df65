//! Parametric segment-segment intersection.
//!
//! Model
//! - `P(t) = A1 + t (A2 - A1)`, `Q(u) = B1 + u (B2 - B1)`, `t, u ∈ [0, 1]`.
//! - With `d_a = A2 - A1`, `d_b = B2 - B1`, `w = B1 - A1` and the 2D cross
//!   `a × b = a.x b.y - a.y b.x`:
//!   `t = (w × d_b) / (d_a × d_b)`, `u = (w × d_a) / (d_a × d_b)`.
//! - `|d_a × d_b| < 1e-10` is reported as no intersection. This includes
//!   overlapping collinear segments; they are not detected specially.
//! - Bounds are inclusive, so shared endpoints intersect.
//! - The point is evaluated on A from `t`, never on B from `u`.
//!
//! Batched kernels test one edge A against `lanes` consecutive edges
//! `(v[i], v[i+1])` of a polyline and must reproduce `edge_intersect`
//! lane for lane: same booleans, same bits.

#[cfg(all(feature = "avx2", target_arch = "x86_64"))]
mod avx2;
#[cfg(all(feature = "avx512", target_arch = "x86_64"))]
mod avx512;
#[cfg(all(feature = "neon", target_arch = "aarch64"))]
mod neon;

use crate::cfg::PARALLEL_EPS;
use crate::error::GeomError;
use crate::kernel::{select_kernel, Algorithm, Kernel};
use crate::polygon::Polygon;
use crate::types::{Point, Polyline};

/// Widest batch any kernel produces.
const MAX_LANES: usize = 8;

/// A proper hit between two segments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeIntersection {
    /// Parameter along the first segment, in `[0, 1]`.
    pub t: f64,
    /// Parameter along the second segment, in `[0, 1]`.
    pub u: f64,
    /// `A1 + t (A2 - A1)`.
    pub point: Point,
}

/// A hit between edge `edge_a` of one polygon and edge `edge_b` of another.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionHit {
    pub edge_a: usize,
    pub edge_b: usize,
    pub hit: EdgeIntersection,
}

/// Test segment `a1 → a2` against segment `b1 → b2`.
pub fn edge_intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<EdgeIntersection> {
    let dx_a = a2.x - a1.x;
    let dy_a = a2.y - a1.y;
    let dx_b = b2.x - b1.x;
    let dy_b = b2.y - b1.y;

    let denom = dx_a * dy_b - dy_a * dx_b;
    if denom.abs() < PARALLEL_EPS {
        return None;
    }

    let dx_ab = b1.x - a1.x;
    let dy_ab = b1.y - a1.y;
    let t = (dx_ab * dy_b - dy_ab * dx_b) / denom;
    let u = (dx_ab * dy_a - dy_ab * dx_a) / denom;

    if t >= 0.0 && t <= 1.0 && u >= 0.0 && u <= 1.0 {
        Some(EdgeIntersection {
            t,
            u,
            point: Point::new(a1.x + t * dx_a, a1.y + t * dy_a),
        })
    } else {
        None
    }
}

/// Test `a1 → a2` against edges `start .. start + lanes` of `b`, where edge
/// `i` is `(b[i], b[i+1])` and `lanes` is the resolved kernel's width.
///
/// Requires `start + lanes < b.len()`.
pub fn edge_intersect_batch(
    a1: Point,
    a2: Point,
    b: &Polyline,
    start: usize,
    algorithm: Algorithm,
) -> Result<Vec<Option<EdgeIntersection>>, GeomError> {
    let kernel = select_kernel(algorithm)?;
    let lanes = kernel.lanes();
    let fits = start
        .checked_add(lanes)
        .is_some_and(|last| last < b.len());
    if !fits {
        return Err(GeomError::EdgeRange {
            start,
            lanes,
            vertices: b.len(),
        });
    }
    let mut out = vec![None; lanes];
    batch_with(kernel, a1, a2, b.xs(), b.ys(), start, &mut out);
    Ok(out)
}

/// Every crossing between an edge of `a` and an edge of `b`, ordered by
/// `(edge_a, edge_b)`. Edge indices follow [`Polygon::edges`].
pub fn find_all_intersections(
    a: &Polygon,
    b: &Polygon,
    algorithm: Algorithm,
) -> Result<Vec<IntersectionHit>, GeomError> {
    let kernel = select_kernel(algorithm)?;
    let mut hits = Vec::new();
    match kernel {
        #[cfg(all(feature = "avx512", target_arch = "x86_64"))]
        Kernel::Avx512 => {
            if let Some(k) = avx512::Avx512Edges::detect() {
                all_pairs(&k, a, b, &mut hits);
                return Ok(hits);
            }
        }
        #[cfg(all(feature = "avx2", target_arch = "x86_64"))]
        Kernel::Avx2 => {
            if let Some(k) = avx2::Avx2Edges::detect() {
                all_pairs(&k, a, b, &mut hits);
                return Ok(hits);
            }
        }
        #[cfg(all(feature = "neon", target_arch = "aarch64"))]
        Kernel::Neon => {
            if let Some(k) = neon::NeonEdges::detect() {
                all_pairs(&k, a, b, &mut hits);
                return Ok(hits);
            }
        }
        _ => {}
    }
    all_pairs(&ScalarEdges, a, b, &mut hits);
    Ok(hits)
}

/// One fixed edge against `LANES` consecutive edges.
pub(crate) trait EdgeBatch {
    const LANES: usize;

    /// `out[j]` = test of `a1 → a2` against `(v[start+j], v[start+j+1])`.
    /// Callers guarantee `start + LANES < xs.len()` and `out.len() >= LANES`.
    fn intersect_lanes(
        &self,
        a1: Point,
        a2: Point,
        xs: &[f64],
        ys: &[f64],
        start: usize,
        out: &mut [Option<EdgeIntersection>],
    );
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ScalarEdges;

impl EdgeBatch for ScalarEdges {
    const LANES: usize = 1;

    #[inline]
    fn intersect_lanes(
        &self,
        a1: Point,
        a2: Point,
        xs: &[f64],
        ys: &[f64],
        start: usize,
        out: &mut [Option<EdgeIntersection>],
    ) {
        out[0] = edge_intersect(
            a1,
            a2,
            Point::new(xs[start], ys[start]),
            Point::new(xs[start + 1], ys[start + 1]),
        );
    }
}

fn batch_with(
    kernel: Kernel,
    a1: Point,
    a2: Point,
    xs: &[f64],
    ys: &[f64],
    start: usize,
    out: &mut [Option<EdgeIntersection>],
) {
    match kernel {
        #[cfg(all(feature = "avx512", target_arch = "x86_64"))]
        Kernel::Avx512 => {
            if let Some(k) = avx512::Avx512Edges::detect() {
                return k.intersect_lanes(a1, a2, xs, ys, start, out);
            }
        }
        #[cfg(all(feature = "avx2", target_arch = "x86_64"))]
        Kernel::Avx2 => {
            if let Some(k) = avx2::Avx2Edges::detect() {
                return k.intersect_lanes(a1, a2, xs, ys, start, out);
            }
        }
        #[cfg(all(feature = "neon", target_arch = "aarch64"))]
        Kernel::Neon => {
            if let Some(k) = neon::NeonEdges::detect() {
                return k.intersect_lanes(a1, a2, xs, ys, start, out);
            }
        }
        _ => {}
    }
    for (j, slot) in out.iter_mut().enumerate() {
        ScalarEdges.intersect_lanes(a1, a2, xs, ys, start + j, std::slice::from_mut(slot));
    }
}

/// Test `a1 → a2` against the first `edge_count` consecutive edges of
/// `(xs, ys)`: full batches through `K`, the tail one edge at a time.
fn sweep<K: EdgeBatch>(
    kernel: &K,
    a1: Point,
    a2: Point,
    xs: &[f64],
    ys: &[f64],
    edge_count: usize,
    mut on_hit: impl FnMut(usize, EdgeIntersection),
) {
    let mut buf = [None; MAX_LANES];
    let lanes = K::LANES;
    let mut i = 0;
    while i + lanes <= edge_count {
        kernel.intersect_lanes(a1, a2, xs, ys, i, &mut buf[..lanes]);
        for (j, hit) in buf[..lanes].iter().enumerate() {
            if let Some(hit) = hit {
                on_hit(i + j, *hit);
            }
        }
        i += lanes;
    }
    for e in i..edge_count {
        let b1 = Point::new(xs[e], ys[e]);
        let b2 = Point::new(xs[e + 1], ys[e + 1]);
        if let Some(hit) = edge_intersect(a1, a2, b1, b2) {
            on_hit(e, hit);
        }
    }
}

fn all_pairs<K: EdgeBatch>(
    kernel: &K,
    a: &Polygon,
    b: &Polygon,
    hits: &mut Vec<IntersectionHit>,
) {
    let bv = b.vertices();
    let b_run = bv.len().saturating_sub(1);
    let b_wrap = b.wrap_edge();
    for (edge_a, (a1, a2)) in a.edges().enumerate() {
        sweep(kernel, a1, a2, bv.xs(), bv.ys(), b_run, |edge_b, hit| {
            hits.push(IntersectionHit { edge_a, edge_b, hit })
        });
        if let Some((b1, b2)) = b_wrap {
            if let Some(hit) = edge_intersect(a1, a2, b1, b2) {
                hits.push(IntersectionHit {
                    edge_a,
                    edge_b: b_run,
                    hit,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests;
