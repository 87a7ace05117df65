//! Scalar distance kernel: the reference every vector kernel must reproduce.

use crate::cfg::DEGENERATE_CHORD_EPS;
use crate::types::{Point, Polyline};

use super::DistanceKernel;

/// Chord `a → b` with its direction and squared length precomputed.
///
/// The vector kernels broadcast exactly these fields, and evaluate the same
/// expression tree lane-wise (no fused multiply-add), so every lane is
/// bit-identical to `distance_sq`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Chord {
    pub x1: f64,
    pub y1: f64,
    pub dx: f64,
    pub dy: f64,
    pub mag_sq: f64,
}

impl Chord {
    #[inline]
    pub fn new(a: Point, b: Point) -> Self {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        Self {
            x1: a.x,
            y1: a.y,
            dx,
            dy,
            mag_sq: dx * dx + dy * dy,
        }
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.mag_sq < DEGENERATE_CHORD_EPS
    }

    /// Squared perpendicular distance of `(px, py)` from the chord's line;
    /// squared distance to the chord start when the chord is degenerate.
    #[inline]
    pub fn distance_sq(&self, px: f64, py: f64) -> f64 {
        let dpx = px - self.x1;
        let dpy = py - self.y1;
        if self.is_degenerate() {
            return dpx * dpx + dpy * dpy;
        }
        let cross = dpx * self.dy - dpy * self.dx;
        (cross * cross) / self.mag_sq
    }
}

/// Fold indices `from..end` into the running `(max_dist_sq, max_idx)`.
///
/// Strict `>` keeps the earliest index among equal maxima.
#[inline]
pub(crate) fn scan(
    xs: &[f64],
    ys: &[f64],
    chord: &Chord,
    from: usize,
    end: usize,
    mut best: (f64, usize),
) -> (f64, usize) {
    for i in from..end {
        let d = chord.distance_sq(xs[i], ys[i]);
        if d > best.0 {
            best = (d, i);
        }
    }
    best
}

/// One point at a time.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ScalarDistance;

impl DistanceKernel for ScalarDistance {
    #[inline]
    fn farthest(&self, line: &Polyline, start: usize, end: usize) -> (f64, usize) {
        let chord = Chord::new(line.point(start), line.point(end));
        scan(line.xs(), line.ys(), &chord, start + 1, end, (0.0, start))
    }
}
