//! NEON distance kernel: 2 candidates per 128-bit vector.

use std::arch::aarch64::*;

use crate::caps::get_capabilities;
use crate::types::Polyline;

use super::scalar::{scan, Chord};
use super::DistanceKernel;

const LANES: usize = 2;

/// Proof token; NEON is baseline on aarch64 but goes through the same gate.
#[derive(Clone, Copy, Debug)]
pub(crate) struct NeonDistance {
    _detected: (),
}

impl NeonDistance {
    pub(crate) fn detect() -> Option<Self> {
        get_capabilities().neon.then_some(Self { _detected: () })
    }
}

impl DistanceKernel for NeonDistance {
    fn farthest(&self, line: &Polyline, start: usize, end: usize) -> (f64, usize) {
        let chord = Chord::new(line.point(start), line.point(end));
        if chord.is_degenerate() {
            return scan(line.xs(), line.ys(), &chord, start + 1, end, (0.0, start));
        }
        // SAFETY: `NeonDistance` exists only when NEON is reported available.
        unsafe { farthest_neon(line.xs(), line.ys(), &chord, start, end) }
    }
}

#[target_feature(enable = "neon")]
unsafe fn farthest_neon(
    xs: &[f64],
    ys: &[f64],
    chord: &Chord,
    start: usize,
    end: usize,
) -> (f64, usize) {
    let x1 = vdupq_n_f64(chord.x1);
    let y1 = vdupq_n_f64(chord.y1);
    let dx = vdupq_n_f64(chord.dx);
    let dy = vdupq_n_f64(chord.dy);
    let mag_sq = vdupq_n_f64(chord.mag_sq);

    let mut best = (0.0, start);
    let mut dists = [0.0f64; LANES];
    let mut i = start + 1;
    while i + LANES <= end {
        let px = vld1q_f64(xs[i..i + LANES].as_ptr());
        let py = vld1q_f64(ys[i..i + LANES].as_ptr());
        let dpx = vsubq_f64(px, x1);
        let dpy = vsubq_f64(py, y1);
        let cross = vsubq_f64(vmulq_f64(dpx, dy), vmulq_f64(dpy, dx));
        let dist_sq = vdivq_f64(vmulq_f64(cross, cross), mag_sq);
        vst1q_f64(dists.as_mut_ptr(), dist_sq);
        for (j, &d) in dists.iter().enumerate() {
            if d > best.0 {
                best = (d, i + j);
            }
        }
        i += LANES;
    }
    scan(xs, ys, chord, i, end, best)
}
