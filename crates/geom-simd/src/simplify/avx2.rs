//! AVX2 distance kernel: 4 candidates per 256-bit vector.

use std::arch::x86_64::*;

use crate::caps::get_capabilities;
use crate::types::Polyline;

use super::scalar::{scan, Chord};
use super::DistanceKernel;

const LANES: usize = 4;

/// Proof token: only constructible once AVX2 has been detected.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Avx2Distance {
    _detected: (),
}

impl Avx2Distance {
    pub(crate) fn detect() -> Option<Self> {
        get_capabilities().avx2.then_some(Self { _detected: () })
    }
}

impl DistanceKernel for Avx2Distance {
    fn farthest(&self, line: &Polyline, start: usize, end: usize) -> (f64, usize) {
        let chord = Chord::new(line.point(start), line.point(end));
        if chord.is_degenerate() {
            return scan(line.xs(), line.ys(), &chord, start + 1, end, (0.0, start));
        }
        // SAFETY: `Avx2Distance` exists only after runtime AVX2 detection.
        unsafe { farthest_avx2(line.xs(), line.ys(), &chord, start, end) }
    }
}

#[target_feature(enable = "avx2")]
unsafe fn farthest_avx2(
    xs: &[f64],
    ys: &[f64],
    chord: &Chord,
    start: usize,
    end: usize,
) -> (f64, usize) {
    let x1 = _mm256_set1_pd(chord.x1);
    let y1 = _mm256_set1_pd(chord.y1);
    let dx = _mm256_set1_pd(chord.dx);
    let dy = _mm256_set1_pd(chord.dy);
    let mag_sq = _mm256_set1_pd(chord.mag_sq);

    let mut best = (0.0, start);
    let mut dists = [0.0f64; LANES];
    let mut i = start + 1;
    while i + LANES <= end {
        // Slicing bounds-checks the window before the unaligned load.
        let px = _mm256_loadu_pd(xs[i..i + LANES].as_ptr());
        let py = _mm256_loadu_pd(ys[i..i + LANES].as_ptr());
        let dpx = _mm256_sub_pd(px, x1);
        let dpy = _mm256_sub_pd(py, y1);
        let cross = _mm256_sub_pd(_mm256_mul_pd(dpx, dy), _mm256_mul_pd(dpy, dx));
        let dist_sq = _mm256_div_pd(_mm256_mul_pd(cross, cross), mag_sq);
        _mm256_storeu_pd(dists.as_mut_ptr(), dist_sq);
        // Ascending lane order keeps the lowest index on ties.
        for (j, &d) in dists.iter().enumerate() {
            if d > best.0 {
                best = (d, i + j);
            }
        }
        i += LANES;
    }
    scan(xs, ys, chord, i, end, best)
}
