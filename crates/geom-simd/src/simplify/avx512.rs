//! AVX-512F distance kernel: 8 candidates per 512-bit vector.
//!
//! Speedup over scalar depends on how much of the input the first few chords
//! discard; randomly scattered points keep the recursion deep and the ranges
//! short, so most of the time goes to the scalar remainder.

use std::arch::x86_64::*;

use crate::caps::get_capabilities;
use crate::types::Polyline;

use super::scalar::{scan, Chord};
use super::DistanceKernel;

const LANES: usize = 8;

/// Proof token: only constructible once AVX-512F has been detected.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Avx512Distance {
    _detected: (),
}

impl Avx512Distance {
    pub(crate) fn detect() -> Option<Self> {
        get_capabilities().avx512.then_some(Self { _detected: () })
    }
}

impl DistanceKernel for Avx512Distance {
    fn farthest(&self, line: &Polyline, start: usize, end: usize) -> (f64, usize) {
        let chord = Chord::new(line.point(start), line.point(end));
        if chord.is_degenerate() {
            return scan(line.xs(), line.ys(), &chord, start + 1, end, (0.0, start));
        }
        // SAFETY: `Avx512Distance` exists only after runtime AVX-512F detection.
        unsafe { farthest_avx512(line.xs(), line.ys(), &chord, start, end) }
    }
}

#[target_feature(enable = "avx512f")]
unsafe fn farthest_avx512(
    xs: &[f64],
    ys: &[f64],
    chord: &Chord,
    start: usize,
    end: usize,
) -> (f64, usize) {
    let x1 = _mm512_set1_pd(chord.x1);
    let y1 = _mm512_set1_pd(chord.y1);
    let dx = _mm512_set1_pd(chord.dx);
    let dy = _mm512_set1_pd(chord.dy);
    let mag_sq = _mm512_set1_pd(chord.mag_sq);

    let mut best = (0.0, start);
    let mut dists = [0.0f64; LANES];
    let mut i = start + 1;
    while i + LANES <= end {
        let px = _mm512_loadu_pd(xs[i..i + LANES].as_ptr());
        let py = _mm512_loadu_pd(ys[i..i + LANES].as_ptr());
        let dpx = _mm512_sub_pd(px, x1);
        let dpy = _mm512_sub_pd(py, y1);
        let cross = _mm512_sub_pd(_mm512_mul_pd(dpx, dy), _mm512_mul_pd(dpy, dx));
        let dist_sq = _mm512_div_pd(_mm512_mul_pd(cross, cross), mag_sq);
        _mm512_storeu_pd(dists.as_mut_ptr(), dist_sq);
        // No cross-lane max reduction: it could pick any of several tied lanes.
        for (j, &d) in dists.iter().enumerate() {
            if d > best.0 {
                best = (d, i + j);
            }
        }
        i += LANES;
    }
    scan(xs, ys, chord, i, end, best)
}
