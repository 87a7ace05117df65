//! AVX2 edge batch: one fixed edge against 4 consecutive edges.

use std::arch::x86_64::*;

use crate::caps::get_capabilities;
use crate::cfg::PARALLEL_EPS;
use crate::types::Point;

use super::{EdgeBatch, EdgeIntersection};

const LANES: usize = 4;

/// Proof token: only constructible once AVX2 has been detected.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Avx2Edges {
    _detected: (),
}

impl Avx2Edges {
    pub(crate) fn detect() -> Option<Self> {
        get_capabilities().avx2.then_some(Self { _detected: () })
    }
}

impl EdgeBatch for Avx2Edges {
    const LANES: usize = LANES;

    fn intersect_lanes(
        &self,
        a1: Point,
        a2: Point,
        xs: &[f64],
        ys: &[f64],
        start: usize,
        out: &mut [Option<EdgeIntersection>],
    ) {
        // SAFETY: `Avx2Edges` exists only after runtime AVX2 detection.
        unsafe { intersect_avx2(a1, a2, xs, ys, start, out) }
    }
}

#[target_feature(enable = "avx2")]
unsafe fn intersect_avx2(
    a1: Point,
    a2: Point,
    xs: &[f64],
    ys: &[f64],
    start: usize,
    out: &mut [Option<EdgeIntersection>],
) {
    let ax1 = _mm256_set1_pd(a1.x);
    let ay1 = _mm256_set1_pd(a1.y);
    let dx_a = _mm256_set1_pd(a2.x - a1.x);
    let dy_a = _mm256_set1_pd(a2.y - a1.y);

    let bx1 = _mm256_loadu_pd(xs[start..start + LANES].as_ptr());
    let by1 = _mm256_loadu_pd(ys[start..start + LANES].as_ptr());
    let bx2 = _mm256_loadu_pd(xs[start + 1..start + 1 + LANES].as_ptr());
    let by2 = _mm256_loadu_pd(ys[start + 1..start + 1 + LANES].as_ptr());
    let dx_b = _mm256_sub_pd(bx2, bx1);
    let dy_b = _mm256_sub_pd(by2, by1);

    let denom = _mm256_sub_pd(_mm256_mul_pd(dx_a, dy_b), _mm256_mul_pd(dy_a, dx_b));
    let dx_ab = _mm256_sub_pd(bx1, ax1);
    let dy_ab = _mm256_sub_pd(by1, ay1);
    let num_t = _mm256_sub_pd(_mm256_mul_pd(dx_ab, dy_b), _mm256_mul_pd(dy_ab, dx_b));
    let num_u = _mm256_sub_pd(_mm256_mul_pd(dx_ab, dy_a), _mm256_mul_pd(dy_ab, dx_a));
    let t = _mm256_div_pd(num_t, denom);
    let u = _mm256_div_pd(num_u, denom);

    let zero = _mm256_setzero_pd();
    let one = _mm256_set1_pd(1.0);
    let t_ok = _mm256_and_pd(
        _mm256_cmp_pd::<_CMP_GE_OQ>(t, zero),
        _mm256_cmp_pd::<_CMP_LE_OQ>(t, one),
    );
    let u_ok = _mm256_and_pd(
        _mm256_cmp_pd::<_CMP_GE_OQ>(u, zero),
        _mm256_cmp_pd::<_CMP_LE_OQ>(u, one),
    );
    // |denom|: clear the sign bit.
    let abs_denom = _mm256_andnot_pd(_mm256_set1_pd(-0.0), denom);
    let not_parallel = _mm256_cmp_pd::<_CMP_GE_OQ>(abs_denom, _mm256_set1_pd(PARALLEL_EPS));
    let hits = _mm256_movemask_pd(_mm256_and_pd(_mm256_and_pd(t_ok, u_ok), not_parallel));

    let ix = _mm256_add_pd(ax1, _mm256_mul_pd(t, dx_a));
    let iy = _mm256_add_pd(ay1, _mm256_mul_pd(t, dy_a));

    let mut t_arr = [0.0f64; LANES];
    let mut u_arr = [0.0f64; LANES];
    let mut x_arr = [0.0f64; LANES];
    let mut y_arr = [0.0f64; LANES];
    _mm256_storeu_pd(t_arr.as_mut_ptr(), t);
    _mm256_storeu_pd(u_arr.as_mut_ptr(), u);
    _mm256_storeu_pd(x_arr.as_mut_ptr(), ix);
    _mm256_storeu_pd(y_arr.as_mut_ptr(), iy);

    for (j, slot) in out.iter_mut().enumerate().take(LANES) {
        *slot = (hits & (1 << j) != 0).then(|| EdgeIntersection {
            t: t_arr[j],
            u: u_arr[j],
            point: Point::new(x_arr[j], y_arr[j]),
        });
    }
}
