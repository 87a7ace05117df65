//! NEON edge batch: one fixed edge against 2 consecutive edges.

use std::arch::aarch64::*;

use crate::caps::get_capabilities;
use crate::cfg::PARALLEL_EPS;
use crate::types::Point;

use super::{EdgeBatch, EdgeIntersection};

const LANES: usize = 2;

#[derive(Clone, Copy, Debug)]
pub(crate) struct NeonEdges {
    _detected: (),
}

impl NeonEdges {
    pub(crate) fn detect() -> Option<Self> {
        get_capabilities().neon.then_some(Self { _detected: () })
    }
}

impl EdgeBatch for NeonEdges {
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
        // SAFETY: `NeonEdges` exists only when NEON is reported available.
        unsafe { intersect_neon(a1, a2, xs, ys, start, out) }
    }
}

#[target_feature(enable = "neon")]
unsafe fn intersect_neon(
    a1: Point,
    a2: Point,
    xs: &[f64],
    ys: &[f64],
    start: usize,
    out: &mut [Option<EdgeIntersection>],
) {
    let ax1 = vdupq_n_f64(a1.x);
    let ay1 = vdupq_n_f64(a1.y);
    let dx_a = vdupq_n_f64(a2.x - a1.x);
    let dy_a = vdupq_n_f64(a2.y - a1.y);

    let bx1 = vld1q_f64(xs[start..start + LANES].as_ptr());
    let by1 = vld1q_f64(ys[start..start + LANES].as_ptr());
    let bx2 = vld1q_f64(xs[start + 1..start + 1 + LANES].as_ptr());
    let by2 = vld1q_f64(ys[start + 1..start + 1 + LANES].as_ptr());
    let dx_b = vsubq_f64(bx2, bx1);
    let dy_b = vsubq_f64(by2, by1);

    let denom = vsubq_f64(vmulq_f64(dx_a, dy_b), vmulq_f64(dy_a, dx_b));
    let dx_ab = vsubq_f64(bx1, ax1);
    let dy_ab = vsubq_f64(by1, ay1);
    let num_t = vsubq_f64(vmulq_f64(dx_ab, dy_b), vmulq_f64(dy_ab, dx_b));
    let num_u = vsubq_f64(vmulq_f64(dx_ab, dy_a), vmulq_f64(dy_ab, dx_a));
    let t = vdivq_f64(num_t, denom);
    let u = vdivq_f64(num_u, denom);

    let zero = vdupq_n_f64(0.0);
    let one = vdupq_n_f64(1.0);
    let t_ok = vandq_u64(vcgeq_f64(t, zero), vcleq_f64(t, one));
    let u_ok = vandq_u64(vcgeq_f64(u, zero), vcleq_f64(u, one));
    // |denom| >= |eps|
    let not_parallel = vcageq_f64(denom, vdupq_n_f64(PARALLEL_EPS));
    let hits = vandq_u64(vandq_u64(t_ok, u_ok), not_parallel);

    let ix = vaddq_f64(ax1, vmulq_f64(t, dx_a));
    let iy = vaddq_f64(ay1, vmulq_f64(t, dy_a));

    let mut hit_arr = [0u64; LANES];
    let mut t_arr = [0.0f64; LANES];
    let mut u_arr = [0.0f64; LANES];
    let mut x_arr = [0.0f64; LANES];
    let mut y_arr = [0.0f64; LANES];
    vst1q_u64(hit_arr.as_mut_ptr(), hits);
    vst1q_f64(t_arr.as_mut_ptr(), t);
    vst1q_f64(u_arr.as_mut_ptr(), u);
    vst1q_f64(x_arr.as_mut_ptr(), ix);
    vst1q_f64(y_arr.as_mut_ptr(), iy);

    for (j, slot) in out.iter_mut().enumerate().take(LANES) {
        *slot = (hit_arr[j] != 0).then(|| EdgeIntersection {
            t: t_arr[j],
            u: u_arr[j],
            point: Point::new(x_arr[j], y_arr[j]),
        });
    }
}
