//! Reproducible random polylines and polygons (benchmarks, CLI, tests).
//!
//! Model
//! - `random_walk`: monotone-in-x walk with bounded vertical steps plus an
//!   optional slow sinusoidal drift; the kind of noisy track that
//!   simplification is run on.
//! - `draw_polygon_radial`: `n` equally spaced angles on [0, 2π) with bounded
//!   angular and radial jitter. Sorted angles give a simple, star-shaped,
//!   counter-clockwise ring; it is returned explicitly closed.
//! - Determinism uses a replay token `(seed, index)` mixed into one RNG.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::polygon::Polygon;
use crate::types::{Point, Polyline};

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R, floor: usize) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(floor),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(floor);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Random-walk polyline configuration.
#[derive(Clone, Copy, Debug)]
pub struct WalkCfg {
    pub points: VertexCount,
    /// Horizontal step is uniform in `(0, step_x]`.
    pub step_x: f64,
    /// Vertical step is uniform in `[-step_y, step_y]`.
    pub step_y: f64,
    /// Amplitude of a slow sine added to y; 0 disables it.
    pub drift: f64,
}

impl Default for WalkCfg {
    fn default() -> Self {
        Self {
            points: VertexCount::Fixed(1000),
            step_x: 1.0,
            step_y: 0.5,
            drift: 10.0,
        }
    }
}

/// Draw a random-walk polyline (at least 2 points).
pub fn random_walk(cfg: WalkCfg, tok: ReplayToken) -> Polyline {
    let mut rng = tok.to_std_rng();
    let n = cfg.points.sample(&mut rng, 2);
    let sx = cfg.step_x.abs().max(1e-12);
    let sy = cfg.step_y.abs();
    let period = (n as f64 / 4.0).max(1.0);
    let mut x = 0.0;
    let mut y = 0.0;
    let mut out = Polyline::with_capacity(n);
    for i in 0..n {
        let drift = cfg.drift * (i as f64 / period * std::f64::consts::TAU).sin();
        out.push(x, y + drift);
        x += sx * (1.0 - rng.gen::<f64>());
        y += (rng.gen::<f64>() * 2.0 - 1.0) * sy;
    }
    out
}

/// Radial-jitter polygon configuration.
#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radial jitter (relative amplitude). Radii = `base_radius * (1 + u)`,
    /// with `u∈[-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
    pub base_radius: f64,
    pub center: Point,
    /// Random global phase in [0, 2π)?
    pub random_phase: bool,
}

impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(12),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius: 1.0,
            center: Point::new(0.0, 0.0),
            random_phase: true,
        }
    }
}

/// Draw a closed, star-shaped, counter-clockwise polygon.
pub fn draw_polygon_radial(cfg: RadialCfg, tok: ReplayToken) -> Polygon {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng, 3);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.max(0.0);
    let r0 = cfg.base_radius.max(1e-9);
    let delta = std::f64::consts::TAU / (n as f64);
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * std::f64::consts::TAU
    } else {
        0.0
    };
    // Jitter below Δ/2 keeps the angles strictly increasing.
    let c: Vector2<f64> = cfg.center.into();
    let mut ring: Polyline = (0..n)
        .map(|k| {
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let th = phase + (k as f64) * delta + jitter;
            let u = (rng.gen::<f64>() * 2.0 - 1.0) * rj;
            let r = (1.0 + u).max(1e-6) * r0;
            Point::from(c + Vector2::new(th.cos(), th.sin()) * r)
        })
        .collect();
    if let Some(first) = ring.first() {
        ring.push_point(first);
    }
    Polygon::new(ring)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reproducible_draw() {
        let tok = ReplayToken { seed: 42, index: 7 };
        let p1 = draw_polygon_radial(RadialCfg::default(), tok);
        let p2 = draw_polygon_radial(RadialCfg::default(), tok);
        assert_eq!(p1, p2);
        let other = draw_polygon_radial(RadialCfg::default(), ReplayToken { seed: 42, index: 8 });
        assert_ne!(p1, other);
    }

    #[test]
    fn radial_polygon_is_closed_ccw_and_contains_center() {
        let cfg = RadialCfg {
            vertex_count: VertexCount::Uniform { min: 5, max: 40 },
            center: Point::new(3.0, -2.0),
            ..RadialCfg::default()
        };
        for index in 0..20 {
            let poly = draw_polygon_radial(cfg, ReplayToken::new(1, index));
            assert!(poly.is_closed());
            assert!(poly.is_ccw());
            assert!(poly.contains(3.0, -2.0));
        }
    }

    #[test]
    fn walk_respects_count_and_is_monotone_in_x() {
        let cfg = WalkCfg {
            points: VertexCount::Fixed(500),
            ..WalkCfg::default()
        };
        let line = random_walk(cfg, ReplayToken::new(9, 0));
        assert_eq!(line.len(), 500);
        assert!(line.xs().windows(2).all(|w| w[1] > w[0]));
        assert_eq!(line, random_walk(cfg, ReplayToken::new(9, 0)));
    }
}
