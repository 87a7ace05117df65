use super::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn polyline(xs: &[f64], ys: &[f64]) -> Polyline {
    Polyline::from_xy(xs.to_vec(), ys.to_vec()).unwrap()
}

fn usable_algorithms() -> Vec<Algorithm> {
    Algorithm::ALL
        .into_iter()
        .filter(|a| select_kernel(*a).is_ok())
        .collect()
}

fn scalar_lane(a1: Point, a2: Point, b: &Polyline, i: usize) -> Option<EdgeIntersection> {
    edge_intersect(a1, a2, b.point(i), b.point(i + 1))
}

#[test]
fn crossing_diagonals() {
    let hit = edge_intersect(p(0.0, 0.0), p(10.0, 10.0), p(0.0, 10.0), p(10.0, 0.0)).unwrap();
    assert!((hit.point.x - 5.0).abs() < 1e-12);
    assert!((hit.point.y - 5.0).abs() < 1e-12);
    assert!((hit.t - 0.5).abs() < 1e-12);
    assert!((hit.u - 0.5).abs() < 1e-12);
}

#[test]
fn disjoint_segments() {
    assert!(edge_intersect(p(0.0, 0.0), p(10.0, 0.0), p(0.0, 5.0), p(10.0, 5.0)).is_none());
    // Lines cross, segments do not.
    assert!(edge_intersect(p(0.0, 0.0), p(5.0, 5.0), p(6.0, 0.0), p(10.0, 10.0)).is_none());
}

#[test]
fn shared_endpoint_counts() {
    let hit = edge_intersect(p(0.0, 0.0), p(5.0, 5.0), p(5.0, 5.0), p(10.0, 0.0)).unwrap();
    assert!((hit.t - 1.0).abs() < 1e-12);
    assert!(hit.u.abs() < 1e-12);
    assert_eq!(hit.point, p(5.0, 5.0));
}

#[test]
fn parallel_and_collinear_report_nothing() {
    assert!(edge_intersect(p(0.0, 0.0), p(10.0, 0.0), p(0.0, 1.0), p(10.0, 1.0)).is_none());
    // Overlapping collinear segments are deliberately not detected.
    assert!(edge_intersect(p(0.0, 0.0), p(10.0, 0.0), p(5.0, 0.0), p(15.0, 0.0)).is_none());
}

#[test]
fn axis_aligned_and_t_junction() {
    let hit = edge_intersect(p(5.0, 0.0), p(5.0, 10.0), p(0.0, 5.0), p(10.0, 5.0)).unwrap();
    assert_eq!(hit.point, p(5.0, 5.0));
    let hit = edge_intersect(p(0.0, 0.0), p(10.0, 0.0), p(5.0, -5.0), p(5.0, 0.0)).unwrap();
    assert!((hit.point.x - 5.0).abs() < 1e-12 && hit.point.y.abs() < 1e-12);
}

#[test]
fn point_comes_from_first_segment() {
    let (a1, a2) = (p(0.3, 0.1), p(7.9, 3.3));
    let hit = edge_intersect(a1, a2, p(1.0, 5.0), p(4.0, -2.0)).unwrap();
    assert_eq!(hit.point.x, a1.x + hit.t * (a2.x - a1.x));
    assert_eq!(hit.point.y, a1.y + hit.t * (a2.y - a1.y));
}

#[test]
fn batch_matches_scalar_on_fixed_cases() {
    let cases = [
        (
            (p(0.0, 0.0), p(10.0, 10.0)),
            polyline(
                &[0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
                &[10.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0, 8.0],
            ),
        ),
        (
            (p(5.0, 0.0), p(5.0, 20.0)),
            polyline(
                &[0.0, 10.0, 0.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0],
                &[10.0, 0.0, 5.0, 15.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            ),
        ),
        (
            (p(0.0, 0.0), p(10.0, 0.0)),
            polyline(
                &[20.0, 21.0, 22.0, 23.0, 24.0, 25.0, 26.0, 27.0, 28.0],
                &[20.0, 21.0, 22.0, 23.0, 24.0, 25.0, 26.0, 27.0, 28.0],
            ),
        ),
    ];
    for algorithm in usable_algorithms() {
        for ((a1, a2), b) in &cases {
            let lanes = edge_intersect_batch(*a1, *a2, b, 0, algorithm).unwrap();
            for (i, got) in lanes.iter().enumerate() {
                assert_eq!(*got, scalar_lane(*a1, *a2, b, i), "{algorithm} lane {i}");
            }
        }
    }
}

#[test]
fn batch_mixed_lanes() {
    // Vertical segment x=5, y∈[0,10] against 8 edges with a known hit pattern.
    let b = polyline(
        &[0.0, 10.0, 20.0, 30.0, 10.0, 0.0, 0.0, 10.0, 40.0],
        &[0.0, 10.0, 0.0, 10.0, 0.0, 10.0, 5.0, 5.0, 0.0],
    );
    let expected = [true, false, false, false, true, false, true, false];
    let (a1, a2) = (p(5.0, 0.0), p(5.0, 10.0));
    for algorithm in usable_algorithms() {
        let lanes = select_kernel(algorithm).unwrap().lanes();
        let mut start = 0;
        while start + lanes < b.len() {
            let got = edge_intersect_batch(a1, a2, &b, start, algorithm).unwrap();
            for (j, r) in got.iter().enumerate() {
                assert_eq!(r.is_some(), expected[start + j], "{algorithm} edge {}", start + j);
            }
            start += lanes;
        }
    }
}

#[test]
fn randomized_batches_are_bit_identical() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..500 {
        let n = 9;
        let xs: Vec<f64> = (0..n).map(|_| rng.gen_range(-10.0..10.0)).collect();
        let ys: Vec<f64> = (0..n).map(|_| rng.gen_range(-10.0..10.0)).collect();
        let b = Polyline::from_xy(xs, ys).unwrap();
        let a1 = p(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
        let a2 = p(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
        for algorithm in usable_algorithms() {
            let got = edge_intersect_batch(a1, a2, &b, 0, algorithm).unwrap();
            for (i, lane) in got.iter().enumerate() {
                let want = scalar_lane(a1, a2, &b, i);
                assert_eq!(lane.is_some(), want.is_some(), "{algorithm} lane {i}");
                if let (Some(g), Some(w)) = (lane, want) {
                    assert_eq!(g.t.to_bits(), w.t.to_bits());
                    assert_eq!(g.u.to_bits(), w.u.to_bits());
                    assert_eq!(g.point.x.to_bits(), w.point.x.to_bits());
                    assert_eq!(g.point.y.to_bits(), w.point.y.to_bits());
                }
            }
        }
    }
}

#[test]
fn batch_rejects_short_window() {
    let b = polyline(&[0.0, 1.0], &[0.0, 1.0]);
    // One edge fits a scalar batch, nothing wider.
    assert!(edge_intersect_batch(p(0.0, 1.0), p(1.0, 0.0), &b, 0, Algorithm::Scalar).is_ok());
    assert_eq!(
        edge_intersect_batch(p(0.0, 1.0), p(1.0, 0.0), &b, 1, Algorithm::Scalar),
        Err(GeomError::EdgeRange {
            start: 1,
            lanes: 1,
            vertices: 2
        })
    );
    for algorithm in usable_algorithms() {
        let lanes = select_kernel(algorithm).unwrap().lanes();
        if lanes > 1 {
            assert!(matches!(
                edge_intersect_batch(p(0.0, 1.0), p(1.0, 0.0), &b, 0, algorithm),
                Err(GeomError::EdgeRange { .. })
            ));
        }
    }
}

#[test]
fn overflowing_window_reports_cleanly() {
    let b = polyline(&[0.0, 1.0], &[0.0, 1.0]);
    let err = edge_intersect_batch(p(0.0, 1.0), p(1.0, 0.0), &b, usize::MAX, Algorithm::Scalar)
        .unwrap_err();
    assert_eq!(
        err,
        GeomError::EdgeRange {
            start: usize::MAX,
            lanes: 1,
            vertices: 2
        }
    );
    assert!(err.to_string().contains("runs past 2 vertices"));
}

#[test]
fn polygons_cross_at_expected_points() {
    // Two overlapping squares, the second open (wrap edge implicit).
    let a = Polygon::from_points(&[
        p(0.0, 0.0),
        p(10.0, 0.0),
        p(10.0, 10.0),
        p(0.0, 10.0),
        p(0.0, 0.0),
    ]);
    let b = Polygon::from_points(&[p(5.0, 5.0), p(15.0, 5.0), p(15.0, 15.0), p(5.0, 15.0)]);
    for algorithm in usable_algorithms() {
        let hits = find_all_intersections(&a, &b, algorithm).unwrap();
        let pairs: Vec<(usize, usize)> = hits.iter().map(|h| (h.edge_a, h.edge_b)).collect();
        // a's right side meets b's bottom; a's top meets b's left (the wrap edge).
        assert_eq!(pairs, vec![(1, 0), (2, 3)], "{algorithm}");
        assert_eq!(hits[0].hit.point, p(10.0, 5.0));
        assert_eq!(hits[1].hit.point, p(5.0, 10.0));
    }
}

#[test]
fn polygon_sweep_matches_scalar_on_random_rings() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..20 {
        let ring = |rng: &mut StdRng, n: usize| -> Polygon {
            (0..n)
                .map(|_| p(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)))
                .collect::<Polyline>()
                .into()
        };
        let na = rng.gen_range(3..30);
        let nb = rng.gen_range(3..30);
        let a = ring(&mut rng, na);
        let b = ring(&mut rng, nb);
        let reference = find_all_intersections(&a, &b, Algorithm::Scalar).unwrap();
        for algorithm in usable_algorithms() {
            let got = find_all_intersections(&a, &b, algorithm).unwrap();
            assert_eq!(got, reference, "{algorithm}");
        }
    }
}
