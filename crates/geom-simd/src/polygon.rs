//! Simple polygons over the SoA polyline.
//!
//! Conventions
//! - A polygon is *closed* when its first and last vertices coincide within
//!   a squared distance of 1e-10. Closure is optional; every operation walks
//!   the same closure-aware edge set (`edges`), so an explicitly closed
//!   polygon never double-counts its duplicated vertex.
//! - Counter-clockwise winding has positive signed area.
//! - Fewer than three vertices is not an error: area is 0, nothing is inside.
//!
//! Boundary rule for `contains`
//! - Half-open crossing test: an edge counts when exactly one endpoint lies
//!   strictly above the point's horizontal and the crossing lies strictly to
//!   the right of the point. Consequence for an axis-aligned box: points on
//!   the left or bottom side are inside, points on the right or top side are
//!   outside. Adjacent polygons sharing an edge therefore never both claim a
//!   point on it.

use crate::cfg::{CENTROID_AREA_EPS, CLOSED_EPS};
use crate::types::{Point, Polyline};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    vertices: Polyline,
}

impl Polygon {
    pub fn new(vertices: Polyline) -> Self {
        Self { vertices }
    }

    pub fn from_points(points: &[Point]) -> Self {
        Self::new(Polyline::from_points(points))
    }

    #[inline]
    pub fn vertices(&self) -> &Polyline {
        &self.vertices
    }

    pub fn into_vertices(self) -> Polyline {
        self.vertices
    }

    /// Number of stored vertices, including a closing duplicate if present.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        match (self.vertices.first(), self.vertices.last()) {
            (Some(first), Some(last)) if self.len() >= 2 => first.dist_sq(last) < CLOSED_EPS,
            _ => false,
        }
    }

    /// Edge from the last vertex back to the first, when it is not stored.
    ///
    /// Present for open polygons with at least three vertices.
    pub fn wrap_edge(&self) -> Option<(Point, Point)> {
        if self.len() < 3 || self.is_closed() {
            return None;
        }
        Some((self.vertices.last()?, self.vertices.first()?))
    }

    /// Closure-aware edges: the stored consecutive pairs, then the wrap edge
    /// if the polygon is open. Empty for fewer than two vertices.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let run = self.len().saturating_sub(1);
        (0..run)
            .map(move |i| (self.vertices.point(i), self.vertices.point(i + 1)))
            .chain(self.wrap_edge())
    }

    /// Shoelace sum; positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f64 {
        if self.len() < 3 {
            return 0.0;
        }
        let mut twice = 0.0;
        for (p, q) in self.edges() {
            twice += p.x * q.y;
            twice -= q.x * p.y;
        }
        twice * 0.5
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    #[inline]
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Area centroid; `None` for fewer than three vertices or vanishing area.
    pub fn centroid(&self) -> Option<Point> {
        if self.len() < 3 {
            return None;
        }
        let mut a = 0.0;
        let mut cx = 0.0;
        let mut cy = 0.0;
        for (p, q) in self.edges() {
            let cross = p.x * q.y - q.x * p.y;
            a += cross;
            cx += (p.x + q.x) * cross;
            cy += (p.y + q.y) * cross;
        }
        if a.abs() < CENTROID_AREA_EPS {
            return None;
        }
        // a is twice the signed area: c = Σ / (6 A) = Σ / (3 a)
        Some(Point::new(cx / (3.0 * a), cy / (3.0 * a)))
    }

    /// Ray-casting parity test (ray towards +x). See the module docs for
    /// points on the boundary.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        if self.len() < 3 {
            return false;
        }
        let mut inside = false;
        for (p, q) in self.edges() {
            if (p.y > py) != (q.y > py) && px < (q.x - p.x) * (py - p.y) / (q.y - p.y) + p.x {
                inside = !inside;
            }
        }
        inside
    }

    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        self.contains(p.x, p.y)
    }

    /// Append a copy of the first vertex unless already closed. Idempotent.
    pub fn close(&mut self) {
        if self.is_closed() {
            return;
        }
        if let Some(first) = self.vertices.first() {
            self.vertices.push_point(first);
        }
    }

    /// Reverse the winding in place.
    pub fn reverse(&mut self) {
        self.vertices.reverse();
    }
}

impl From<Polyline> for Polygon {
    fn from(vertices: Polyline) -> Self {
        Self::new(vertices)
    }
}

/// Outer boundary plus holes.
///
/// Hole winding is not enforced; areas are taken as magnitudes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolygonWithHoles {
    pub outer: Polygon,
    pub holes: Vec<Polygon>,
}

impl PolygonWithHoles {
    pub fn new(outer: Polygon, holes: Vec<Polygon>) -> Self {
        Self { outer, holes }
    }

    /// Outer area minus hole areas.
    pub fn area(&self) -> f64 {
        self.outer.area() - self.holes.iter().map(Polygon::area).sum::<f64>()
    }

    /// Inside the outer ring and inside no hole.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        self.outer.contains(px, py) && !self.holes.iter().any(|h| h.contains(px, py))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(points: &[(f64, f64)]) -> Polygon {
        Polygon::new(points.iter().copied().map(Point::from).collect())
    }

    fn unit_square_closed() -> Polygon {
        poly(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)])
    }

    #[test]
    fn square_area_and_orientation() {
        let mut sq = unit_square_closed();
        assert!(sq.is_closed());
        assert!((sq.signed_area() - 100.0).abs() < 1e-12);
        assert!((sq.area() - 100.0).abs() < 1e-12);
        assert!(sq.is_ccw());
        sq.reverse();
        assert!((sq.signed_area() + 100.0).abs() < 1e-12);
        assert!((sq.area() - 100.0).abs() < 1e-12);
        assert!(!sq.is_ccw());
    }

    #[test]
    fn open_and_closed_agree() {
        let open = poly(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        assert!(!open.is_closed());
        assert_eq!(open.edges().count(), 4);
        assert_eq!(unit_square_closed().edges().count(), 4);
        assert!((open.signed_area() - unit_square_closed().signed_area()).abs() < 1e-12);
    }

    #[test]
    fn triangle_area_and_containment() {
        let tri = poly(&[(0.0, 0.0), (10.0, 0.0), (5.0, 10.0), (0.0, 0.0)]);
        assert!((tri.area() - 50.0).abs() < 1e-12);
        assert!(tri.contains(5.0, 3.0));
        assert!(!tri.contains(0.0, 11.0));
        assert!(!tri.contains(-1.0, 1.0));
    }

    #[test]
    fn reverse_keeps_containment() {
        let mut tri = poly(&[(0.0, 0.0), (10.0, 0.0), (5.0, 10.0)]);
        let points = [(5.0, 3.0), (0.0, 11.0), (9.0, 9.0), (5.0, 0.5)];
        let before: Vec<bool> = points.iter().map(|&(x, y)| tri.contains(x, y)).collect();
        tri.reverse();
        let after: Vec<bool> = points.iter().map(|&(x, y)| tri.contains(x, y)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn degenerate_polygons() {
        let two = poly(&[(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(two.signed_area(), 0.0);
        assert!(!two.contains(0.5, 0.5));
        assert!(!poly(&[(1.0, 1.0)]).is_closed());
        assert!(!Polygon::default().is_closed());
        assert_eq!(Polygon::default().edges().count(), 0);
        assert_eq!(two.edges().count(), 1);
    }

    #[test]
    fn close_is_idempotent() {
        let mut p = poly(&[(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)]);
        p.close();
        assert!(p.is_closed());
        assert_eq!(p.len(), 4);
        p.close();
        assert_eq!(p.len(), 4);
        assert!((p.area() - 6.0).abs() < 1e-12);

        let mut empty = Polygon::default();
        empty.close();
        assert!(empty.is_empty());
    }

    #[test]
    fn boundary_rule_is_half_open() {
        let sq = unit_square_closed();
        assert!(sq.contains(0.0, 5.0)); // left side
        assert!(sq.contains(5.0, 0.0)); // bottom side
        assert!(!sq.contains(10.0, 5.0)); // right side
        assert!(!sq.contains(5.0, 10.0)); // top side
    }

    #[test]
    fn centroid_of_square_and_triangle() {
        let c = unit_square_closed().centroid().unwrap();
        assert!((c.x - 5.0).abs() < 1e-12 && (c.y - 5.0).abs() < 1e-12);
        let mut tri = poly(&[(0.0, 0.0), (6.0, 0.0), (0.0, 3.0)]);
        tri.reverse();
        let c = tri.centroid().unwrap();
        assert!((c.x - 2.0).abs() < 1e-12 && (c.y - 1.0).abs() < 1e-12);
        assert!(poly(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]).centroid().is_none());
    }

    #[test]
    fn holes_subtract_area_and_containment() {
        let outer = unit_square_closed();
        let hole = poly(&[(2.0, 2.0), (2.0, 4.0), (4.0, 4.0), (4.0, 2.0)]);
        let shape = PolygonWithHoles::new(outer, vec![hole]);
        assert!((shape.area() - 96.0).abs() < 1e-12);
        assert!(shape.contains(1.0, 1.0));
        assert!(!shape.contains(3.0, 3.0));
        assert!(!shape.contains(11.0, 1.0));
    }
}
