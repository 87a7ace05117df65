//! Point and structure-of-arrays polyline.
//!
//! - `Point`: plain `(x, y)` value.
//! - `Polyline`: parallel `x`/`y` coordinate vectors. The batched kernels load
//!   `lanes` consecutive coordinates straight out of `xs()`/`ys()`, so the
//!   layout is part of the contract, not an implementation detail.
//!
//! Invariant: `xs().len() == ys().len()`. Fields are private and every
//! constructor/mutator keeps the two sequences in lockstep.

use nalgebra::Vector2;

use crate::error::GeomError;

/// A 2D point with double precision coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dist_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl From<Vector2<f64>> for Point {
    #[inline]
    fn from(v: Vector2<f64>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Point> for Vector2<f64> {
    #[inline]
    fn from(p: Point) -> Self {
        p.to_vector()
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Polyline in structure-of-arrays layout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyline {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Polyline {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
        }
    }

    /// Build from already-separated coordinate sequences.
    pub fn from_xy(x: Vec<f64>, y: Vec<f64>) -> Result<Self, GeomError> {
        if x.len() != y.len() {
            return Err(GeomError::invalid(format!(
                "coordinate sequences differ in length ({} x vs {} y)",
                x.len(),
                y.len()
            )));
        }
        Ok(Self { x, y })
    }

    pub fn from_points(points: &[Point]) -> Self {
        points.iter().copied().collect()
    }

    #[inline]
    pub fn push(&mut self, x: f64, y: f64) {
        self.x.push(x);
        self.y.push(y);
    }

    #[inline]
    pub fn push_point(&mut self, p: Point) {
        self.push(p.x, p.y);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Point at index `i`. Panics if out of bounds, like slice indexing.
    #[inline]
    pub fn point(&self, i: usize) -> Point {
        Point::new(self.x[i], self.y[i])
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<Point> {
        Some(Point::new(*self.x.get(i)?, *self.y.get(i)?))
    }

    #[inline]
    pub fn first(&self) -> Option<Point> {
        self.get(0)
    }

    #[inline]
    pub fn last(&self) -> Option<Point> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    #[inline]
    pub fn xs(&self) -> &[f64] {
        &self.x
    }

    #[inline]
    pub fn ys(&self) -> &[f64] {
        &self.y
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.x
            .iter()
            .zip(self.y.iter())
            .map(|(&x, &y)| Point::new(x, y))
    }

    pub fn to_points(&self) -> Vec<Point> {
        self.iter().collect()
    }

    /// Keep only the points whose flag is set; `keep.len()` must equal `len()`.
    pub(crate) fn filter_kept(&self, keep: &[bool]) -> Polyline {
        debug_assert_eq!(keep.len(), self.len());
        let kept = keep.iter().filter(|&&k| k).count();
        let mut out = Polyline::with_capacity(kept);
        for (i, &k) in keep.iter().enumerate() {
            if k {
                out.push(self.x[i], self.y[i]);
            }
        }
        out
    }

    /// Reverse point order in place.
    pub fn reverse(&mut self) {
        self.x.reverse();
        self.y.reverse();
    }

    /// Split into the raw coordinate vectors.
    pub fn into_xy(self) -> (Vec<f64>, Vec<f64>) {
        (self.x, self.y)
    }
}

impl FromIterator<Point> for Polyline {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut out = Polyline::with_capacity(iter.size_hint().0);
        for p in iter {
            out.push_point(p);
        }
        out
    }
}

impl Extend<Point> for Polyline {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        for p in iter {
            self.push_point(p);
        }
    }
}

impl From<Vec<Point>> for Polyline {
    fn from(points: Vec<Point>) -> Self {
        Self::from_points(&points)
    }
}
