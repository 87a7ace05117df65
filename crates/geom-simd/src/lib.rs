//! 2D geometry kernels with runtime SIMD dispatch.
//!
//! Contents
//! - `simplify`: Douglas-Peucker polyline reduction over a structure-of-arrays
//!   [`Polyline`], with batched farthest-point search per vector backend.
//! - `intersect`: parametric segment intersection, batched against runs of
//!   consecutive edges, and all-pairs polygon edge crossings.
//! - `polygon`: signed area, orientation, centroid, containment, closure.
//! - `caps` / `kernel`: CPU probing and backend resolution.
//! - `rand`: reproducible polylines and polygons for benches and tests.
//!
//! Backend policy
//! - A vector kernel is compiled only when its cargo feature is on and the
//!   target architecture matches; it runs only when the CPU reports it.
//! - Every vector kernel reproduces the scalar result: same kept indices,
//!   same intersection booleans, same bits for reported parameters.

pub mod caps;
mod cfg;
pub mod error;
pub mod intersect;
pub mod kernel;
pub mod polygon;
pub mod rand;
pub mod simplify;
pub mod types;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use caps::{get_capabilities, SimdCapabilities};
pub use error::GeomError;
pub use intersect::{
    edge_intersect, edge_intersect_batch, find_all_intersections, EdgeIntersection,
    IntersectionHit,
};
pub use kernel::{compiled_kernels, select_kernel, Algorithm, Kernel};
pub use polygon::{Polygon, PolygonWithHoles};
pub use simplify::{farthest_point, simplify, simplify_points, Farthest};
pub use types::{Point, Polyline};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::intersect::{edge_intersect, find_all_intersections, EdgeIntersection};
    pub use crate::kernel::Algorithm;
    pub use crate::polygon::{Polygon, PolygonWithHoles};
    pub use crate::rand::{
        draw_polygon_radial, random_walk, RadialCfg, ReplayToken, VertexCount, WalkCfg,
    };
    pub use crate::simplify::simplify;
    pub use crate::types::{Point, Polyline};
    pub use crate::GeomError;
}
