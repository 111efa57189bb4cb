//! Binary space partitioning CSG and 2D Delaunay triangulation.

pub mod bsp;
mod csg;
mod cuttable;
pub mod error;
pub mod mesh;
mod plane;
mod polygon;
mod predicates;
mod rectangle;
mod triangle;
pub mod triangulation;
mod vec2;

pub use bsp::{BspNode, BspTree, BspVisitor, CollectingVisitor, FirstPolygon, FnVisitor, PlaneSelector};
pub use csg::Bsp;
pub use cuttable::Cuttable;
pub use error::GeoError;
pub use plane::{Classification, Plane3D, PlaneSide, PLANE_EPSILON};
pub use polygon::Polygon;
pub use predicates::{in_circle, side, Orientation, Position};
pub use rectangle::Rectangle;
pub use triangle::Triangle;
pub use triangulation::{CutMethod, MergeMethod, Triangulation};
// Note: triangulation::Triangle (the 2D mesh triangle) is deliberately not
// re-exported at the crate root since it would collide with the 3D
// `Triangle` primitive above; refer to it as `triangulation::Triangle`.
pub use vec2::{Vec2, VEC_EQUIV_EPSILON};
