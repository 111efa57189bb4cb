//! 2D Delaunay triangulation via recursive divide-and-conquer.

mod engine;

use engine::RawTriangle;

use crate::error::GeoError;
use crate::vec2::Vec2;

/// Strategy used to stitch two sub-triangulations back together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMethod {
    /// Stitch the hulls together with no regard for the Delaunay criterion.
    /// Callers that want a Delaunay triangulation follow this with
    /// [`Triangulation::enforce_delaunay`].
    Arbitrary,
    /// Merge while flipping newly-created edges as they're made. Not
    /// implemented.
    Flip,
    /// Merge directly into a Delaunay result without a separate flip pass.
    /// Not implemented.
    Delaunay,
}

/// Axis (or alternation) used to split a vertex range during
/// divide-and-conquer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutMethod {
    /// Split on an imaginary vertical line; vertices are pre-sorted x then y.
    Vertical,
    /// Split on an imaginary horizontal line. Not implemented.
    Horizontal,
    /// Alternate between vertical and horizontal cuts by recursion depth.
    /// Not implemented.
    Alternating,
}

/// A triangle produced by a [`Triangulation`].
///
/// `Existent` triangles have 3 real vertices and are part of the interior
/// (or, pre-enforcement, an intermediate state of) the triangulation.
/// `Ghost` triangles sit on the hull: they carry 2 real vertices plus the
/// neighbor across the hull edge, and the two ghost neighbors to either
/// side of them around the hull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Triangle {
    Existent { v: [u32; 3], n: [u32; 3] },
    Ghost { v: [u32; 2], n: [u32; 3] },
}

impl Triangle {
    fn from_raw(raw: &RawTriangle) -> Self {
        match raw.v[2] {
            Some(c) => Triangle::Existent {
                v: [raw.v[0].unwrap() as u32, raw.v[1].unwrap() as u32, c as u32],
                n: [raw.n[0] as u32, raw.n[1] as u32, raw.n[2] as u32],
            },
            None => Triangle::Ghost {
                v: [raw.v[0].unwrap() as u32, raw.v[1].unwrap() as u32],
                n: [raw.n[0] as u32, raw.n[1] as u32, raw.n[2] as u32],
            },
        }
    }

    /// Returns `true` if this is a hull sentinel triangle.
    pub fn is_ghost(&self) -> bool {
        matches!(self, Triangle::Ghost { .. })
    }

    /// Returns this triangle's neighbor indices.
    pub fn neighbors(&self) -> [u32; 3] {
        match self {
            Triangle::Existent { n, .. } => *n,
            Triangle::Ghost { n, .. } => *n,
        }
    }
}

/// A (potentially constrained) 2D triangulation, built by recursive
/// divide-and-conquer with ghost triangles sentineling the hull.
///
/// Duplicate vertices are discarded during [`Self::triangulate`], and
/// vertex order is not preserved; use [`Self::vertices`] after
/// triangulating to see the order triangle indices refer to.
#[derive(Debug, Clone, Default)]
pub struct Triangulation {
    vertices: Vec<Vec2>,
    segments: Vec<(u32, u32)>,
    triangles: Vec<RawTriangle>,
}

impl Triangulation {
    /// Creates a triangulation task from a vertex list and an optional set
    /// of constraint segments (as pairs of indices into `vertices`).
    pub fn new(vertices: Vec<Vec2>, segments: Vec<(u32, u32)>) -> Self {
        Self {
            vertices,
            segments,
            triangles: Vec::new(),
        }
    }

    /// Returns the deduplicated, sorted vertices (meaningful only after
    /// [`Self::triangulate`] has run).
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Returns the constraint segments, remapped onto the deduplicated
    /// vertex indices (meaningful only after [`Self::triangulate`] has run).
    pub fn segments(&self) -> &[(u32, u32)] {
        &self.segments
    }

    /// Returns the triangles of the current triangulation.
    pub fn triangles(&self) -> Vec<Triangle> {
        self.triangles.iter().map(Triangle::from_raw).collect()
    }

    /// Triangulates the vertices using the given merge and cut strategies.
    ///
    /// Only `MergeMethod::Arbitrary` and `CutMethod::Vertical` are
    /// implemented; any other combination is rejected with
    /// [`GeoError::UnsupportedMode`] rather than silently approximated.
    pub fn triangulate(
        &mut self,
        merge_method: MergeMethod,
        cut_method: CutMethod,
    ) -> Result<(), GeoError> {
        if merge_method != MergeMethod::Arbitrary {
            return Err(GeoError::UnsupportedMode(format!("{merge_method:?} merge")));
        }
        if cut_method != CutMethod::Vertical {
            return Err(GeoError::UnsupportedMode(format!("{cut_method:?} cut")));
        }

        self.triangles.clear();
        self.sort();

        log::debug!("triangulating {} vertices", self.vertices.len());

        if self.vertices.len() < 2 {
            return Ok(());
        }

        engine::divide_and_conquer(&mut self.triangles, &self.vertices, 0, self.vertices.len());
        Ok(())
    }

    /// Flips edges until the triangulation is (fully) Delaunay.
    ///
    /// A no-op if [`Self::triangulate`] produced no triangles. Returns
    /// [`GeoError::InvariantViolation`] (rather than panicking) if called on
    /// triangles that are not a complete triangulation of `self.vertices`.
    pub fn enforce_delaunay(&mut self) -> Result<(), GeoError> {
        log::debug!("enforcing delaunay over {} triangles", self.triangles.len());
        engine::enforce_delaunay(&mut self.triangles, &self.vertices)
    }

    /// Sorts vertices x-then-y increasing, discards duplicates, and remaps
    /// `segments` onto the new indices.
    fn sort(&mut self) {
        if self.vertices.len() < 2 {
            return;
        }

        let mut enumerated: Vec<(usize, Vec2)> = self.vertices.iter().copied().enumerate().collect();
        enumerated.sort_by(|(_, a), (_, b)| {
            a.x.partial_cmp(&b.x)
                .unwrap()
                .then(a.y.partial_cmp(&b.y).unwrap())
        });

        let mut indices = vec![0u32; enumerated.len()];
        let mut deduped = Vec::with_capacity(enumerated.len());
        deduped.push(enumerated[0].1);
        indices[enumerated[0].0] = 0;
        for &(old_index, vertex) in &enumerated[1..] {
            if *deduped.last().unwrap() == vertex {
                indices[old_index] = (deduped.len() - 1) as u32;
                continue;
            }
            indices[old_index] = deduped.len() as u32;
            deduped.push(vertex);
        }
        self.vertices = deduped;

        self.segments = self
            .segments
            .iter()
            .map(|&(a, b)| {
                let (a, b) = (indices[a as usize], indices[b as usize]);
                (a.min(b), a.max(b))
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangulate(vertices: Vec<Vec2>) -> Triangulation {
        let mut t = Triangulation::new(vertices, vec![]);
        t.triangulate(MergeMethod::Arbitrary, CutMethod::Vertical).unwrap();
        t
    }

    #[test]
    fn two_points_make_a_digon() {
        let t = triangulate(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)]);
        assert_eq!(t.triangles().len(), 2);
        assert!(t.triangles().iter().all(Triangle::is_ghost));
    }

    #[test]
    fn three_collinear_points_stay_ghosts() {
        let t = triangulate(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 0.0),
        ]);
        assert!(t.triangles().iter().all(Triangle::is_ghost));
    }

    #[test]
    fn three_ccw_points_make_one_existent_triangle() {
        let t = triangulate(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
        ]);
        let existent: Vec<_> = t.triangles().into_iter().filter(|t| !t.is_ghost()).collect();
        assert_eq!(existent.len(), 1);
    }

    #[test]
    fn duplicate_vertices_are_discarded() {
        let t = triangulate(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
        ]);
        assert_eq!(t.vertices().len(), 2);
    }

    #[test]
    fn unsupported_merge_method_is_rejected() {
        let mut t = Triangulation::new(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)], vec![]);
        assert!(t.triangulate(MergeMethod::Flip, CutMethod::Vertical).is_err());
    }

    #[test]
    fn unsupported_cut_method_is_rejected() {
        let mut t = Triangulation::new(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)], vec![]);
        assert!(t.triangulate(MergeMethod::Arbitrary, CutMethod::Horizontal).is_err());
    }

    #[test]
    fn square_enforce_delaunay_flips_to_shorter_diagonal() {
        // A unit square split along its long diagonal by the divide step;
        // enforce_delaunay should leave a valid triangulation of 2 triangles.
        let mut t = Triangulation::new(
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(1.0, 1.0),
            ],
            vec![],
        );
        t.triangulate(MergeMethod::Arbitrary, CutMethod::Vertical).unwrap();
        t.enforce_delaunay().unwrap();
        let existent: Vec<_> = t.triangles().into_iter().filter(|t| !t.is_ghost()).collect();
        assert_eq!(existent.len(), 2);
    }

    use proptest::prelude::*;
    use crate::predicates::{in_circle, Position};

    /// Points on an integer grid, small enough to keep circumcircle tests
    /// well away from float precision noise while still exercising
    /// divide-and-conquer's merge over several vertical cuts.
    fn grid_points() -> impl Strategy<Value = Vec<Vec2>> {
        proptest::collection::vec((0i32..8, 0i32..8), 4..12)
            .prop_map(|pts| pts.into_iter().map(|(x, y)| Vec2::new(x as f64, y as f64)).collect())
    }

    proptest! {
        #[test]
        fn enforce_delaunay_leaves_no_vertex_inside_any_circumcircle(points in grid_points()) {
            let mut t = Triangulation::new(points, vec![]);
            t.triangulate(MergeMethod::Arbitrary, CutMethod::Vertical).unwrap();
            t.enforce_delaunay().unwrap();

            let existent: Vec<_> = t
                .triangles()
                .into_iter()
                .filter_map(|tri| match tri {
                    Triangle::Existent { v, .. } => Some(v),
                    Triangle::Ghost { .. } => None,
                })
                .collect();

            for v in &existent {
                let (a, b, c) = (
                    t.vertices()[v[0] as usize],
                    t.vertices()[v[1] as usize],
                    t.vertices()[v[2] as usize],
                );
                for (i, d) in t.vertices().iter().enumerate() {
                    if v.contains(&(i as u32)) {
                        continue;
                    }
                    prop_assert_ne!(in_circle(a, b, c, *d), Position::Inside);
                }
            }
        }
    }
}
