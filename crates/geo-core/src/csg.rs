//! Constructive solid geometry: boolean combination of polyhedral solids
//! via binary space partitioning.

use std::f32::consts::PI;
use std::io::Write;
use std::ops::{Add, Mul, Sub};

use nalgebra::{Point3, Vector3};

use crate::bsp::BspTree;
use crate::error::GeoError;
use crate::polygon::Polygon;
use crate::Rectangle;

/// A solid represented as a flat bag of polygons, with boolean operations
/// implemented by building temporary [`BspTree`]s.
///
/// `Bsp` itself carries no tree structure between operations: each of
/// `union`/`subtract`/`intersect` builds a pair of trees from its operand's
/// polygons, combines them, and flattens the result back into a polygon
/// list. This mirrors the reference CSG formulation, where a BSP tree is a
/// disposable intermediate used only to answer "is this polygon fragment
/// inside the other solid?", not a persistent representation of the solid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bsp {
    polygons: Vec<Polygon>,
}

impl Bsp {
    /// Wraps a flat list of polygons as a solid, with no further processing.
    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    /// Returns the polygons making up this solid's boundary.
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Returns the CSG union `self ∪ other`.
    pub fn union(&self, other: &Bsp) -> Bsp {
        log::debug!(
            "bsp union: {} polygons with {} polygons",
            self.polygons.len(),
            other.polygons.len()
        );
        let mut a = BspTree::from_polygons(self.polygons.clone());
        let mut b = BspTree::from_polygons(other.polygons.clone());
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.merge(b.collect_polygons());
        Bsp::from_polygons(a.collect_polygons())
    }

    /// Returns the CSG difference `self − other`.
    pub fn subtract(&self, other: &Bsp) -> Bsp {
        log::debug!(
            "bsp subtract: {} polygons with {} polygons",
            self.polygons.len(),
            other.polygons.len()
        );
        let mut a = BspTree::from_polygons(self.polygons.clone());
        let mut b = BspTree::from_polygons(other.polygons.clone());
        a.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.merge(b.collect_polygons());
        a.invert();
        Bsp::from_polygons(a.collect_polygons())
    }

    /// Returns the CSG intersection `self ∩ other`.
    pub fn intersect(&self, other: &Bsp) -> Bsp {
        log::debug!(
            "bsp intersect: {} polygons with {} polygons",
            self.polygons.len(),
            other.polygons.len()
        );
        let mut a = BspTree::from_polygons(self.polygons.clone());
        let mut b = BspTree::from_polygons(other.polygons.clone());
        a.invert();
        b.clip_to(&a);
        b.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        a.merge(b.collect_polygons());
        a.invert();
        Bsp::from_polygons(a.collect_polygons())
    }

    /// Returns a copy of this solid with every face flipped, turning it
    /// inside out (swaps which side is considered solid).
    pub fn inverse(&self) -> Bsp {
        Bsp::from_polygons(self.polygons.iter().map(Polygon::flipped).collect())
    }

    /// Writes this solid to an ASCII STL file, fan-triangulating every
    /// polygon and computing a flat per-triangle normal.
    pub fn save_stl<W: Write>(&self, writer: &mut W) -> Result<(), GeoError> {
        writeln!(writer, "solid geo_core")?;
        for polygon in &self.polygons {
            let verts = polygon.vertices();
            for i in 2..verts.len() {
                let (a, b, c) = (verts[0], verts[i - 1], verts[i]);
                let normal = (b - a).cross(&(c - a));
                let normal = normal
                    .try_normalize(f32::EPSILON)
                    .unwrap_or(Vector3::zeros());
                writeln!(
                    writer,
                    "  facet normal {} {} {}",
                    normal.x, normal.y, normal.z
                )?;
                writeln!(writer, "    outer loop")?;
                for v in [a, b, c] {
                    writeln!(writer, "      vertex {} {} {}", v.x, v.y, v.z)?;
                }
                writeln!(writer, "    endloop")?;
                writeln!(writer, "  endfacet")?;
            }
        }
        writeln!(writer, "endsolid geo_core")?;
        Ok(())
    }

    /// Builds an axis-aligned cuboid centered at `center` with the given
    /// per-axis half-extents.
    pub fn cube(center: Point3<f32>, radius: Vector3<f32>) -> Bsp {
        const FACES: [([usize; 4], [f32; 3]); 6] = [
            ([0, 4, 6, 2], [-1.0, 0.0, 0.0]),
            ([1, 3, 7, 5], [1.0, 0.0, 0.0]),
            ([0, 1, 5, 4], [0.0, -1.0, 0.0]),
            ([2, 6, 7, 3], [0.0, 1.0, 0.0]),
            ([0, 2, 3, 1], [0.0, 0.0, -1.0]),
            ([4, 5, 7, 6], [0.0, 0.0, 1.0]),
        ];

        let corner = |i: usize| {
            Point3::new(
                center.x + radius.x * if i & 1 != 0 { 1.0 } else { -1.0 },
                center.y + radius.y * if i & 2 != 0 { 1.0 } else { -1.0 },
                center.z + radius.z * if i & 4 != 0 { 1.0 } else { -1.0 },
            )
        };

        let polygons = FACES
            .iter()
            .map(|(indices, _normal)| {
                let rectangle = Rectangle::from_corners(
                    corner(indices[0]),
                    corner(indices[1]),
                    corner(indices[2]),
                    corner(indices[3]),
                );
                Polygon::from(rectangle)
            })
            .collect();

        Bsp::from_polygons(polygons)
    }

    /// Builds a UV sphere centered at `center`, subdivided into `slices`
    /// longitude bands and `stacks` latitude bands.
    pub fn sphere(center: Point3<f32>, radius: f32, slices: u32, stacks: u32) -> Bsp {
        let vertex = |i: f32, j: f32| {
            let theta = i * PI * 2.0;
            let phi = j * PI;
            let direction = Vector3::new(
                theta.cos() * phi.sin(),
                phi.cos(),
                theta.sin() * phi.sin(),
            );
            center + direction * radius
        };

        let mut polygons = Vec::new();
        for i in 0..slices {
            for j in 0..stacks {
                let mut verts = vec![vertex(i as f32 / slices as f32, j as f32 / stacks as f32)];
                if j > 0 {
                    verts.push(vertex(
                        (i + 1) as f32 / slices as f32,
                        j as f32 / stacks as f32,
                    ));
                }
                if j < stacks - 1 {
                    verts.push(vertex(
                        (i + 1) as f32 / slices as f32,
                        (j + 1) as f32 / stacks as f32,
                    ));
                }
                verts.push(vertex(
                    i as f32 / slices as f32,
                    (j + 1) as f32 / stacks as f32,
                ));
                polygons.push(Polygon::new(verts));
            }
        }
        Bsp::from_polygons(polygons)
    }

    /// Builds a cylinder running from `start` to `end` with the given
    /// radius, subdivided into `slices` wedges around its axis.
    pub fn cylinder(start: Point3<f32>, end: Point3<f32>, radius: f32, slices: u32) -> Bsp {
        let ray = end - start;
        let axis_z = ray.normalize();
        let is_y = axis_z.y.abs() > 0.5;
        let seed = Vector3::new(if is_y { 1.0 } else { 0.0 }, if is_y { 0.0 } else { 1.0 }, 0.0);
        let axis_x = seed.cross(&axis_z).normalize();
        let axis_y = axis_x.cross(&axis_z).normalize();

        let point = |stack: f32, slice: f32| {
            let angle = slice * PI * 2.0;
            let out = axis_x * angle.cos() + axis_y * angle.sin();
            start + ray * stack + out * radius
        };

        let mut polygons = Vec::with_capacity(slices as usize * 3);
        for i in 0..slices {
            let t0 = i as f32 / slices as f32;
            let t1 = (i + 1) as f32 / slices as f32;
            polygons.push(Polygon::new(vec![start, point(0.0, t0), point(0.0, t1)]));
            polygons.push(Polygon::new(vec![
                point(0.0, t1),
                point(0.0, t0),
                point(1.0, t0),
                point(1.0, t1),
            ]));
            polygons.push(Polygon::new(vec![end, point(1.0, t1), point(1.0, t0)]));
        }
        Bsp::from_polygons(polygons)
    }
}

impl Add for Bsp {
    type Output = Bsp;
    fn add(self, rhs: Bsp) -> Bsp {
        self.union(&rhs)
    }
}

impl Sub for Bsp {
    type Output = Bsp;
    fn sub(self, rhs: Bsp) -> Bsp {
        self.subtract(&rhs)
    }
}

impl Mul for Bsp {
    type Output = Bsp;
    fn mul(self, rhs: Bsp) -> Bsp {
        self.intersect(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_volume_bound(cube: &Bsp) -> (Point3<f32>, Point3<f32>) {
        let mut min = Point3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Point3::new(f32::MIN, f32::MIN, f32::MIN);
        for polygon in cube.polygons() {
            for v in polygon.vertices() {
                min = Point3::new(min.x.min(v.x), min.y.min(v.y), min.z.min(v.z));
                max = Point3::new(max.x.max(v.x), max.y.max(v.y), max.z.max(v.z));
            }
        }
        (min, max)
    }

    #[test]
    fn cube_has_six_quad_faces() {
        let cube = Bsp::cube(Point3::origin(), Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(cube.polygons().len(), 6);
        assert!(cube.polygons().iter().all(|p| p.len() == 4));
    }

    #[test]
    fn union_of_overlapping_cubes_bounds_both() {
        let a = Bsp::cube(Point3::origin(), Vector3::new(1.0, 1.0, 1.0));
        let b = Bsp::cube(Point3::new(0.5, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0));
        let u = a.union(&b);
        let (min, max) = cube_volume_bound(&u);
        assert!(min.x <= -1.0 + 1e-3);
        assert!(max.x >= 1.5 - 1e-3);
        assert!(!u.polygons().is_empty());
    }

    #[test]
    fn subtract_whole_cube_from_itself_is_empty() {
        let a = Bsp::cube(Point3::origin(), Vector3::new(1.0, 1.0, 1.0));
        let b = Bsp::cube(Point3::origin(), Vector3::new(1.0, 1.0, 1.0));
        let diff = a.subtract(&b);
        assert!(diff.polygons().is_empty());
    }

    #[test]
    fn intersect_disjoint_cubes_is_empty() {
        let a = Bsp::cube(Point3::new(-5.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0));
        let b = Bsp::cube(Point3::new(5.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0));
        let intersection = a.intersect(&b);
        assert!(intersection.polygons().is_empty());
    }

    #[test]
    fn inverse_is_involutive_in_polygon_count() {
        let cube = Bsp::cube(Point3::origin(), Vector3::new(1.0, 1.0, 1.0));
        let double_inverse = cube.inverse().inverse();
        assert_eq!(cube.polygons().len(), double_inverse.polygons().len());
    }

    #[test]
    fn sphere_and_cylinder_produce_nonempty_meshes() {
        let sphere = Bsp::sphere(Point3::origin(), 1.0, 8, 6);
        assert!(!sphere.polygons().is_empty());
        let cylinder = Bsp::cylinder(Point3::new(0.0, -1.0, 0.0), Point3::new(0.0, 1.0, 0.0), 0.5, 8);
        assert!(!cylinder.polygons().is_empty());
    }

    #[test]
    fn save_stl_writes_one_facet_per_fan_triangle() {
        let cube = Bsp::cube(Point3::origin(), Vector3::new(1.0, 1.0, 1.0));
        let mut out = Vec::new();
        cube.save_stl(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        // Each quad face fans into 2 triangles, 6 faces -> 12 facets.
        assert_eq!(text.matches("facet normal").count(), 12);
        assert!(text.starts_with("solid geo_core"));
        assert!(text.trim_end().ends_with("endsolid geo_core"));
    }
}
