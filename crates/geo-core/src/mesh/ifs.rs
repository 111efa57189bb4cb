//! Indexed face set mesh representation.

use nalgebra::Point3;

/// A vertex in an [`Ifs`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    /// Optional index into data external to the mesh.
    pub data: Option<u32>,
}

/// A triangle in an [`Ifs`], referencing 3 vertices in counter-clockwise
/// order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [u32; 3],
    /// Optional index into data external to the mesh.
    pub data: Option<u32>,
}

/// An indexed face set: a flat vertex buffer plus triangles referencing it
/// by index, with no invariants enforced or operations defined beyond
/// construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ifs {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<Triangle>,
}

impl Ifs {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }
}
