//! Half-edge data structure mesh representation.

use nalgebra::Point3;

/// A half-edge: a directed edge bounding exactly one face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfEdge {
    /// Index of the vertex this half-edge originates from.
    pub source: u32,
    /// Index of the face adjacent to this half-edge.
    pub face: u32,
    /// Index of the next half-edge around the same face.
    pub successor: u32,
}

/// A vertex in a [`Heds`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    /// An arbitrary half-edge pointing into this vertex.
    pub in_half_edge: u32,
    /// Optional index into data external to the mesh.
    pub data: Option<u32>,
}

/// A face in a [`Heds`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// An arbitrary half-edge on this face's outer boundary.
    pub half_edge: u32,
    /// Index of the first hole in this face, if any.
    pub hole: Option<u32>,
    /// Optional index into data external to the mesh.
    pub data: Option<u32>,
}

/// A hole in a face's interior boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hole {
    /// An arbitrary half-edge on this hole's boundary.
    pub half_edge: u32,
    /// Index of the next hole in the same face, if any.
    pub successor: Option<u32>,
}

/// A half-edge mesh: plain storage for half-edges, vertices, faces, and
/// holes, with no invariants enforced or operations defined beyond
/// construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Heds {
    pub half_edges: Vec<HalfEdge>,
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
    pub holes: Vec<Hole>,
}

impl Heds {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }
}
