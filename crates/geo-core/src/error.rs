//! Error types for geo-core operations.

/// Errors produced by the CSG and triangulation engines.
#[derive(thiserror::Error, Debug)]
pub enum GeoError {
    /// A triangulation was asked for a cut or merge strategy that the engine
    /// does not implement (e.g. horizontal/alternating cuts, flip/Delaunay
    /// merges).
    #[error("unsupported triangulation mode: {0}")]
    UnsupportedMode(String),

    /// A step produced a mesh that violates one of the structural
    /// invariants it is supposed to maintain (neighbor consistency, ghost
    /// cycle, etc).
    #[error("triangulation invariant violated: {0}")]
    InvariantViolation(String),

    /// An I/O failure while reading or writing a mesh file.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
