//! Error types for sw3d.

use thiserror::Error;

/// Topology problems detected while building a mesh or skeleton.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Every face needs exactly one color.
    #[error("{colors} colors given for {faces} faces")]
    ColorCountMismatch { colors: usize, faces: usize },

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    FaceIndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    /// An edge references a vertex that does not exist.
    #[error("edge {edge} references vertex {index}, but the mesh has {vertex_count} vertices")]
    EdgeIndexOutOfRange {
        edge: usize,
        index: usize,
        vertex_count: usize,
    },
}

/// Malformed arguments rejected at a call boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A vector argument had the wrong number of components.
    #[error("{what} expects {expected} components, got {actual}")]
    Arity {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A component was NaN or infinite.
    #[error("{what} contains a non-finite component")]
    NonFinite { what: &'static str },

    /// Vertex assignment outside the fixed-size buffer.
    #[error("vertex index {index} out of range for {vertex_count} vertices")]
    VertexIndexOutOfRange { index: usize, vertex_count: usize },
}

/// The main error type for sw3d operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// A specialized Result type for sw3d operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a drawing backend refuses a primitive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("degenerate {primitive}: {reason}")]
    Degenerate {
        primitive: &'static str,
        reason: String,
    },

    #[error("backend failure: {0}")]
    Backend(String),
}

/// Reads exactly three finite components out of a slice.
pub(crate) fn vector3_arg(what: &'static str, values: &[f32]) -> Result<[f32; 3]> {
    let components: [f32; 3] = values.try_into().map_err(|_| ValidationError::Arity {
        what,
        expected: 3,
        actual: values.len(),
    })?;
    if components.iter().any(|c| !c.is_finite()) {
        return Err(ValidationError::NonFinite { what }.into());
    }
    Ok(components)
}
