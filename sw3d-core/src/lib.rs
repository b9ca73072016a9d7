//! SW3D Core Library - Software 3D projection pipeline
//!
//! This library decides what to draw and where: homogeneous vertices,
//! in-place transforms, a yaw/pitch camera, perspective projection and
//! painter's-algorithm face ordering. Pixels are left to a [`Surface`]
//! implementation supplied by the caller.

pub mod depth;
pub mod error;
pub mod geometry;
pub mod point;
pub mod projection;
pub mod render;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use error::{ConfigurationError, DrawError, Error, Result, ValidationError};
pub use geometry::{Edge, Face, Geometry, Mesh, RenderMode, Skeleton};
pub use point::HPoint;
pub use projection::{Camera, CameraSnapshot, Projected, ProjectionConfig, Projector};
pub use render::{render, render_geometry, RenderStats, RenderStyle};
pub use surface::{Color, Surface};
pub use transform::{Transform, Transformable};
