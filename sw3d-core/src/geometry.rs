/// Geometry primitives for 3D rendering
use std::collections::BTreeSet;
use std::fmt;

use crate::error::{ConfigurationError, Result, ValidationError};
use crate::point::HPoint;
use crate::surface::Color;
use crate::transform::Transformable;

/// A pair of vertex indices joined by a line.
pub type Edge = [usize; 2];

/// An ordered ring of vertex indices forming a polygon.
pub type Face = Vec<usize>;

/// How a geometry is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Depth-sorted filled faces.
    Full,
    /// One marker per vertex.
    Dots,
    /// Vertex markers joined by the edge list.
    Wireframe,
}

/// Read access shared by everything the renderer can draw.
///
/// Projection, depth sorting and drawing are written once against this
/// trait; [`Mesh`] and [`Skeleton`] only describe their data.
pub trait Geometry {
    fn name(&self) -> &str;

    fn vertices(&self) -> &[HPoint];

    fn edges(&self) -> &[Edge];

    fn faces(&self) -> &[Face] {
        &[]
    }

    /// One color per face, in face order.
    fn face_colors(&self) -> &[Color] {
        &[]
    }

    fn render_mode(&self) -> RenderMode;
}

/// A polygon mesh with a fixed number of vertices.
#[derive(Debug, Clone)]
pub struct Mesh {
    name: String,
    vertices: Vec<HPoint>,
    edges: Vec<Edge>,
    faces: Vec<Face>,
    colors: Vec<Color>,
    mode: RenderMode,
}

impl Mesh {
    /// Create a mesh with `vertex_count` vertices at the origin.
    ///
    /// Topology is checked before anything is built, so an `Err` leaves no
    /// partially constructed mesh behind. Vertex positions are assigned
    /// afterwards with [`Mesh::set_vertex`].
    pub fn new(
        name: impl Into<String>,
        vertex_count: usize,
        edges: Vec<Edge>,
        faces: Vec<Face>,
        colors: Vec<Color>,
        mode: RenderMode,
    ) -> Result<Self> {
        if colors.len() != faces.len() {
            return Err(ConfigurationError::ColorCountMismatch {
                colors: colors.len(),
                faces: faces.len(),
            }
            .into());
        }
        check_edges(&edges, vertex_count)?;
        for (face, indices) in faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= vertex_count) {
                return Err(ConfigurationError::FaceIndexOutOfRange {
                    face,
                    index,
                    vertex_count,
                }
                .into());
            }
        }

        let mesh = Self {
            name: name.into(),
            vertices: vec![HPoint::origin(); vertex_count],
            edges,
            faces,
            colors,
            mode,
        };
        log::debug!(
            "mesh created: {} ({} vertices, {} faces)",
            mesh.name,
            vertex_count,
            mesh.faces.len()
        );
        Ok(mesh)
    }

    /// The 8-vertex demo cube: x, y in {-1, 1}, z in {0, 10}, grey faces.
    pub fn demo_cube(mode: RenderMode) -> Result<Self> {
        let edges = vec![
            [0, 1],
            [1, 2],
            [2, 3],
            [3, 0],
            [4, 5],
            [5, 6],
            [6, 7],
            [7, 4],
            [0, 4],
            [1, 5],
            [2, 6],
            [3, 7],
        ];
        let faces = vec![
            vec![0, 1, 2, 3],
            vec![4, 5, 6, 7],
            vec![0, 1, 5, 4],
            vec![2, 3, 7, 6],
            vec![0, 3, 7, 4],
            vec![1, 2, 6, 5],
        ];
        let colors = (0..6).map(|i| Color::grey(100 + 10 * i)).collect();

        let mut mesh = Self::new("big_cube", 8, edges, faces, colors, mode)?;
        let corners: [[f32; 3]; 8] = [
            [-1.0, -1.0, 0.0],
            [1.0, -1.0, 0.0],
            [1.0, 1.0, 0.0],
            [-1.0, 1.0, 0.0],
            [-1.0, -1.0, 10.0],
            [1.0, -1.0, 10.0],
            [1.0, 1.0, 10.0],
            [-1.0, 1.0, 10.0],
        ];
        for (slot, corner) in mesh.vertices.iter_mut().zip(corners) {
            *slot = HPoint::from(corner);
        }
        Ok(mesh)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Replace the vertex stored at `index`.
    pub fn set_vertex(&mut self, index: usize, vertex: HPoint) -> Result<()> {
        let vertex_count = self.vertices.len();
        let slot = self
            .vertices
            .get_mut(index)
            .ok_or(ValidationError::VertexIndexOutOfRange {
                index,
                vertex_count,
            })?;
        *slot = vertex;
        Ok(())
    }

    /// Replace a vertex from untyped coordinates: `[x, y, z]` (w = 1) or
    /// `[x, y, z, w]`.
    pub fn try_set_vertex(&mut self, index: usize, coords: &[f32]) -> Result<()> {
        let vertex = match *coords {
            [x, y, z] => HPoint::position(x, y, z),
            [x, y, z, w] => HPoint::new(x, y, z, w),
            _ => {
                return Err(ValidationError::Arity {
                    what: "vertex",
                    expected: 3,
                    actual: coords.len(),
                }
                .into())
            }
        };
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(ValidationError::NonFinite { what: "vertex" }.into());
        }
        self.set_vertex(index, vertex)
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.mode = mode;
    }
}

impl Geometry for Mesh {
    fn name(&self) -> &str {
        &self.name
    }

    fn vertices(&self) -> &[HPoint] {
        &self.vertices
    }

    fn edges(&self) -> &[Edge] {
        &self.edges
    }

    fn faces(&self) -> &[Face] {
        &self.faces
    }

    fn face_colors(&self) -> &[Color] {
        &self.colors
    }

    fn render_mode(&self) -> RenderMode {
        self.mode
    }
}

impl Transformable for Mesh {
    fn vertices_mut(&mut self) -> &mut [HPoint] {
        &mut self.vertices
    }
}

impl fmt::Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A point cloud joined by lines, drawn as a wireframe
#[derive(Debug, Clone)]
pub struct Skeleton {
    points: Vec<[f32; 3]>,
    vertices: Vec<HPoint>,
    edges: Vec<Edge>,
}

impl Skeleton {
    /// Build from points and unordered index pairs.
    ///
    /// Pairs are normalised to `[min, max]` and deduplicated, so `(0, 1)` and
    /// `(1, 0)` name the same edge.
    pub fn new(
        points: Vec<[f32; 3]>,
        pairs: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self> {
        let edges: BTreeSet<Edge> = pairs
            .into_iter()
            .map(|(a, b)| [a.min(b), a.max(b)])
            .collect();
        let edges: Vec<Edge> = edges.into_iter().collect();
        check_edges(&edges, points.len())?;

        let vertices = points.iter().copied().map(HPoint::from).collect();
        log::debug!("skeleton created: {} points, {} edges", points.len(), edges.len());
        Ok(Self {
            points,
            vertices,
            edges,
        })
    }

    /// The points as originally given, before any transform.
    pub fn source_points(&self) -> &[[f32; 3]] {
        &self.points
    }
}

impl Geometry for Skeleton {
    fn name(&self) -> &str {
        "skeleton"
    }

    fn vertices(&self) -> &[HPoint] {
        &self.vertices
    }

    fn edges(&self) -> &[Edge] {
        &self.edges
    }

    fn render_mode(&self) -> RenderMode {
        RenderMode::Wireframe
    }
}

impl Transformable for Skeleton {
    fn vertices_mut(&mut self) -> &mut [HPoint] {
        &mut self.vertices
    }
}

fn check_edges(edges: &[Edge], vertex_count: usize) -> Result<()> {
    for (edge, pair) in edges.iter().enumerate() {
        if let Some(&index) = pair.iter().find(|&&i| i >= vertex_count) {
            return Err(ConfigurationError::EdgeIndexOutOfRange {
                edge,
                index,
                vertex_count,
            }
            .into());
        }
    }
    Ok(())
}
