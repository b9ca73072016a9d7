/// Render dispatch: turns geometries into surface draw calls
use std::ops::AddAssign;

use crate::depth::sort_faces;
use crate::geometry::{Geometry, RenderMode};
use crate::projection::{Camera, ProjectionConfig, Projected, Projector};
use crate::surface::{Color, Surface};

/// Styling for everything that has no per-face color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub dot_color: Color,
    pub edge_color: Color,
    pub edge_width: i32,
    pub min_dot_radius: i32,
    pub projection: ProjectionConfig,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            dot_color: Color::YELLOW,
            edge_color: Color::RED,
            edge_width: 2,
            min_dot_radius: 2,
            projection: ProjectionConfig::default(),
        }
    }
}

/// What a render call drew and what the surface refused
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub geometries: usize,
    pub faces_drawn: usize,
    pub faces_skipped: usize,
    pub dots_drawn: usize,
    pub dots_skipped: usize,
    pub edges_drawn: usize,
    pub edges_skipped: usize,
    /// Vertices whose depth had to be clamped before the perspective divide.
    pub clamped_vertices: usize,
}

impl RenderStats {
    pub fn skipped(&self) -> usize {
        self.faces_skipped + self.dots_skipped + self.edges_skipped
    }
}

impl AddAssign for RenderStats {
    fn add_assign(&mut self, other: Self) {
        self.geometries += other.geometries;
        self.faces_drawn += other.faces_drawn;
        self.faces_skipped += other.faces_skipped;
        self.dots_drawn += other.dots_drawn;
        self.dots_skipped += other.dots_skipped;
        self.edges_drawn += other.edges_drawn;
        self.edges_skipped += other.edges_skipped;
        self.clamped_vertices += other.clamped_vertices;
    }
}

/// Render every geometry in the given order.
///
/// Geometries are not reordered: a later one always overdraws an earlier
/// one, whatever their depths. See [`crate::depth::order_back_to_front`].
pub fn render<S: Surface + ?Sized>(
    scene: &[&dyn Geometry],
    camera: &Camera,
    surface: &mut S,
    style: &RenderStyle,
) -> RenderStats {
    let mut stats = RenderStats::default();
    for geometry in scene {
        stats += render_geometry(*geometry, camera, surface, style);
    }
    log::trace!("frame rendered: {:?}", stats);
    stats
}

/// Render a single geometry according to its render mode.
pub fn render_geometry<S: Surface + ?Sized>(
    geometry: &dyn Geometry,
    camera: &Camera,
    surface: &mut S,
    style: &RenderStyle,
) -> RenderStats {
    let projector = Projector::new(camera, style.projection, surface.width(), surface.height());
    let projected: Vec<Projected> = geometry
        .vertices()
        .iter()
        .map(|v| projector.project(v))
        .collect();

    let mut stats = RenderStats {
        geometries: 1,
        clamped_vertices: projected.iter().filter(|p| p.clamped).count(),
        ..RenderStats::default()
    };

    match geometry.render_mode() {
        RenderMode::Full => draw_faces(geometry, camera, &projected, surface, &mut stats),
        RenderMode::Dots => draw_dots(geometry, &projector, &projected, surface, style, &mut stats),
        RenderMode::Wireframe => {
            draw_dots(geometry, &projector, &projected, surface, style, &mut stats);
            draw_edges(geometry, &projected, surface, style, &mut stats);
        }
    }
    stats
}

fn draw_faces<S: Surface + ?Sized>(
    geometry: &dyn Geometry,
    camera: &Camera,
    projected: &[Projected],
    surface: &mut S,
    stats: &mut RenderStats,
) {
    let faces = geometry.faces();
    let colors = geometry.face_colors();
    let order = sort_faces(geometry, camera);
    stats.faces_skipped += faces.len() - order.len();

    for entry in order {
        let Some(&color) = colors.get(entry.face) else {
            log::debug!("{}: face {} has no color", geometry.name(), entry.face);
            stats.faces_skipped += 1;
            continue;
        };
        let Some(points) = faces[entry.face]
            .iter()
            .map(|&i| projected.get(i).map(|p| p.screen))
            .collect::<Option<Vec<_>>>()
        else {
            stats.faces_skipped += 1;
            continue;
        };
        match surface.draw_polygon(color, &points) {
            Ok(()) => stats.faces_drawn += 1,
            Err(err) => {
                log::debug!("{}: face {} skipped: {}", geometry.name(), entry.face, err);
                stats.faces_skipped += 1;
            }
        }
    }
}

fn draw_dots<S: Surface + ?Sized>(
    geometry: &dyn Geometry,
    projector: &Projector<'_>,
    projected: &[Projected],
    surface: &mut S,
    style: &RenderStyle,
    stats: &mut RenderStats,
) {
    for (index, (vertex, point)) in geometry.vertices().iter().zip(projected).enumerate() {
        let radius = projector.dot_radius(vertex, style.min_dot_radius);
        match surface.draw_circle(style.dot_color, point.screen, radius) {
            Ok(()) => stats.dots_drawn += 1,
            Err(err) => {
                log::debug!("{}: dot {} skipped: {}", geometry.name(), index, err);
                stats.dots_skipped += 1;
            }
        }
    }
}

fn draw_edges<S: Surface + ?Sized>(
    geometry: &dyn Geometry,
    projected: &[Projected],
    surface: &mut S,
    style: &RenderStyle,
    stats: &mut RenderStats,
) {
    for (index, &[a, b]) in geometry.edges().iter().enumerate() {
        let (Some(p1), Some(p2)) = (projected.get(a), projected.get(b)) else {
            log::debug!("{}: edge {} has a dangling vertex index", geometry.name(), index);
            stats.edges_skipped += 1;
            continue;
        };
        match surface.draw_line(style.edge_color, p1.screen, p2.screen, style.edge_width) {
            Ok(()) => stats.edges_drawn += 1,
            Err(err) => {
                log::debug!("{}: edge {} skipped: {}", geometry.name(), index, err);
                stats.edges_skipped += 1;
            }
        }
    }
}
