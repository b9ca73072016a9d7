/// Back-to-front ordering for the painter's algorithm
///
/// Ordering is per geometry only. Faces of two different meshes are never
/// compared, so overlapping meshes will not interleave correctly; callers
/// that care can order whole geometries with [`order_back_to_front`].
use nalgebra::Vector3;

use crate::geometry::{Face, Geometry};
use crate::point::HPoint;
use crate::projection::Camera;

/// A face index with its depth proxy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceDepth {
    pub face: usize,
    pub depth: f32,
}

/// Squared length of the summed camera-relative vertex positions.
///
/// Grows with the distance of the face centroid from the camera. Only
/// meaningful for comparing faces with the same vertex count. `None` when the
/// face names a vertex that does not exist.
pub fn face_depth(face: &Face, vertices: &[HPoint], camera: &Camera) -> Option<f32> {
    let eye = camera.position().coords;
    face.iter()
        .map(|&i| vertices.get(i).map(|v| v.xyz() - eye))
        .try_fold(Vector3::<f32>::zeros(), |sum, offset| Some(sum + offset?))
        .map(|sum| sum.norm_squared())
}

/// Face indices ordered farthest first.
///
/// The sort is stable over a total order on `f32`, so ties keep face order
/// and the result is deterministic. Faces with a dangling vertex index are
/// left out.
pub fn sort_faces(geometry: &dyn Geometry, camera: &Camera) -> Vec<FaceDepth> {
    let vertices = geometry.vertices();
    let mut order: Vec<FaceDepth> = geometry
        .faces()
        .iter()
        .enumerate()
        .filter_map(|(face, indices)| match face_depth(indices, vertices, camera) {
            Some(depth) => Some(FaceDepth { face, depth }),
            None => {
                log::debug!("{}: face {} has a dangling vertex index", geometry.name(), face);
                None
            }
        })
        .collect();
    order.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    order
}

/// Order whole geometries farthest first by the distance of their vertex
/// centroid from the camera. Empty geometries sort last.
pub fn order_back_to_front(scene: &mut [&dyn Geometry], camera: &Camera) {
    let eye = camera.position().coords;
    scene.sort_by(|a, b| centroid_distance(*b, &eye).total_cmp(&centroid_distance(*a, &eye)));
}

fn centroid_distance(geometry: &dyn Geometry, eye: &Vector3<f32>) -> f32 {
    let vertices = geometry.vertices();
    if vertices.is_empty() {
        return f32::NEG_INFINITY;
    }
    let sum = vertices
        .iter()
        .fold(Vector3::zeros(), |sum: Vector3<f32>, v| sum + v.xyz());
    (sum / vertices.len() as f32 - eye).norm_squared()
}
