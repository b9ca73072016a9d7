/// 3D transformation matrices and in-place vertex transforms
///
/// Matrices act on column vectors: a vertex `v` becomes `M * v`. Rotations are
/// right-handed, so a positive angle about Z turns +X towards +Y.
use nalgebra::{Matrix4, Point3, Vector3};

use crate::point::HPoint;

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    pub fn rotation_x(radians: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(radians, 0.0, 0.0))
    }

    pub fn rotation_y(radians: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, radians, 0.0))
    }

    pub fn rotation_z(radians: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, 0.0, radians))
    }

    /// Create a rotation matrix composed as `Rx * Ry * Rz`.
    ///
    /// The composition order is fixed whatever the caller intends: Z is
    /// applied to the vertex first, X last.
    pub fn rotation_matrix(rx: f32, ry: f32, rz: f32) -> Matrix4<f32> {
        Self::rotation_x(rx) * Self::rotation_y(ry) * Self::rotation_z(rz)
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Create a scale matrix about the origin
    pub fn scale_matrix(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// Conjugate `matrix` so it acts around `pivot` instead of the origin.
    pub fn about_pivot(matrix: &Matrix4<f32>, pivot: &Point3<f32>) -> Matrix4<f32> {
        let to_pivot = Matrix4::new_translation(&pivot.coords);
        let from_pivot = Matrix4::new_translation(&-pivot.coords);
        to_pivot * matrix * from_pivot
    }
}

/// In-place transforms over an owned vertex buffer.
///
/// Implementors only hand out their vertex slice; every operation mutates
/// it through that exclusive borrow and returns the matrix it applied.
pub trait Transformable {
    fn vertices_mut(&mut self) -> &mut [HPoint];

    /// Apply an arbitrary matrix to every vertex.
    fn apply(&mut self, matrix: &Matrix4<f32>) {
        for vertex in self.vertices_mut() {
            *vertex = vertex.transformed(matrix);
        }
    }

    fn translate(&mut self, dx: f32, dy: f32, dz: f32) -> Matrix4<f32> {
        let matrix = Transform::translation_matrix(dx, dy, dz);
        self.apply(&matrix);
        matrix
    }

    fn scale(&mut self, sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        let matrix = Transform::scale_matrix(sx, sy, sz);
        self.apply(&matrix);
        matrix
    }

    fn rotate(&mut self, rx: f32, ry: f32, rz: f32) -> Matrix4<f32> {
        let matrix = Transform::rotation_matrix(rx, ry, rz);
        self.apply(&matrix);
        matrix
    }

    /// Rotate around `pivot`: subtract it, rotate, add it back.
    fn rotate_about(&mut self, rx: f32, ry: f32, rz: f32, pivot: Point3<f32>) -> Matrix4<f32> {
        let matrix = Transform::about_pivot(&Transform::rotation_matrix(rx, ry, rz), &pivot);
        self.apply(&matrix);
        matrix
    }
}
