/// Homogeneous vertex positions
use nalgebra::{Matrix4, Point3, Vector3, Vector4};
use std::fmt;

/// A vertex in homogeneous coordinates.
///
/// Position vertices are created with `w = 1`. Transforms carry `w` through
/// unchanged and nothing ever divides by it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HPoint(Vector4<f32>);

impl HPoint {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self(Vector4::new(x, y, z, w))
    }

    /// A position vertex (`w = 1`).
    pub fn position(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 1.0)
    }

    pub fn origin() -> Self {
        Self::position(0.0, 0.0, 0.0)
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn y(&self) -> f32 {
        self.0.y
    }

    pub fn z(&self) -> f32 {
        self.0.z
    }

    pub fn w(&self) -> f32 {
        self.0.w
    }

    pub fn xyz(&self) -> Vector3<f32> {
        self.0.xyz()
    }

    pub fn to_point3(&self) -> Point3<f32> {
        Point3::from(self.xyz())
    }

    pub fn as_vector(&self) -> &Vector4<f32> {
        &self.0
    }

    /// Returns `matrix * self`.
    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Self {
        Self(matrix * self.0)
    }
}

impl Default for HPoint {
    fn default() -> Self {
        Self::origin()
    }
}

impl From<Point3<f32>> for HPoint {
    fn from(p: Point3<f32>) -> Self {
        Self::position(p.x, p.y, p.z)
    }
}

impl From<[f32; 3]> for HPoint {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::position(x, y, z)
    }
}

impl fmt::Display for HPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x(), self.y(), self.z(), self.w())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_sets_w() {
        let p = HPoint::position(1.0, 2.0, 3.0);
        assert_eq!(p.w(), 1.0);
        assert_eq!(p.xyz(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(HPoint::new(1.0, -2.5, 0.0, 1.0).to_string(), "(1, -2.5, 0, 1)");
    }

    #[test]
    fn test_transformed_keeps_w_for_affine() {
        let m = Matrix4::new_translation(&Vector3::new(1.0, 1.0, 1.0));
        let p = HPoint::position(0.0, 0.0, 0.0).transformed(&m);
        assert_eq!(p, HPoint::position(1.0, 1.0, 1.0));
    }
}
