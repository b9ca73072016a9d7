/// Camera and projection utilities
use nalgebra::{Point3, Rotation3, Vector3};

use crate::error::{vector3_arg, Result};
use crate::point::HPoint;

/// Projection settings shared by every draw call of a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionConfig {
    /// Distance at which one world unit spans one screen unit.
    pub focal_length: f32,
    /// Smallest depth magnitude the perspective divide will accept.
    pub min_depth: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            focal_length: 500.0,
            min_depth: 1e-3,
        }
    }
}

/// Camera position and angles at a point in time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSnapshot {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub yaw: f32,
    pub pitch: f32,
}

/// A free-flying camera with yaw and pitch, no roll.
///
/// The angles are plain accumulators and are never wrapped. The view
/// rotation is rebuilt from them after every change rather than composed
/// incrementally, so repeated small updates do not drift.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Point3<f32>,
    yaw: f32,
    pitch: f32,
    view: Rotation3<f32>,
}

impl Camera {
    pub fn new(position: Point3<f32>, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
            view: view_rotation(yaw, pitch),
        }
    }

    /// Like [`Camera::new`], taking the position as an untyped slice.
    pub fn try_from_slice(position: &[f32], yaw: f32, pitch: f32) -> Result<Self> {
        let [x, y, z] = vector3_arg("camera position", position)?;
        Ok(Self::new(Point3::new(x, y, z), yaw, pitch))
    }

    pub fn position(&self) -> &Point3<f32> {
        &self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Rotation taking camera-relative offsets into view space.
    pub fn view_rotation(&self) -> &Rotation3<f32> {
        &self.view
    }

    pub fn add_to_position(&mut self, delta: Vector3<f32>) {
        self.position += delta;
    }

    pub fn try_add_to_position(&mut self, delta: &[f32]) -> Result<()> {
        let [dx, dy, dz] = vector3_arg("position delta", delta)?;
        self.add_to_position(Vector3::new(dx, dy, dz));
        Ok(())
    }

    pub fn add_to_angle_horz(&mut self, delta: f32) {
        self.yaw += delta;
        self.view = view_rotation(self.yaw, self.pitch);
    }

    pub fn add_to_angle_vert(&mut self, delta: f32) {
        self.pitch += delta;
        self.view = view_rotation(self.yaw, self.pitch);
    }

    pub fn snapshot(&self) -> CameraSnapshot {
        CameraSnapshot {
            x: self.position.x,
            y: self.position.y,
            z: self.position.z,
            yaw: self.yaw,
            pitch: self.pitch,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::new(0.0, 0.0, 12.0), 0.0, 0.0)
    }
}

/// Turn the (x, y) plane by `-yaw`, then the (y, z) plane by `-pitch`.
fn view_rotation(yaw: f32, pitch: f32) -> Rotation3<f32> {
    let yaw = Rotation3::from_axis_angle(&Vector3::z_axis(), -yaw);
    let pitch = Rotation3::from_axis_angle(&Vector3::x_axis(), -pitch);
    pitch * yaw
}

/// A vertex mapped onto the screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub screen: (i32, i32),
    /// Camera-relative position after the view rotation.
    pub view: Vector3<f32>,
    /// Set when the depth was too close to zero and had to be clamped.
    pub clamped: bool,
}

/// Projects vertices for one camera onto a surface of a given size
#[derive(Debug, Clone, Copy)]
pub struct Projector<'a> {
    camera: &'a Camera,
    config: ProjectionConfig,
    center: (i32, i32),
}

impl<'a> Projector<'a> {
    pub fn new(camera: &'a Camera, config: ProjectionConfig, width: i32, height: i32) -> Self {
        Self {
            camera,
            config,
            center: (width / 2, height / 2),
        }
    }

    /// Offset of `vertex` from the camera, before any rotation.
    pub fn relative(&self, vertex: &HPoint) -> Vector3<f32> {
        vertex.xyz() - self.camera.position.coords
    }

    pub fn to_view(&self, vertex: &HPoint) -> Vector3<f32> {
        self.camera.view * self.relative(vertex)
    }

    /// Project a vertex to integer screen coordinates.
    ///
    /// Depths closer to zero than `min_depth` are pushed out to
    /// `±min_depth`, keeping their sign. Negative depths are not rejected;
    /// they project mirrored through the screen center.
    pub fn project(&self, vertex: &HPoint) -> Projected {
        let view = self.to_view(vertex);
        let (depth, clamped) = clamp_depth(view.z, self.config.min_depth);
        let f = self.config.focal_length / depth;
        let (ex, ey) = (view.x * f, view.y * f);

        Projected {
            screen: (
                (ex as i32).saturating_add(self.center.0),
                (ey as i32).saturating_add(self.center.1),
            ),
            view,
            clamped,
        }
    }

    /// Marker radius for a vertex drawn as a dot, never below `min_radius`.
    ///
    /// Uses the raw depth difference along world Z between camera and
    /// vertex, guarded the same way as the perspective divide.
    pub fn dot_radius(&self, vertex: &HPoint, min_radius: i32) -> i32 {
        let (depth, _) = clamp_depth(self.camera.position.z - vertex.z(), self.config.min_depth);
        ((2.0 / depth * 40.0) as i32).max(min_radius)
    }
}

fn clamp_depth(z: f32, min_depth: f32) -> (f32, bool) {
    if z.abs() >= min_depth {
        (z, false)
    } else if z < 0.0 {
        (-min_depth, true)
    } else {
        (min_depth, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn at_origin() -> Camera {
        Camera::new(Point3::origin(), 0.0, 0.0)
    }

    #[test]
    fn test_camera_creation() {
        let camera = Camera::default();
        assert_eq!(
            camera.snapshot(),
            CameraSnapshot {
                x: 0.0,
                y: 0.0,
                z: 12.0,
                yaw: 0.0,
                pitch: 0.0
            }
        );
        assert!((camera.view_rotation().matrix() - nalgebra::Matrix3::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_camera_accumulates() {
        let mut camera = at_origin();
        camera.add_to_position(Vector3::new(1.0, 2.0, 3.0));
        camera.add_to_position(Vector3::new(1.0, 0.0, -1.0));
        camera.add_to_angle_horz(0.5);
        camera.add_to_angle_horz(0.25);
        camera.add_to_angle_vert(-0.1);
        let snap = camera.snapshot();
        assert_eq!((snap.x, snap.y, snap.z), (2.0, 2.0, 2.0));
        assert!((snap.yaw - 0.75).abs() < 1e-6);
        assert!((snap.pitch + 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_angles_are_not_wrapped() {
        let mut camera = at_origin();
        for _ in 0..10 {
            camera.add_to_angle_horz(1.0);
        }
        assert!((camera.yaw() - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_camera_slice_arguments() {
        let mut camera = Camera::try_from_slice(&[0.0, 0.0, 12.0], 0.0, 0.0).unwrap();
        assert!(Camera::try_from_slice(&[0.0, 12.0], 0.0, 0.0).is_err());
        assert!(camera.try_add_to_position(&[1.0, 1.0, 1.0, 1.0]).is_err());
        assert_eq!(camera.position(), &Point3::new(0.0, 0.0, 12.0));
        camera.try_add_to_position(&[1.0, 1.0, 1.0]).unwrap();
        assert_eq!(camera.position(), &Point3::new(1.0, 1.0, 13.0));
    }

    #[test]
    fn test_focal_depth_projects_unscaled() {
        let camera = at_origin();
        let projector = Projector::new(&camera, ProjectionConfig::default(), 800, 600);
        let projected = projector.project(&HPoint::position(3.0, -4.0, 500.0));
        assert_eq!(projected.screen, (400 + 3, 300 - 4));
        assert!(!projected.clamped);
    }

    #[test]
    fn test_closer_points_project_larger() {
        let camera = at_origin();
        let projector = Projector::new(&camera, ProjectionConfig::default(), 0, 0);
        let near = projector.project(&HPoint::position(10.0, 10.0, 20.0));
        let far = projector.project(&HPoint::position(10.0, 10.0, 80.0));
        assert!(near.screen.0.abs() > far.screen.0.abs());
        assert!(near.screen.1.abs() > far.screen.1.abs());
    }

    #[test]
    fn test_zero_depth_is_clamped() {
        let camera = at_origin();
        let config = ProjectionConfig::default();
        let projector = Projector::new(&camera, config, 800, 600);

        let projected = projector.project(&HPoint::position(1.0, 1.0, 0.0));
        assert!(projected.clamped);
        let expected = (1.0 * config.focal_length / config.min_depth) as i32 + 400;
        assert_eq!(projected.screen.0, expected);

        let behind = projector.project(&HPoint::position(1.0, 1.0, -1e-6));
        assert!(behind.clamped);
        assert!(behind.screen.0 < 400);
    }

    #[test]
    fn test_extreme_coordinates_saturate() {
        let camera = at_origin();
        let projector = Projector::new(&camera, ProjectionConfig::default(), 800, 600);
        let projected = projector.project(&HPoint::position(1e30, -1e30, 0.0));
        assert_eq!(projected.screen, (i32::MAX, i32::MIN + 300));
    }

    #[test]
    fn test_camera_offset_is_subtracted() {
        let camera = Camera::new(Point3::new(5.0, 5.0, -500.0), 0.0, 0.0);
        let projector = Projector::new(&camera, ProjectionConfig::default(), 100, 100);
        let projected = projector.project(&HPoint::position(6.0, 4.0, 0.0));
        assert_eq!(projected.screen, (51, 49));
    }

    #[test]
    fn test_yaw_turns_xy_plane_backwards() {
        let camera = Camera::new(Point3::origin(), FRAC_PI_2, 0.0);
        let projector = Projector::new(&camera, ProjectionConfig::default(), 0, 0);
        let view = projector.to_view(&HPoint::position(1.0, 0.0, 7.0));
        assert!((view - Vector3::new(0.0, -1.0, 7.0)).norm() < 1e-5);
    }

    #[test]
    fn test_pitch_turns_yz_plane_backwards() {
        let camera = Camera::new(Point3::origin(), 0.0, FRAC_PI_2);
        let projector = Projector::new(&camera, ProjectionConfig::default(), 0, 0);
        let view = projector.to_view(&HPoint::position(0.0, 0.0, 1.0));
        assert!((view - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-5);
    }

    #[test]
    fn test_yaw_is_applied_before_pitch() {
        let camera = Camera::new(Point3::origin(), FRAC_PI_2, FRAC_PI_2);
        let projector = Projector::new(&camera, ProjectionConfig::default(), 0, 0);
        // yaw: (1, 0, 0) -> (0, -1, 0); pitch: (y, z) = (-1, 0) -> (0, 1)
        let view = projector.to_view(&HPoint::position(1.0, 0.0, 0.0));
        assert!((view - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-5);
    }

    #[test]
    fn test_dot_radius() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 12.0), 0.0, 0.0);
        let projector = Projector::new(&camera, ProjectionConfig::default(), 800, 600);
        assert_eq!(projector.dot_radius(&HPoint::position(0.0, 0.0, 2.0), 2), 8);
        // far away and behind the camera both fall back to the minimum
        assert_eq!(projector.dot_radius(&HPoint::position(0.0, 0.0, -200.0), 2), 2);
        assert_eq!(projector.dot_radius(&HPoint::position(0.0, 0.0, 20.0), 2), 2);
        assert!(projector.dot_radius(&HPoint::position(0.0, 0.0, 12.0), 2) > 10_000);
    }
}
