use nalgebra::{Point3, Vector3};
use sw3d_core::{
    render, Camera, Color, ConfigurationError, DrawError, Error, Geometry, HPoint, Mesh,
    RenderMode, RenderStyle, Skeleton, Surface, Transformable,
};

/// Keeps every polygon it is asked to draw.
#[derive(Default)]
struct PolygonSink {
    polygons: Vec<(Color, Vec<(i32, i32)>)>,
    circles: usize,
    lines: usize,
}

impl Surface for PolygonSink {
    fn width(&self) -> i32 {
        800
    }

    fn height(&self) -> i32 {
        600
    }

    fn draw_circle(&mut self, _: Color, _: (i32, i32), _: i32) -> Result<(), DrawError> {
        self.circles += 1;
        Ok(())
    }

    fn draw_line(
        &mut self,
        _: Color,
        _: (i32, i32),
        _: (i32, i32),
        _: i32,
    ) -> Result<(), DrawError> {
        self.lines += 1;
        Ok(())
    }

    fn draw_polygon(&mut self, color: Color, points: &[(i32, i32)]) -> Result<(), DrawError> {
        self.polygons.push((color, points.to_vec()));
        Ok(())
    }
}

const FAR: Color = Color::rgb(10, 0, 0);
const NEAR: Color = Color::rgb(20, 0, 0);

fn unit_cube() -> Mesh {
    let faces = vec![
        vec![0, 1, 2, 3],
        vec![4, 5, 6, 7],
        vec![0, 1, 5, 4],
        vec![2, 3, 7, 6],
        vec![0, 3, 7, 4],
        vec![1, 2, 6, 5],
    ];
    let colors = vec![FAR, NEAR, Color::grey(1), Color::grey(2), Color::grey(3), Color::grey(4)];
    let mut cube = Mesh::new("cube", 8, vec![], faces, colors, RenderMode::Full).unwrap();
    let corners = [
        (-1.0, -1.0, 0.0),
        (1.0, -1.0, 0.0),
        (1.0, 1.0, 0.0),
        (-1.0, 1.0, 0.0),
        (-1.0, -1.0, 10.0),
        (1.0, -1.0, 10.0),
        (1.0, 1.0, 10.0),
        (-1.0, 1.0, 10.0),
    ];
    for (i, (x, y, z)) in corners.into_iter().enumerate() {
        cube.set_vertex(i, HPoint::position(x, y, z)).unwrap();
    }
    cube
}

fn bbox_area(points: &[(i32, i32)]) -> i64 {
    let min_x = points.iter().map(|p| p.0).min().unwrap() as i64;
    let max_x = points.iter().map(|p| p.0).max().unwrap() as i64;
    let min_y = points.iter().map(|p| p.1).min().unwrap() as i64;
    let max_y = points.iter().map(|p| p.1).max().unwrap() as i64;
    (max_x - min_x) * (max_y - min_y)
}

fn draw(scene: &[&dyn Geometry], camera: &Camera) -> PolygonSink {
    let mut sink = PolygonSink::default();
    render(scene, camera, &mut sink, &RenderStyle::default());
    sink
}

#[test]
fn test_cube_renders_all_faces() {
    let cube = unit_cube();
    let camera = Camera::new(Point3::new(0.0, 0.0, 12.0), 0.0, 0.0);
    let mut sink = PolygonSink::default();
    let stats = render(&[&cube as &dyn Geometry], &camera, &mut sink, &RenderStyle::default());

    assert_eq!(stats.faces_drawn, 6);
    assert_eq!(stats.faces_skipped, 0);
    assert_eq!(stats.clamped_vertices, 0);
    assert_eq!(sink.polygons.len(), 6);
    assert!(sink.polygons.iter().all(|(_, points)| points.len() == 4));

    let far = sink.polygons.iter().position(|(c, _)| *c == FAR).unwrap();
    let near = sink.polygons.iter().position(|(c, _)| *c == NEAR).unwrap();
    assert_eq!(far, 0);
    assert_eq!(near, 5);
    assert!(bbox_area(&sink.polygons[near].1) > bbox_area(&sink.polygons[far].1));
}

#[test]
fn test_translate_roundtrip_renders_identically() {
    let mut cube = unit_cube();
    let camera = Camera::new(Point3::new(0.0, 0.0, 12.0), 0.0, 0.0);
    let before = draw(&[&cube], &camera).polygons;

    cube.translate(2.0, -3.0, 0.5);
    cube.translate(-2.0, 3.0, -0.5);
    let after = draw(&[&cube], &camera).polygons;
    assert_eq!(before, after);
}

#[test]
fn test_moving_camera_shrinks_cube() {
    let cube = unit_cube();
    let mut camera = Camera::new(Point3::new(0.0, 0.0, 12.0), 0.0, 0.0);
    let close = draw(&[&cube], &camera);
    camera.add_to_position(Vector3::new(0.0, 0.0, 20.0));
    let distant = draw(&[&cube], &camera);

    let near_face = |sink: &PolygonSink| {
        let (_, points) = sink.polygons.iter().find(|(c, _)| *c == NEAR).unwrap();
        bbox_area(points)
    };
    assert!(near_face(&close) > near_face(&distant));
}

#[test]
fn test_camera_inside_cube_does_not_fault() {
    let cube = unit_cube();
    // the camera sits exactly in the plane of the near face
    let camera = Camera::new(Point3::new(0.0, 0.0, 10.0), 0.3, -0.2);
    let mut sink = PolygonSink::default();
    let stats = render(&[&cube as &dyn Geometry], &camera, &mut sink, &RenderStyle::default());
    assert_eq!(stats.faces_drawn + stats.faces_skipped, 6);
}

#[test]
fn test_mismatched_colors_build_nothing() {
    let result = Mesh::new(
        "cube",
        8,
        vec![],
        vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7]],
        vec![Color::RED],
        RenderMode::Full,
    );
    assert_eq!(
        result.unwrap_err(),
        Error::Configuration(ConfigurationError::ColorCountMismatch { colors: 1, faces: 2 })
    );
}

#[test]
fn test_mixed_scene() {
    let cube = unit_cube();
    let skeleton = Skeleton::new(
        vec![[0.0, 0.0, 0.0], [0.0, 2.0, 0.0], [2.0, 0.0, 0.0]],
        [(0, 1), (0, 2)],
    )
    .unwrap();
    let camera = Camera::new(Point3::new(0.0, 0.0, 12.0), 0.0, 0.0);
    let sink = draw(&[&cube, &skeleton], &camera);
    assert_eq!(sink.polygons.len(), 6);
    assert_eq!(sink.circles, 3);
    assert_eq!(sink.lines, 2);
}
