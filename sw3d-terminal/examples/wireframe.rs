/// Example: a wireframe octahedron next to the demo cube drawn as dots
///
/// Usage: cargo run --example wireframe

use nalgebra::Point3;
use std::io;
use sw3d_core::{Camera, Geometry, Mesh, RenderMode, Skeleton, Transformable};
use sw3d_terminal::{init_logging, AppConfig, LoggingConfig, TerminalApp};

fn to_io(e: sw3d_core::Error) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e.to_string())
}

fn main() -> io::Result<()> {
    init_logging(LoggingConfig::default());

    let points = vec![
        [2.0, 0.0, 5.0],
        [-2.0, 0.0, 5.0],
        [0.0, 2.0, 5.0],
        [0.0, -2.0, 5.0],
        [0.0, 0.0, 7.0],
        [0.0, 0.0, 3.0],
    ];
    let pairs = [
        (0, 2),
        (2, 1),
        (1, 3),
        (3, 0),
        (4, 0),
        (4, 1),
        (4, 2),
        (4, 3),
        (5, 0),
        (5, 1),
        (5, 2),
        (5, 3),
    ];
    let mut octahedron = Skeleton::new(points, pairs).map_err(to_io)?;
    octahedron.translate(4.0, 0.0, 0.0);
    octahedron.rotate_about(0.0, 0.0, 0.4, Point3::new(4.0, 0.0, 5.0));

    let cube = Mesh::demo_cube(RenderMode::Dots).map_err(to_io)?;

    let scene: Vec<Box<dyn Geometry>> = vec![Box::new(cube), Box::new(octahedron)];
    let mut app = TerminalApp::new(scene, Camera::default(), AppConfig::default())?;
    app.run()
}
