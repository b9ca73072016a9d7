/// SW3D Terminal Demo - Camera flying around a cube
///
/// Renders the demo cube as vertex dots, camera yawed a quarter turn.
/// Controls:
///   - W/S: Move along Z
///   - A/D: Move along Y
///   - Q/E: Yaw, R/F: Pitch
///   - ESC: Quit

use std::io;
use sw3d_terminal::{demo_camera, demo_scene, init_logging, AppConfig, LoggingConfig, TerminalApp};

fn main() -> io::Result<()> {
    init_logging(LoggingConfig::default());
    println!("SW3D Terminal Renderer - Loading...");

    let scene = demo_scene().map_err(|e| {
        io::Error::new(io::ErrorKind::InvalidData, format!("Failed to build cube: {}", e))
    })?;

    println!("Starting terminal renderer (press ESC to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(scene, demo_camera(), AppConfig::default())?;
    app.run()?;

    println!("Thank you for using SW3D Terminal Renderer!");
    Ok(())
}
