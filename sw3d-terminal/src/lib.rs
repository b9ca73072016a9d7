/// Terminal frontend: drives a camera around a scene and draws it as ASCII
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use nalgebra::{Point3, Vector3};
use std::f32::consts::FRAC_PI_2;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use sw3d_core::{render, Camera, Geometry, Mesh, RenderMode, RenderStats, RenderStyle};

pub mod logging;
pub mod renderer;

pub use logging::{init_logging, LoggingConfig};
pub use renderer::AsciiSurface;

const CONTROLS_HELP: &str = "WASD=Move Q/E=Yaw R/F=Pitch Esc=Quit";

/// Frame loop settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub target_fps: u32,
    /// Camera travel per key press, in world units.
    pub move_step: f32,
    /// Camera turn per key press, in radians.
    pub turn_step: f32,
    /// Overrides the projection focal length; defaults to the terminal height.
    pub focal_length: Option<f32>,
    pub style: RenderStyle,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            target_fps: 45,
            move_step: 1.0,
            turn_step: 0.05,
            focal_length: None,
            style: RenderStyle::default(),
        }
    }
}

/// The demo scene: the big cube drawn as vertex dots.
pub fn demo_scene() -> sw3d_core::Result<Vec<Box<dyn Geometry>>> {
    Ok(vec![Box::new(Mesh::demo_cube(RenderMode::Dots)?)])
}

/// Demo camera at (0, 0, 12), yawed a quarter turn.
pub fn demo_camera() -> Camera {
    Camera::new(Point3::new(0.0, 0.0, 12.0), FRAC_PI_2, 0.0)
}

/// What a key press asks the camera to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Move(Vector3<f32>),
    Yaw(f32),
    Pitch(f32),
    Quit,
}

impl Command {
    /// w/s: along z, a/d: along y, q/e: yaw, r/f: pitch, Esc or Ctrl-C: quit.
    pub fn from_key(key: &KeyEvent, config: &AppConfig) -> Option<Self> {
        let step = config.move_step;
        let turn = config.turn_step;
        let command = match key.code {
            KeyCode::Esc => Command::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,
            KeyCode::Char('w') | KeyCode::Up => Command::Move(Vector3::new(0.0, 0.0, -step)),
            KeyCode::Char('s') | KeyCode::Down => Command::Move(Vector3::new(0.0, 0.0, step)),
            KeyCode::Char('a') | KeyCode::Left => Command::Move(Vector3::new(0.0, -step, 0.0)),
            KeyCode::Char('d') | KeyCode::Right => Command::Move(Vector3::new(0.0, step, 0.0)),
            KeyCode::Char('q') => Command::Yaw(turn),
            KeyCode::Char('e') => Command::Yaw(-turn),
            KeyCode::Char('r') => Command::Pitch(turn),
            KeyCode::Char('f') => Command::Pitch(-turn),
            _ => return None,
        };
        Some(command)
    }

    /// Apply to the camera; returns `false` for [`Command::Quit`].
    pub fn apply(self, camera: &mut Camera) -> bool {
        match self {
            Command::Move(delta) => camera.add_to_position(delta),
            Command::Yaw(delta) => camera.add_to_angle_horz(delta),
            Command::Pitch(delta) => camera.add_to_angle_vert(delta),
            Command::Quit => return false,
        }
        true
    }
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    scene: Vec<Box<dyn Geometry>>,
    camera: Camera,
    surface: AsciiSurface,
    config: AppConfig,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
    last_stats: RenderStats,
}

impl TerminalApp {
    pub fn new(
        scene: Vec<Box<dyn Geometry>>,
        camera: Camera,
        mut config: AppConfig,
    ) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        config.style.projection.focal_length = config.focal_length.unwrap_or(height as f32);

        Ok(Self {
            scene,
            camera,
            surface: AsciiSurface::new(width as usize, height as usize),
            config,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            last_stats: RenderStats::default(),
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        log::info!("terminal app started with {} geometries", self.scene.len());

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
        log::info!("terminal app stopped");

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / self.config.target_fps.max(1) as u64);

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if let Some(command) = Command::from_key(&key, &self.config) {
                    self.running = command.apply(&mut self.camera);
                }
            }
            Event::Resize(width, height) => {
                self.surface.resize(width as usize, height as usize);
                if self.config.focal_length.is_none() {
                    self.config.style.projection.focal_length = height as f32;
                }
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.surface.clear();

        let scene: Vec<&dyn Geometry> = self.scene.iter().map(|g| &**g).collect();
        self.last_stats = render(&scene, &self.camera, &mut self.surface, &self.config.style);
        if self.last_stats.skipped() > 0 {
            log::trace!("{} primitives skipped this frame", self.last_stats.skipped());
        }

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.surface.draw(&mut stdout)?;

        // Draw UI overlay
        let snap = self.camera.snapshot();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "SW3D | FPS: {:.1} | skipped {} | {}",
                self.fps,
                self.last_stats.skipped(),
                CONTROLS_HELP
            )),
            cursor::MoveTo(0, 1),
            Print(format!(
                "cam ({:.1}, {:.1}, {:.1}) yaw {:.2} pitch {:.2}",
                snap.x, snap.y, snap.z, snap.yaw, snap.pitch
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
