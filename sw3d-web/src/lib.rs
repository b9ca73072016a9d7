/// SW3D Web - renders the core pipeline onto an HTML canvas
///
/// `CanvasSurface` implements the core `Surface` trait with the canvas 2D
/// context; `WebRenderer` exposes the demo cube and camera to JavaScript.
/// The page owns the frame loop and calls `render` once per frame.
use log::{Level, LevelFilter, Log, Metadata, Record};
use nalgebra::{Point3, Vector3};
use sw3d_core::{
    render, Camera, Color, DrawError, Geometry, Mesh, RenderMode, RenderStyle, Surface,
    Transformable,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// A [`Surface`] backed by a canvas 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: i32,
    height: i32,
}

impl CanvasSurface {
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            width: canvas.width() as i32,
            height: canvas.height() as i32,
        })
    }

    pub fn clear(&self, color: Color) {
        self.ctx.set_fill_style_str(&css_color(color));
        self.ctx
            .fill_rect(0.0, 0.0, self.width as f64, self.height as f64);
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn draw_circle(
        &mut self,
        color: Color,
        center: (i32, i32),
        radius: i32,
    ) -> Result<(), DrawError> {
        if radius <= 0 {
            return Err(DrawError::Degenerate {
                primitive: "circle",
                reason: format!("radius {}", radius),
            });
        }
        self.ctx.set_fill_style_str(&css_color(color));
        self.ctx.begin_path();
        self.ctx
            .arc(
                center.0 as f64,
                center.1 as f64,
                radius as f64,
                0.0,
                std::f64::consts::TAU,
            )
            .map_err(backend_error)?;
        self.ctx.fill();
        Ok(())
    }

    fn draw_line(
        &mut self,
        color: Color,
        p1: (i32, i32),
        p2: (i32, i32),
        width: i32,
    ) -> Result<(), DrawError> {
        if width <= 0 {
            return Err(DrawError::Degenerate {
                primitive: "line",
                reason: format!("width {}", width),
            });
        }
        self.ctx.set_stroke_style_str(&css_color(color));
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(p1.0 as f64, p1.1 as f64);
        self.ctx.line_to(p2.0 as f64, p2.1 as f64);
        self.ctx.stroke();
        Ok(())
    }

    fn draw_polygon(&mut self, color: Color, points: &[(i32, i32)]) -> Result<(), DrawError> {
        let [first, rest @ ..] = points else {
            return Err(DrawError::Degenerate {
                primitive: "polygon",
                reason: "no points".to_string(),
            });
        };
        if rest.len() < 2 {
            return Err(DrawError::Degenerate {
                primitive: "polygon",
                reason: format!("{} points", points.len()),
            });
        }
        self.ctx.set_fill_style_str(&css_color(color));
        self.ctx.begin_path();
        self.ctx.move_to(first.0 as f64, first.1 as f64);
        for p in rest {
            self.ctx.line_to(p.0 as f64, p.1 as f64);
        }
        self.ctx.close_path();
        self.ctx.fill();
        Ok(())
    }
}

fn css_color(color: Color) -> String {
    format!("rgb({}, {}, {})", color.r, color.g, color.b)
}

fn backend_error(err: JsValue) -> DrawError {
    DrawError::Backend(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

fn to_js(err: sw3d_core::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Forwards `log` records to the browser console
struct ConsoleLogger {
    level: LevelFilter,
}

static LOGGER: ConsoleLogger = ConsoleLogger {
    level: LevelFilter::Info,
};

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format_record(record));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

fn format_record(record: &Record) -> String {
    format!("{} {}: {}", record.level(), record.target(), record.args())
}

// Entry point from JS
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LOGGER.level);
    }
}

#[wasm_bindgen]
pub struct WebRenderer {
    surface: Option<CanvasSurface>,
    camera: Camera,
    cube: Mesh,
    style: RenderStyle,
    background: Color,
}

#[wasm_bindgen]
impl WebRenderer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebRenderer, JsValue> {
        Ok(WebRenderer {
            surface: None,
            camera: Camera::default(),
            cube: Mesh::demo_cube(RenderMode::Full).map_err(to_js)?,
            style: RenderStyle::default(),
            background: Color::PINK,
        })
    }

    /// Initialize the renderer with a canvas element
    pub fn init(&mut self, canvas_id: &str) -> Result<(), JsValue> {
        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(canvas_id))
            .ok_or_else(|| JsValue::from_str(&format!("canvas '{}' not found", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("'{}' is not a canvas", canvas_id)))?;
        self.surface = Some(CanvasSurface::from_canvas(&canvas)?);
        log::info!("web renderer attached to canvas '{}'", canvas_id);
        Ok(())
    }

    /// Render a frame; returns how many primitives the canvas refused
    pub fn render(&mut self) -> Result<u32, JsValue> {
        let surface = self
            .surface
            .as_mut()
            .ok_or_else(|| JsValue::from_str("renderer not initialized"))?;
        surface.clear(self.background);
        let scene: [&dyn Geometry; 1] = [&self.cube];
        let stats = render(&scene, &self.camera, surface, &self.style);
        Ok(stats.skipped() as u32)
    }

    pub fn move_camera(&mut self, dx: f32, dy: f32, dz: f32) {
        self.camera.add_to_position(Vector3::new(dx, dy, dz));
    }

    pub fn turn_camera(&mut self, dyaw: f32, dpitch: f32) {
        self.camera.add_to_angle_horz(dyaw);
        self.camera.add_to_angle_vert(dpitch);
    }

    /// Spin the cube around its own center
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.cube.rotate_about(dx, dy, dz, Point3::new(0.0, 0.0, 5.0));
    }
}
