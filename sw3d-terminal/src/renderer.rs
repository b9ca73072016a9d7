/// ASCII drawing surface for terminal rendering
use crossterm::{
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use sw3d_core::{Color, DrawError, Surface};

/// Character luminosity ramp for filled faces (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

const DOT_CHAR: char = 'o';

/// A character-cell framebuffer that implements [`Surface`].
///
/// Faces are filled with a ramp character picked from their luminance and
/// printed in their own color. Everything is clipped to the buffer.
pub struct AsciiSurface {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiSurface {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::WHITE; size],
        }
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Color::WHITE);
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    pub fn color_at(&self, x: usize, y: usize) -> Option<Color> {
        (x < self.width && y < self.height).then(|| self.color_buffer[y * self.width + x])
    }

    fn plot(&mut self, x: i64, y: i64, character: char, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.char_buffer[idx] = character;
        self.color_buffer[idx] = color;
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let color = self.color_buffer[idx];
                if current != Some(color) {
                    writer.queue(SetForegroundColor(TermColor::Rgb {
                        r: color.r,
                        g: color.g,
                        b: color.b,
                    }))?;
                    current = Some(color);
                }
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Surface for AsciiSurface {
    fn width(&self) -> i32 {
        self.width as i32
    }

    fn height(&self) -> i32 {
        self.height as i32
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
        let (cx, cy, r) = (center.0 as i64, center.1 as i64, radius as i64);
        let min_y = (cy - r).max(0);
        let max_y = (cy + r).min(self.height as i64 - 1);
        let min_x = (cx - r).max(0);
        let max_x = (cx + r).min(self.width as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let (dx, dy) = (x - cx, y - cy);
                if dx * dx + dy * dy <= r * r {
                    self.plot(x, y, DOT_CHAR, color);
                }
            }
        }
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
        // cells are one character wide, so any positive width draws the same
        let bounds = (self.width as f64 - 1.0, self.height as f64 - 1.0);
        let Some((a, b)) = clip_line(to_f64(p1), to_f64(p2), bounds) else {
            return Ok(());
        };
        let character = line_char(p1, p2);
        bresenham(a, b, |x, y| self.plot(x, y, character, color));
        Ok(())
    }

    fn draw_polygon(&mut self, color: Color, points: &[(i32, i32)]) -> Result<(), DrawError> {
        if points.len() < 3 {
            return Err(DrawError::Degenerate {
                primitive: "polygon",
                reason: format!("{} points", points.len()),
            });
        }
        if twice_area(points) == 0.0 {
            return Err(DrawError::Degenerate {
                primitive: "polygon",
                reason: "zero area".to_string(),
            });
        }

        let char_index = (color.luminance() * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
        let character = LUMINOSITY_RAMP[char_index.min(LUMINOSITY_RAMP.len() - 1)];

        let min_y = points.iter().map(|p| p.1 as i64).min().unwrap_or(0).max(0);
        let max_y = points
            .iter()
            .map(|p| p.1 as i64)
            .max()
            .unwrap_or(0)
            .min(self.height as i64 - 1);

        // Even-odd scanline fill sampled at cell centers
        let mut crossings = Vec::with_capacity(points.len());
        for y in min_y..=max_y {
            let py = y as f64 + 0.5;
            crossings.clear();
            for (i, &(x1, y1)) in points.iter().enumerate() {
                let (x2, y2) = points[(i + 1) % points.len()];
                let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);
                if (y1 <= py) != (y2 <= py) {
                    crossings.push(x1 + (py - y1) * (x2 - x1) / (y2 - y1));
                }
            }
            crossings.sort_by(f64::total_cmp);
            for span in crossings.chunks_exact(2) {
                let start = (span[0] - 0.5).ceil().max(0.0) as i64;
                let end = (span[1] - 0.5).floor().min(self.width as f64 - 1.0) as i64;
                for x in start..=end {
                    self.plot(x, y, character, color);
                }
            }
        }
        Ok(())
    }
}

fn to_f64(p: (i32, i32)) -> (f64, f64) {
    (p.0 as f64, p.1 as f64)
}

/// Shoelace formula, doubled to stay in exact arithmetic for integer input.
fn twice_area(points: &[(i32, i32)]) -> f64 {
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(&(x1, y1), &(x2, y2))| x1 as f64 * y2 as f64 - x2 as f64 * y1 as f64)
        .sum()
}

fn line_char(p1: (i32, i32), p2: (i32, i32)) -> char {
    let dx = p2.0 as i64 - p1.0 as i64;
    let dy = p2.1 as i64 - p1.1 as i64;
    if dy.abs() * 2 < dx.abs() {
        '-'
    } else if dx.abs() * 2 < dy.abs() {
        '|'
    } else if (dx > 0) == (dy > 0) {
        '\\'
    } else {
        '/'
    }
}

/// Liang-Barsky clip against `[0, max_x] x [0, max_y]`.
fn clip_line(
    p1: (f64, f64),
    p2: (f64, f64),
    (max_x, max_y): (f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (p2.0 - p1.0, p2.1 - p1.1);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for (p, q) in [(-dx, p1.0), (dx, max_x - p1.0), (-dy, p1.1), (dy, max_y - p1.1)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((
        (p1.0 + t0 * dx, p1.1 + t0 * dy),
        (p1.0 + t1 * dx, p1.1 + t1 * dy),
    ))
}

fn bresenham(a: (f64, f64), b: (f64, f64), mut plot: impl FnMut(i64, i64)) {
    let (mut x, mut y) = (a.0.round() as i64, a.1.round() as i64);
    let (x1, y1) = (b.0.round() as i64, b.1.round() as i64);
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        plot(x, y);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
