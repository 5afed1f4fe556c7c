//! Character-grid drawing surface for terminal output
use crossterm::{
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use surf3d_core::{Color, DrawingSurface, ScreenPoint};

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
}

/// Drawing surface that rasterizes primitives into terminal cells.
///
/// Every primitive overwrites the cells it covers, so the last one drawn
/// wins. Pixels outside the grid are dropped.
pub struct AsciiCanvas {
    width: usize,
    height: usize,
    background: Color,
    cells: Vec<Option<Cell>>,
}

impl AsciiCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            background: Color::new(255, 255, 255),
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Character at a cell, `' '` where nothing was drawn
    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x].map_or(' ', |cell| cell.ch))
        } else {
            None
        }
    }

    pub fn color_at(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x].map(|cell| cell.color)
        } else {
            None
        }
    }

    fn plot(&mut self, x: i32, y: i32, ch: char, color: Color) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.cells[idx] = Some(Cell { ch, color });
    }

    fn rasterize_triangle(
        &mut self,
        v0: ScreenPoint,
        v1: ScreenPoint,
        v2: ScreenPoint,
        ch: char,
        color: Color,
    ) {
        let (v0, v1, v2) = (to_f32(v0), to_f32(v1), to_f32(v2));

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                // Barycentric weights do not depend on winding
                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.plot(x, y, ch, color);
                    }
                }
            }
        }
    }

    /// Write the grid to `writer`, one terminal row per canvas row
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.queue(SetBackgroundColor(to_terminal(self.background)))?;
        for row in self.cells.chunks(self.width.max(1)) {
            for cell in row {
                match cell {
                    Some(cell) => {
                        writer.queue(SetForegroundColor(to_terminal(cell.color)))?;
                        writer.queue(Print(cell.ch))?;
                    }
                    None => {
                        writer.queue(Print(' '))?;
                    }
                }
            }
            writer.queue(Print("\r\n"))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl DrawingSurface for AsciiCanvas {
    fn create_line(&mut self, from: ScreenPoint, to: ScreenPoint, color: Color, width: Option<u32>) {
        let ch = match width {
            Some(w) if w > 1 => '#',
            _ => line_char(from, to),
        };

        let Some((from, to)) = clip_segment(from, to, self.width, self.height) else {
            return;
        };

        // Bresenham, both ends are on the grid
        let (mut x, mut y) = (from.x, from.y);
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x, y, ch, color);
            if x == to.x && y == to.y {
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

    fn create_polygon(&mut self, points: &[ScreenPoint], fill: Color) {
        let ch = shade_char(fill);
        match points {
            [] => {}
            [p] => self.plot(p.x, p.y, ch, fill),
            [first, rest @ ..] => {
                if rest.len() == 1 {
                    self.create_line(*first, rest[0], fill, None);
                    return;
                }
                // Triangle fan around the first point
                for pair in rest.windows(2) {
                    self.rasterize_triangle(*first, pair[0], pair[1], ch, fill);
                }
            }
        }
    }

    fn create_text(&mut self, pos: ScreenPoint, text: &str, _font: Option<&str>, color: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.plot(pos.x.saturating_add(i as i32), pos.y, ch, color);
        }
    }

    fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }
}

fn to_f32(p: ScreenPoint) -> (f32, f32) {
    (p.x as f32, p.y as f32)
}

fn to_terminal(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Ramp character for a fill color
fn shade_char(color: Color) -> char {
    let index = (color.luminance() * (LUMINOSITY_RAMP.len() - 1) as f64).round() as usize;
    LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)]
}

/// Stroke character following the slope of a segment
fn line_char(from: ScreenPoint, to: ScreenPoint) -> char {
    let dx = to.x as i64 - from.x as i64;
    let dy = to.y as i64 - from.y as i64;
    if dx == 0 && dy == 0 {
        '.'
    } else if dy.abs() * 2 < dx.abs() {
        '-'
    } else if dx.abs() * 2 < dy.abs() {
        '|'
    } else if (dx > 0) == (dy > 0) {
        '\\'
    } else {
        '/'
    }
}

/// Clip a segment to a `width` x `height` grid (Liang-Barsky).
///
/// Returns `None` when no part of the segment lies on the grid.
fn clip_segment(
    from: ScreenPoint,
    to: ScreenPoint,
    width: usize,
    height: usize,
) -> Option<(ScreenPoint, ScreenPoint)> {
    if width == 0 || height == 0 {
        return None;
    }
    let (x_max, y_max) = ((width - 1) as f64, (height - 1) as f64);
    let (x0, y0) = (from.x as f64, from.y as f64);
    let dx = to.x as f64 - x0;
    let dy = to.y as f64 - y0;

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [(-dx, x0), (dx, x_max - x0), (-dy, y0), (dy, y_max - y0)] {
        if p == 0.0 {
            // Parallel to this edge
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

    let at = |t: f64| {
        let x = (x0 + t * dx).round().clamp(0.0, x_max);
        let y = (y0 + t * dy).round().clamp(0.0, y_max);
        ScreenPoint::new(x as i32, y as i32)
    };
    Some((at(t0), at(t1)))
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drawn(canvas: &AsciiCanvas) -> usize {
        let mut count = 0;
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                if canvas.char_at(x, y) != Some(' ') {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn test_horizontal_line() {
        let mut canvas = AsciiCanvas::new(10, 3);
        canvas.create_line(ScreenPoint::new(1, 1), ScreenPoint::new(6, 1), Color::BLACK, None);
        for x in 1..=6 {
            assert_eq!(canvas.char_at(x, 1), Some('-'));
        }
        assert_eq!(canvas.char_at(0, 1), Some(' '));
        assert_eq!(drawn(&canvas), 6);
    }

    #[test]
    fn test_wide_line_and_clipping() {
        let mut canvas = AsciiCanvas::new(5, 5);
        canvas.create_line(ScreenPoint::new(-3, -3), ScreenPoint::new(10, 10), Color::RED, Some(2));
        for i in 0..5 {
            assert_eq!(canvas.char_at(i, i), Some('#'));
            assert_eq!(canvas.color_at(i, i), Some(Color::RED));
        }
        assert_eq!(drawn(&canvas), 5);
    }

    #[test]
    fn test_line_with_far_endpoint() {
        let mut canvas = AsciiCanvas::new(10, 3);
        canvas.create_line(ScreenPoint::new(i32::MAX, 0), ScreenPoint::new(-5, 0), Color::BLACK, None);
        for x in 0..10 {
            assert_eq!(canvas.char_at(x, 0), Some('-'));
        }
        assert_eq!(drawn(&canvas), 10);

        canvas.clear();
        canvas.create_line(
            ScreenPoint::new(i32::MIN, i32::MIN),
            ScreenPoint::new(i32::MAX, i32::MAX),
            Color::BLACK,
            Some(2),
        );
        assert_eq!(canvas.char_at(0, 0), Some('#'));
        assert_eq!(canvas.char_at(2, 2), Some('#'));
    }

    #[test]
    fn test_line_off_grid_draws_nothing() {
        let mut canvas = AsciiCanvas::new(10, 3);
        canvas.create_line(ScreenPoint::new(-100, -5), ScreenPoint::new(100, -5), Color::BLACK, None);
        canvas.create_line(ScreenPoint::new(20, 0), ScreenPoint::new(40, 20), Color::BLACK, None);
        canvas.create_line(ScreenPoint::new(i32::MIN, 1), ScreenPoint::new(-1, 1), Color::BLACK, None);
        assert_eq!(drawn(&canvas), 0);

        let mut empty = AsciiCanvas::new(0, 0);
        empty.create_line(ScreenPoint::new(0, 0), ScreenPoint::new(5, 5), Color::BLACK, None);
        assert_eq!(drawn(&empty), 0);
    }

    #[test]
    fn test_filled_triangle_either_winding() {
        let a = ScreenPoint::new(0, 0);
        let b = ScreenPoint::new(8, 0);
        let c = ScreenPoint::new(0, 8);

        let mut ccw = AsciiCanvas::new(10, 10);
        ccw.create_polygon(&[a, b, c], Color::new(255, 255, 255));
        let mut cw = AsciiCanvas::new(10, 10);
        cw.create_polygon(&[a, c, b], Color::new(255, 255, 255));

        assert!(drawn(&ccw) > 20);
        assert_eq!(drawn(&ccw), drawn(&cw));
        assert_eq!(ccw.char_at(1, 1), Some('@'));
        assert_eq!(ccw.char_at(9, 9), Some(' '));
    }

    #[test]
    fn test_last_primitive_wins() {
        let mut canvas = AsciiCanvas::new(6, 6);
        let square = [
            ScreenPoint::new(0, 0),
            ScreenPoint::new(6, 0),
            ScreenPoint::new(6, 6),
            ScreenPoint::new(0, 6),
        ];
        canvas.create_polygon(&square, Color::new(255, 255, 255));
        canvas.create_polygon(&square, Color::BLACK);
        assert_eq!(canvas.char_at(3, 3), Some('.'));
        assert_eq!(canvas.color_at(3, 3), Some(Color::BLACK));
    }

    #[test]
    fn test_text_and_clear() {
        let mut canvas = AsciiCanvas::new(8, 2);
        canvas.create_text(ScreenPoint::new(6, 0), "XYZ", None, Color::BLUE);
        assert_eq!(canvas.char_at(6, 0), Some('X'));
        assert_eq!(canvas.char_at(7, 0), Some('Y'));
        assert_eq!(drawn(&canvas), 2);

        canvas.clear();
        assert_eq!(drawn(&canvas), 0);
    }

    #[test]
    fn test_draw_writes_every_row() {
        let mut canvas = AsciiCanvas::new(4, 3);
        canvas.create_text(ScreenPoint::new(0, 1), "ab", None, Color::BLACK);

        let mut out = Vec::new();
        canvas.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("\r\n").count(), 3);
        assert!(text.contains('a') && text.contains('b'));
    }
}
