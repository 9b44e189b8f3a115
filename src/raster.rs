//! Shape rasterization.
//!
//! All primitives reduce to [`Framebuffer::plot`] in signed coordinates, so
//! shapes that run off the panel are clipped pixel by pixel.

use core::f32::consts::PI;

use crate::color::Color;
use crate::framebuffer::Framebuffer;
use crate::size::PanelSize;

/// Chords per full circle when approximating arcs (10° each).
pub const CIRCLE_APPROXIMATION_SEGMENTS: u32 = 36;

/// One point of a polyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vertex {
    pub x: u8,
    pub y: u8,
}

impl Vertex {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

/// Reduce an angle in degrees to `[0, 360]`.
///
/// Angles up to 360 are returned unchanged. Larger angles wrap, with exact
/// multiples of 360 mapping to 360 rather than 0 so a full sweep stays full.
pub fn normalize_degrees(degrees: u16) -> u16 {
    if degrees <= 360 {
        return degrees;
    }
    match degrees % 360 {
        0 => 360,
        rest => rest,
    }
}

/// Point on a circle of `radius` around `(cx, cy)`. 0° points down (+y),
/// angles grow clockwise.
fn arc_point(cx: i32, cy: i32, radius: u8, degrees: f32) -> (i32, i32) {
    let rad = degrees * (PI / 180.0);
    let r = f32::from(radius);
    (
        cx + libm::roundf(libm::sinf(rad) * r) as i32,
        cy + libm::roundf(libm::cosf(rad) * r) as i32,
    )
}

/// Integer midpoint circle walk from `(-r, 0)` to `(0, r)`.
///
/// `step` receives `(x, y)` with `x <= 0 <= y`; the four mirror images of
/// each step cover the whole circle.
fn circle_steps(radius: u8, mut step: impl FnMut(i32, i32)) {
    let r = i32::from(radius);
    let mut x = -r;
    let mut y = 0;
    let mut err = 2 - 2 * r;

    while x <= 0 {
        step(x, y);

        let mut e2 = err;
        if e2 <= y {
            y += 1;
            err += y * 2 + 1;
            if -x == y && e2 <= x {
                e2 = 0;
            }
        }
        if e2 > x {
            x += 1;
            err += x * 2 + 1;
        }
    }
}

impl<S: PanelSize> Framebuffer<S> {
    /// Bresenham line in signed coordinates, both endpoints inclusive.
    pub(crate) fn line(&mut self, mut x1: i32, mut y1: i32, x2: i32, y2: i32, color: Color) {
        let delta_x = (x2 - x1).abs();
        let delta_y = (y2 - y1).abs();
        let sign_x = if x1 < x2 { 1 } else { -1 };
        let sign_y = if y1 < y2 { 1 } else { -1 };
        let mut error = delta_x - delta_y;

        self.plot(x2, y2, color);

        while x1 != x2 || y1 != y2 {
            self.plot(x1, y1, color);
            let error2 = error * 2;
            if error2 > -delta_y {
                error -= delta_y;
                x1 += sign_x;
            }
            if error2 < delta_x {
                error += delta_x;
                y1 += sign_y;
            }
        }
    }

    /// Draw a line from `(x1, y1)` to `(x2, y2)`, both ends included.
    pub fn draw_line(&mut self, x1: u8, y1: u8, x2: u8, y2: u8, color: Color) {
        self.line(
            i32::from(x1),
            i32::from(y1),
            i32::from(x2),
            i32::from(y2),
            color,
        );
    }

    /// Connect consecutive vertices with lines.
    ///
    /// The shape is not closed; repeat the first vertex at the end to close
    /// it. Fewer than two vertices draw nothing.
    pub fn draw_polyline(&mut self, vertices: &[Vertex], color: Color) {
        for pair in vertices.windows(2) {
            if let [from, to] = pair {
                self.draw_line(from.x, from.y, to.x, to.y, color);
            }
        }
    }

    /// Chord approximation of an arc; returns the first and last vertex.
    ///
    /// The start angle selects the first 10° segment; segments then run up
    /// to `sweep`, so `sweep` acts as the end angle of a 360° sweep.
    fn arc(
        &mut self,
        x: u8,
        y: u8,
        radius: u8,
        start_angle: u16,
        sweep: u16,
        color: Color,
    ) -> ((i32, i32), (i32, i32)) {
        let (cx, cy) = (i32::from(x), i32::from(y));
        let sweep = u32::from(normalize_degrees(sweep));
        let segments = (sweep * CIRCLE_APPROXIMATION_SEGMENTS / 360).max(1);
        let segment_degrees = sweep as f32 / segments as f32;
        let mut count =
            u32::from(normalize_degrees(start_angle)) * CIRCLE_APPROXIMATION_SEGMENTS / 360;

        let first = arc_point(cx, cy, radius, count as f32 * segment_degrees);
        let mut last = first;

        while count < segments {
            let from = arc_point(cx, cy, radius, count as f32 * segment_degrees);
            count += 1;
            let to_degrees = if count == segments {
                sweep as f32
            } else {
                count as f32 * segment_degrees
            };
            let to = arc_point(cx, cy, radius, to_degrees);
            self.line(from.0, from.1, to.0, to.1, color);
            last = to;
        }

        (first, last)
    }

    /// Draw an arc around `(x, y)`.
    ///
    /// Angles are in degrees; 0° points down and angles grow clockwise.
    /// Sweeps shorter than one 10° segment draw a single chord.
    pub fn draw_arc(&mut self, x: u8, y: u8, radius: u8, start_angle: u16, sweep: u16, color: Color) {
        self.arc(x, y, radius, start_angle, sweep, color);
    }

    /// Draw an arc plus the two radii joining its ends to the center.
    pub fn draw_arc_with_radius_line(
        &mut self,
        x: u8,
        y: u8,
        radius: u8,
        start_angle: u16,
        sweep: u16,
        color: Color,
    ) {
        let (first, last) = self.arc(x, y, radius, start_angle, sweep, color);
        let (cx, cy) = (i32::from(x), i32::from(y));
        self.line(cx, cy, first.0, first.1, color);
        self.line(cx, cy, last.0, last.1, color);
    }

    /// Draw a circle outline. Nothing is drawn if the center is off-panel.
    pub fn draw_circle(&mut self, x: u8, y: u8, radius: u8, color: Color) {
        if x >= S::WIDTH || y >= S::HEIGHT {
            return;
        }
        let (cx, cy) = (i32::from(x), i32::from(y));
        circle_steps(radius, |dx, dy| {
            self.plot(cx - dx, cy + dy, color);
            self.plot(cx + dx, cy + dy, color);
            self.plot(cx + dx, cy - dy, color);
            self.plot(cx - dx, cy - dy, color);
        });
    }

    /// Draw a filled circle. Nothing is drawn if the center is off-panel.
    pub fn fill_circle(&mut self, x: u8, y: u8, radius: u8, color: Color) {
        if x >= S::WIDTH || y >= S::HEIGHT {
            return;
        }
        let (cx, cy) = (i32::from(x), i32::from(y));
        let (max_x, max_y) = (i32::from(S::WIDTH) - 1, i32::from(S::HEIGHT) - 1);
        circle_steps(radius, |dx, dy| {
            for row in (cy - dy).max(0)..=(cy + dy).min(max_y) {
                for column in (cx + dx).max(0)..=(cx - dx).min(max_x) {
                    self.plot(column, row, color);
                }
            }
        });
    }

    /// Draw a rectangle outline with corners `(x1, y1)` and `(x2, y2)`.
    pub fn draw_rectangle(&mut self, x1: u8, y1: u8, x2: u8, y2: u8, color: Color) {
        self.draw_line(x1, y1, x2, y1, color);
        self.draw_line(x2, y1, x2, y2, color);
        self.draw_line(x2, y2, x1, y2, color);
        self.draw_line(x1, y2, x1, y1, color);
    }

    /// Fill the rectangle with corners `(x1, y1)` and `(x2, y2)`, inclusive.
    pub fn fill_rectangle(&mut self, x1: u8, y1: u8, x2: u8, y2: u8, color: Color) {
        let (x_start, x_end) = (x1.min(x2), x1.max(x2).min(S::WIDTH - 1));
        let (y_start, y_end) = (y1.min(y2), y1.max(y2).min(S::HEIGHT - 1));

        for y in y_start..=y_end {
            for x in x_start..=x_end {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// Blit a 1-bit bitmap with its top-left corner at `(x, y)`.
    ///
    /// Rows are `ceil(w / 8)` bytes, MSB first. Set bits paint `color`;
    /// clear bits leave the buffer alone. Nothing is drawn if the anchor is
    /// off-panel.
    pub fn draw_bitmap(&mut self, x: u8, y: u8, bitmap: &[u8], w: u8, h: u8, color: Color) {
        if x >= S::WIDTH || y >= S::HEIGHT {
            return;
        }
        let byte_width = (usize::from(w) + 7) / 8;

        for j in 0..h {
            for i in 0..w {
                let Some(&byte) = bitmap.get(usize::from(j) * byte_width + usize::from(i) / 8)
                else {
                    continue;
                };
                if byte & (0x80 >> (i & 7)) != 0 {
                    self.plot(i32::from(x) + i32::from(i), i32::from(y) + i32::from(j), color);
                }
            }
        }
    }
}
