//! Raster canvas with the handful of drawing primitives the icon needs.
//!
//! Shapes are described by inclusive pixel boxes and painted with hard
//! edges: a pixel is either covered by a shape or left untouched. Every
//! primitive clips to the canvas, so out-of-range geometry is harmless.

use image::{ImageBuffer, Pixel, Rgb, Rgba};

/// Pixel formats the canvas can paint into.
pub trait Paint: Pixel<Subpixel = u8> {
    /// Fully opaque pixel of the given colour.
    fn opaque(color: Rgb<u8>) -> Self;
}

impl Paint for Rgb<u8> {
    fn opaque(color: Rgb<u8>) -> Self {
        color
    }
}

impl Paint for Rgba<u8> {
    fn opaque(color: Rgb<u8>) -> Self {
        Rgba([color[0], color[1], color[2], 255])
    }
}

/// Axis-aligned box, inclusive of both corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Box spanning `x..=x + side` and `y..=y + side`.
    pub fn square(x: i32, y: i32, side: i32) -> Self {
        Self::new(x, y, x + side, y + side)
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    fn is_empty(&self) -> bool {
        self.x1 < self.x0 || self.y1 < self.y0
    }

    fn inset(&self, by: i32) -> Self {
        Self::new(self.x0 + by, self.y0 + by, self.x1 - by, self.y1 - by)
    }

    fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x0 as f64 && x <= self.x1 as f64 && y >= self.y0 as f64 && y <= self.y1 as f64
    }

    fn contains_rounded(&self, radius: i32, x: f64, y: f64) -> bool {
        if !self.contains(x, y) {
            return false;
        }

        let radius = radius.min(self.width() / 2).min(self.height() / 2).max(0) as f64;
        if radius == 0.0 {
            return true;
        }

        // Distance to the inner box whose corners are the arc centres
        let cx = x.clamp(self.x0 as f64 + radius, self.x1 as f64 - radius);
        let cy = y.clamp(self.y0 as f64 + radius, self.y1 as f64 - radius);
        let dx = x - cx;
        let dy = y - cy;
        dx * dx + dy * dy <= radius * radius
    }
}

/// A square drawing surface.
#[derive(Debug, Clone)]
pub struct Canvas<P: Paint> {
    buffer: ImageBuffer<P, Vec<u8>>,
}

impl<P: Paint> Canvas<P> {
    /// Allocates a `size`×`size` canvas with every channel zeroed, which is
    /// black for RGB and fully transparent for RGBA.
    pub fn new(size: u32) -> Self {
        Self {
            buffer: ImageBuffer::new(size, size),
        }
    }

    pub fn size(&self) -> u32 {
        self.buffer.width()
    }

    pub fn pixel(&self, x: u32, y: u32) -> &P {
        self.buffer.get_pixel(x, y)
    }

    pub fn into_buffer(self) -> ImageBuffer<P, Vec<u8>> {
        self.buffer
    }

    /// Fills every scanline with a colour interpolated from `top` (first row)
    /// towards `bottom`, using `y / size` as the blend factor.
    pub fn fill_vertical_gradient(&mut self, top: Rgb<u8>, bottom: Rgb<u8>) {
        let height = self.buffer.height();
        for y in 0..height {
            let ratio = y as f64 / height as f64;
            let mut row = top;
            for (channel, (&a, &b)) in row.0.iter_mut().zip(top.0.iter().zip(bottom.0.iter())) {
                *channel = (a as f64 * (1.0 - ratio) + b as f64 * ratio) as u8;
            }

            let pixel = P::opaque(row);
            for x in 0..self.buffer.width() {
                self.buffer.put_pixel(x, y, pixel);
            }
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgb<u8>) {
        self.paint_where(rect, P::opaque(color), |x, y| rect.contains(x, y));
    }

    /// Fills the ellipse inscribed in `rect`.
    pub fn fill_ellipse(&mut self, rect: Rect, color: Rgb<u8>) {
        let cx = (rect.x0 + rect.x1) as f64 / 2.0;
        let cy = (rect.y0 + rect.y1) as f64 / 2.0;
        let rx = (rect.width() as f64 / 2.0).max(0.5);
        let ry = (rect.height() as f64 / 2.0).max(0.5);

        self.paint_where(rect, P::opaque(color), |x, y| {
            let nx = (x - cx) / rx;
            let ny = (y - cy) / ry;
            nx * nx + ny * ny <= 1.0
        });
    }

    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: i32, color: Rgb<u8>) {
        self.paint_where(rect, P::opaque(color), |x, y| {
            rect.contains_rounded(radius, x, y)
        });
    }

    /// Draws the outline of a rounded rectangle. The stroke grows inward from
    /// the edge of `rect`.
    pub fn stroke_rounded_rect(&mut self, rect: Rect, radius: i32, width: i32, color: Rgb<u8>) {
        let inner = rect.inset(width);
        let inner_radius = (radius - width).max(0);

        self.paint_where(rect, P::opaque(color), |x, y| {
            rect.contains_rounded(radius, x, y)
                && (inner.is_empty() || !inner.contains_rounded(inner_radius, x, y))
        });
    }

    /// Draws a straight segment `width` pixels thick with square-cut ends.
    pub fn stroke_line(&mut self, from: (i32, i32), to: (i32, i32), width: i32, color: Rgb<u8>) {
        let half = width.max(1) as f64 / 2.0;
        let (ax, ay) = (from.0 as f64, from.1 as f64);
        let dx = (to.0 - from.0) as f64;
        let dy = (to.1 - from.1) as f64;
        let length_sq = dx * dx + dy * dy;

        let pad = half.ceil() as i32;
        let bounds = Rect::new(
            from.0.min(to.0) - pad,
            from.1.min(to.1) - pad,
            from.0.max(to.0) + pad,
            from.1.max(to.1) + pad,
        );

        self.paint_where(bounds, P::opaque(color), |x, y| {
            let px = x - ax;
            let py = y - ay;
            if length_sq == 0.0 {
                return px * px + py * py <= half * half;
            }

            let along = (px * dx + py * dy) / length_sq;
            let across = (px * dy - py * dx).abs() / length_sq.sqrt();
            (0.0..=1.0).contains(&along) && across <= half
        });
    }

    /// Sets `color` on every pixel of `bounds` (clipped to the canvas) for
    /// which `inside` holds.
    fn paint_where(&mut self, bounds: Rect, color: P, inside: impl Fn(f64, f64) -> bool) {
        let max = self.size() as i32 - 1;
        let (x0, x1) = (bounds.x0.max(0), bounds.x1.min(max));
        let (y0, y1) = (bounds.y0.max(0), bounds.y1.min(max));

        for y in y0..=y1 {
            for x in x0..=x1 {
                if inside(x as f64, y as f64) {
                    self.buffer.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }
}
