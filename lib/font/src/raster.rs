//! Path rasterizer producing [`Coverage`] bitmaps.
//!
//! Paths are recorded in bitmap pixels and resolved by [`ab_glyph_rasterizer`], which accumulates
//! the signed area every line contributes to the pixels to its right and flattens curves into
//! lines.

use ab_glyph_rasterizer::{Point, point};

use crate::coverage::Coverage;

/// Scale applied to a `0.0..=1.0` coverage so that full coverage maps to `255`.
const ALMOST_256: f32 = 255.999_98;

/// Geometry further than this many pixels left or right of the bitmap is clamped.
const MAX_MARGIN: f32 = 4096.0;

/// A recorded drawing command, in bitmap pixels.
#[derive(Clone, Copy, Debug)]
enum Curve {
    /// A straight line.
    Line(Point, Point),
    /// A quadratic Bézier curve.
    Quad(Point, Point, Point),
    /// A cubic Bézier curve.
    Cubic(Point, Point, Point, Point),
}

/// A scanline rasterizer for closed paths made of lines and Bézier curves.
///
/// Coordinates are floating point pixels with `(0, 0)` at the top-left corner of the bitmap and
/// the y axis growing downwards. Rows above and below the bitmap are clipped. Geometry left of the
/// bitmap is folded into its first column and geometry right of it is dropped, which keeps the
/// winding of every row balanced.
#[derive(Clone, Debug)]
pub struct Rasterizer {
    /// The commands drawn so far.
    curves: Vec<Curve>,
    /// The width of the target bitmap in pixels.
    width: u16,
    /// The height of the target bitmap in pixels.
    height: u16,
    /// The smallest x coordinate seen so far, at most `0`.
    left: f32,
    /// The largest x coordinate seen so far, at least `width`.
    right: f32,
    /// The current pen position.
    pen: Point,
    /// The start of the current contour.
    first: Point,
}

impl Rasterizer {
    /// Creates a new [`Rasterizer`] targeting a `width` by `height` bitmap.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            curves: Vec::new(),
            width,
            height,
            left: 0.0,
            right: f32::from(width),
            pen: Point::default(),
            first: Point::default(),
        }
    }

    /// Closes the current contour and starts a new one at (`x`, `y`).
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.close_path();

        let to = self.track(x, y);
        self.pen = to;
        self.first = to;
    }

    /// Draws a line from the pen to (`x`, `y`).
    pub fn line_to(&mut self, x: f32, y: f32) {
        let to = self.track(x, y);
        self.curves.push(Curve::Line(self.pen, to));
        self.pen = to;
    }

    /// Draws a quadratic Bézier curve from the pen through control point (`bx`, `by`) to
    /// (`cx`, `cy`).
    pub fn quad_to(&mut self, bx: f32, by: f32, cx: f32, cy: f32) {
        let control = self.track(bx, by);
        let to = self.track(cx, cy);
        self.curves.push(Curve::Quad(self.pen, control, to));
        self.pen = to;
    }

    /// Draws a cubic Bézier curve from the pen through control points (`bx`, `by`) and
    /// (`cx`, `cy`) to (`dx`, `dy`).
    pub fn cube_to(&mut self, bx: f32, by: f32, cx: f32, cy: f32, dx: f32, dy: f32) {
        let control_0 = self.track(bx, by);
        let control_1 = self.track(cx, cy);
        let to = self.track(dx, dy);
        self.curves.push(Curve::Cubic(self.pen, control_0, control_1, to));
        self.pen = to;
    }

    /// Draws a line from the pen back to the start of the current contour.
    pub fn close_path(&mut self) {
        if self.pen != self.first {
            self.curves.push(Curve::Line(self.pen, self.first));
            self.pen = self.first;
        }
    }

    /// Closes the current contour and resolves the recorded path into a freshly zeroed
    /// [`Coverage`] bitmap, overwriting every pixel with the path's opacity.
    #[expect(clippy::cast_possible_truncation, reason = "values are clamped to the buffer")]
    #[expect(clippy::cast_sign_loss, reason = "values are non-negative")]
    #[expect(clippy::as_conversions)]
    pub fn render(mut self) -> Coverage {
        self.close_path();

        let mut coverage = Coverage::new(self.width, self.height);
        if self.curves.is_empty() || coverage.as_slice().is_empty() {
            return coverage;
        }

        // The spare column on either side absorbs rounding in the curve flattening.
        let left = self.left.max(-MAX_MARGIN).floor() - 1.0;
        let right = self.right.min(f32::from(self.width) + MAX_MARGIN).ceil() + 1.0;
        let stride = (right - left) as usize + 1;
        let place = |p: Point| point(p.x.clamp(left, right) - left, p.y);

        let mut raster = ab_glyph_rasterizer::Rasterizer::new(stride, usize::from(self.height));
        for curve in &self.curves {
            match *curve {
                Curve::Line(a, b) => raster.draw_line(place(a), place(b)),
                Curve::Quad(a, b, c) => raster.draw_quad(place(a), place(b), place(c)),
                Curve::Cubic(a, b, c, d) => {
                    raster.draw_cubic(place(a), place(b), place(c), place(d));
                }
            }
        }

        // Columns left of the bitmap only contribute to the running sum of each row.
        let offset = (-left) as usize;
        let width = usize::from(self.width);
        let pixels = coverage.as_mut_slice();
        raster.for_each_pixel(|index, alpha| {
            let column = index % stride;
            if !(offset..offset + width).contains(&column) {
                return;
            }

            let pixel = index / stride * width + column - offset;
            if let Some(pixel) = pixels.get_mut(pixel) {
                *pixel = (alpha.min(1.0) * ALMOST_256) as u8;
            }
        });

        coverage
    }

    /// Widens the horizontal extent of the path to include `x` and returns the point.
    fn track(&mut self, x: f32, y: f32) -> Point {
        self.left = self.left.min(x);
        self.right = self.right.max(x);
        point(x, y)
    }
}
