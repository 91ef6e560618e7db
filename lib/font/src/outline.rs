//! Vector glyph outlines expressed in 26.6 fixed point coordinates.
//!
//! Outlines are stored with the y axis growing downwards and the glyph's baseline at `y = 0`, so
//! the upper part of a glyph has negative y coordinates.

/// The number of fractional units in one pixel of a 26.6 fixed point coordinate.
pub const FIXED_ONE: i32 = 1 << 6;

/// A point of a [`Segment`] in 26.6 fixed point pixel units.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Point {
    /// The horizontal coordinate, growing to the right.
    pub x: i32,
    /// The vertical coordinate, growing downwards.
    pub y: i32,
}

impl Point {
    /// Creates a new [`Point`] from 26.6 fixed point coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Creates a new [`Point`] located at whole pixel coordinates.
    pub const fn from_pixels(x: i32, y: i32) -> Self {
        Self {
            x: x * FIXED_ONE,
            y: y * FIXED_ONE,
        }
    }

    /// Converts the [`Point`] into floating point pixel coordinates after translating it by
    /// `origin`.
    #[expect(clippy::cast_precision_loss, reason = "26.6 coordinates of glyphs are small")]
    #[expect(clippy::as_conversions)]
    pub fn to_pixels(self, origin: (f32, f32)) -> (f32, f32) {
        (
            origin.0 + self.x as f32 / FIXED_ONE as f32,
            origin.1 + self.y as f32 / FIXED_ONE as f32,
        )
    }
}

/// The kind of drawing operation a [`Segment`] performs.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum SegmentOp {
    /// Starts a new contour at `args[0]`.
    MoveTo,
    /// Draws a straight line to `args[0]`.
    LineTo,
    /// Draws a quadratic Bézier curve with control point `args[0]` ending at `args[1]`.
    QuadTo,
    /// Draws a cubic Bézier curve with control points `args[0]` and `args[1]` ending at
    /// `args[2]`.
    CubeTo,
    /// An operation reported by a font backend that has no meaning to this crate, identified by
    /// the backend's code for it.
    Unknown(u32),
}

impl SegmentOp {
    /// Returns the number of points in [`Segment::args`] used by this [`SegmentOp`].
    pub const fn arg_count(&self) -> usize {
        match self {
            Self::MoveTo | Self::LineTo => 1,
            Self::QuadTo => 2,
            Self::CubeTo => 3,
            Self::Unknown(_) => 0,
        }
    }
}

/// A single path command of a glyph outline.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Segment {
    /// The operation to perform.
    pub op: SegmentOp,
    /// The points of the operation. Only the first [`SegmentOp::arg_count`] points are
    /// meaningful, the rest are zeroed.
    pub args: [Point; 3],
}

impl Segment {
    /// Creates a [`SegmentOp::MoveTo`] [`Segment`].
    pub const fn move_to(to: Point) -> Self {
        Self::with_args(SegmentOp::MoveTo, [to, Point::new(0, 0), Point::new(0, 0)])
    }

    /// Creates a [`SegmentOp::LineTo`] [`Segment`].
    pub const fn line_to(to: Point) -> Self {
        Self::with_args(SegmentOp::LineTo, [to, Point::new(0, 0), Point::new(0, 0)])
    }

    /// Creates a [`SegmentOp::QuadTo`] [`Segment`].
    pub const fn quad_to(control: Point, to: Point) -> Self {
        Self::with_args(SegmentOp::QuadTo, [control, to, Point::new(0, 0)])
    }

    /// Creates a [`SegmentOp::CubeTo`] [`Segment`].
    pub const fn cube_to(control_0: Point, control_1: Point, to: Point) -> Self {
        Self::with_args(SegmentOp::CubeTo, [control_0, control_1, to])
    }

    /// Creates a [`Segment`] from its raw parts.
    pub const fn with_args(op: SegmentOp, args: [Point; 3]) -> Self {
        Self { op, args }
    }

    /// Returns the meaningful points of this [`Segment`].
    pub fn points(&self) -> &[Point] {
        &self.args[..self.op.arg_count()]
    }
}
