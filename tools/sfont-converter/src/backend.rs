//! Font backends supplying glyph indices, metrics and outlines.

use font::outline::{FIXED_ONE, Point, Segment};
use ttf_parser::{Face, GlyphId, OutlineBuilder, Tag, head::IndexToLocationFormat};

use crate::error::ConvertError;

/// The index of a glyph inside a font. `0` is the font's "missing glyph".
pub type GlyphIndex = u16;

/// Global font metrics in 26.6 fixed point pixels at a specific size.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct FontMetrics {
    /// The recommended distance between two baselines.
    pub height: i32,
    /// The distance from the baseline to the top of the tallest glyphs.
    pub ascent: i32,
    /// The distance from the baseline to the bottom of the lowest glyphs, positive downwards.
    pub descent: i32,
    /// The height of capital letters above the baseline, if the font records it or has an `'H'`
    /// to measure it from.
    pub cap_height: Option<i32>,
}

/// Access to a parsed vector font.
pub trait FontBackend {
    /// Returns the [`GlyphIndex`] mapped to `c`, or `0` if the font has no glyph for it.
    fn glyph_index(&self, c: char) -> GlyphIndex;

    /// Returns the font's [`FontMetrics`] at `ppem` pixels per em.
    fn metrics(&self, ppem: u16) -> FontMetrics;

    /// Returns the outline of the glyph at `index` scaled to `ppem` pixels per em.
    ///
    /// Points are in 26.6 fixed point with the y axis growing downwards and the baseline at
    /// `y = 0`. Glyphs without an outline produce no [`Segment`]s. Returns `None` if the glyph's
    /// outline data is malformed.
    fn load_outline(&self, index: GlyphIndex, ppem: u16) -> Option<Vec<Segment>>;
}

/// A [`FontBackend`] for TrueType and OpenType fonts.
pub struct TtfBackend<'data> {
    /// The parsed font.
    face: Face<'data>,
}

impl<'data> TtfBackend<'data> {
    /// Parses the first face contained in `data`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::FontParse`] if `data` is not a valid font.
    pub fn parse(data: &'data [u8]) -> Result<Self, ConvertError> {
        let face = Face::parse(data, 0).map_err(ConvertError::FontParse)?;
        Ok(Self { face })
    }

    /// Returns the number of 26.6 fixed point units per font unit at `ppem`.
    #[expect(clippy::cast_precision_loss, reason = "`FIXED_ONE` is exactly representable")]
    #[expect(clippy::as_conversions)]
    fn scale(&self, ppem: u16) -> f32 {
        f32::from(ppem) * FIXED_ONE as f32 / f32::from(self.face.units_per_em())
    }

    /// Returns the height of capital letters in font units, measured from the top of `'H'` when
    /// the `OS/2` table predates the field.
    fn capital_height(&self) -> Option<i16> {
        self.face.capital_height().or_else(|| {
            let h = self.face.glyph_index('H')?;
            self.face.glyph_bounding_box(h).map(|bounds| bounds.y_max)
        })
    }

    /// Returns whether the font stores contours for `index`.
    ///
    /// [`Face::outline_glyph`] reports glyphs without contours and glyphs it fails to read in the
    /// same way, so the `glyf` record is inspected directly. Fonts with CFF outlines have no
    /// records to inspect and rely on `recorded`, the segments read before the failure.
    fn has_contours(&self, index: GlyphIndex, recorded: &[Segment]) -> bool {
        let raw = self.face.raw_face();
        let (Some(loca), Some(glyf)) = (
            raw.table(Tag::from_bytes(b"loca")),
            raw.table(Tag::from_bytes(b"glyf")),
        ) else {
            return !recorded.is_empty();
        };

        let format = self.face.tables().head.index_to_location_format;
        let (Some(start), Some(end)) = (
            glyph_offset(loca, format, usize::from(index)),
            glyph_offset(loca, format, usize::from(index) + 1),
        ) else {
            return true;
        };
        if start == end {
            return false;
        }

        // A record with a contour count of zero holds no outline.
        glyf.get(start..end)
            .and_then(|record| record.get(..2))
            .is_none_or(|contours| contours != [0, 0])
    }
}

/// Reads the offset of glyph `index` into the `glyf` table from the `loca` table.
fn glyph_offset(loca: &[u8], format: IndexToLocationFormat, index: usize) -> Option<usize> {
    match format {
        // The short format stores half the offset.
        IndexToLocationFormat::Short => {
            let bytes = loca.get(index * 2..index * 2 + 2)?.try_into().ok()?;
            Some(usize::from(u16::from_be_bytes(bytes)) * 2)
        }
        IndexToLocationFormat::Long => {
            let bytes = loca.get(index * 4..index * 4 + 4)?.try_into().ok()?;
            usize::try_from(u32::from_be_bytes(bytes)).ok()
        }
    }
}

impl FontBackend for TtfBackend<'_> {
    fn glyph_index(&self, c: char) -> GlyphIndex {
        self.face.glyph_index(c).map_or(0, |id| id.0)
    }

    fn metrics(&self, ppem: u16) -> FontMetrics {
        let scale = self.scale(ppem);
        let ascent = f32::from(self.face.ascender());
        let descent = -f32::from(self.face.descender());
        let line_gap = f32::from(self.face.line_gap());

        FontMetrics {
            height: to_fixed(ascent + descent + line_gap, scale),
            ascent: to_fixed(ascent, scale),
            descent: to_fixed(descent, scale),
            cap_height: self
                .capital_height()
                .map(|cap_height| to_fixed(f32::from(cap_height), scale)),
        }
    }

    fn load_outline(&self, index: GlyphIndex, ppem: u16) -> Option<Vec<Segment>> {
        let mut recorder = OutlineRecorder {
            scale: self.scale(ppem),
            segments: Vec::new(),
            start: Point::default(),
            pen: Point::default(),
        };
        if self.face.outline_glyph(GlyphId(index), &mut recorder).is_some() {
            return Some(recorder.segments);
        }

        // Glyphs without contours, such as the space, have nothing to outline.
        if self.has_contours(index, &recorder.segments) {
            return None;
        }
        Some(Vec::new())
    }
}

/// Converts a length in font units to rounded 26.6 fixed point.
#[expect(clippy::cast_possible_truncation, reason = "glyph coordinates are small")]
#[expect(clippy::as_conversions)]
fn to_fixed(units: f32, scale: f32) -> i32 {
    (units * scale).round() as i32
}

/// Records the outline reported by [`ttf_parser`] as [`Segment`]s.
struct OutlineRecorder {
    /// The number of 26.6 fixed point units per font unit.
    scale: f32,
    /// The segments recorded so far.
    segments: Vec<Segment>,
    /// The first point of the current contour.
    start: Point,
    /// The last point of the current contour.
    pen: Point,
}

impl OutlineRecorder {
    /// Converts a y-up point in font units to a y-down 26.6 fixed point [`Point`].
    fn point(&self, x: f32, y: f32) -> Point {
        Point::new(to_fixed(x, self.scale), to_fixed(-y, self.scale))
    }
}

impl OutlineBuilder for OutlineRecorder {
    fn move_to(&mut self, x: f32, y: f32) {
        let to = self.point(x, y);
        self.start = to;
        self.pen = to;
        self.segments.push(Segment::move_to(to));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let to = self.point(x, y);
        self.pen = to;
        self.segments.push(Segment::line_to(to));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let control = self.point(x1, y1);
        let to = self.point(x, y);
        self.pen = to;
        self.segments.push(Segment::quad_to(control, to));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let control_0 = self.point(x1, y1);
        let control_1 = self.point(x2, y2);
        let to = self.point(x, y);
        self.pen = to;
        self.segments.push(Segment::cube_to(control_0, control_1, to));
    }

    fn close(&mut self) {
        if self.pen != self.start {
            self.segments.push(Segment::line_to(self.start));
            self.pen = self.start;
        }
    }
}
