//! Rasterization of single glyphs into cell-sized [`Coverage`] bitmaps.

use font::{coverage::Coverage, outline::SegmentOp, raster::Rasterizer};

use crate::{backend::FontBackend, config::CellLayout, error::ConvertError};

/// Rasterizes the glyph of `c` at `ppem` pixels per em into a bitmap the size of `cell`, with the
/// glyph origin placed at `cell.origin`.
///
/// # Errors
///
/// - [`ConvertError::GlyphNotFound`] if `backend` has no glyph for `c`.
/// - [`ConvertError::MalformedGlyph`] if `backend` fails to read the glyph's outline.
/// - [`ConvertError::UnsupportedSegment`] if the glyph's outline contains a segment kind other
///   than move, line, quadratic or cubic.
pub fn rasterize_glyph<B: FontBackend + ?Sized>(
    backend: &B,
    c: char,
    ppem: u16,
    cell: &CellLayout,
) -> Result<Coverage, ConvertError> {
    let index = backend.glyph_index(c);
    if index == 0 {
        return Err(ConvertError::GlyphNotFound(c));
    }

    let outline = backend
        .load_outline(index, ppem)
        .ok_or(ConvertError::MalformedGlyph(c))?;

    let mut raster = Rasterizer::new(cell.width, cell.height);
    for segment in outline {
        let [a, b, d] = segment.args.map(|point| point.to_pixels(cell.origin));
        match segment.op {
            SegmentOp::MoveTo => raster.move_to(a.0, a.1),
            SegmentOp::LineTo => raster.line_to(a.0, a.1),
            SegmentOp::QuadTo => raster.quad_to(a.0, a.1, b.0, b.1),
            SegmentOp::CubeTo => raster.cube_to(a.0, a.1, b.0, b.1, d.0, d.1),
            SegmentOp::Unknown(op) => return Err(ConvertError::UnsupportedSegment { c, op }),
        }
    }

    Ok(raster.render())
}
