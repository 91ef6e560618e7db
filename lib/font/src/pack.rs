//! Thresholding of [`Coverage`] bitmaps into packed, one bit per pixel rows.
//!
//! Every row is packed most significant bit first, so the leftmost pixel of a row lands in bit 7
//! of the row's first byte. Rows whose width is not a multiple of 8 are padded with zero bits.

use core::{error, fmt};

use crate::{coverage::Coverage, glyph::GlyphTable};

/// The coverage value at and above which a pixel is considered set.
pub const ALPHA_THRESHOLD: u8 = 64;

/// Returns the number of bytes a packed row of `width` pixels occupies.
pub fn row_byte_count(width: u16) -> usize {
    usize::from(width.div_ceil(8))
}

/// Packs every row of `coverage` and appends the rows to `out`.
pub fn pack_coverage(coverage: &Coverage, out: &mut Vec<u8>) {
    out.reserve(row_byte_count(coverage.width()) * usize::from(coverage.height()));
    for row in coverage.rows() {
        pack_row(row, out);
    }
}

/// Packs a single row of coverage values into `out`, appending [`row_byte_count`] bytes.
fn pack_row(row: &[u8], out: &mut Vec<u8>) {
    let mut writer = BitWriter::new(out);
    for &alpha in row {
        writer.write_bit(alpha >= ALPHA_THRESHOLD);
    }
    writer.finish();
}

/// Accumulates single bits into bytes, most significant bit first.
struct BitWriter<'out> {
    /// The bytes completed so far.
    out: &'out mut Vec<u8>,
    /// The byte currently being filled.
    current: u8,
    /// The number of bits written to `current`.
    filled: u8,
}

impl<'out> BitWriter<'out> {
    /// Creates a new [`BitWriter`] appending to `out`.
    fn new(out: &'out mut Vec<u8>) -> Self {
        Self {
            out,
            current: 0,
            filled: 0,
        }
    }

    /// Appends `bit` to the stream.
    fn write_bit(&mut self, bit: bool) {
        self.current = (self.current << 1) | u8::from(bit);
        self.filled += 1;
        if self.filled == 8 {
            self.out.push(self.current);
            self.current = 0;
            self.filled = 0;
        }
    }

    /// Flushes a partially filled byte, padding it with zero bits.
    fn finish(self) {
        if self.filled != 0 {
            self.out.push(self.current << (8 - self.filled));
        }
    }
}

/// Builder for a packed [`GlyphTable`] whose glyphs all share one cell size.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct GlyphTableBuilder {
    /// The packed rows of all glyphs pushed so far.
    buffer: Vec<u8>,
    /// The width of every glyph in pixels.
    width: u16,
    /// The height of every glyph in pixels.
    height: u16,
}

impl GlyphTableBuilder {
    /// Creates a new, empty [`GlyphTableBuilder`] for `width` by `height` glyphs.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Vec::new(),
            width,
            height,
        }
    }

    /// Packs `coverage` and appends it as the next glyph.
    ///
    /// # Errors
    ///
    /// Returns [`CellSizeMismatch`] if `coverage` is not exactly the size of the table's cells.
    pub fn push(&mut self, coverage: &Coverage) -> Result<(), CellSizeMismatch> {
        if coverage.width() != self.width || coverage.height() != self.height {
            return Err(CellSizeMismatch {
                expected: (self.width, self.height),
                actual: (coverage.width(), coverage.height()),
            });
        }

        pack_coverage(coverage, &mut self.buffer);
        Ok(())
    }

    /// Returns a [`GlyphTable`] view of the glyphs pushed so far.
    pub fn table(&self) -> GlyphTable<'_> {
        GlyphTable::new(&self.buffer, self.width, self.height)
    }
}

/// A [`Coverage`] bitmap did not match the cell size of a [`GlyphTableBuilder`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct CellSizeMismatch {
    /// The cell size of the table.
    pub expected: (u16, u16),
    /// The size of the rejected bitmap.
    pub actual: (u16, u16),
}

impl fmt::Display for CellSizeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "glyph is {}x{} pixels but cells are {}x{} pixels",
            self.actual.0, self.actual.1, self.expected.0, self.expected.1
        )
    }
}

impl error::Error for CellSizeMismatch {}
