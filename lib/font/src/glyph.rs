//! Read-only views over a packed glyph table.
//!
//! A packed glyph table stores fixed-size glyphs back to back. Each glyph is `height` rows of
//! `ceil(width / 8)` bytes, each row being packed most significant bit first.

/// Returns the number of bytes a packed row of `width` pixels occupies.
#[expect(clippy::as_conversions)]
const fn row_byte_count(width: u16) -> usize {
    width.div_ceil(8) as usize
}

/// A table of fixed-size [`Glyph`]s.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphTable<'buffer> {
    /// The buffer that contains the packed glyph rows.
    buffer: &'buffer [u8],
    /// The width of each glyph in pixels.
    width: u16,
    /// The height of each glyph in pixels.
    height: u16,
}

impl<'buffer> GlyphTable<'buffer> {
    /// Creates a new [`GlyphTable`].
    pub const fn new(buffer: &'buffer [u8], width: u16, height: u16) -> Self {
        Self {
            buffer,
            width,
            height,
        }
    }

    /// Returns the [`Glyph`] at `index` or `None` if out of bounds.
    pub fn get(&self, index: usize) -> Option<Glyph<'buffer>> {
        if index >= self.glyph_count() {
            return None;
        }

        Some(self.glyph_at(index))
    }

    /// Returns an [`Iterator`] over every [`Glyph`] in table order.
    pub fn glyphs(&self) -> impl ExactSizeIterator<Item = Glyph<'buffer>> {
        let table = *self;
        (0..self.glyph_count()).map(move |index| table.glyph_at(index))
    }

    /// Returns the width of a [`Glyph`] in pixels.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Returns the height of a [`Glyph`] in pixels.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Returns the number of bytes in each packed row.
    pub const fn row_byte_count(&self) -> usize {
        row_byte_count(self.width)
    }

    /// Returns the number of [`Glyph`]s in this [`GlyphTable`].
    pub const fn glyph_count(&self) -> usize {
        let glyph_byte_count = self.glyph_byte_count();
        if glyph_byte_count == 0 {
            return 0;
        }

        self.buffer.len() / glyph_byte_count
    }

    /// Returns the [`Glyph`] at `index`, which must be in bounds.
    fn glyph_at(&self, index: usize) -> Glyph<'buffer> {
        let glyph_byte_count = self.glyph_byte_count();
        let start = index * glyph_byte_count;

        Glyph {
            buffer: &self.buffer[start..start + glyph_byte_count],
            width: self.width,
            height: self.height,
        }
    }

    /// Returns the number of bytes occupied by a single [`Glyph`].
    #[expect(clippy::as_conversions)]
    const fn glyph_byte_count(&self) -> usize {
        row_byte_count(self.width) * self.height as usize
    }
}

/// Stores the on/off layout of a specific glyph in a font.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Glyph<'buffer> {
    /// The buffer utilized to store the glyph.
    buffer: &'buffer [u8],
    /// The width of the glyph.
    width: u16,
    /// The height of the glyph.
    height: u16,
}

impl<'buffer> IntoIterator for Glyph<'buffer> {
    type IntoIter = GlyphRowsIter<'buffer>;
    type Item = GlyphRow<'buffer>;

    fn into_iter(self) -> Self::IntoIter {
        GlyphRowsIter {
            buffer: self.buffer,
            width: self.width,
            height: self.height,
            index: 0,
        }
    }
}

/// An [`Iterator`] over the rows of a [`Glyph`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphRowsIter<'buffer> {
    /// The buffer utilized to store the glyph.
    buffer: &'buffer [u8],
    /// The width of the glyph.
    width: u16,
    /// The height of the glyph.
    height: u16,
    /// The index of the row that will be returned next.
    index: u16,
}

impl<'buffer> Iterator for GlyphRowsIter<'buffer> {
    type Item = GlyphRow<'buffer>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.height {
            return None;
        }

        let row_byte_count = row_byte_count(self.width);
        let row_index = row_byte_count * usize::from(self.index);

        self.index += 1;
        let row = GlyphRow {
            buffer: &self.buffer[row_index..row_index + row_byte_count],
            width: self.width,
        };
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::from(self.height - self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GlyphRowsIter<'_> {}

/// A row in the [`Glyph`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphRow<'buffer> {
    /// The buffer utilized to store the glyph row.
    buffer: &'buffer [u8],
    /// The width of the row.
    width: u16,
}

impl<'buffer> GlyphRow<'buffer> {
    /// Returns the packed bytes of the row.
    pub const fn bytes(&self) -> &'buffer [u8] {
        self.buffer
    }
}

impl<'buffer> IntoIterator for GlyphRow<'buffer> {
    type Item = bool;
    type IntoIter = GlyphRowIter<'buffer>;

    fn into_iter(self) -> Self::IntoIter {
        GlyphRowIter {
            buffer: self.buffer,
            width: self.width,
            index: 0,
        }
    }
}

/// An [`Iterator`] over the pixels in a [`GlyphRow`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphRowIter<'buffer> {
    /// The buffer used to store the glyph's row.
    buffer: &'buffer [u8],
    /// The width of the row.
    width: u16,
    /// The index of the pixel value to be returned.
    index: u16,
}

impl Iterator for GlyphRowIter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.width {
            return None;
        }

        let byte_index = usize::from(self.index / 8);
        let bit_index = self.index % 8;
        let bit = (self.buffer[byte_index] >> (7 - bit_index)) & 0b1;

        self.index += 1;
        Some(bit == 1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::from(self.width - self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GlyphRowIter<'_> {}

#[cfg(test)]
mod test {
    use super::GlyphTable;

    const TABLE: &[u8] = &[
        // glyph 0, 10x2
        0b1000_0000, 0b0100_0000, //
        0b1111_1111, 0b1100_0000, //
        // glyph 1
        0x00, 0x00, //
        0x00, 0x00, //
    ];

    #[test]
    fn glyph_lookup() {
        let table = GlyphTable::new(TABLE, 10, 2);

        assert_eq!(table.glyph_count(), 2);
        assert_eq!(table.row_byte_count(), 2);
        assert!(table.get(2).is_none());
        assert_eq!(table.glyphs().len(), 2);

        let set = |index| {
            let glyph = table.get(index).unwrap();
            glyph.into_iter().flatten().filter(|&set| set).count()
        };
        assert_eq!(set(0), 12);
        assert_eq!(set(1), 0);
    }

    #[test]
    fn rows_and_pixels() {
        let table = GlyphTable::new(TABLE, 10, 2);
        let glyph = table.get(0).unwrap();

        let mut rows = glyph.into_iter();
        assert_eq!(rows.len(), 2);

        let first = rows.next().unwrap();
        assert_eq!(first.bytes(), [0b1000_0000, 0b0100_0000]);
        let pixels = first.into_iter().collect::<Vec<_>>();
        assert_eq!(
            pixels,
            [true, false, false, false, false, false, false, false, false, true]
        );

        let second = rows.next().unwrap();
        assert_eq!(second.into_iter().filter(|&set| set).count(), 10);
        assert!(rows.next().is_none());
    }

    #[test]
    fn empty_cells() {
        let table = GlyphTable::new(&[], 0, 24);

        assert_eq!(table.glyph_count(), 0);
        assert!(table.get(0).is_none());
    }
}
