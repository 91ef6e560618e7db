//! 8-bit coverage bitmaps produced by the [`Rasterizer`][r].
//!
//! [r]: crate::raster::Rasterizer

/// A `width` by `height` grid of coverage values, stored row by row.
///
/// A value of `0` means the pixel is not covered at all, `255` means it is fully covered.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Coverage {
    /// The coverage values, `width * height` bytes long.
    buffer: Box<[u8]>,
    /// The width of the bitmap in pixels.
    width: u16,
    /// The height of the bitmap in pixels.
    height: u16,
}

impl Coverage {
    /// Creates a new zeroed [`Coverage`] bitmap.
    pub fn new(width: u16, height: u16) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            buffer: vec![0; size].into_boxed_slice(),
            width,
            height,
        }
    }

    /// Returns the width of the [`Coverage`] bitmap in pixels.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Returns the height of the [`Coverage`] bitmap in pixels.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Returns an [`Iterator`] over the rows of the [`Coverage`] bitmap, top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
        let width = usize::from(self.width).max(1);
        let height = usize::from(self.height);
        self.buffer.chunks_exact(width).take(height)
    }

    /// Returns the underlying row-major coverage values.
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Returns the underlying row-major coverage values mutably.
    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buffer
    }
}

#[cfg(test)]
mod test {
    use super::Coverage;

    #[test]
    fn new_is_zeroed() {
        let coverage = Coverage::new(16, 24);

        assert_eq!(coverage.as_slice().len(), 16 * 24);
        assert!(coverage.as_slice().iter().all(|&value| value == 0));
        assert_eq!(coverage.rows().len(), 24);
    }

    #[test]
    fn rows_split_buffer() {
        let mut coverage = Coverage::new(2, 3);
        coverage.as_mut_slice().copy_from_slice(&[0, 1, 2, 3, 4, 5]);

        let rows = coverage.rows().collect::<Vec<_>>();
        assert_eq!(rows, [&[0, 1][..], &[2, 3][..], &[4, 5][..]]);
    }

    #[test]
    fn zero_width_has_empty_rows() {
        let coverage = Coverage::new(0, 4);

        assert_eq!(coverage.rows().count(), 0);
    }
}
