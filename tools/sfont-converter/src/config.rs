//! Conversion configuration and resolution of the glyph cell layout.

use std::path::PathBuf;

use crate::{backend::FontMetrics, error::ConvertError};

/// The default cell width in bytes.
pub const DEFAULT_WIDTH_BYTES: u8 = 2;
/// The default rasterization size in pixels per em.
pub const DEFAULT_PPEM: u16 = 24;
/// The default cell height in rows.
pub const DEFAULT_HEIGHT: u16 = 24;
/// The default position of the glyph origin inside the cell.
pub const DEFAULT_ORIGIN: (f32, f32) = (0.0, 18.0);

/// Description of a single conversion.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// The font file to convert.
    pub font_path: PathBuf,
    /// The width of a cell in bytes. A cell is `width_bytes * 8` pixels wide.
    pub width_bytes: u8,
    /// The size glyphs are rasterized at, in pixels per em.
    pub ppem: u16,
    /// How the cell height and glyph origin are determined.
    pub layout: Layout,
    /// Whether configuration and font metrics are logged before converting.
    pub debug: bool,
}

impl Config {
    /// Creates a [`Config`] for `font_path` with every other setting at its default.
    pub fn new(font_path: impl Into<PathBuf>) -> Self {
        Self {
            font_path: font_path.into(),
            width_bytes: DEFAULT_WIDTH_BYTES,
            ppem: DEFAULT_PPEM,
            layout: Layout::default(),
            debug: false,
        }
    }

    /// Returns the width of a cell in pixels.
    pub fn pixel_width(&self) -> u16 {
        u16::from(self.width_bytes) * 8
    }

    /// Resolves the [`CellLayout`] used for every glyph of the conversion.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::InvalidCellHeight`] if [`Layout::Metrics`] derives a height that is
    /// not a positive number of rows.
    pub fn cell_layout(&self, metrics: &FontMetrics) -> Result<CellLayout, ConvertError> {
        let width = self.pixel_width();
        match self.layout {
            Layout::Explicit {
                height,
                origin_x,
                origin_y,
            } => Ok(CellLayout {
                width,
                height,
                origin: (origin_x, origin_y),
            }),
            Layout::Metrics { reduce_height } => {
                let full_height = fixed_ceil(metrics.height);
                let height = match reduce_height {
                    Some(reduce) => full_height - i32::from(reduce),
                    // Legacy default: drops the bottom quarter of the line height.
                    None => full_height * 3 / 4 + 1,
                };
                let height = u16::try_from(height)
                    .ok()
                    .filter(|&height| height != 0)
                    .ok_or(ConvertError::InvalidCellHeight(height))?;

                let cap_height = metrics.cap_height.unwrap_or_else(|| {
                    log::warn!("font has no cap height or 'H' to measure, using its ascent");
                    metrics.ascent
                });
                let origin_y = fixed_floor(cap_height) + 1;

                Ok(CellLayout {
                    width,
                    height,
                    origin: (0.0, pixels_to_f32(origin_y)),
                })
            }
        }
    }
}

/// Source of the cell height and glyph origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Layout {
    /// The cell height and origin are given directly.
    Explicit {
        /// The height of a cell in rows.
        height: u16,
        /// The horizontal position of the glyph origin in pixels.
        origin_x: f32,
        /// The vertical position of the glyph baseline in pixels from the top of the cell.
        origin_y: f32,
    },
    /// The cell height is derived from the font's line height and the baseline is placed just
    /// below the font's cap height.
    Metrics {
        /// The number of rows cut from the bottom of the line height. When absent, the cell keeps
        /// three quarters of the line height plus one row.
        reduce_height: Option<u16>,
    },
}

impl Default for Layout {
    fn default() -> Self {
        Self::Explicit {
            height: DEFAULT_HEIGHT,
            origin_x: DEFAULT_ORIGIN.0,
            origin_y: DEFAULT_ORIGIN.1,
        }
    }
}

/// The resolved size of every glyph cell and where glyphs are drawn inside it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellLayout {
    /// The width of a cell in pixels.
    pub width: u16,
    /// The height of a cell in pixels.
    pub height: u16,
    /// The position of the glyph origin inside the cell in pixels.
    pub origin: (f32, f32),
}

/// Rounds a 26.6 fixed point value up to whole pixels.
fn fixed_ceil(value: i32) -> i32 {
    (value + 63) >> 6
}

/// Rounds a 26.6 fixed point value down to whole pixels.
fn fixed_floor(value: i32) -> i32 {
    value >> 6
}

/// Converts a whole pixel count to [`f32`].
#[expect(clippy::cast_precision_loss, reason = "pixel counts are small")]
#[expect(clippy::as_conversions)]
fn pixels_to_f32(pixels: i32) -> f32 {
    pixels as f32
}

#[cfg(test)]
mod test {
    use super::{CellLayout, Config, Layout, fixed_ceil, fixed_floor};
    use crate::{backend::FontMetrics, error::ConvertError};

    const METRICS: FontMetrics = FontMetrics {
        // 27.9 px line height, 17.1 px cap height.
        height: 27 * 64 + 58,
        ascent: 22 * 64 + 17,
        descent: 5 * 64 + 40,
        cap_height: Some(17 * 64 + 6),
    };

    #[test]
    fn fixed_rounding() {
        assert_eq!(fixed_ceil(64), 1);
        assert_eq!(fixed_ceil(65), 2);
        assert_eq!(fixed_ceil(0), 0);
        assert_eq!(fixed_floor(127), 1);
        assert_eq!(fixed_floor(-1), -1);
    }

    #[test]
    fn explicit_layout() {
        let mut config = Config::new("font.ttf");
        config.width_bytes = 3;
        config.layout = Layout::Explicit {
            height: 20,
            origin_x: 1.5,
            origin_y: -2.0,
        };

        let layout = config.cell_layout(&METRICS).unwrap();
        assert_eq!(
            layout,
            CellLayout {
                width: 24,
                height: 20,
                origin: (1.5, -2.0),
            }
        );
    }

    #[test]
    fn default_layout() {
        let layout = Config::new("font.ttf")
            .cell_layout(&FontMetrics::default())
            .unwrap();

        assert_eq!(
            layout,
            CellLayout {
                width: 16,
                height: 24,
                origin: (0.0, 18.0),
            }
        );
    }

    #[test]
    fn metrics_layout_heuristic() {
        let mut config = Config::new("font.ttf");
        config.layout = Layout::Metrics {
            reduce_height: None,
        };

        // ceil(27.9) = 28, 28 * 3 / 4 + 1 = 22
        let layout = config.cell_layout(&METRICS).unwrap();
        assert_eq!(layout.height, 22);
        assert_eq!(layout.origin, (0.0, 18.0));
    }

    #[test]
    fn metrics_layout_reduced() {
        let mut config = Config::new("font.ttf");
        config.layout = Layout::Metrics {
            reduce_height: Some(4),
        };

        let layout = config.cell_layout(&METRICS).unwrap();
        assert_eq!(layout.height, 24);
    }

    #[test]
    fn metrics_layout_without_cap_height() {
        let mut config = Config::new("font.ttf");
        config.layout = Layout::Metrics {
            reduce_height: Some(0),
        };
        let metrics = FontMetrics {
            cap_height: None,
            ..METRICS
        };

        let layout = config.cell_layout(&metrics).unwrap();
        assert_eq!(layout.origin, (0.0, 23.0));
    }

    #[test]
    fn metrics_layout_reduced_too_far() {
        let mut config = Config::new("font.ttf");
        config.layout = Layout::Metrics {
            reduce_height: Some(28),
        };

        let err = config.cell_layout(&METRICS).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidCellHeight(0)));
    }
}
