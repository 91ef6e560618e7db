//! Errors that abort a conversion.

use core::{error, fmt};
use std::{io, path::PathBuf};

/// Errors that make it impossible to produce a complete font table.
#[derive(Debug)]
pub enum ConvertError {
    /// The font file could not be read.
    FontRead {
        /// The path of the font file.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The font file is not a valid font.
    FontParse(ttf_parser::FaceParsingError),
    /// The font has no glyph for the given character.
    GlyphNotFound(char),
    /// The outline of the given character could not be read from the font.
    MalformedGlyph(char),
    /// The outline of the given character uses a segment kind the rasterizer does not support.
    UnsupportedSegment {
        /// The character whose outline contains the segment.
        c: char,
        /// The backend's code for the segment kind.
        op: u32,
    },
    /// The cell height derived from the font's metrics is not a usable number of rows.
    InvalidCellHeight(i32),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FontRead { path, .. } => write!(f, "error reading font {}", path.display()),
            Self::FontParse(_) => write!(f, "error parsing font"),
            Self::GlyphNotFound(c) => {
                write!(f, "no glyph index found for {c:?} ({})", u32::from(*c))
            }
            Self::MalformedGlyph(c) => {
                write!(f, "malformed outline for {c:?} ({})", u32::from(*c))
            }
            Self::UnsupportedSegment { c, op } => {
                write!(f, "outline of {c:?} contains unsupported segment kind {op}")
            }
            Self::InvalidCellHeight(height) => write!(f, "invalid cell height: {height} rows"),
        }
    }
}

impl error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::FontRead { source, .. } => Some(source),
            Self::FontParse(source) => Some(source),
            _ => None,
        }
    }
}
