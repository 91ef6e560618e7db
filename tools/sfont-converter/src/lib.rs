//! Tool for converting the printable ASCII glyphs of a vector font into a fixed-size monochrome
//! bitmap font table, emitted as C source for microcontroller firmware.

use std::{
    io::{self, Write},
    ops::RangeInclusive,
};

use anyhow::{Context, Result};
use font::pack::GlyphTableBuilder;
use log::{debug, trace};

use crate::{
    backend::{FontBackend, FontMetrics, TtfBackend},
    config::Config,
    emit::emit_table,
    error::ConvertError,
    rasterize::rasterize_glyph,
};

pub mod backend;
pub mod cli;
pub mod config;
pub mod emit;
pub mod error;
pub mod rasterize;

/// The characters converted into the table, in table order.
pub const PRINTABLE_ASCII: RangeInclusive<char> = ' '..='~';

/// Rasterizes every character of [`PRINTABLE_ASCII`] from `backend` as described by `config`
/// and writes the resulting table to `writer`.
///
/// Nothing is written unless every glyph was rasterized successfully.
///
/// # Errors
///
/// Returns [`ConvertError`]s for missing glyphs, unsupported outlines or an unusable cell
/// layout, and any error produced while writing to `writer`.
pub fn convert<B: FontBackend + ?Sized, W: Write>(
    backend: &B,
    config: &Config,
    writer: W,
) -> Result<()> {
    let metrics = backend.metrics(config.ppem);
    let cell = config.cell_layout(&metrics)?;
    debug!(
        "cell: {}x{} pixels, origin at ({}, {})",
        cell.width, cell.height, cell.origin.0, cell.origin.1
    );

    let mut builder = GlyphTableBuilder::new(cell.width, cell.height);
    for c in PRINTABLE_ASCII {
        let coverage = rasterize_glyph(backend, c, config.ppem, &cell)?;
        builder.push(&coverage)?;
        trace!("rasterized {c:?}");
    }

    let source = config.font_path.display().to_string();
    emit_table(writer, &builder.table(), PRINTABLE_ASCII, &source)
        .context("error writing font table")?;
    Ok(())
}

/// Reads and parses the font described by `config`, converts it and writes the table to
/// standard output.
///
/// # Errors
///
/// Returns [`ConvertError::FontRead`] and [`ConvertError::FontParse`] for unusable fonts, any
/// error [`convert`] returns, and errors writing to standard output.
pub fn run(config: &Config) -> Result<()> {
    debug!("font:   {}", config.font_path.display());
    debug!("width:  {} bytes ({} pixels)", config.width_bytes, config.pixel_width());
    debug!("ppem:   {}", config.ppem);
    debug!("layout: {:?}", config.layout);

    let font = std::fs::read(&config.font_path).map_err(|source| ConvertError::FontRead {
        path: config.font_path.clone(),
        source,
    })?;
    let backend = TtfBackend::parse(&font)?;
    log_metrics(&backend.metrics(config.ppem));

    let mut table = Vec::new();
    convert(&backend, config, &mut table)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(&table)?;
    stdout.flush()?;
    Ok(())
}

/// Logs `metrics` in pixels.
fn log_metrics(metrics: &FontMetrics) {
    debug!("height:     {}", Fixed(metrics.height));
    debug!("ascent:     {}", Fixed(metrics.ascent));
    debug!("descent:    {}", Fixed(metrics.descent));
    match metrics.cap_height {
        Some(cap_height) => debug!("cap height: {}", Fixed(cap_height)),
        None => debug!("cap height: none"),
    }
}

/// Displays a 26.6 fixed point value as whole pixels and 64ths.
struct Fixed(i32);

impl core::fmt::Display for Fixed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let value = self.0.unsigned_abs();
        write!(f, "{sign}{}:{:02}", value >> 6, value & 63)
    }
}
