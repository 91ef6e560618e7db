//! Command line parsing and [`Config`] construction.

use std::{ffi::OsString, path::PathBuf};

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};

use crate::config::{
    Config, DEFAULT_HEIGHT, DEFAULT_ORIGIN, DEFAULT_PPEM, DEFAULT_WIDTH_BYTES, Layout,
};

/// Parses the process arguments to construct a [`Config`].
///
/// # Errors
///
/// Returns a [`clap::Error`] if the arguments are invalid or help or version information was
/// requested.
pub fn get_config() -> Result<Config, clap::Error> {
    get_config_from(std::env::args_os())
}

/// Parses `args`, starting with the binary name, to construct a [`Config`].
///
/// # Errors
///
/// Returns a [`clap::Error`] if the arguments are invalid or help or version information was
/// requested.
pub fn get_config_from<I, T>(args: I) -> Result<Config, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command_parser().try_get_matches_from(args)?;
    Ok(parse_arguments(&matches))
}

/// Parses the arguments required to produce a valid [`Config`].
pub fn parse_arguments(matches: &ArgMatches) -> Config {
    let font_path = matches
        .get_one::<PathBuf>("font")
        .cloned()
        .unwrap_or_else(|| unreachable!("`font` is a required argument"));

    let width_bytes = matches
        .get_one::<u8>("width")
        .copied()
        .unwrap_or_else(|| unreachable!("`width` should have a default value"));

    let ppem = matches
        .get_one::<u16>("ppem")
        .copied()
        .unwrap_or_else(|| unreachable!("`ppem` should have a default value"));

    let layout = if matches.get_flag("metrics-layout") {
        Layout::Metrics {
            reduce_height: matches.get_one::<u16>("reduce-height").copied(),
        }
    } else {
        let height = matches
            .get_one::<u16>("height")
            .copied()
            .unwrap_or_else(|| unreachable!("`height` should have a default value"));
        let origin_x = matches
            .get_one::<f32>("origin-x")
            .copied()
            .unwrap_or_else(|| unreachable!("`origin-x` should have a default value"));
        let origin_y = matches
            .get_one::<f32>("origin-y")
            .copied()
            .unwrap_or_else(|| unreachable!("`origin-y` should have a default value"));

        Layout::Explicit {
            height,
            origin_x,
            origin_y,
        }
    };

    Config {
        font_path,
        width_bytes,
        ppem,
        layout,
        debug: matches.get_flag("debug"),
    }
}

/// Parses a pixel position, rejecting NaN and infinities.
fn finite(value: &str) -> Result<f32, String> {
    let value = value.parse::<f32>().map_err(|err| err.to_string())?;
    if !value.is_finite() {
        return Err(format!("{value} is not a finite number"));
    }

    Ok(value)
}

/// Returns the command parser for `sfont-converter`.
pub fn command_parser() -> Command {
    let font = Arg::new("font")
        .short('f')
        .long("font")
        .value_name("PATH")
        .help("Path to the font file")
        .value_parser(value_parser!(PathBuf))
        .required(true);

    let width = Arg::new("width")
        .short('w')
        .long("width")
        .value_name("BYTES")
        .help("Cell width in bytes; the cell is eight times as many pixels wide")
        .value_parser(value_parser!(u8).range(1..))
        .default_value(DEFAULT_WIDTH_BYTES.to_string());

    let ppem = Arg::new("ppem")
        .short('s')
        .long("ppem")
        .value_name("SIZE")
        .help("Font size in pixels per em")
        .value_parser(value_parser!(u16).range(1..))
        .default_value(DEFAULT_PPEM.to_string());

    let height = Arg::new("height")
        .short('H')
        .long("height")
        .value_name("ROWS")
        .help("Cell height in rows")
        .value_parser(value_parser!(u16).range(1..))
        .default_value(DEFAULT_HEIGHT.to_string())
        .conflicts_with("metrics-layout");

    let origin_x = Arg::new("origin-x")
        .short('x')
        .long("origin-x")
        .value_name("PIXELS")
        .help("Horizontal position of the glyph origin in the cell")
        .value_parser(finite)
        .allow_negative_numbers(true)
        .default_value(DEFAULT_ORIGIN.0.to_string())
        .conflicts_with("metrics-layout");

    let origin_y = Arg::new("origin-y")
        .short('y')
        .long("origin-y")
        .value_name("PIXELS")
        .help("Vertical position of the baseline in the cell, from the top")
        .value_parser(finite)
        .allow_negative_numbers(true)
        .default_value(DEFAULT_ORIGIN.1.to_string())
        .conflicts_with("metrics-layout");

    let metrics_layout = Arg::new("metrics-layout")
        .short('m')
        .long("metrics-layout")
        .help("Derive the cell height and baseline from the font's metrics")
        .action(ArgAction::SetTrue);

    let reduce_height = Arg::new("reduce-height")
        .short('r')
        .long("reduce-height")
        .value_name("ROWS")
        .help("Rows cut from the bottom of the font's line height [default: a quarter]")
        .value_parser(value_parser!(u16))
        .requires("metrics-layout");

    let debug = Arg::new("debug")
        .short('d')
        .long("debug")
        .help("Print the configuration and font metrics before converting")
        .action(ArgAction::SetTrue);

    Command::new("sfont-converter")
        .about("Converts the printable ASCII glyphs of a vector font into a C bitmap font table")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(font)
        .arg(width)
        .arg(ppem)
        .arg(height)
        .arg(origin_x)
        .arg(origin_y)
        .arg(metrics_layout)
        .arg(reduce_height)
        .arg(debug)
}
