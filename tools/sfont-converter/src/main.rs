//! Converts the printable ASCII glyphs of a vector font into a C `sFONT` bitmap table written to
//! standard output.

use std::process::ExitCode;

use clap::error::ErrorKind;
use log::LevelFilter;

fn main() -> ExitCode {
    let config = match sfont_converter::cli::get_config() {
        Ok(config) => config,
        Err(error) => {
            let _ = error.print();
            return match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    let filters = std::env::var(env_logger::DEFAULT_FILTER_ENV).ok();
    logger(filters.as_deref(), config.debug).init();

    match sfont_converter::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

/// Builds the logger: warnings by default, then `filters` in `RUST_LOG` syntax, then `--debug`.
fn logger(filters: Option<&str>, debug: bool) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn);
    if let Some(filters) = filters {
        builder.parse_filters(filters);
    }
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }

    builder
}
