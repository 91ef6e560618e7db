//! Defines the outline, coverage and packed bitmap structures used to turn vector glyphs into
//! fixed-size monochrome font tables.
//!
//! The packed table views in [`glyph`] and the outline types in [`outline`] are available without
//! `std`. Rasterization and packing require the `std` feature.
#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(any(test, feature = "std"))]
pub mod coverage;
pub mod glyph;
pub mod outline;
#[cfg(any(test, feature = "std"))]
pub mod pack;
#[cfg(any(test, feature = "std"))]
pub mod raster;
