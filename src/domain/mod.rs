// SPDX-License-Identifier: MPL-2.0
//! Domain layer - pure value objects, no I/O.
//!
//! # Modules
//!
//! - [`emoji`]: Asset identifiers ([`CodepointSequence`](emoji::CodepointSequence))
//! - [`raster`]: Output raster values ([`CanvasSize`](raster::CanvasSize),
//!   [`YAxis`](raster::YAxis), [`Rgb565`](raster::Rgb565))

pub mod emoji;
pub mod raster;
