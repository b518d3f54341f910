// SPDX-License-Identifier: MPL-2.0
//! `emoji_matrix` converts OpenMoji artwork into RGB565 pixel arrays for
//! 64×64 LED matrix firmware.
//!
//! SVG assets are parsed into a small vector model ([`vector`]), scan
//! converted without anti-aliasing ([`raster`]), re-centered on their
//! visible pixels, quantized to RGB565 and emitted as a C header
//! ([`header`]). [`pipeline::run`] ties the steps together.

#![doc(html_root_url = "https://docs.rs/emoji_matrix/0.1.0")]

pub mod cli;
pub mod config;
pub mod directory_scanner;
pub mod domain;
pub mod error;
pub mod header;
pub mod pipeline;
pub mod raster;
pub mod selection;
pub mod vector;

#[cfg(test)]
pub(crate) mod test_utils;
