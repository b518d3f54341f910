// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used when neither the command line nor the config file sets an option.
//!
//! # Categories
//!
//! - **Input**: Asset directories per source format
//! - **Output**: Header path, array naming and previews
//! - **Selection**: How many emojis, how many faces
//! - **Quantization**: Near-black handling

use crate::domain::raster::newtypes::canvas_bounds;

// ==========================================================================
// Input Defaults
// ==========================================================================

/// Directory holding OpenMoji color SVGs.
pub const DEFAULT_SVG_SOURCE_DIR: &str = "openmoji-svg-color";

/// Directory holding OpenMoji color PNGs (618x618 release).
pub const DEFAULT_PNG_SOURCE_DIR: &str = "openmoji-png-color";

// ==========================================================================
// Output Defaults
// ==========================================================================

/// Generated header, relative to the working directory.
pub const DEFAULT_OUTPUT_FILE: &str = "EmojisData.h";

/// Directory receiving `<CODE>.png` previews.
pub const DEFAULT_PREVIEW_DIR: &str = "previews";

/// Prefix of every generated array identifier.
pub const DEFAULT_ARRAY_PREFIX: &str = "emoji_";

/// Canvas edge length in pixels.
pub const DEFAULT_CANVAS_SIZE: u32 = canvas_bounds::DEFAULT;

// ==========================================================================
// Selection Defaults
// ==========================================================================

/// Number of emojis converted per run.
pub const DEFAULT_COUNT: usize = 100;

/// Smallest accepted count.
pub const MIN_COUNT: usize = 1;

/// Maximum number of facial-expression emojis in the selection.
pub const DEFAULT_MAX_FACES: usize = 10;

// ==========================================================================
// Quantization Defaults
// ==========================================================================

/// Channels at or below this value count as near black.
pub const DEFAULT_DARK_THRESHOLD: u8 = 10;

/// Color substituted for near-black pixels.
pub const DEFAULT_DARK_BOOST: [u8; 3] = [40, 40, 40];
