// SPDX-License-Identifier: MPL-2.0
//! Emoji identifier types.
//!
//! - [`CodepointSequence`]: validated OpenMoji asset identifier

pub mod newtypes;

pub use newtypes::{CodepointParseError, CodepointSequence};
