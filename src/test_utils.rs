// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

pub use approx::assert_abs_diff_eq;

/// Tolerance for coordinates that went through one or more transforms.
pub const COORD_EPSILON: f32 = 1e-4;
