// SPDX-License-Identifier: MPL-2.0
//! Choosing which emojis go into the header.
//!
//! Selection runs in three passes over the assets actually present:
//!
//! 1. the face seed list, limited by the face cap,
//! 2. the fun seed list (hearts, symbols, food, animals, ...),
//! 3. auto-fill from everything else, simplest sequences first.
//!
//! Every pass skips identifiers that are missing, already chosen, or
//! face-like once the cap is reached.

use crate::directory_scanner::AssetCatalog;
use crate::domain::emoji::CodepointSequence;
use crate::error::{Error, Result};
use std::collections::HashSet;

/// Popular facial expressions, most wanted first.
pub const FACE_SEED: &[&str] = &[
    "1F602", "1F923", "1F60D", "1F970", "1F60A", "1F60E", "1F609", "1F618", "1F61C", "1F62D",
    "1F914", "1F644",
];

/// Non-face emojis that read well on a small matrix.
pub const FUN_SEED: &[&str] = &[
    // Hearts / love / reactions
    "2764-FE0F", "1F49B", "1F49A", "1F499", "1F49C", "1F5A4", "1F496", "1F495", "1F49E", "1F494",
    "1F48B", "1F4A5", "1F4A3", "1F4A9",
    // Symbols
    "2705", "274C", "2753", "2757", "26A0-FE0F", "1F6AB", "1F6A8", "1F4A1", "2728", "1F525",
    "1F4AF",
    // Hands
    "1F44D", "1F44E", "1F44F", "1F64F", "1F91D", "1F918", "270A", "1F44C", "1F91E",
    // Sports / games
    "26BD", "1F3C0", "1F3C8", "26BE", "1F3BE", "1F3D0", "1F94E", "1F94F", "1F3B2", "1F3AE",
    "1F3AF", "1F3C6", "1F947",
    // Party
    "1F389", "1F38A", "1F973", "1F37E", "1F381", "1F38E", "1F3B6", "1F3A7",
    // Food / drink
    "1F355", "1F354", "1F35F", "1F357", "1F372", "1F366", "1F36A", "1F370", "1F36D", "1F37F",
    "1F96A", "1F9C0", "2615", "1F37A", "1F377", "1F378",
    // Animals / nature
    "1F436", "1F431", "1F98A", "1F981", "1F984", "1F438", "1F41F", "1F433", "1F40D", "1F33B",
    "1F339", "1F340",
    // Travel / places
    "1F697", "1F695", "1F6F4", "1F6A2", "2708-FE0F", "1F680", "1F681", "1F3E0", "1F30D",
    "1F30E", "1F30F",
    // Objects / tech
    "1F4F1", "1F4BB", "1F4FA", "1F4F7", "1F50A", "1F4A4", "23F0", "1F514", "1F4B0", "1F511",
];

/// Curated lists consulted before auto-fill.
#[derive(Debug, Clone, PartialEq)]
pub struct Seeds {
    pub faces: Vec<CodepointSequence>,
    pub fun: Vec<CodepointSequence>,
}

impl Default for Seeds {
    fn default() -> Self {
        Self {
            faces: FACE_SEED.iter().filter_map(|s| s.parse().ok()).collect(),
            fun: FUN_SEED.iter().filter_map(|s| s.parse().ok()).collect(),
        }
    }
}

/// Parses one seed list, failing on the first invalid entry.
///
/// # Errors
///
/// Returns [`Error::Config`] naming the offending entry.
pub fn parse_seed_list<S: AsRef<str>>(entries: &[S]) -> Result<Vec<CodepointSequence>> {
    entries
        .iter()
        .map(|entry| {
            CodepointSequence::parse(entry.as_ref())
                .map_err(|e| Error::Config(format!("seed entry '{}': {}", entry.as_ref(), e)))
        })
        .collect()
}

/// Limits applied while selecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionLimits {
    /// Total number of emojis wanted.
    pub count: usize,
    /// Maximum number of face-like emojis among them.
    pub max_faces: usize,
}

/// Picks up to `limits.count` unique identifiers from `catalog`.
///
/// The result is shorter than requested only when the catalog runs out of
/// eligible assets.
pub fn select(
    catalog: &AssetCatalog,
    seeds: &Seeds,
    limits: SelectionLimits,
) -> Vec<CodepointSequence> {
    let mut selector = Selector::new(catalog, limits);

    for code in &seeds.faces {
        if selector.is_full() {
            break;
        }
        selector.offer(code);
    }
    for code in &seeds.fun {
        if selector.is_full() {
            break;
        }
        selector.offer(code);
    }

    let mut pool: Vec<&CodepointSequence> = catalog.codes().collect();
    pool.sort_by(|a, b| a.simplicity_key().cmp(&b.simplicity_key()));
    for code in pool {
        if selector.is_full() {
            break;
        }
        if code.is_reasonable_autofill() {
            selector.offer(code);
        }
    }

    selector.selected
}

struct Selector<'a> {
    catalog: &'a AssetCatalog,
    limits: SelectionLimits,
    selected: Vec<CodepointSequence>,
    seen: HashSet<CodepointSequence>,
    face_count: usize,
}

impl<'a> Selector<'a> {
    fn new(catalog: &'a AssetCatalog, limits: SelectionLimits) -> Self {
        Self {
            catalog,
            limits,
            selected: Vec::with_capacity(limits.count),
            seen: HashSet::new(),
            face_count: 0,
        }
    }

    fn is_full(&self) -> bool {
        self.selected.len() >= self.limits.count
    }

    fn offer(&mut self, code: &CodepointSequence) {
        if self.seen.contains(code) || !self.catalog.contains(code) {
            return;
        }
        if code.is_face_like() {
            if self.face_count >= self.limits.max_faces {
                return;
            }
            self.face_count += 1;
        }
        self.seen.insert(code.clone());
        self.selected.push(code.clone());
    }
}
