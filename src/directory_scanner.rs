// SPDX-License-Identifier: MPL-2.0
//! Directory scanner for OpenMoji asset folders.
//!
//! This module lists a flat directory of `<CODEPOINTS>.<ext>` files and
//! indexes them by [`CodepointSequence`], so selection can work on
//! identifiers and the pipeline can find the file behind each one.

use crate::domain::emoji::CodepointSequence;
use crate::error::{Error, Result};
use log::debug;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Assets available in a source directory, keyed by identifier.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssetCatalog {
    assets: BTreeMap<CodepointSequence, PathBuf>,
}

impl AssetCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans `directory` for files with the given extension (case-insensitive)
    /// whose stem is a valid codepoint sequence. Other files are ignored.
    ///
    /// Returns an error if the directory does not exist or cannot be read.
    pub fn scan(directory: &Path, extension: &str) -> Result<Self> {
        if !directory.is_dir() {
            return Err(Error::Io(format!(
                "source directory not found: {}",
                directory.display()
            )));
        }

        let mut assets = BTreeMap::new();
        for entry in std::fs::read_dir(directory)? {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || !has_extension(&path, extension) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match CodepointSequence::parse(stem) {
                Ok(code) => {
                    assets.insert(code, path);
                }
                Err(e) => debug!("ignoring {}: {}", path.display(), e),
            }
        }

        Ok(Self { assets })
    }

    /// Returns whether an asset exists for `code`.
    pub fn contains(&self, code: &CodepointSequence) -> bool {
        self.assets.contains_key(code)
    }

    /// Returns the file backing `code`, if any.
    pub fn path_for(&self, code: &CodepointSequence) -> Option<&Path> {
        self.assets.get(code).map(PathBuf::as_path)
    }

    /// Iterates identifiers in sorted order.
    pub fn codes(&self) -> impl Iterator<Item = &CodepointSequence> {
        self.assets.keys()
    }

    /// Returns the number of indexed assets.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Returns true if no assets were found.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl FromIterator<(CodepointSequence, PathBuf)> for AssetCatalog {
    fn from_iter<T: IntoIterator<Item = (CodepointSequence, PathBuf)>>(iter: T) -> Self {
        Self {
            assets: iter.into_iter().collect(),
        }
    }
}

/// Checks the file extension, ignoring case.
fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::tempdir;

    fn create_test_asset(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).expect("failed to create test file");
        file.write_all(b"<svg/>").expect("failed to write test file");
        path
    }

    fn code(text: &str) -> CodepointSequence {
        CodepointSequence::parse(text).expect("valid codepoint sequence")
    }

    #[test]
    fn scan_finds_matching_assets() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let smile = create_test_asset(temp_dir.path(), "1F600.svg");
        create_test_asset(temp_dir.path(), "2764-FE0F.svg");
        create_test_asset(temp_dir.path(), "1F600.png");
        create_test_asset(temp_dir.path(), "README.md");

        let catalog = AssetCatalog::scan(temp_dir.path(), "svg").expect("scan should succeed");
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains(&code("1F600")));
        assert!(catalog.contains(&code("2764-FE0F")));
        assert_eq!(catalog.path_for(&code("1F600")), Some(smile.as_path()));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        create_test_asset(temp_dir.path(), "1F602.SVG");

        let catalog = AssetCatalog::scan(temp_dir.path(), "svg").expect("scan should succeed");
        assert!(catalog.contains(&code("1F602")));
    }

    #[test]
    fn lowercase_stems_are_normalized() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = create_test_asset(temp_dir.path(), "1f44d.svg");

        let catalog = AssetCatalog::scan(temp_dir.path(), "svg").expect("scan should succeed");
        assert_eq!(catalog.path_for(&code("1F44D")), Some(path.as_path()));
    }

    #[test]
    fn non_codepoint_names_are_ignored() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        create_test_asset(temp_dir.path(), "logo.svg");
        create_test_asset(temp_dir.path(), "E000-extra.svg");
        fs::create_dir(temp_dir.path().join("1F600.svg")).expect("failed to create dir");

        let catalog = AssetCatalog::scan(temp_dir.path(), "svg").expect("scan should succeed");
        assert!(catalog.is_empty());
    }

    #[test]
    fn codes_iterate_in_sorted_order() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        for name in ["1F60D.svg", "1F600.svg", "1F44D.svg"] {
            create_test_asset(temp_dir.path(), name);
        }

        let catalog = AssetCatalog::scan(temp_dir.path(), "svg").expect("scan should succeed");
        let codes: Vec<&str> = catalog.codes().map(CodepointSequence::as_str).collect();
        assert_eq!(codes, vec!["1F44D", "1F600", "1F60D"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        match AssetCatalog::scan(&temp_dir.path().join("openmoji-svg-color"), "svg") {
            Err(Error::Io(message)) => assert!(message.contains("openmoji-svg-color")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
