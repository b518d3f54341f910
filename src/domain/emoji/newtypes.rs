// SPDX-License-Identifier: MPL-2.0
//! Emoji identifier newtypes.
//!
//! OpenMoji names each asset after the Unicode codepoints of the emoji,
//! hyphen-joined and in uppercase hexadecimal (`1F602`, `2764-FE0F`,
//! `1F468-200D-1F4BB`). [`CodepointSequence`] is the validated form of such
//! a name and is used everywhere an asset is referred to.

use std::fmt;
use std::str::FromStr;

// =============================================================================
// Codepoint Ranges
// =============================================================================

/// Unicode ranges treated as "facial expression" emojis.
///
/// Emoticons plus the face-heavy part of Supplemental Symbols and Pictographs.
pub const FACE_RANGES: &[(u32, u32)] = &[
    (0x1F600, 0x1F64F),
    (0x1F910, 0x1F92F),
    (0x1F930, 0x1F9AF),
];

/// Lowest leading codepoint accepted when auto-filling the selection.
///
/// Everything below is ASCII-like (`002D`, `0023-20E3`, ...) and wastes
/// firmware space.
pub const MIN_AUTOFILL_CODEPOINT: u32 = 0x2300;

/// Highest valid Unicode scalar value.
const MAX_CODEPOINT: u32 = 0x10_FFFF;

// =============================================================================
// CodepointSequence
// =============================================================================

/// A validated, hyphen-joined sequence of Unicode codepoints.
///
/// Ordering and equality follow the canonical uppercase text, so a
/// `BTreeSet<CodepointSequence>` iterates in the same order as a sorted
/// directory listing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodepointSequence {
    text: String,
    codepoints: Vec<u32>,
}

/// Reason a string was rejected as a codepoint sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodepointParseError {
    Empty,
    InvalidSegment(String),
    OutOfRange(u32),
}

impl fmt::Display for CodepointParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodepointParseError::Empty => write!(f, "empty codepoint sequence"),
            CodepointParseError::InvalidSegment(seg) => {
                write!(f, "invalid codepoint segment '{}'", seg)
            }
            CodepointParseError::OutOfRange(value) => {
                write!(f, "codepoint {:X} is outside the Unicode range", value)
            }
        }
    }
}

impl std::error::Error for CodepointParseError {}

impl CodepointSequence {
    /// Parses a sequence such as `"1f602"` or `" 2764-FE0F "`.
    ///
    /// Surrounding whitespace is ignored and the text is normalized to
    /// uppercase.
    pub fn parse(input: &str) -> Result<Self, CodepointParseError> {
        let text = input.trim().to_ascii_uppercase();
        if text.is_empty() {
            return Err(CodepointParseError::Empty);
        }

        let mut codepoints = Vec::new();
        for segment in text.split('-') {
            let valid = !segment.is_empty()
                && segment.len() <= 6
                && segment.chars().all(|c| c.is_ascii_hexdigit());
            if !valid {
                return Err(CodepointParseError::InvalidSegment(segment.to_string()));
            }
            let value = u32::from_str_radix(segment, 16)
                .map_err(|_| CodepointParseError::InvalidSegment(segment.to_string()))?;
            if value > MAX_CODEPOINT {
                return Err(CodepointParseError::OutOfRange(value));
            }
            codepoints.push(value);
        }

        Ok(Self { text, codepoints })
    }

    /// Canonical uppercase text, as used in asset file names.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// All codepoints in order.
    pub fn codepoints(&self) -> &[u32] {
        &self.codepoints
    }

    /// The leading codepoint.
    pub fn first(&self) -> u32 {
        // parse() never produces an empty sequence
        self.codepoints.first().copied().unwrap_or(0)
    }

    /// Number of hyphens in the text (ZWJ / variation selector joints).
    pub fn joint_count(&self) -> usize {
        self.codepoints.len() - 1
    }

    /// Returns whether the leading codepoint lies in a facial expression block.
    pub fn is_face_like(&self) -> bool {
        let first = self.first();
        FACE_RANGES
            .iter()
            .any(|&(start, end)| (start..=end).contains(&first))
    }

    /// Returns whether the sequence is worth picking during auto-fill.
    pub fn is_reasonable_autofill(&self) -> bool {
        self.first() >= MIN_AUTOFILL_CODEPOINT
    }

    /// Sort key preferring simple emojis: fewer joints, then shorter text.
    pub fn simplicity_key(&self) -> (usize, usize, &str) {
        (self.joint_count(), self.text.len(), &self.text)
    }

    /// Asset file name with the given extension, e.g. `1F602.svg`.
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.text, extension)
    }

    /// C identifier for the generated array, e.g. `emoji_2764_fe0f`.
    pub fn array_name(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.text.to_ascii_lowercase().replace('-', "_"))
    }
}

impl fmt::Display for CodepointSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for CodepointSequence {
    type Err = CodepointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(text: &str) -> CodepointSequence {
        CodepointSequence::parse(text).expect("valid sequence")
    }

    #[test]
    fn parse_normalizes_case_and_whitespace() {
        let code = seq("  1f602 ");
        assert_eq!(code.as_str(), "1F602");
        assert_eq!(code.codepoints(), &[0x1F602]);
    }

    #[test]
    fn parse_accepts_zwj_sequences() {
        let code = seq("1F468-200D-1F4BB");
        assert_eq!(code.codepoints(), &[0x1F468, 0x200D, 0x1F4BB]);
        assert_eq!(code.joint_count(), 2);
        assert_eq!(code.first(), 0x1F468);
    }

    #[test]
    fn parse_rejects_malformed_input() {
        assert_eq!(CodepointSequence::parse(""), Err(CodepointParseError::Empty));
        assert!(matches!(
            CodepointSequence::parse("1F602-"),
            Err(CodepointParseError::InvalidSegment(_))
        ));
        assert!(matches!(
            CodepointSequence::parse("smile"),
            Err(CodepointParseError::InvalidSegment(_))
        ));
        assert!(matches!(
            CodepointSequence::parse("110000"),
            Err(CodepointParseError::OutOfRange(0x110000))
        ));
    }

    #[test]
    fn face_ranges_cover_emoticons_and_supplemental_faces() {
        assert!(seq("1F602").is_face_like());
        assert!(seq("1F914").is_face_like());
        assert!(seq("1F970").is_face_like());
        assert!(!seq("2764-FE0F").is_face_like());
        assert!(!seq("1F355").is_face_like());
    }

    #[test]
    fn autofill_skips_ascii_like_codes() {
        assert!(!seq("002D").is_reasonable_autofill());
        assert!(!seq("0023-20E3").is_reasonable_autofill());
        assert!(seq("2615").is_reasonable_autofill());
    }

    #[test]
    fn array_name_is_a_valid_c_identifier() {
        assert_eq!(seq("1F602").array_name("emoji_"), "emoji_1f602");
        assert_eq!(seq("2764-FE0F").array_name("emoji_"), "emoji_2764_fe0f");
    }

    #[test]
    fn simplicity_key_orders_single_codepoints_first() {
        let mut codes = vec![seq("1F468-200D-1F4BB"), seq("1F602"), seq("2615"), seq("2764-FE0F")];
        codes.sort_by(|a, b| a.simplicity_key().cmp(&b.simplicity_key()));
        let order: Vec<&str> = codes.iter().map(CodepointSequence::as_str).collect();
        assert_eq!(order, vec!["2615", "1F602", "2764-FE0F", "1F468-200D-1F4BB"]);
    }
}
