// SPDX-License-Identifier: MPL-2.0
//! C header generation.
//!
//! The header defines one `const uint16_t` array per emoji, a table of
//! pointers to them and the table length:
//!
//! ```text
//! #pragma once
//! #include <Arduino.h>
//!
//! // OpenMoji emoji data converted from SVG to 64x64 RGB565
//! // Source: https://openmoji.org (CC BY-SA 4.0)
//!
//! const uint16_t emoji_1f602[4096] = {
//!     0x0000, 0x0000, ...,
//! };
//!
//! const uint16_t* emoji_arrays[1] = {
//!     emoji_1f602,
//! };
//!
//! const int NUM_EMOJIS = 1;
//! ```

use crate::domain::raster::CanvasSize;
use crate::error::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Values per line inside an array body.
const VALUES_PER_LINE: usize = 16;

/// One named pixel array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiArray {
    pub name: String,
    pub pixels: Vec<u16>,
}

/// Describes what the arrays were converted from, for the header comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderInfo<'a> {
    pub size: CanvasSize,
    /// Source format label, e.g. `SVG`.
    pub source: &'a str,
}

/// Writes the complete header to `out`.
///
/// # Errors
///
/// Returns [`Error::Io`](crate::error::Error::Io) if writing to `out` fails.
pub fn write_header<W: Write>(out: &mut W, info: HeaderInfo<'_>, arrays: &[EmojiArray]) -> Result<()> {
    let n = info.size.value();
    writeln!(out, "#pragma once")?;
    writeln!(out, "#include <Arduino.h>")?;
    writeln!(out)?;
    writeln!(
        out,
        "// OpenMoji emoji data converted from {} to {}x{} RGB565",
        info.source, n, n
    )?;
    writeln!(out, "// Source: https://openmoji.org (CC BY-SA 4.0)")?;
    writeln!(out)?;

    for array in arrays {
        write_array(out, array)?;
        writeln!(out)?;
        writeln!(out)?;
    }

    writeln!(out, "const uint16_t* emoji_arrays[{}] = {{", arrays.len())?;
    for array in arrays {
        writeln!(out, "    {},", array.name)?;
    }
    writeln!(out, "}};")?;
    writeln!(out)?;
    writeln!(out, "const int NUM_EMOJIS = {};", arrays.len())?;
    Ok(())
}

/// Writes the header to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`Error::Io`](crate::error::Error::Io) if the file cannot be
/// created or written.
pub fn write_header_file<P: AsRef<Path>>(
    path: P,
    info: HeaderInfo<'_>,
    arrays: &[EmojiArray],
) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_header(&mut out, info, arrays)?;
    out.flush()?;
    Ok(())
}

/// Array definition without trailing newline.
fn write_array<W: Write>(out: &mut W, array: &EmojiArray) -> Result<()> {
    writeln!(
        out,
        "const uint16_t {}[{}] = {{",
        array.name,
        array.pixels.len()
    )?;
    for chunk in array.pixels.chunks(VALUES_PER_LINE) {
        let values = chunk
            .iter()
            .map(|value| format!("0x{:04X}", value))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(out, "    {},", values)?;
    }
    write!(out, "}};")?;
    Ok(())
}
