// SPDX-License-Identifier: MPL-2.0
//! End-to-end conversion run.
//!
//! [`run`] scans the source directory, selects emojis, converts them one at
//! a time and writes the header. A failing emoji is logged and skipped; the
//! run itself only fails when nothing could be converted or the header
//! cannot be written.

use crate::config::{defaults, Config, Renderer, SourceFormat};
use crate::directory_scanner::AssetCatalog;
use crate::domain::emoji::CodepointSequence;
use crate::domain::raster::{CanvasSize, YAxis};
use crate::error::{Error, Result};
use crate::header::{write_header_file, EmojiArray, HeaderInfo};
use crate::raster::{
    center_visible, png_source, quantize, rasterize, resvg_backend, QuantizeOptions, SENTINEL,
};
use crate::selection::{parse_seed_list, select, Seeds, SelectionLimits};
use crate::vector::load_drawing;
use image_rs::{Rgb, RgbImage};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    pub source_dir: PathBuf,
    pub format: SourceFormat,
    pub renderer: Renderer,
    pub size: CanvasSize,
    pub y_axis: YAxis,
    pub quantize: QuantizeOptions,
    pub header: PathBuf,
    pub array_prefix: String,
    /// Where to write PNG previews; `None` disables them.
    pub preview_dir: Option<PathBuf>,
    pub limits: SelectionLimits,
    pub seeds: Seeds,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(defaults::DEFAULT_SVG_SOURCE_DIR),
            format: SourceFormat::default(),
            renderer: Renderer::default(),
            size: CanvasSize::default(),
            y_axis: YAxis::default(),
            quantize: QuantizeOptions::default(),
            header: PathBuf::from(defaults::DEFAULT_OUTPUT_FILE),
            array_prefix: defaults::DEFAULT_ARRAY_PREFIX.to_string(),
            preview_dir: None,
            limits: SelectionLimits {
                count: defaults::DEFAULT_COUNT,
                max_faces: defaults::DEFAULT_MAX_FACES,
            },
            seeds: Seeds::default(),
        }
    }
}

impl ConvertOptions {
    /// Fills every unset field of `config` from [`defaults`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the array prefix cannot start a C
    /// identifier or a custom seed entry is not a codepoint sequence.
    pub fn from_config(config: Config) -> Result<Self> {
        let format = config.input.format.unwrap_or_default();
        let source_dir = config
            .input
            .source_dir
            .unwrap_or_else(|| PathBuf::from(format.default_source_dir()));

        let array_prefix = config
            .output
            .array_prefix
            .unwrap_or_else(|| defaults::DEFAULT_ARRAY_PREFIX.to_string());
        if !is_identifier_prefix(&array_prefix) {
            return Err(Error::Config(format!(
                "array prefix '{}' must start with a letter or '_' and contain only letters, digits and '_'",
                array_prefix
            )));
        }

        let preview_dir = if config.output.previews.unwrap_or(false) {
            Some(
                config
                    .output
                    .preview_dir
                    .unwrap_or_else(|| PathBuf::from(defaults::DEFAULT_PREVIEW_DIR)),
            )
        } else {
            None
        };

        let default_seeds = Seeds::default();
        let seeds = Seeds {
            faces: match &config.selection.face_seed {
                Some(list) => parse_seed_list(list.as_slice())?,
                None => default_seeds.faces,
            },
            fun: match &config.selection.fun_seed {
                Some(list) => parse_seed_list(list.as_slice())?,
                None => default_seeds.fun,
            },
        };

        let [r, g, b] = config
            .render
            .dark_boost
            .unwrap_or(defaults::DEFAULT_DARK_BOOST);

        Ok(Self {
            source_dir,
            format,
            renderer: config.input.renderer.unwrap_or_default(),
            size: CanvasSize::new(config.render.size.unwrap_or(defaults::DEFAULT_CANVAS_SIZE)),
            y_axis: config.render.y_axis.unwrap_or_default(),
            quantize: QuantizeOptions {
                background: SENTINEL,
                dark_threshold: config
                    .render
                    .dark_threshold
                    .unwrap_or(defaults::DEFAULT_DARK_THRESHOLD),
                dark_boost: Rgb([r, g, b]),
            },
            header: config
                .output
                .header
                .unwrap_or_else(|| PathBuf::from(defaults::DEFAULT_OUTPUT_FILE)),
            array_prefix,
            preview_dir,
            limits: SelectionLimits {
                count: config
                    .selection
                    .count
                    .unwrap_or(defaults::DEFAULT_COUNT)
                    .max(defaults::MIN_COUNT),
                max_faces: config
                    .selection
                    .max_faces
                    .unwrap_or(defaults::DEFAULT_MAX_FACES),
            },
            seeds,
        })
    }
}

fn is_identifier_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Result of converting a single emoji.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    Converted(EmojiArray),
    Skipped {
        code: CodepointSequence,
        reason: String,
    },
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunReport {
    /// Converted emojis, in header order.
    pub converted: Vec<CodepointSequence>,
    /// Emojis that were selected but could not be converted.
    pub skipped: Vec<(CodepointSequence, String)>,
    pub header: PathBuf,
    pub preview_dir: Option<PathBuf>,
}

/// Runs the whole conversion.
///
/// # Errors
///
/// Returns [`Error::Io`] if the source directory is missing or the header
/// cannot be written, and [`Error::Render`] if no emoji could be converted.
pub fn run(options: &ConvertOptions) -> Result<RunReport> {
    let catalog = AssetCatalog::scan(&options.source_dir, options.format.extension())?;
    info!(
        "Found {} {} assets in {}",
        catalog.len(),
        options.format,
        options.source_dir.display()
    );

    let selection = select(&catalog, &options.seeds, options.limits);
    if selection.is_empty() {
        return Err(Error::Render(format!(
            "no emojis found to convert in {}",
            options.source_dir.display()
        )));
    }

    if let Some(dir) = &options.preview_dir {
        fs::create_dir_all(dir)?;
    }

    let mut report = RunReport {
        header: options.header.clone(),
        preview_dir: options.preview_dir.clone(),
        ..RunReport::default()
    };
    let mut arrays = Vec::with_capacity(selection.len());
    let total = selection.len();

    for (index, code) in selection.iter().enumerate() {
        info!("Converting {}/{}: {}", index + 1, total, code);
        match convert_item(code, &catalog, options) {
            ItemOutcome::Converted(array) => {
                report.converted.push(code.clone());
                arrays.push(array);
            }
            ItemOutcome::Skipped { code, reason } => {
                warn!("Skipping {}: {}", code, reason);
                report.skipped.push((code, reason));
            }
        }
    }

    if arrays.is_empty() {
        return Err(Error::Render(format!(
            "none of the {} selected emojis could be converted",
            total
        )));
    }

    let info_line = HeaderInfo {
        size: options.size,
        source: match options.format {
            SourceFormat::Svg => "SVG",
            SourceFormat::Png => "PNG",
        },
    };
    write_header_file(&options.header, info_line, &arrays)?;

    info!(
        "Converted {} emojis ({} skipped), header written to {}",
        report.converted.len(),
        report.skipped.len(),
        options.header.display()
    );
    if let Some(dir) = &report.preview_dir {
        info!("PNG previews written to {}", dir.display());
    }

    Ok(report)
}

/// Converts one emoji into its named pixel array.
pub fn convert_item(
    code: &CodepointSequence,
    catalog: &AssetCatalog,
    options: &ConvertOptions,
) -> ItemOutcome {
    let Some(path) = catalog.path_for(code) else {
        return ItemOutcome::Skipped {
            code: code.clone(),
            reason: "asset file missing".to_string(),
        };
    };

    let canvas = match render_canvas(path, options) {
        Ok(canvas) => center_visible(&canvas, SENTINEL),
        Err(e) => {
            return ItemOutcome::Skipped {
                code: code.clone(),
                reason: e.to_string(),
            }
        }
    };

    if let Some(dir) = &options.preview_dir {
        let preview = dir.join(code.file_name("png"));
        if let Err(e) = canvas.save(&preview) {
            warn!("Could not write preview {}: {}", preview.display(), e);
        }
    }

    ItemOutcome::Converted(EmojiArray {
        name: code.array_name(&options.array_prefix),
        pixels: quantize(&canvas, &options.quantize),
    })
}

/// Produces the uncentered canvas for one asset file.
fn render_canvas(path: &Path, options: &ConvertOptions) -> Result<RgbImage> {
    match options.format {
        SourceFormat::Png => png_source::load_png_canvas(path, options.size),
        SourceFormat::Svg => match options.renderer {
            Renderer::Resvg => resvg_backend::render_svg_file(path, options.size, options.y_axis),
            Renderer::Primitives => {
                let drawing = load_drawing(path, options.size.value() as f32)?;
                debug!(
                    "{}: {} primitives",
                    path.display(),
                    drawing.leaf_count()
                );
                rasterize(&drawing, options.size, options.y_axis)
            }
        },
    }
}
