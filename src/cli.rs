// SPDX-License-Identifier: MPL-2.0
//! Command-line parsing.
//!
//! Flags are collected into a [`Config`] so they can be laid over the
//! optional config file with [`Config::overlay`].

use crate::config::{Config, Renderer, SourceFormat};
use crate::domain::raster::YAxis;
use crate::error::{Error, Result};
use std::ffi::OsString;
use std::path::PathBuf;

pub const HELP: &str = "\
Convert OpenMoji assets into 64x64 RGB565 arrays for an LED matrix firmware.

USAGE:
  emoji_matrix [OPTIONS]

OPTIONS:
  --source-dir <DIR>       Asset directory [default: openmoji-svg-color,
                           or openmoji-png-color with --format png]
  --out <FILE>             Output header [default: EmojisData.h]
  --size <N>               Canvas edge length, 8..=256 [default: 64]
  --count <N>              Number of emojis to convert [default: 100]
  --max-faces <N>          Maximum number of face emojis [default: 10]
  --previews               Write PNG previews of every converted emoji
  --preview-dir <DIR>      Preview directory [default: previews]
  --format <svg|png>       Asset format [default: svg]
  --renderer <NAME>        SVG renderer: primitives or resvg [default: primitives]
  --y-axis <down|up>       Vertical direction of drawing space [default: down]
  --config <FILE>          TOML file with default options
  -h, --help               Print this help

Logging verbosity follows LOG_LEVEL (error, warn, info, debug, trace).
";

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CliArgs {
    pub help: bool,
    pub config_path: Option<PathBuf>,
    /// Options given on the command line; unset fields were not passed.
    pub overrides: Config,
}

impl CliArgs {
    /// Parses the process arguments.
    pub fn from_env() -> Result<Self> {
        Self::parse(pico_args::Arguments::from_env())
    }

    /// Parses an explicit argument list (without the program name).
    pub fn from_vec(args: Vec<OsString>) -> Result<Self> {
        Self::parse(pico_args::Arguments::from_vec(args))
    }

    fn parse(mut args: pico_args::Arguments) -> Result<Self> {
        let help = args.contains(["-h", "--help"]);
        let config_path: Option<PathBuf> = args.opt_value_from_str("--config")?;

        let mut overrides = Config::default();
        overrides.input.source_dir = args.opt_value_from_str("--source-dir")?;
        overrides.input.format = args.opt_value_from_str::<_, SourceFormat>("--format")?;
        overrides.input.renderer = args.opt_value_from_str::<_, Renderer>("--renderer")?;
        overrides.render.size = args.opt_value_from_str("--size")?;
        overrides.render.y_axis = args.opt_value_from_str::<_, YAxis>("--y-axis")?;
        overrides.output.header = args.opt_value_from_str("--out")?;
        overrides.output.preview_dir = args.opt_value_from_str("--preview-dir")?;
        if args.contains("--previews") {
            overrides.output.previews = Some(true);
        }
        overrides.selection.count = args.opt_value_from_str("--count")?;
        overrides.selection.max_faces = args.opt_value_from_str("--max-faces")?;

        let remaining = args.finish();
        if !remaining.is_empty() {
            return Err(Error::Args(format!(
                "unexpected arguments: {}",
                remaining
                    .iter()
                    .map(|a| a.to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join(" ")
            )));
        }

        Ok(Self {
            help,
            config_path,
            overrides,
        })
    }
}
