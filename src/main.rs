// SPDX-License-Identifier: MPL-2.0
use emoji_matrix::cli::{CliArgs, HELP};
use emoji_matrix::config::{self, Config};
use emoji_matrix::error::Result;
use emoji_matrix::pipeline::{self, ConvertOptions};
use env_logger::{Env, TimestampPrecision};
use log::error;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::builder()
        .parse_env(Env::default().filter_or("LOG_LEVEL", "info"))
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<()> {
    let cli = CliArgs::from_env()?;
    if cli.help {
        print!("{}", HELP);
        return Ok(());
    }

    let file = match &cli.config_path {
        Some(path) => config::load_from_path(path)?,
        None => Config::default(),
    };
    let options = ConvertOptions::from_config(cli.overrides.overlay(file))?;
    pipeline::run(&options)?;
    Ok(())
}
