// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! mrcam CLI entrypoint.
//!
//! Developer-facing harness for the camera property cycler and the chroma-key
//! config store, running against the simulated runtime.
//!
//! # Usage
//! ```text
//! mrcam [--config-dir DIR] [--contend camera|chroma-key] [-v] <command>
//! ```
//!
//! Logs go to stderr; `RUST_LOG` overrides the `-v` level. The CLI exits with
//! code `0` on success and non-zero on error.

mod cli;
mod commands;

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::commands::Harness;

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let harness = Harness::new(cli.contend.map(Into::into))?;
    let mut stdout = std::io::stdout().lock();
    commands::run(&cli, &harness, &mut stdout)
}
