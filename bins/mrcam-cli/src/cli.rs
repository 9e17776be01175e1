// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use mrcam_session::{LockType, PropertyType};

/// Inspect and drive camera properties and chroma-key slots.
///
/// Runs against the in-process simulated runtime; device state starts fresh on
/// every invocation.
#[derive(Parser, Debug)]
#[command(name = "mrcam", author, version, about)]
pub struct Cli {
    /// Directory holding tool preferences (defaults to the platform config dir).
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Have a second client hold this lock for the whole run.
    #[arg(long, global = true, value_enum)]
    pub contend: Option<LockArg>,

    /// Raise log verbosity (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every property with its modes, manual values and current state.
    Props,
    /// Show the current state of every property.
    Status,
    /// Advance a property through its mode/value cycle.
    Cycle {
        /// Property name, e.g. `iso` or `white-balance`.
        property: PropertyType,
        /// Number of steps.
        #[arg(long, default_value_t = 1)]
        times: u32,
    },
    /// Put a property into Auto mode.
    Auto {
        /// Property name.
        property: PropertyType,
    },
    /// Reset every property to the device defaults.
    Reset,
    /// Chroma-key slot commands.
    Chroma {
        /// Chroma-key action.
        #[command(subcommand)]
        action: ChromaAction,
    },
    /// List saved chroma-key presets.
    Presets {
        /// Write the current presets (defaults if none saved) to the config dir.
        #[arg(long)]
        save: bool,
    },
}

/// `chroma` subcommands.
#[derive(Subcommand, Debug)]
pub enum ChromaAction {
    /// Show every config slot.
    List,
    /// Write a named preset into a slot.
    Apply {
        /// Slot index.
        slot: usize,
        /// Preset name, e.g. `green-screen`.
        preset: String,
    },
    /// Switch chroma keying on.
    Enable,
    /// Switch chroma keying off.
    Disable,
}

/// Lock class selectable on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LockArg {
    /// Camera property lock.
    Camera,
    /// Chroma-key config lock.
    ChromaKey,
}

impl From<LockArg> for LockType {
    fn from(arg: LockArg) -> Self {
        match arg {
            LockArg::Camera => Self::Camera,
            LockArg::ChromaKey => Self::ChromaKey,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_property_aliases_and_globals() {
        let cli = Cli::try_parse_from([
            "mrcam",
            "cycle",
            "iso",
            "--times",
            "3",
            "--contend",
            "chroma-key",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.contend, Some(LockArg::ChromaKey));
        assert!(matches!(
            cli.command,
            Command::Cycle {
                property: PropertyType::IsoValue,
                times: 3
            }
        ));
    }

    #[test]
    fn rejects_unknown_property() {
        assert!(Cli::try_parse_from(["mrcam", "auto", "zoom"]).is_err());
        assert!(Cli::try_parse_from(["mrcam", "auto", "9"]).is_err());
    }

    #[test]
    fn accepts_runtime_property_codes() {
        let cli = Cli::try_parse_from(["mrcam", "auto", "3"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Auto {
                property: PropertyType::WhiteBalance
            }
        ));
    }
}
