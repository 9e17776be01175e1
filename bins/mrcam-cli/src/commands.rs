// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Subcommand implementations.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use comfy_table::{presets::UTF8_FULL, Table};
use mrcam_app_core::{PrefsService, ToolPrefs};
use mrcam_config_fs::FsConfigStore;
use mrcam_control::{LockedConfigStore, PropertyCycler};
use mrcam_session::{DeviceSession, LockType, PropertyType};
use mrcam_sim::{SimRuntime, SimSession};
use tracing::{debug, warn};

use crate::cli::{ChromaAction, Cli, Command};

/// Simulated device plus the session the commands drive.
pub struct Harness {
    session: Arc<SimSession>,
    // Held for the whole run so its lock stays taken.
    _contender: Option<SimSession>,
}

impl Harness {
    /// Fresh runtime; optionally a second client holding `contend`.
    pub fn new(contend: Option<LockType>) -> Result<Self> {
        let runtime = SimRuntime::new();
        let contender = match contend {
            Some(kind) => {
                let other = runtime.session();
                if !other.lock(kind) {
                    bail!("second client could not take the {kind} lock");
                }
                debug!(lock = %kind, "second client holds lock");
                Some(other)
            }
            None => None,
        };
        Ok(Self {
            session: Arc::new(runtime.session()),
            _contender: contender,
        })
    }

    fn cycler(&self) -> PropertyCycler<Arc<SimSession>> {
        PropertyCycler::new(Arc::clone(&self.session))
    }

    fn chroma(&self) -> LockedConfigStore<Arc<SimSession>> {
        LockedConfigStore::new(Arc::clone(&self.session))
    }
}

fn prefs_service(config_dir: Option<&Path>) -> Result<PrefsService<FsConfigStore>> {
    let store = match config_dir {
        Some(dir) => FsConfigStore::with_base(dir),
        None => FsConfigStore::new(),
    }
    .context("opening config store")?;
    Ok(PrefsService::new(store))
}

/// Prefs for display purposes: any failure falls back to defaults.
fn prefs_or_default(config_dir: Option<&Path>) -> ToolPrefs {
    match prefs_service(config_dir).and_then(|svc| Ok(svc.load()?)) {
        Ok(prefs) => prefs,
        Err(err) => {
            warn!(error = %err, "using default preferences");
            ToolPrefs::default()
        }
    }
}

fn table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header.to_vec());
    table
}

/// Run `cli` against `harness`, writing user-facing output to `out`.
pub fn run(cli: &Cli, harness: &Harness, out: &mut impl Write) -> Result<()> {
    let config_dir = cli.config_dir.as_deref();
    match &cli.command {
        Command::Props => props(harness, &prefs_or_default(config_dir), out),
        Command::Status => status(harness, &prefs_or_default(config_dir), out),
        Command::Cycle { property, times } => cycle(harness, *property, *times, out),
        Command::Auto { property } => auto(harness, *property, out),
        Command::Reset => reset(harness, out),
        Command::Chroma { action } => chroma(harness, action, config_dir, out),
        Command::Presets { save } => presets(config_dir, *save, out),
    }
}

fn props(harness: &Harness, prefs: &ToolPrefs, out: &mut impl Write) -> Result<()> {
    let cycler = harness.cycler();
    cycler.log_supported_properties();
    let mut t = table(&["Property", "Modes", "Values", "Current"]);
    for ty in prefs.ordered_properties() {
        let report = cycler.describe(ty);
        if !report.is_supported() {
            continue;
        }
        t.add_row(vec![
            ty.to_string(),
            report.modes_text(),
            report.values_text(),
            report.current,
        ]);
    }
    writeln!(out, "{t}")?;
    Ok(())
}

fn status(harness: &Harness, prefs: &ToolPrefs, out: &mut impl Write) -> Result<()> {
    let cycler = harness.cycler();
    cycler.log_current_config();
    let mut t = table(&["Property", "Current"]);
    for ty in prefs.ordered_properties() {
        t.add_row(vec![ty.to_string(), cycler.current_as_text(ty)]);
    }
    writeln!(out, "{t}")?;
    Ok(())
}

fn cycle(harness: &Harness, property: PropertyType, times: u32, out: &mut impl Write) -> Result<()> {
    let cycler = harness.cycler();
    writeln!(out, "{property}: {}", cycler.current_as_text(property))?;
    for step in 1..=times {
        if !cycler.advance(property) {
            bail!("advancing {property} failed at step {step}");
        }
        writeln!(out, "  -> {}", cycler.current_as_text(property))?;
    }
    Ok(())
}

fn auto(harness: &Harness, property: PropertyType, out: &mut impl Write) -> Result<()> {
    if !harness.cycler().set_auto_mode(property) {
        bail!("could not put {property} into Auto mode");
    }
    writeln!(out, "{property}: Auto")?;
    Ok(())
}

fn reset(harness: &Harness, out: &mut impl Write) -> Result<()> {
    if !harness.cycler().reset_to_defaults() {
        bail!("resetting camera properties failed");
    }
    writeln!(out, "camera properties reset to defaults")?;
    Ok(())
}

fn chroma(
    harness: &Harness,
    action: &ChromaAction,
    config_dir: Option<&Path>,
    out: &mut impl Write,
) -> Result<()> {
    let mut store = harness.chroma();
    match action {
        ChromaAction::List => {
            let mut t = table(&["Slot", "Config"]);
            for index in 0..store.config_count() {
                let text = store
                    .config(index)
                    .map_or_else(|| "unreadable".to_owned(), |c| c.to_string());
                t.add_row(vec![index.to_string(), text]);
            }
            writeln!(out, "{t}")?;
        }
        ChromaAction::Apply { slot, preset } => {
            let prefs = prefs_service(config_dir)?
                .load()
                .context("loading preferences")?;
            let Some(found) = prefs.preset(preset) else {
                let names: Vec<&str> = prefs.presets.iter().map(|p| p.name.as_str()).collect();
                bail!("unknown preset `{preset}` (available: {})", names.join(", "));
            };
            if !store.lock() {
                bail!("chroma-key config is locked by another client");
            }
            let written = store.set_config(*slot, &found.config);
            store.unlock();
            if !written {
                bail!("slot {slot} rejected preset `{preset}`");
            }
            writeln!(out, "slot {slot}: {}", found.config)?;
        }
        ChromaAction::Enable | ChromaAction::Disable => {
            let enabled = matches!(action, ChromaAction::Enable);
            let word = if enabled { "on" } else { "off" };
            if store.toggle_enabled(enabled) {
                writeln!(out, "chroma keying {word}")?;
            } else if store.is_enabled() == enabled {
                writeln!(out, "chroma keying already {word}")?;
            } else {
                bail!("switching chroma keying {word} failed");
            }
        }
    }
    Ok(())
}

fn presets(config_dir: Option<&Path>, save: bool, out: &mut impl Write) -> Result<()> {
    let service = prefs_service(config_dir)?;
    let prefs = service.load().context("loading preferences")?;
    let mut t = table(&["Preset", "Config"]);
    for preset in &prefs.presets {
        t.add_row(vec![preset.name.clone(), preset.config.to_string()]);
    }
    writeln!(out, "{t}")?;
    if save {
        service.save(&prefs).context("saving preferences")?;
        writeln!(out, "saved {} presets", prefs.presets.len())?;
    }
    Ok(())
}
