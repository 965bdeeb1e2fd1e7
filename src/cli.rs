/*
 * This file is part of vinfit.
 *
 * Copyright (C) 2025 vinfit contributors
 *
 * vinfit is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * vinfit is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with vinfit. If not, see <https://www.gnu.org/licenses/>.
 */

//! Command Line Interface

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use vf_core::{
    compute_check_digit, get_cached_settings, get_settings_path, load_settings,
    load_settings_from, normalize_vin, save_settings_to, EngineSettings, VinSegments,
};

use crate::catalog::{load_catalog, load_vehicle};
use crate::convert::{decoded_to_wire, fitment_to_wire, wmi_to_wire};
use crate::handlers::{run_batch, Engine};
use crate::logger::log_event;

#[derive(Parser)]
#[command(name = "vinfit")]
#[command(version)]
#[command(about = "vinfit - VIN decoding and parts fitment")]
#[command(long_about = "vinfit - VIN decoding and parts fitment

Decodes 17-character VINs (manufacturer, country, model year, check digit)
and ranks catalog parts by how well they fit a vehicle.

EXAMPLES:
    vinfit decode 1HGBH41JXMN109186
    vinfit decode 1hgbh41j-xmn109186 --normalize --json
    vinfit check-digit 1HGBH41JXMN109186
    vinfit wmi 5YJ
    vinfit match --vehicle civic.json --catalog brakes.json --min-score 50
    vinfit batch --input requests.jsonl
    vinfit settings show

ENVIRONMENT VARIABLES:
    RUST_LOG=debug         Diagnostic logging on stderr
    VINFIT_CONFIG=PATH     Settings file to use

FILES:
    ~/.config/vinfit/settings.json        Scoring weights and WMI overrides
    ~/.local/share/vinfit/events.json     Event log (--event-log[=PATH])")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug-level diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file (overrides VINFIT_CONFIG)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Append JSON events to PATH (default: events.json in the data dir)
    #[arg(long, value_name = "PATH", global = true, num_args = 0..=1, require_equals = true)]
    pub event_log: Option<Option<PathBuf>>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode a VIN
    Decode(VinArgs),

    /// Show the expected and actual check digit of a VIN
    CheckDigit(VinArgs),

    /// Look up a World Manufacturer Identifier
    Wmi {
        /// First three characters of a VIN
        wmi: String,
    },

    /// Rank a parts catalog against a vehicle
    Match(MatchArgs),

    /// Answer JSON-lines requests from a file or stdin
    Batch {
        /// Request file (default: stdin)
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Settings management
    #[command(subcommand, about = "View and create engine settings")]
    Settings(SettingsCommands),
}

#[derive(Args)]
pub struct VinArgs {
    pub vin: String,

    /// Strip separators and uppercase before decoding
    #[arg(long)]
    pub normalize: bool,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct MatchArgs {
    /// JSON file with one vehicle
    #[arg(long, value_name = "FILE")]
    pub vehicle: PathBuf,

    /// JSON file with an array of parts
    #[arg(long, value_name = "FILE")]
    pub catalog: PathBuf,

    /// Hide parts scoring below this
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub min_score: Option<u8>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show effective settings as JSON
    Show,
    /// Print the settings file path
    Path,
    /// Write default settings to the settings file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run a parsed command, writing results to `out`
pub fn run_cli(cli: &Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Decode(args) => cmd_decode(cli, args, out),
        Commands::CheckDigit(args) => cmd_check_digit(args, out),
        Commands::Wmi { wmi } => cmd_wmi(cli, wmi, out),
        Commands::Match(args) => cmd_match(cli, args, out),
        Commands::Batch { input } => cmd_batch(cli, input.as_ref(), out),
        Commands::Settings(sub) => cmd_settings(cli, sub, out),
    }
}

/// Settings for engine commands: an explicit `--config` must load,
/// otherwise a broken settings file falls back to defaults with a warning.
fn engine_settings(cli: &Cli) -> anyhow::Result<EngineSettings> {
    match &cli.config {
        Some(path) => load_settings_from(path)
            .with_context(|| format!("loading settings from {}", path.display())),
        None => Ok(get_cached_settings()),
    }
}

fn engine(cli: &Cli) -> anyhow::Result<Engine> {
    let settings = engine_settings(cli)?;
    Ok(Engine::from_settings(&settings)?)
}

fn prepare_vin(args: &VinArgs) -> String {
    if args.normalize {
        normalize_vin(&args.vin)
    } else {
        args.vin.clone()
    }
}

// ============================================================================
// VIN Commands
// ============================================================================

fn cmd_decode(cli: &Cli, args: &VinArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let vin = prepare_vin(args);
    let engine = engine(cli)?;

    let decoded = match engine.decoder().decode(&vin) {
        Ok(decoded) => decoded,
        Err(e) => {
            log_event("decode", json!({ "vin": vin, "ok": false, "error": e.to_string() }));
            return Err(e).with_context(|| format!("decoding {}", vin));
        }
    };
    log_event("decode", json!({ "vin": vin, "ok": true }));

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&decoded_to_wire(&vin, &decoded))?)?;
        return Ok(());
    }

    writeln!(out, "VIN:          {}", vin)?;
    writeln!(out, "Manufacturer: {}", decoded.manufacturer())?;
    writeln!(out, "Country:      {}", decoded.country())?;
    writeln!(out, "Region:       {}", decoded.region())?;
    writeln!(out, "Model year:   {} ({})", decoded.model_year(), decoded.model_year_code())?;
    writeln!(out, "WMI:          {}", decoded.wmi())?;
    writeln!(out, "VDS:          {}", decoded.vds_raw())?;
    writeln!(out, "Plant:        {}", decoded.plant_code())?;
    writeln!(out, "Serial:       {}", decoded.serial())?;
    writeln!(
        out,
        "Check digit:  {}",
        if decoded.check_digit_valid() { "valid" } else { "INVALID" }
    )?;
    Ok(())
}

fn cmd_check_digit(args: &VinArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let vin = prepare_vin(args);
    let segments = VinSegments::parse(&vin).with_context(|| format!("parsing {}", vin))?;
    let expected = compute_check_digit(&vin)?;
    let actual = segments.check_digit();

    if args.json {
        let report = json!({
            "vin": vin,
            "expected": expected.to_string(),
            "actual": actual.to_string(),
            "valid": expected == actual,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    writeln!(out, "Expected: {}", expected)?;
    writeln!(out, "Actual:   {}", actual)?;
    writeln!(out, "Status:   {}", if expected == actual { "valid" } else { "INVALID" })?;
    Ok(())
}

fn cmd_wmi(cli: &Cli, wmi: &str, out: &mut dyn Write) -> anyhow::Result<()> {
    let key = wmi.trim().to_ascii_uppercase();
    let engine = engine(cli)?;
    let Some(entry) = engine.registry().lookup(&key) else {
        bail!("WMI not registered: {}", key);
    };

    let info = wmi_to_wire(&key, entry);
    writeln!(out, "WMI:          {}", info.wmi)?;
    writeln!(out, "Manufacturer: {}", info.manufacturer)?;
    writeln!(out, "Make:         {}", info.make)?;
    writeln!(out, "Country:      {}", info.country)?;
    Ok(())
}

// ============================================================================
// Fitment Commands
// ============================================================================

fn cmd_match(cli: &Cli, args: &MatchArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let vehicle = load_vehicle(&args.vehicle)
        .with_context(|| format!("loading vehicle from {}", args.vehicle.display()))?;
    let catalog = load_catalog(&args.catalog)
        .with_context(|| format!("loading catalog from {}", args.catalog.display()))?;
    let engine = engine(cli)?;

    let results = engine.rank(&vehicle, &catalog, args.min_score);
    log_event(
        "match",
        json!({
            "make": vehicle.make,
            "model": vehicle.model,
            "year": vehicle.year,
            "candidates": catalog.len(),
            "matched": results.iter().filter(|r| r.is_match()).count(),
        }),
    );

    if args.json {
        let wire: Vec<_> = results.iter().map(fitment_to_wire).collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&wire)?)?;
        return Ok(());
    }

    writeln!(
        out,
        "{} {} {}: {} of {} parts shown",
        vehicle.year,
        vehicle.make,
        vehicle.model,
        results.len(),
        catalog.len()
    )?;
    for result in &results {
        writeln!(out)?;
        writeln!(out, "{:>3}  {:<6}  {}", result.score, result.confidence().as_str(), result.part_id)?;
        for reason in &result.reasons {
            writeln!(out, "       - {}", reason)?;
        }
    }
    Ok(())
}

fn cmd_batch(cli: &Cli, input: Option<&PathBuf>, out: &mut dyn Write) -> anyhow::Result<()> {
    let engine = engine(cli)?;

    let stats = match input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening batch input {}", path.display()))?;
            run_batch(&engine, BufReader::new(file), out)?
        }
        None => run_batch(&engine, io::stdin().lock(), out)?,
    };

    tracing::info!(requests = stats.requests, errors = stats.errors, "Batch complete");
    Ok(())
}

// ============================================================================
// Settings Commands
// ============================================================================

fn settings_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => Ok(get_settings_path()?),
    }
}

fn cmd_settings(cli: &Cli, cmd: &SettingsCommands, out: &mut dyn Write) -> anyhow::Result<()> {
    match cmd {
        SettingsCommands::Show => {
            let settings = match &cli.config {
                Some(path) => load_settings_from(path)?,
                None => load_settings()?,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&settings)?)?;
        }
        SettingsCommands::Path => {
            writeln!(out, "{}", settings_path(cli)?.display())?;
        }
        SettingsCommands::Init { force } => {
            let path = settings_path(cli)?;
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            save_settings_to(&EngineSettings::default(), &path)?;
            writeln!(out, "Wrote default settings to {}", path.display())?;
        }
    }
    Ok(())
}
