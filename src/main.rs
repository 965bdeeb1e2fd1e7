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

use std::io::{self, Write};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vinfit::cli::{run_cli, Cli};
use vinfit::logger;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Optional JSON event log
    if let Some(path) = &cli.event_log {
        match logger::init_logging(path.as_deref()) {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Event log enabled");
                logger::log_event(
                    "startup",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "args": std::env::args().collect::<Vec<_>>(),
                    }),
                );
            }
            Err(e) => tracing::warn!(error = %e, "Could not open event log"),
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = run_cli(&cli, &mut out);
    out.flush()?;

    if let Err(err) = &result {
        logger::log_event("fatal_error", serde_json::json!({ "error": format!("{:#}", err) }));
    }
    logger::shutdown_logging();
    result
}
