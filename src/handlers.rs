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

//! Request handlers for the JSON-lines batch interface
//!
//! Every input line is one `RequestEnvelope`; every output line is one
//! `ResponseEnvelope` carrying the same id. A bad line produces an error
//! response and the batch carries on.

use std::io::{BufRead, Write};

use serde_json::json;
use tracing::{debug, warn};
use vf_core::{
    normalize_vin, EngineSettings, FitmentMatcher, PartCandidate, VehicleDescriptor, VinDecoder,
    WmiRegistry,
};
use vf_error::{Result, VinfitError};
use vf_protocol::{
    Request, RequestEnvelope, Response, ResponseData, ResponseEnvelope, MAX_MESSAGE_SIZE,
};

use crate::convert::{
    decoded_to_wire, fitment_to_wire, parts_from_wire, vehicle_from_wire, vehicle_to_wire,
    wmi_to_wire,
};
use crate::logger::log_event;

/// Registry and matcher configured from settings
#[derive(Debug, Clone)]
pub struct Engine {
    registry: WmiRegistry,
    matcher: FitmentMatcher,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            registry: vf_core::wmi::builtin().clone(),
            matcher: FitmentMatcher::default(),
        }
    }
}

impl Engine {
    pub fn new(registry: WmiRegistry, matcher: FitmentMatcher) -> Self {
        Self { registry, matcher }
    }

    pub fn from_settings(settings: &EngineSettings) -> Result<Self> {
        Ok(Self::new(settings.registry()?, settings.matcher()))
    }

    pub fn registry(&self) -> &WmiRegistry {
        &self.registry
    }

    pub fn matcher(&self) -> &FitmentMatcher {
        &self.matcher
    }

    pub fn decoder(&self) -> VinDecoder<&WmiRegistry> {
        VinDecoder::new(&self.registry)
    }

    /// Ranked results, filtered by `min_score` when given
    pub fn rank(
        &self,
        vehicle: &VehicleDescriptor,
        candidates: &[PartCandidate],
        min_score: Option<u8>,
    ) -> Vec<vf_core::FitmentResult> {
        match min_score {
            Some(min) => self.matcher.match_parts_above(vehicle, candidates, min),
            None => self.matcher.match_parts(vehicle, candidates),
        }
    }
}

/// Counters reported at the end of a batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub requests: usize,
    pub errors: usize,
}

/// Dispatch one validated request
pub fn handle_request(engine: &Engine, request: Request) -> Response {
    match request {
        Request::Ping => Response::ok_string("pong"),

        Request::Version => Response::ok_string(env!("CARGO_PKG_VERSION")),

        Request::Decode { vin, normalize } => {
            let vin = if normalize { normalize_vin(&vin) } else { vin };
            match engine.decoder().decode(&vin) {
                Ok(decoded) => {
                    log_event("decode", json!({ "vin": vin, "ok": true }));
                    Response::Ok(ResponseData::decoded(decoded_to_wire(&vin, &decoded)))
                }
                Err(e) => {
                    log_event("decode", json!({ "vin": vin, "ok": false, "error": e.to_string() }));
                    Response::error(e.to_string())
                }
            }
        }

        Request::LookupWmi { wmi } => {
            let key = wmi.to_ascii_uppercase();
            match engine.registry().lookup(&key) {
                Some(entry) => Response::Ok(ResponseData::wmi(wmi_to_wire(&key, entry))),
                None => Response::error(format!("WMI not registered: {}", key)),
            }
        }

        Request::Match { vehicle, candidates, min_score } => {
            let vehicle = vehicle_from_wire(vehicle);
            let candidates = parts_from_wire(candidates);
            let results = engine.rank(&vehicle, &candidates, min_score);
            log_match(&vehicle, candidates.len(), &results);
            Response::Ok(ResponseData::fitments(results.iter().map(fitment_to_wire).collect()))
        }

        Request::DecodeAndMatch { vin, model, engine_type, trim, candidates, min_score } => {
            let decoded = match engine.decoder().decode(&vin) {
                Ok(decoded) => decoded,
                Err(e) => return Response::error(e.to_string()),
            };
            let mut vehicle = VehicleDescriptor::from_decoded_with(engine.registry(), &decoded, model);
            vehicle.engine_type = engine_type;
            vehicle.trim = trim;

            let candidates = parts_from_wire(candidates);
            let results = engine.rank(&vehicle, &candidates, min_score);
            log_match(&vehicle, candidates.len(), &results);
            Response::Ok(ResponseData::decoded_match(
                decoded_to_wire(&vin, &decoded),
                vehicle_to_wire(&vehicle),
                results.iter().map(fitment_to_wire).collect(),
            ))
        }
    }
}

fn log_match(vehicle: &VehicleDescriptor, candidates: usize, results: &[vf_core::FitmentResult]) {
    log_event(
        "match",
        json!({
            "make": vehicle.make,
            "model": vehicle.model,
            "year": vehicle.year,
            "candidates": candidates,
            "matched": results.iter().filter(|r| r.is_match()).count(),
            "top_score": results.first().map(|r| r.score),
        }),
    );
}

/// Parse, validate and answer one input line
pub fn process_line(engine: &Engine, line: &str) -> ResponseEnvelope {
    if line.len() > MAX_MESSAGE_SIZE {
        let err = VinfitError::MessageTooLarge {
            size: line.len(),
            max_size: MAX_MESSAGE_SIZE,
        };
        warn!("{}", err);
        return ResponseEnvelope::new(0, Response::error(err.to_string()));
    }

    let envelope: RequestEnvelope = match serde_json::from_str(line.trim()) {
        Ok(e) => e,
        Err(e) => {
            debug!("Invalid request line: {}", e);
            return ResponseEnvelope::new(
                0,
                Response::error(VinfitError::invalid_request(format!("invalid JSON: {}", e)).to_string()),
            );
        }
    };

    let request_id = envelope.id;
    let request = envelope.request;

    if let Err(e) = request.validate() {
        debug!("Request {} (id={}) rejected: {}", request.type_name(), request_id, e);
        return ResponseEnvelope::new(
            request_id,
            Response::error(VinfitError::invalid_request(e).to_string()),
        );
    }

    debug!("Processing {} (id={})", request.type_name(), request_id);
    ResponseEnvelope::new(request_id, handle_request(engine, request))
}

/// Answer every non-blank line of `input` on `output`
pub fn run_batch<R: BufRead, W: Write>(engine: &Engine, input: R, mut output: W) -> Result<BatchStats> {
    let mut stats = BatchStats::default();

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = process_line(engine, &line);
        stats.requests += 1;
        if !response.response.is_ok() {
            stats.errors += 1;
        }

        serde_json::to_writer(&mut output, &response)?;
        output.write_all(b"\n")?;
    }
    output.flush()?;

    log_event(
        "batch",
        json!({ "requests": stats.requests, "errors": stats.errors }),
    );
    debug!(requests = stats.requests, errors = stats.errors, "Batch finished");
    Ok(stats)
}
