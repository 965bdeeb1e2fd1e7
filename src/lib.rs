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

//! vinfit - VIN decoder and parts fitment matcher
//!
//! This library holds the command-line front end: argument parsing, the
//! JSON-lines batch handler, catalog file loading and the event log. The
//! decoding and matching engine lives in `vf-core`.

pub mod catalog;
pub mod cli;
pub mod convert;
pub mod handlers;
pub mod logger;
