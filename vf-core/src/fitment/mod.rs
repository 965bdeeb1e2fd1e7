//! Parts fitment matching
//!
//! Deterministic rule-and-score matching of parts to vehicles. Given a
//! `VehicleDescriptor` and each part's `CompatibilityRule`s, produces one
//! `FitmentResult` per part, ranked by score.
//!
//! # Scoring (default weights)
//!
//! | Criterion | Exact | Partial | Miss |
//! |---|---|---|---|
//! | make | 40 | - | rule scores 0 |
//! | model | +30 | `*`: +10 | rule scores 0 |
//! | year | +20 | within 1 year: +10 | +0 |
//! | engine | +10 | `*`/unknown: +5 | -10 |
//! | trim | neutral | neutral | neutral |
//!
//! A rule with exact model, year and engine fills to 100 whatever its trim.

mod matcher;
mod weights;

pub use matcher::{match_parts, rank, FitmentMatcher, RuleScore};
pub use weights::ScoringWeights;
