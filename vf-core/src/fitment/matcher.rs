//! Fitment Matching Engine
//!
//! Scores every compatibility rule of a part against a vehicle and keeps the
//! best one. Make is a hard gate; model, year, engine and trim then add or
//! remove points in decreasing order of importance. Every decision leaves a
//! line in the reason trail so staff can see why a part was ranked where it
//! was.

use tracing::{debug, trace};

use super::weights::ScoringWeights;
use crate::constants::scoring;
use crate::data::{CompatibilityRule, FitmentResult, PartCandidate, VehicleDescriptor};

// ============================================================================
// Rule Scores
// ============================================================================

/// Score of one rule against one vehicle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleScore {
    /// Final score, clamped to 0-100
    pub score: u8,
    /// Make or model ruled the part out
    pub disqualified: bool,
    /// Model, year and engine all matched exactly
    pub exact: bool,
    pub reasons: Vec<String>,
}

impl RuleScore {
    fn disqualified(reasons: Vec<String>) -> Self {
        Self {
            score: 0,
            disqualified: true,
            exact: false,
            reasons,
        }
    }
}

/// Where a year sits relative to a rule's range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum YearFit {
    InRange,
    /// Outside the range by this many years, within tolerance
    Near(u16),
    Outside,
}

// ============================================================================
// Matcher
// ============================================================================

/// Rule-and-score matcher over explicit inputs
#[derive(Debug, Clone, Default)]
pub struct FitmentMatcher {
    weights: ScoringWeights,
}

impl FitmentMatcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score a single rule
    pub fn score_rule(&self, vehicle: &VehicleDescriptor, rule: &CompatibilityRule) -> RuleScore {
        let w = &self.weights;
        let mut reasons = Vec::new();

        // Make gates everything else
        if !same_attribute(&rule.make, &vehicle.make) {
            reasons.push(format!(
                "make mismatch: part fits {}, vehicle is {}",
                rule.make.trim(),
                vehicle.make.trim()
            ));
            return RuleScore::disqualified(reasons);
        }
        reasons.push(format!("make matched: {}", vehicle.make.trim()));

        let mut score = i32::from(w.base);
        let mut exact = true;

        // Model
        if is_wildcard(&rule.model) {
            score += i32::from(w.model_any);
            exact = false;
            reasons.push(format!("model: any {} model", vehicle.make.trim()));
        } else if same_attribute(&rule.model, &vehicle.model) {
            score += i32::from(w.model_exact);
            reasons.push(format!("model matched: {}", vehicle.model.trim()));
        } else {
            reasons.push(format!(
                "model mismatch: part fits {}, vehicle is {}",
                rule.model.trim(),
                vehicle.model.trim()
            ));
            return RuleScore::disqualified(reasons);
        }

        // Year
        let range = describe_years(rule.year_from, rule.year_to);
        match year_fit(vehicle.year, rule.year_from, rule.year_to, w.year_tolerance) {
            YearFit::InRange => {
                score += i32::from(w.year_in_range);
                reasons.push(format!("year {} within {}", vehicle.year, range));
            }
            YearFit::Near(distance) => {
                score += i32::from(w.year_near_range);
                exact = false;
                reasons.push(format!(
                    "year {} is {} year{} outside {} (within tolerance)",
                    vehicle.year,
                    distance,
                    if distance == 1 { "" } else { "s" },
                    range
                ));
            }
            YearFit::Outside => {
                exact = false;
                reasons.push(format!("year out of range: {} not in {}", vehicle.year, range));
            }
        }

        // Engine
        match (specific(&rule.engine_type), specific(&vehicle.engine_type)) {
            (None, _) => {
                score += i32::from(w.engine_any);
                exact = false;
                reasons.push("engine: any".to_string());
            }
            (Some(wanted), None) => {
                score += i32::from(w.engine_any);
                exact = false;
                reasons.push(format!("engine unknown for vehicle, part lists {}", wanted));
            }
            (Some(wanted), Some(actual)) if same_attribute(wanted, actual) => {
                score += i32::from(w.engine_exact);
                reasons.push(format!("engine matched: {}", actual));
            }
            (Some(wanted), Some(actual)) => {
                score -= i32::from(w.engine_mismatch_penalty);
                exact = false;
                reasons.push(format!(
                    "engine mismatch: part fits {}, vehicle has {}",
                    wanted, actual
                ));
            }
        }

        // Trim only adds reasons; a differing trim scores like an absent one
        match (specific(&rule.trim), specific(&vehicle.trim)) {
            (None, _) => {}
            (Some(wanted), None) => {
                reasons.push(format!("trim unknown for vehicle, part lists {}", wanted));
            }
            (Some(wanted), Some(actual)) if same_attribute(wanted, actual) => {
                reasons.push(format!("trim matched: {}", actual));
            }
            (Some(wanted), Some(actual)) => {
                reasons.push(format!("trim differs: part lists {}, vehicle is {}", wanted, actual));
            }
        }

        if exact {
            score = score.max(i32::from(scoring::MAX_SCORE));
        }

        let score = score.clamp(0, i32::from(scoring::MAX_SCORE)) as u8;
        RuleScore {
            score,
            disqualified: false,
            exact,
            reasons,
        }
    }

    /// Best-scoring rule of one part. The first rule wins ties.
    pub fn match_part(&self, vehicle: &VehicleDescriptor, candidate: &PartCandidate) -> FitmentResult {
        if candidate.rules.is_empty() {
            return FitmentResult {
                part_id: candidate.part_id.clone(),
                score: 0,
                matched_rule: None,
                reasons: vec!["no compatibility rules".to_string()],
            };
        }

        let mut scored = Vec::with_capacity(candidate.rules.len());
        let mut best: Option<usize> = None;
        for (idx, rule) in candidate.rules.iter().enumerate() {
            let rule_score = self.score_rule(vehicle, rule);
            trace!(
                part = %candidate.part_id,
                rule = idx + 1,
                score = rule_score.score,
                "Rule scored"
            );
            let better = match best {
                Some(b) => rule_score.score > scored_score(&scored, b),
                None => true,
            };
            if better {
                best = Some(idx);
            }
            scored.push(rule_score);
        }

        match best {
            Some(idx) if scored[idx].score > 0 => FitmentResult {
                part_id: candidate.part_id.clone(),
                score: scored[idx].score,
                matched_rule: Some(candidate.rules[idx].clone()),
                reasons: std::mem::take(&mut scored[idx].reasons),
            },
            _ => {
                let multi = scored.len() > 1;
                let reasons = scored
                    .into_iter()
                    .enumerate()
                    .flat_map(|(idx, rs)| {
                        rs.reasons.into_iter().map(move |r| {
                            if multi {
                                format!("rule {}: {}", idx + 1, r)
                            } else {
                                r
                            }
                        })
                    })
                    .collect();
                FitmentResult {
                    part_id: candidate.part_id.clone(),
                    score: 0,
                    matched_rule: None,
                    reasons,
                }
            }
        }
    }

    /// One result per candidate, best score first, part id ascending on ties
    pub fn match_parts(
        &self,
        vehicle: &VehicleDescriptor,
        candidates: &[PartCandidate],
    ) -> Vec<FitmentResult> {
        let mut results: Vec<FitmentResult> = candidates
            .iter()
            .map(|c| self.match_part(vehicle, c))
            .collect();
        rank(&mut results);

        debug!(
            make = %vehicle.make,
            model = %vehicle.model,
            year = vehicle.year,
            candidates = candidates.len(),
            matched = results.iter().filter(|r| r.score > 0).count(),
            "Fitment ranked"
        );
        results
    }

    /// Ranked results scoring at least `min_score`
    pub fn match_parts_above(
        &self,
        vehicle: &VehicleDescriptor,
        candidates: &[PartCandidate],
        min_score: u8,
    ) -> Vec<FitmentResult> {
        let mut results = self.match_parts(vehicle, candidates);
        results.retain(|r| r.score >= min_score);
        results
    }
}

/// Rank with the default weights
pub fn match_parts(vehicle: &VehicleDescriptor, candidates: &[PartCandidate]) -> Vec<FitmentResult> {
    FitmentMatcher::default().match_parts(vehicle, candidates)
}

/// Sort by score descending, then part id ascending
pub fn rank(results: &mut [FitmentResult]) {
    results.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.part_id.cmp(&b.part_id)));
}

// ============================================================================
// Helper Functions
// ============================================================================

fn scored_score(scored: &[RuleScore], idx: usize) -> u8 {
    scored.get(idx).map(|s| s.score).unwrap_or(0)
}

/// Case-insensitive comparison ignoring surrounding whitespace
fn same_attribute(a: &str, b: &str) -> bool {
    a.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .eq(b.trim().chars().flat_map(char::to_lowercase))
}

fn is_wildcard(value: &str) -> bool {
    value.trim() == scoring::WILDCARD
}

/// The attribute if it names something specific (present, non-empty, not `*`)
fn specific(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != scoring::WILDCARD)
}

fn year_fit(year: u16, from: Option<u16>, to: Option<u16>, tolerance: u16) -> YearFit {
    // inverted bounds are read as the span between them
    let (lo, hi) = match (from, to) {
        (Some(a), Some(b)) if a > b => (Some(b), Some(a)),
        bounds => bounds,
    };

    let below = lo.map(|lo| lo.saturating_sub(year)).unwrap_or(0);
    let above = hi.map(|hi| year.saturating_sub(hi)).unwrap_or(0);
    let distance = below.max(above);

    if distance == 0 {
        YearFit::InRange
    } else if distance <= tolerance {
        YearFit::Near(distance)
    } else {
        YearFit::Outside
    }
}

fn describe_years(from: Option<u16>, to: Option<u16>) -> String {
    match (from, to) {
        (Some(a), Some(b)) if a == b => format!("{}", a),
        (Some(a), Some(b)) => format!("{}-{}", a.min(b), a.max(b)),
        (Some(a), None) => format!("{} onward", a),
        (None, Some(b)) => format!("up to {}", b),
        (None, None) => "any year".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn civic() -> VehicleDescriptor {
        VehicleDescriptor::new("Honda", "Civic", 2021).with_engine_type("1.5T")
    }

    fn civic_rule() -> CompatibilityRule {
        CompatibilityRule::new("Honda", "Civic")
            .years(Some(2019), Some(2021))
            .with_engine_type("1.5T")
    }

    #[test]
    fn test_exact_match_scores_100() {
        let results = match_parts(&civic(), &[PartCandidate::new("P1", vec![civic_rule()])]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 100);
        assert_eq!(results[0].matched_rule, Some(civic_rule()));
    }

    #[test]
    fn test_engine_mismatch_penalized() {
        let rule = civic_rule().with_engine_type("2.0");
        let rs = FitmentMatcher::default().score_rule(&civic(), &rule);
        assert_eq!(rs.score, 80);
        assert!(!rs.exact);
        assert!(rs.reasons.iter().any(|r| r.contains("engine mismatch")));
    }

    #[test]
    fn test_make_mismatch_always_zero() {
        let rule = CompatibilityRule::new("Toyota", "*");
        let rs = FitmentMatcher::default().score_rule(&civic(), &rule);
        assert_eq!(rs.score, 0);
        assert!(rs.disqualified);
        assert_eq!(rs.reasons.len(), 1);
    }

    #[test]
    fn test_make_case_insensitive() {
        let rule = CompatibilityRule::new("HONDA", "civic").years(Some(2021), Some(2021));
        let rs = FitmentMatcher::default().score_rule(&civic(), &rule);
        // 40 + 30 + 20 + 5 (engine any)
        assert_eq!(rs.score, 95);
    }

    #[test]
    fn test_model_wildcard_and_mismatch() {
        let any = CompatibilityRule::new("Honda", "*").years(Some(2019), Some(2022));
        assert_eq!(FitmentMatcher::default().score_rule(&civic(), &any).score, 75);

        let other = CompatibilityRule::new("Honda", "Accord");
        let rs = FitmentMatcher::default().score_rule(&civic(), &other);
        assert_eq!(rs.score, 0);
        assert!(rs.reasons.last().unwrap().contains("model mismatch"));
    }

    #[test]
    fn test_year_tolerance() {
        let m = FitmentMatcher::default();
        let rule = civic_rule().years(Some(2016), Some(2020));
        // 40 + 30 + 10 + 10
        assert_eq!(m.score_rule(&civic(), &rule).score, 90);

        let rule = civic_rule().years(Some(2016), Some(2019));
        let rs = m.score_rule(&civic(), &rule);
        // 40 + 30 + 0 + 10
        assert_eq!(rs.score, 80);
        assert!(rs.reasons.iter().any(|r| r.starts_with("year out of range")));
    }

    #[test]
    fn test_open_ended_years() {
        let m = FitmentMatcher::default();
        assert_eq!(m.score_rule(&civic(), &civic_rule().years(Some(2019), None)).score, 100);
        assert_eq!(m.score_rule(&civic(), &civic_rule().years(None, Some(2022))).score, 100);
        assert_eq!(m.score_rule(&civic(), &civic_rule().years(None, None)).score, 100);
    }

    #[test]
    fn test_inverted_years_treated_as_span() {
        let rule = civic_rule().years(Some(2022), Some(2019));
        assert_eq!(FitmentMatcher::default().score_rule(&civic(), &rule).score, 100);
    }

    #[test]
    fn test_trim_never_disqualifies() {
        let rule = civic_rule().with_trim("Sport");
        let vehicle = civic().with_trim("Touring");
        let rs = FitmentMatcher::default().score_rule(&vehicle, &rule);
        assert_eq!(rs.score, 100);
        assert!(rs.reasons.iter().any(|r| r.starts_with("trim differs")));
    }

    #[test]
    fn test_trim_fills_headroom_with_custom_weights() {
        let weights = ScoringWeights {
            base: 30,
            ..ScoringWeights::default()
        };
        let m = FitmentMatcher::new(weights);
        let vehicle = civic().with_trim("Sport");

        assert_eq!(m.score_rule(&vehicle, &civic_rule().with_trim("sport")).score, 100);
        assert_eq!(m.score_rule(&vehicle, &civic_rule()).score, 100);
        assert_eq!(m.score_rule(&vehicle, &civic_rule().with_trim("Touring")).score, 100);
    }

    #[test]
    fn test_trim_mismatch_scores_like_absent_trim() {
        let weights = ScoringWeights {
            base: 30,
            ..ScoringWeights::default()
        };
        let m = FitmentMatcher::new(weights);
        let vehicle = civic().with_engine_type("Hybrid").with_trim("Sport");

        let absent = m.score_rule(&vehicle, &civic_rule());
        let differs = m.score_rule(&vehicle, &civic_rule().with_trim("Touring"));
        assert_eq!(differs.score, absent.score);
        assert!(differs.reasons.iter().any(|r| r.starts_with("trim differs")));
    }

    #[test]
    fn test_score_floored_at_zero() {
        let weights = ScoringWeights {
            base: 5,
            model_any: 0,
            engine_mismatch_penalty: 50,
            ..ScoringWeights::default()
        };
        let rule = CompatibilityRule::new("Honda", "*")
            .years(Some(1990), Some(1995))
            .with_engine_type("V6");
        let rs = FitmentMatcher::new(weights).score_rule(&civic(), &rule);
        assert_eq!(rs.score, 0);
        assert!(!rs.disqualified);
    }

    #[test]
    fn test_best_rule_wins() {
        let candidate = PartCandidate::new(
            "P1",
            vec![
                CompatibilityRule::new("Honda", "*"),
                civic_rule(),
                CompatibilityRule::new("Toyota", "Corolla"),
            ],
        );
        let result = FitmentMatcher::default().match_part(&civic(), &candidate);
        assert_eq!(result.score, 100);
        assert_eq!(result.matched_rule, Some(civic_rule()));
    }

    #[test]
    fn test_no_rules() {
        let result = FitmentMatcher::default().match_part(&civic(), &PartCandidate::new("P9", vec![]));
        assert_eq!(result.score, 0);
        assert!(result.matched_rule.is_none());
        assert_eq!(result.reasons, vec!["no compatibility rules".to_string()]);
    }

    #[test]
    fn test_all_disqualified_reports_each_rule() {
        let candidate = PartCandidate::new(
            "P2",
            vec![
                CompatibilityRule::new("Toyota", "Corolla"),
                CompatibilityRule::new("Honda", "Accord"),
            ],
        );
        let result = FitmentMatcher::default().match_part(&civic(), &candidate);
        assert_eq!(result.score, 0);
        assert!(result.matched_rule.is_none());
        assert!(result.reasons[0].starts_with("rule 1: make mismatch"));
        assert!(result.reasons.iter().any(|r| r.starts_with("rule 2: model mismatch")));
    }

    #[test]
    fn test_ranking_order() {
        let candidates = vec![
            PartCandidate::new("B", vec![civic_rule()]),
            PartCandidate::new("Z", vec![CompatibilityRule::new("Toyota", "*")]),
            PartCandidate::new("A", vec![civic_rule()]),
            PartCandidate::new("C", vec![civic_rule().with_engine_type("2.0")]),
        ];
        let results = match_parts(&civic(), &candidates);
        let order: Vec<(&str, u8)> = results.iter().map(|r| (r.part_id.as_str(), r.score)).collect();
        assert_eq!(order, vec![("A", 100), ("B", 100), ("C", 80), ("Z", 0)]);
    }

    #[test]
    fn test_match_parts_above() {
        let candidates = vec![
            PartCandidate::new("A", vec![civic_rule()]),
            PartCandidate::new("C", vec![civic_rule().with_engine_type("2.0")]),
            PartCandidate::new("Z", vec![CompatibilityRule::new("Toyota", "*")]),
        ];
        let results = FitmentMatcher::default().match_parts_above(&civic(), &candidates, 90);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].part_id, "A");
    }

    #[test]
    fn test_describe_years() {
        assert_eq!(describe_years(Some(2019), Some(2021)), "2019-2021");
        assert_eq!(describe_years(Some(2020), Some(2020)), "2020");
        assert_eq!(describe_years(Some(2019), None), "2019 onward");
        assert_eq!(describe_years(None, Some(2021)), "up to 2021");
        assert_eq!(describe_years(None, None), "any year");
    }
}
