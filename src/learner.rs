//! Continuous Learner — online smoothing of decoded weights into a stable
//! cross-session profile.
//!
//! One decoded session is a noisy observation; the stable profile is an
//! exponential moving average over all of them. The learner also screens the
//! persisted evolution history for drift, scores profile confidence, and
//! names the archetype the current weights imply.
//!
//! # Invariants
//!
//! - **PC-006**: `update_weights` is idempotent on equal input and the result
//!   for every trait lies between the old and new value inclusive.
//! - **PC-001**: all published weights stay within [0.0, 1.0].

use serde::{Deserialize, Serialize};

use crate::history::PersonalitySnapshot;
use crate::report::Analysis;
use crate::weights::{round2, round3, PerTrait, TraitWeights};

/// Default EMA learning rate: recent sessions move the profile by 30%.
pub const DEFAULT_LEARNING_RATE: f64 = 0.3;

// ─── Drift report ───────────────────────────────────────────────────────────

/// Direction of a trait's drift between the first and last snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftDirection {
    /// Delta above +0.05.
    Increasing,
    /// Delta below −0.05.
    Decreasing,
    /// Delta within ±0.05.
    Stable,
}

/// Magnitude band of a trait's drift.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftMagnitude {
    /// |delta| above 0.15.
    Significant,
    /// |delta| above 0.08.
    Moderate,
    /// Everything smaller.
    Minor,
}

/// Drift of one trait between the first and last snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraitDrift {
    /// Weight in the first snapshot.
    pub initial: f64,
    /// Weight in the last snapshot.
    pub current: f64,
    /// `current - initial`, rounded to 3 decimals.
    pub delta: f64,
    /// Direction band for the delta.
    pub direction: DriftDirection,
    /// Magnitude band for the delta.
    pub magnitude: DriftMagnitude,
}

/// Drift analysis over the full evolution history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    /// Number of snapshots the analysis covered.
    pub session_count: usize,
    /// Per-trait drift records.
    pub traits: PerTrait<TraitDrift>,
}

// ─── Updated profile ────────────────────────────────────────────────────────

/// The learner's per-session output: smoothed weights plus derived labels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdatedProfile {
    /// Stable weights after the EMA update.
    pub weights: TraitWeights,
    /// Archetype label for the updated weights.
    pub archetype: String,
    /// Profile confidence [0.0, 1.0].
    pub confidence: f64,
}

// ─── ContinuousLearner ──────────────────────────────────────────────────────

/// Online profile learner with a fixed EMA learning rate.
///
/// Stateless with respect to process memory — all state travels as explicit
/// weight and history parameters.
#[derive(Clone, Copy, Debug)]
pub struct ContinuousLearner {
    /// EMA alpha [0.0, 1.0]: higher adapts faster, lower stays stabler.
    learning_rate: f64,
}

impl ContinuousLearner {
    /// Construct with an explicit learning rate, clamped to [0.0, 1.0].
    pub fn new(learning_rate: f64) -> Self {
        Self {
            learning_rate: learning_rate.clamp(0.0, 1.0),
        }
    }

    /// The configured EMA alpha.
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Blend a new decoded observation into the stable profile.
    ///
    /// Per trait: `updated = alpha * new + (1 - alpha) * old`, rounded to 2
    /// decimals. Idempotent when `new == old`; the result always lies between
    /// the two inputs inclusive (PC-006).
    pub fn update_weights(&self, current: &TraitWeights, new: &TraitWeights) -> TraitWeights {
        let alpha = self.learning_rate;
        TraitWeights {
            logic: round2(alpha * new.logic + (1.0 - alpha) * current.logic),
            intuition: round2(alpha * new.intuition + (1.0 - alpha) * current.intuition),
            fluidity: round2(alpha * new.fluidity + (1.0 - alpha) * current.fluidity),
            complexity: round2(alpha * new.complexity + (1.0 - alpha) * current.complexity),
        }
        .clamped()
    }

    /// Detect long-horizon weight drift across the evolution history.
    ///
    /// Compares the first and last snapshot only — drift here means "how far
    /// has this profile come", not a rolling-window signal. Needs at least 2
    /// snapshots.
    pub fn calculate_drift(&self, history: &[PersonalitySnapshot]) -> Analysis<DriftReport> {
        if history.len() < 2 {
            return Analysis::InsufficientData {
                sessions_needed: 2 - history.len(),
            };
        }

        let first = &history[0].weights;
        let last = &history[history.len() - 1].weights;

        let traits = PerTrait::from_fn(|t| trait_drift(first.get(t), last.get(t)));
        Analysis::Analyzed(DriftReport {
            session_count: history.len(),
            traits,
        })
    }

    /// Profile confidence from session volume and weight stability.
    ///
    /// `0.4 * min(session_count / 10, 1) + 0.6 * weight_stability`, rounded
    /// to 2 decimals. The session factor saturates at 10 sessions; the
    /// stability signal is caller-supplied in [0.0, 1.0] and clamped.
    pub fn compute_confidence(&self, session_count: usize, weight_stability: f64) -> f64 {
        let session_factor = (session_count as f64 / 10.0).min(1.0);
        let stability_factor = weight_stability.clamp(0.0, 1.0);
        round2(0.4 * session_factor + 0.6 * stability_factor)
    }

    /// Human-readable archetype for a weight vector.
    ///
    /// Primary label from the Logic/Intuition margin (±0.2), secondary from
    /// whichever of Fluidity/Complexity clears 0.6 first.
    pub fn generate_archetype(&self, weights: &TraitWeights) -> String {
        let primary = if weights.logic > weights.intuition + 0.2 {
            "Analytical"
        } else if weights.intuition > weights.logic + 0.2 {
            "Intuitive"
        } else {
            "Balanced"
        };

        let secondary = if weights.fluidity > 0.6 {
            "& Adaptive"
        } else if weights.complexity > 0.6 {
            "& Complex"
        } else {
            "& Steady"
        };

        format!("{} {}", primary, secondary)
    }

    /// Full per-session learning step: EMA update plus archetype and
    /// confidence for the updated weights.
    pub fn update_profile(
        &self,
        current: &TraitWeights,
        new: &TraitWeights,
        session_count: usize,
        weight_stability: f64,
    ) -> UpdatedProfile {
        let weights = self.update_weights(current, new);
        UpdatedProfile {
            archetype: self.generate_archetype(&weights),
            confidence: self.compute_confidence(session_count, weight_stability),
            weights,
        }
    }
}

impl Default for ContinuousLearner {
    fn default() -> Self {
        Self::new(DEFAULT_LEARNING_RATE)
    }
}

fn trait_drift(initial: f64, current: f64) -> TraitDrift {
    let delta = current - initial;
    let direction = if delta > 0.05 {
        DriftDirection::Increasing
    } else if delta < -0.05 {
        DriftDirection::Decreasing
    } else {
        DriftDirection::Stable
    };
    let magnitude = if delta.abs() > 0.15 {
        DriftMagnitude::Significant
    } else if delta.abs() > 0.08 {
        DriftMagnitude::Moderate
    } else {
        DriftMagnitude::Minor
    };
    TraitDrift {
        initial,
        current,
        delta: round3(delta),
        direction,
        magnitude,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weights::Trait;
    use chrono::{TimeZone, Utc};

    fn snapshot(logic: f64) -> PersonalitySnapshot {
        PersonalitySnapshot::new(
            Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            TraitWeights::new(logic, 1.0 - logic, 0.5, 0.5),
            "Balanced & Steady",
            0.5,
            1,
        )
    }

    // ── EMA update ────────────────────────────────────────────────────────

    #[test]
    fn test_update_weights_ema_blend() {
        let learner = ContinuousLearner::default();
        let old = TraitWeights::new(0.4, 0.6, 0.5, 0.5);
        let new = TraitWeights::new(0.8, 0.2, 0.5, 0.9);
        let updated = learner.update_weights(&old, &new);
        // 0.3 * 0.8 + 0.7 * 0.4 = 0.52
        assert_eq!(updated.logic, 0.52);
        assert_eq!(updated.intuition, 0.48);
        assert_eq!(updated.fluidity, 0.5);
        assert_eq!(updated.complexity, 0.62);
    }

    #[test]
    fn test_update_weights_idempotent_on_equal_input() {
        // PC-006, for several alphas
        let w = TraitWeights::new(0.57, 0.43, 0.62, 0.31);
        for alpha in [0.0, 0.1, 0.3, 0.5, 0.9, 1.0] {
            let learner = ContinuousLearner::new(alpha);
            assert_eq!(learner.update_weights(&w, &w), w, "alpha={}", alpha);
        }
    }

    #[test]
    fn test_update_weights_monotone_interpolation() {
        // PC-006: every trait lands between old and new inclusive
        let old = TraitWeights::new(0.2, 0.8, 0.1, 0.9);
        let new = TraitWeights::new(0.9, 0.1, 0.7, 0.3);
        for alpha in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let updated = ContinuousLearner::new(alpha).update_weights(&old, &new);
            for t in Trait::ALL {
                let (lo, hi) = if old.get(t) <= new.get(t) {
                    (old.get(t), new.get(t))
                } else {
                    (new.get(t), old.get(t))
                };
                assert!(
                    (lo..=hi).contains(&updated.get(t)),
                    "alpha={} trait={} value={} outside [{}, {}]",
                    alpha,
                    t,
                    updated.get(t),
                    lo,
                    hi
                );
            }
        }
    }

    #[test]
    fn test_alpha_extremes() {
        let old = TraitWeights::new(0.2, 0.8, 0.5, 0.5);
        let new = TraitWeights::new(0.6, 0.4, 0.5, 0.5);
        // alpha 0: history only; alpha 1: newest session only
        assert_eq!(ContinuousLearner::new(0.0).update_weights(&old, &new), old);
        assert_eq!(ContinuousLearner::new(1.0).update_weights(&old, &new), new);
    }

    // ── Drift ─────────────────────────────────────────────────────────────

    #[test]
    fn test_drift_insufficient_data() {
        let learner = ContinuousLearner::default();
        assert_eq!(
            learner.calculate_drift(&[]).sessions_needed(),
            Some(2)
        );
        assert_eq!(
            learner.calculate_drift(&[snapshot(0.5)]).sessions_needed(),
            Some(1)
        );
    }

    #[test]
    fn test_drift_first_versus_last_only() {
        // 0.4 → 0.4 → 0.6: delta 0.2, increasing, significant
        let history = vec![snapshot(0.4), snapshot(0.4), snapshot(0.6)];
        let report = ContinuousLearner::default()
            .calculate_drift(&history)
            .into_analyzed()
            .unwrap();
        assert_eq!(report.session_count, 3);
        let logic = report.traits.get(Trait::Logic);
        assert_eq!(logic.delta, 0.2);
        assert_eq!(logic.direction, DriftDirection::Increasing);
        assert_eq!(logic.magnitude, DriftMagnitude::Significant);
        // Intuition mirrors downward
        assert_eq!(
            report.traits.get(Trait::Intuition).direction,
            DriftDirection::Decreasing
        );
    }

    #[test]
    fn test_drift_bands() {
        let cases = [
            (0.03, DriftDirection::Stable, DriftMagnitude::Minor),
            (0.06, DriftDirection::Increasing, DriftMagnitude::Minor),
            (0.10, DriftDirection::Increasing, DriftMagnitude::Moderate),
            (0.20, DriftDirection::Increasing, DriftMagnitude::Significant),
            (-0.10, DriftDirection::Decreasing, DriftMagnitude::Moderate),
        ];
        for (delta, direction, magnitude) in cases {
            let d = trait_drift(0.5, 0.5 + delta);
            assert_eq!(d.direction, direction, "delta={}", delta);
            assert_eq!(d.magnitude, magnitude, "delta={}", delta);
        }
    }

    // ── Confidence ────────────────────────────────────────────────────────

    #[test]
    fn test_confidence_formula() {
        let learner = ContinuousLearner::default();
        // 0.4 * 0.5 + 0.6 * 0.7 = 0.62
        assert_eq!(learner.compute_confidence(5, 0.7), 0.62);
        assert_eq!(learner.compute_confidence(0, 0.0), 0.0);
        assert_eq!(learner.compute_confidence(10, 1.0), 1.0);
    }

    #[test]
    fn test_confidence_saturates_at_ten_sessions() {
        let learner = ContinuousLearner::default();
        assert_eq!(
            learner.compute_confidence(10, 0.5),
            learner.compute_confidence(500, 0.5)
        );
    }

    // ── Archetype ─────────────────────────────────────────────────────────

    #[test]
    fn test_archetype_primary_labels() {
        let learner = ContinuousLearner::default();
        let analytical = TraitWeights::new(0.8, 0.2, 0.5, 0.5);
        assert!(learner.generate_archetype(&analytical).starts_with("Analytical"));

        let intuitive = TraitWeights::new(0.2, 0.8, 0.5, 0.5);
        assert!(learner.generate_archetype(&intuitive).starts_with("Intuitive"));

        // Margin of exactly 0.2 stays balanced
        let edge = TraitWeights::new(0.6, 0.4, 0.5, 0.5);
        assert!(learner.generate_archetype(&edge).starts_with("Balanced"));
    }

    #[test]
    fn test_archetype_secondary_labels() {
        let learner = ContinuousLearner::default();
        assert_eq!(
            learner.generate_archetype(&TraitWeights::new(0.5, 0.5, 0.7, 0.9)),
            "Balanced & Adaptive" // fluidity wins over complexity
        );
        assert_eq!(
            learner.generate_archetype(&TraitWeights::new(0.5, 0.5, 0.4, 0.7)),
            "Balanced & Complex"
        );
        assert_eq!(
            learner.generate_archetype(&TraitWeights::new(0.5, 0.5, 0.4, 0.4)),
            "Balanced & Steady"
        );
    }

    // ── Full step ─────────────────────────────────────────────────────────

    #[test]
    fn test_update_profile_assembles_labels() {
        let learner = ContinuousLearner::default();
        let old = TraitWeights::neutral();
        let new = TraitWeights::new(1.0, 0.0, 0.9, 0.5);
        let profile = learner.update_profile(&old, &new, 8, 0.7);
        assert_eq!(profile.weights, learner.update_weights(&old, &new));
        assert_eq!(
            profile.archetype,
            learner.generate_archetype(&profile.weights)
        );
        assert_eq!(profile.confidence, learner.compute_confidence(8, 0.7));
        assert!(profile.weights.in_range());
    }
}
