//! Behavioral-Personality Decoder — one noisy sample in, calibrated trait
//! weights and evidence out.
//!
//! Pure function over its inputs: the decode pipeline is
//!
//! ```text
//! BehavioralSample ─→ base weights ─→ cultural modifiers ─→ maturity
//!     calibration ─→ synthetic (theta, beta) + sync score + archetype
//! ```
//!
//! # Invariants
//!
//! - **PC-001**: every published weight stays within [0.0, 1.0].
//! - **PC-005**: the decoder never fails for malformed-but-typed input —
//!   missing fields resolve to neutral defaults, unknown culture keys
//!   resolve to identity modifiers.

use serde::{Deserialize, Serialize};

use crate::culture::CulturalTable;
use crate::sample::{AestheticChoice, BehavioralSample, MaturityLevel};
use crate::weights::{round2, TraitWeights};

// ─── Evidence ───────────────────────────────────────────────────────────────

/// The dominant reasoning cue observed in a session, for auditability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningCue {
    /// More than 2 revisions: the user reworks decisions.
    HighRevisionRate,
    /// Latency under 1500 ms: the user decides on instinct.
    RapidDecisionFlow,
    /// Neither extreme dominates.
    BalancedDeliberation,
}

impl ReasoningCue {
    fn classify(latency_ms: f64, revisions: u32) -> Self {
        if revisions > 2 {
            ReasoningCue::HighRevisionRate
        } else if latency_ms < 1500.0 {
            ReasoningCue::RapidDecisionFlow
        } else {
            ReasoningCue::BalancedDeliberation
        }
    }

    /// Human-readable cue description.
    pub fn description(&self) -> &'static str {
        match self {
            ReasoningCue::HighRevisionRate => "High revision rate",
            ReasoningCue::RapidDecisionFlow => "Rapid decision flow",
            ReasoningCue::BalancedDeliberation => "Balanced deliberation",
        }
    }
}

impl core::fmt::Display for ReasoningCue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.description())
    }
}

/// Audit block recording what the decoder saw and under which context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    /// The dominant reasoning cue for this session.
    pub reasoning: ReasoningCue,
    /// Decision latency the decoder operated on (after default resolution).
    pub latency_ms: f64,
    /// Revision count the decoder operated on.
    pub revisions: u32,
    /// Cultural context key the sample resolved to.
    pub cultural_context: String,
    /// Maturity level the calibration used.
    pub maturity_level: MaturityLevel,
}

// ─── Experience ─────────────────────────────────────────────────────────────

/// Coarse experience tier derived from the twin-experience composite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    /// Twin experience below 0.5.
    Novice,
    /// Twin experience in [0.5, 0.8).
    Adept,
    /// Twin experience at 0.8 or above.
    Master,
}

impl ExperienceLevel {
    /// Map a twin-experience composite to its tier.
    pub fn from_experience(twin_experience: f64) -> Self {
        if twin_experience < 0.5 {
            ExperienceLevel::Novice
        } else if twin_experience < 0.8 {
            ExperienceLevel::Adept
        } else {
            ExperienceLevel::Master
        }
    }
}

// ─── DecodedResult ──────────────────────────────────────────────────────────

/// The trait block of a decoded session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecodedTraits {
    /// Whether the session reads as analytical (high Logic or heavy revision).
    pub analytical: bool,
    /// Whether movement was stable (path efficiency above 0.5).
    pub stable: bool,
    /// Calibrated weights: cultural modifiers plus maturity gating applied.
    pub weights: TraitWeights,
    /// Raw rule-based weights before any adjustment.
    pub base_weights: TraitWeights,
    /// Whether a non-identity cultural profile adjusted the weights.
    pub cultural_adjustment_applied: bool,
    /// Culture-local archetype name for the adjusted weights.
    pub cultural_archetype: String,
    /// Audit block for this decode.
    pub evidence: Evidence,
    /// Coarse experience tier.
    pub experience_level: ExperienceLevel,
}

/// Everything the decoder produces for one session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecodedResult {
    /// Synthetic theta signal [0.05, 0.95] after analytical shift.
    pub synthetic_theta: f64,
    /// Synthetic beta signal [0.05, 0.95] after analytical shift.
    pub synthetic_beta: f64,
    /// Aesthetic choice the signal pair derives from.
    pub aesthetics: AestheticChoice,
    /// Twin-experience composite: `0.3 * efficiency + 0.7 * completion`.
    pub twin_experience: f64,
    /// Cultural context the decode resolved to.
    pub cultural_context: String,
    /// Maturity level the calibration used.
    pub maturity_level: MaturityLevel,
    /// Sync score [0.0, 1.0]: closeness to the idealised balanced state.
    pub sync_score: f64,
    /// Decoded trait block.
    pub traits: DecodedTraits,
}

// ─── decode ─────────────────────────────────────────────────────────────────

/// Decode one behavioral sample into calibrated trait weights.
///
/// Latency above ~1 s is treated as evidence of deliberation, saturating at
/// 5 s; path efficiency maps directly onto Fluidity; revisions and latency
/// combine into Complexity. Cultural modifiers are applied additively, then
/// the maturity gate pulls every weight toward the neutral midpoint so that
/// young profiles cannot over-commit to noisy early signals (PC-005 governs
/// all default resolution).
pub fn decode(sample: &BehavioralSample, table: &CulturalTable) -> DecodedResult {
    let latency = sample.decision_latency_ms();
    let revisions = sample.revision_count();
    let efficiency = sample.path_efficiency();
    let completion = sample.task_completion();
    let maturity = sample.maturity_level();
    let aesthetics = sample.aesthetic_choice();
    let culture_key = sample.cultural_context().to_string();

    // Base rule weights. Logic and Intuition are complementary here and only
    // here — later stages move them independently.
    let logic = ((latency - 1000.0) / 4000.0).clamp(0.0, 1.0);
    let base_weights = TraitWeights::new(
        logic,
        1.0 - logic,
        efficiency,
        (revisions as f64 * 0.2 + latency / 10_000.0).clamp(0.0, 1.0),
    )
    .rounded();

    // Cultural adjustment (additive, per-trait clamp, no renormalisation).
    let profile = table.lookup_or_default(&culture_key);
    let adjusted = profile.apply(&base_weights);

    let analytical = adjusted.logic > 0.6 || revisions > 3;

    // Synthetic signal pair from the aesthetic preset, shifted toward the
    // analytical pole when the session reads as analytical.
    let (mut theta, mut beta) = aesthetics.signal_preset();
    if analytical {
        theta = (theta + 0.2).min(0.95);
        beta = (beta - 0.2).max(0.05);
    }

    let twin_experience = 0.3 * efficiency + 0.7 * completion;

    // Archetype names resolve against the culturally adjusted weights, before
    // maturity gating collapses them toward neutral.
    let cultural_archetype = profile.archetype_for(&adjusted).to_string();

    // Maturity-gated calibration: collapse toward the neutral midpoint.
    let sensitivity = maturity.signal_sensitivity();
    let calibrated = adjusted
        .map(|w| 0.5 + (w - 0.5) * sensitivity)
        .rounded();

    let sync_score = round2(
        (0.5 * twin_experience + 0.5 * (1.0 - (0.5 - calibrated.logic).abs())).clamp(0.0, 1.0),
    );

    DecodedResult {
        synthetic_theta: theta,
        synthetic_beta: beta,
        aesthetics,
        twin_experience,
        cultural_context: culture_key.clone(),
        maturity_level: maturity,
        sync_score,
        traits: DecodedTraits {
            analytical,
            stable: efficiency > 0.5,
            weights: calibrated,
            base_weights,
            cultural_adjustment_applied: !profile.is_identity(),
            cultural_archetype,
            evidence: Evidence {
                reasoning: ReasoningCue::classify(latency, revisions),
                latency_ms: latency,
                revisions,
                cultural_context: culture_key,
                maturity_level: maturity,
            },
            experience_level: ExperienceLevel::from_experience(twin_experience),
        },
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
