//! Session-level telemetry input: the behavioral sample and its enums.
//!
//! - [`BehavioralSample`]: one session's raw metrics, immutable once decoded.
//! - [`AestheticChoice`]: the discrete aesthetic preference driving the
//!   synthetic signal pair.
//! - [`MaturityLevel`]: the three-tier gate that scales signal sensitivity.
//!
//! # Failure policy
//!
//! Telemetry arrives noisy and partial. Every raw field is optional; the
//! `*_ms()` / `*_or_default()` style accessors resolve missing values to the
//! documented neutral defaults (latency 1000 ms, revisions 0, efficiency 1.0,
//! completion 0.0, maturity level 1). The decoder never raises for
//! malformed-but-typed input.

use serde::{Deserialize, Serialize};

// ─── AestheticChoice ────────────────────────────────────────────────────────

/// Discrete aesthetic preference reported with a session.
///
/// Selects the synthetic `(theta, beta)` signal preset in the decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AestheticChoice {
    /// Calm, minimal environments. Preset theta 0.9 / beta 0.1.
    #[serde(rename = "Zen/Minimal")]
    ZenMinimal,
    /// Loud, high-energy environments. Preset theta 0.1 / beta 0.9.
    #[serde(rename = "Neon/Vibrant")]
    NeonVibrant,
    /// Dense, mechanical environments. Preset theta 0.4 / beta 0.6.
    #[serde(rename = "Cyber/Industrial")]
    CyberIndustrial,
}

impl AestheticChoice {
    /// The synthetic signal preset for this choice, as `(theta, beta)`.
    pub fn signal_preset(&self) -> (f64, f64) {
        match self {
            AestheticChoice::ZenMinimal => (0.9, 0.1),
            AestheticChoice::NeonVibrant => (0.1, 0.9),
            AestheticChoice::CyberIndustrial => (0.4, 0.6),
        }
    }
}

impl Default for AestheticChoice {
    fn default() -> Self {
        AestheticChoice::CyberIndustrial
    }
}

// ─── MaturityLevel ──────────────────────────────────────────────────────────

/// Three-tier profile maturity gate.
///
/// Low-maturity profiles have seen few sessions, so their weak signals are
/// collapsed toward the neutral midpoint rather than trusted outright. The
/// tier controls the calibration factor applied to every decoded weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaturityLevel {
    /// Level 1: weak signals collapse toward neutral (sensitivity 0.3).
    Echo,
    /// Level 2: moderate signal sensitivity (0.7).
    Reflection,
    /// Level 3: full signal sensitivity (1.0).
    Synthesis,
}

impl MaturityLevel {
    /// Resolve from the persisted integer level. Unknown values fall back to
    /// level 1 (Echo), values above 3 saturate at Synthesis.
    pub fn from_level(level: u8) -> Self {
        match level {
            2 => MaturityLevel::Reflection,
            3.. => MaturityLevel::Synthesis,
            _ => MaturityLevel::Echo,
        }
    }

    /// The persisted integer level (1..=3).
    pub fn level(&self) -> u8 {
        match self {
            MaturityLevel::Echo => 1,
            MaturityLevel::Reflection => 2,
            MaturityLevel::Synthesis => 3,
        }
    }

    /// Calibration factor pulling decoded weights toward the neutral midpoint.
    pub fn signal_sensitivity(&self) -> f64 {
        match self {
            MaturityLevel::Echo => 0.3,
            MaturityLevel::Reflection => 0.7,
            MaturityLevel::Synthesis => 1.0,
        }
    }

    /// Advance at most one tier based on accumulated evidence.
    ///
    /// - Echo → Reflection after ≥3 sessions with sync score ≥ 0.6.
    /// - Reflection → Synthesis after ≥7 sessions with sync score ≥ 0.8.
    ///
    /// Never skips a tier and never demotes.
    pub fn advance(&self, session_count: usize, sync_score: f64) -> Self {
        match self {
            MaturityLevel::Echo if session_count >= 3 && sync_score >= 0.6 => {
                MaturityLevel::Reflection
            }
            MaturityLevel::Reflection if session_count >= 7 && sync_score >= 0.8 => {
                MaturityLevel::Synthesis
            }
            level => *level,
        }
    }
}

impl Default for MaturityLevel {
    fn default() -> Self {
        MaturityLevel::Echo
    }
}

// ─── BehavioralSample ───────────────────────────────────────────────────────

/// One session's raw behavioral metrics, as produced by the external
/// telemetry-ingestion collaborator.
///
/// All raw fields are optional (tolerant reader); the accessor methods
/// resolve the documented neutral defaults. A sample is immutable once
/// handed to the decoder.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehavioralSample {
    /// Average decision latency in milliseconds (≥ 0). Default 1000.
    #[serde(default, alias = "avgDecisionLatency")]
    pub decision_latency_ms: Option<f64>,
    /// Number of revisions within the session (≥ 0). Default 0.
    #[serde(default, alias = "revisionRate")]
    pub revision_count: Option<u32>,
    /// Path efficiency [0.0, 1.0]. Default 1.0.
    #[serde(default)]
    pub path_efficiency: Option<f64>,
    /// Task completion [0.0, 1.0]. Default 0.0.
    #[serde(default)]
    pub task_completion: Option<f64>,
    /// Aesthetic preference. Default Cyber/Industrial.
    #[serde(default, alias = "aesthetics")]
    pub aesthetic_choice: Option<AestheticChoice>,
    /// Cultural context key. Default `"default"`.
    #[serde(default)]
    pub cultural_context: Option<String>,
    /// Profile maturity level. Default level 1.
    #[serde(default)]
    pub maturity_level: Option<MaturityLevel>,
}

impl BehavioralSample {
    /// Decision latency in milliseconds, clamped non-negative. Default 1000.
    pub fn decision_latency_ms(&self) -> f64 {
        self.decision_latency_ms.unwrap_or(1000.0).max(0.0)
    }

    /// Revision count. Default 0.
    pub fn revision_count(&self) -> u32 {
        self.revision_count.unwrap_or(0)
    }

    /// Path efficiency, clamped to [0.0, 1.0]. Default 1.0.
    pub fn path_efficiency(&self) -> f64 {
        self.path_efficiency.unwrap_or(1.0).clamp(0.0, 1.0)
    }

    /// Task completion, clamped to [0.0, 1.0]. Default 0.0.
    pub fn task_completion(&self) -> f64 {
        self.task_completion.unwrap_or(0.0).clamp(0.0, 1.0)
    }

    /// Aesthetic preference. Default Cyber/Industrial.
    pub fn aesthetic_choice(&self) -> AestheticChoice {
        self.aesthetic_choice.unwrap_or_default()
    }

    /// Cultural context key. Default `"default"`.
    pub fn cultural_context(&self) -> &str {
        self.cultural_context.as_deref().unwrap_or("default")
    }

    /// Profile maturity level. Default level 1 (Echo).
    pub fn maturity_level(&self) -> MaturityLevel {
        self.maturity_level.unwrap_or_default()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── AestheticChoice ───────────────────────────────────────────────────

    #[test]
    fn test_signal_presets() {
        assert_eq!(AestheticChoice::ZenMinimal.signal_preset(), (0.9, 0.1));
        assert_eq!(AestheticChoice::NeonVibrant.signal_preset(), (0.1, 0.9));
        assert_eq!(AestheticChoice::CyberIndustrial.signal_preset(), (0.4, 0.6));
    }

    #[test]
    fn test_aesthetic_serde_names() {
        let json = serde_json::to_string(&AestheticChoice::ZenMinimal).unwrap();
        assert_eq!(json, "\"Zen/Minimal\"");
        let back: AestheticChoice = serde_json::from_str("\"Neon/Vibrant\"").unwrap();
        assert_eq!(back, AestheticChoice::NeonVibrant);
    }

    // ── MaturityLevel ─────────────────────────────────────────────────────

    #[test]
    fn test_maturity_from_level() {
        assert_eq!(MaturityLevel::from_level(1), MaturityLevel::Echo);
        assert_eq!(MaturityLevel::from_level(2), MaturityLevel::Reflection);
        assert_eq!(MaturityLevel::from_level(3), MaturityLevel::Synthesis);
        // Unknown falls back to level 1, above 3 saturates
        assert_eq!(MaturityLevel::from_level(0), MaturityLevel::Echo);
        assert_eq!(MaturityLevel::from_level(9), MaturityLevel::Synthesis);
    }

    #[test]
    fn test_signal_sensitivity_tiers() {
        assert_eq!(MaturityLevel::Echo.signal_sensitivity(), 0.3);
        assert_eq!(MaturityLevel::Reflection.signal_sensitivity(), 0.7);
        assert_eq!(MaturityLevel::Synthesis.signal_sensitivity(), 1.0);
    }

    #[test]
    fn test_advance_thresholds() {
        let echo = MaturityLevel::Echo;
        assert_eq!(echo.advance(2, 0.9), MaturityLevel::Echo);
        assert_eq!(echo.advance(3, 0.59), MaturityLevel::Echo);
        assert_eq!(echo.advance(3, 0.6), MaturityLevel::Reflection);

        let refl = MaturityLevel::Reflection;
        assert_eq!(refl.advance(6, 0.9), MaturityLevel::Reflection);
        assert_eq!(refl.advance(7, 0.8), MaturityLevel::Synthesis);
    }

    #[test]
    fn test_advance_never_skips_or_demotes() {
        // Strong evidence still moves one tier at a time
        assert_eq!(
            MaturityLevel::Echo.advance(100, 1.0),
            MaturityLevel::Reflection
        );
        // Synthesis is terminal
        assert_eq!(
            MaturityLevel::Synthesis.advance(0, 0.0),
            MaturityLevel::Synthesis
        );
    }

    // ── BehavioralSample ──────────────────────────────────────────────────

    #[test]
    fn test_empty_sample_resolves_neutral_defaults() {
        let s = BehavioralSample::default();
        assert_eq!(s.decision_latency_ms(), 1000.0);
        assert_eq!(s.revision_count(), 0);
        assert_eq!(s.path_efficiency(), 1.0);
        assert_eq!(s.task_completion(), 0.0);
        assert_eq!(s.aesthetic_choice(), AestheticChoice::CyberIndustrial);
        assert_eq!(s.cultural_context(), "default");
        assert_eq!(s.maturity_level(), MaturityLevel::Echo);
    }

    #[test]
    fn test_out_of_range_metrics_are_clamped() {
        let s = BehavioralSample {
            decision_latency_ms: Some(-50.0),
            path_efficiency: Some(1.8),
            task_completion: Some(-0.4),
            ..Default::default()
        };
        assert_eq!(s.decision_latency_ms(), 0.0);
        assert_eq!(s.path_efficiency(), 1.0);
        assert_eq!(s.task_completion(), 0.0);
    }

    #[test]
    fn test_sample_deserializes_ingestion_payload() {
        // Field names as the telemetry collaborator sends them
        let json = r#"{
            "avgDecisionLatency": 2400.0,
            "revisionRate": 3,
            "pathEfficiency": 0.8,
            "taskCompletion": 0.6,
            "aesthetics": "Zen/Minimal",
            "culturalContext": "east_asian",
            "maturityLevel": "reflection"
        }"#;
        let s: BehavioralSample = serde_json::from_str(json).unwrap();
        assert_eq!(s.decision_latency_ms(), 2400.0);
        assert_eq!(s.revision_count(), 3);
        assert_eq!(s.aesthetic_choice(), AestheticChoice::ZenMinimal);
        assert_eq!(s.cultural_context(), "east_asian");
        assert_eq!(s.maturity_level(), MaturityLevel::Reflection);
    }
}
