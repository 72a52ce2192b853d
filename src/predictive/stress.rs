//! Stress-pattern detection: the current session against its own recent
//! baseline.
//!
//! The baseline is the per-metric mean of the last three sessions, so the
//! comparison is always against the user's own recent behavior rather than a
//! global norm. Each fired indicator contributes a fixed amount to the stress
//! level; an indicator whose baseline or current value is unavailable simply
//! does not fire.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::history::{SessionMetrics, SessionRecord};
use crate::report::Analysis;
use crate::stats::mean;
use crate::weights::round2;

use super::PredictiveModel;

/// Minimum historical sessions the stress baseline needs.
pub const MIN_SESSIONS: usize = 1;

/// How many most-recent sessions form the baseline.
const BASELINE_WINDOW: usize = 3;

/// Banded stress level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressLevel {
    /// Stress level below 0.3.
    Low,
    /// Stress level in [0.3, 0.6).
    Moderate,
    /// Stress level at or above 0.6.
    High,
}

impl StressLevel {
    fn classify(level: f64) -> Self {
        if level < 0.3 {
            StressLevel::Low
        } else if level < 0.6 {
            StressLevel::Moderate
        } else {
            StressLevel::High
        }
    }

    /// Action suggestion for this band.
    pub fn recommendation(&self) -> &'static str {
        match self {
            StressLevel::Low => "Behavior is within your normal range. Keep going.",
            StressLevel::Moderate => {
                "Mild stress signals detected. A short pause may help you reset."
            }
            StressLevel::High => {
                "Strong stress signals detected. Consider taking a break before continuing."
            }
        }
    }
}

/// Outcome of comparing the current session against its recent baseline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StressReport {
    /// Accumulated stress level [0.0, 1.0].
    pub stress_level: f64,
    /// Band the stress level falls into.
    pub category: StressLevel,
    /// Which signals fired, in evaluation order.
    pub indicators: Vec<String>,
    /// Latency change against the baseline, in percent.
    pub latency_change_pct: f64,
    /// Action suggestion for the category.
    pub recommendation: String,
}

impl PredictiveModel {
    /// Compare the current session's metrics against the recent baseline.
    ///
    /// Needs at least [`MIN_SESSIONS`] historical session carrying at least
    /// one resolvable metric. The accumulated level adds 0.4 for latency
    /// more than 30% above baseline, 0.3 for a revision rate more than 1.5x
    /// baseline, and 0.3 for path efficiency below 80% of baseline, clipped
    /// to [0.0, 1.0].
    pub fn detect_stress(
        &self,
        history: &[SessionRecord],
        current: &SessionMetrics,
    ) -> Analysis<StressReport> {
        if history.len() < MIN_SESSIONS {
            return Analysis::InsufficientData {
                sessions_needed: MIN_SESSIONS - history.len(),
            };
        }

        let window_start = history.len().saturating_sub(BASELINE_WINDOW);
        let baseline = baseline_metrics(&history[window_start..]);
        if baseline == SessionMetrics::default() {
            // History rows exist but none carries a usable metric
            return Analysis::InsufficientData {
                sessions_needed: MIN_SESSIONS,
            };
        }
        debug!(
            baseline_sessions = history.len().min(BASELINE_WINDOW),
            "evaluating stress indicators"
        );

        let mut stress_level: f64 = 0.0;
        let mut indicators = Vec::new();
        let mut latency_change_pct = 0.0;

        if let (Some(base), Some(now)) = (baseline.avg_decision_latency, current.avg_decision_latency)
        {
            if base > 0.0 {
                latency_change_pct = round2((now - base) / base * 100.0);
                if now > base * 1.3 {
                    stress_level += 0.4;
                    indicators.push("elevated decision latency".to_string());
                }
            }
        }

        if let (Some(base), Some(now)) = (baseline.revision_rate, current.revision_rate) {
            if now > base * 1.5 {
                stress_level += 0.3;
                indicators.push("increased revision rate".to_string());
            }
        }

        if let (Some(base), Some(now)) = (baseline.path_efficiency, current.path_efficiency) {
            if now < base * 0.8 {
                stress_level += 0.3;
                indicators.push("reduced path efficiency".to_string());
            }
        }

        let stress_level = round2(stress_level.clamp(0.0, 1.0));
        let category = StressLevel::classify(stress_level);
        Analysis::Analyzed(StressReport {
            stress_level,
            category,
            indicators,
            latency_change_pct,
            recommendation: category.recommendation().to_string(),
        })
    }
}

/// Per-metric mean over the baseline window, each metric over the sessions
/// that actually carry it. Non-positive latencies carry no signal and are
/// kept out of the baseline.
fn baseline_metrics(window: &[SessionRecord]) -> SessionMetrics {
    let mut latencies = Vec::new();
    let mut revisions = Vec::new();
    let mut efficiencies = Vec::new();
    for record in window {
        let m = record.metrics();
        if let Some(v) = m.avg_decision_latency.filter(|&v| v > 0.0) {
            latencies.push(v);
        }
        if let Some(v) = m.revision_rate {
            revisions.push(v);
        }
        if let Some(v) = m.path_efficiency {
            efficiencies.push(v);
        }
    }
    SessionMetrics {
        avg_decision_latency: (!latencies.is_empty()).then(|| mean(&latencies)),
        revision_rate: (!revisions.is_empty()).then(|| mean(&revisions)),
        path_efficiency: (!efficiencies.is_empty()).then(|| mean(&efficiencies)),
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
