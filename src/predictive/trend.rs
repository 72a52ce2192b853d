//! Short-horizon trait-trend prediction over the profile evolution history.
//!
//! Fits a degree-1 line per trait against session index over the most recent
//! lookback window and extrapolates exactly one session ahead. Session index
//! (not wall-clock time) is the x axis here; the long-horizon, day-based fit
//! lives in the evolution routine.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::history::PersonalitySnapshot;
use crate::report::Analysis;
use crate::stats::linear_fit;
use crate::weights::{round2, PerTrait, Trait, TraitWeights};

use super::{PredictiveModel, TrendDirection};

/// Minimum evolution snapshots the trend fit needs.
pub const MIN_SESSIONS: usize = 3;

/// Slopes within ±0.01 per session count as stable.
const STABILITY_THRESHOLD: f64 = 0.01;

/// Fitted trend for one trait.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraitTrend {
    /// Weight in the most recent snapshot.
    pub current: f64,
    /// Extrapolated weight one session ahead, clipped to [0.0, 1.0].
    pub predicted: f64,
    /// Direction classification of the fitted slope.
    pub trend: TrendDirection,
    /// Fitted slope in weight units per session.
    pub slope: f64,
    /// Fit confidence [0.0, 1.0], saturating at 10 windowed snapshots.
    pub confidence: f64,
}

/// Per-trait trends plus the assembled next-session weight vector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    /// Fitted trend per trait axis.
    pub trends: PerTrait<TraitTrend>,
    /// The four predicted weights as a vector, for direct comparison with
    /// the next decoded session.
    pub next_session_prediction: TraitWeights,
}

impl PredictiveModel {
    /// Predict each trait's next-session weight from its recent trajectory.
    ///
    /// Needs at least [`MIN_SESSIONS`] snapshots; only the most recent
    /// lookback window contributes to the fit.
    pub fn predict_trend(&self, history: &[PersonalitySnapshot]) -> Analysis<TrendReport> {
        if history.len() < MIN_SESSIONS {
            return Analysis::InsufficientData {
                sessions_needed: MIN_SESSIONS - history.len(),
            };
        }

        let window_start = history.len().saturating_sub(self.lookback_window());
        let window = &history[window_start..];
        let n = window.len();
        debug!(snapshots = history.len(), window = n, "fitting trait trends");

        let xs: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let confidence = round2((n as f64 / 10.0).min(1.0));

        let trends = PerTrait::from_fn(|t| {
            let ys: Vec<f64> = window.iter().map(|s| s.weights.get(t)).collect();
            let fit = linear_fit(&xs, &ys);
            let current = ys[n - 1];
            let predicted = round2(fit.at(n as f64).clamp(0.0, 1.0));
            TraitTrend {
                current,
                predicted,
                trend: classify_slope(fit.slope),
                slope: fit.slope,
                confidence,
            }
        });

        let next_session_prediction = TraitWeights::new(
            trends.get(Trait::Logic).predicted,
            trends.get(Trait::Intuition).predicted,
            trends.get(Trait::Fluidity).predicted,
            trends.get(Trait::Complexity).predicted,
        );

        Analysis::Analyzed(TrendReport {
            trends,
            next_session_prediction,
        })
    }
}

fn classify_slope(slope: f64) -> TrendDirection {
    if slope > STABILITY_THRESHOLD {
        TrendDirection::Increasing
    } else if slope < -STABILITY_THRESHOLD {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
