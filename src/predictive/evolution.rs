//! Long-horizon evolution forecasting over the profile history.
//!
//! Unlike the trend routine, the x axis here is wall-clock time: each
//! snapshot is placed at its day offset from the first, and the fitted line
//! is evaluated `forecast_days` past the most recent snapshot. Irregular
//! session spacing therefore weighs into the fit instead of being flattened
//! to an index.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::history::PersonalitySnapshot;
use crate::report::Analysis;
use crate::stats::linear_fit;
use crate::weights::{round2, PerTrait};

use super::{PredictiveModel, TrendDirection};

/// Minimum snapshots the evolution fit needs.
pub const MIN_SESSIONS: usize = 5;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Forecast for one trait.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvolutionForecast {
    /// Weight in the most recent snapshot.
    pub current: f64,
    /// Fitted weight at the forecast horizon, clipped to [0.0, 1.0].
    pub predicted: f64,
    /// `predicted - current`, rounded to 2 decimals.
    pub change: f64,
    /// Direction of the fitted line.
    pub trend: TrendDirection,
}

/// Per-trait forecasts at a fixed day horizon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvolutionReport {
    /// Days past the most recent snapshot the forecast targets.
    pub forecast_days: u32,
    /// Forecast per trait axis.
    pub predictions: PerTrait<EvolutionForecast>,
    /// Fit confidence [0.0, 1.0], saturating at 20 snapshots.
    pub confidence: f64,
}

impl PredictiveModel {
    /// Forecast each trait's weight `forecast_days` past the latest snapshot.
    ///
    /// Needs at least [`MIN_SESSIONS`] snapshots. The full history
    /// contributes to the fit; this is the long-memory counterpart to the
    /// windowed trend routine.
    pub fn forecast_evolution(
        &self,
        history: &[PersonalitySnapshot],
        forecast_days: u32,
    ) -> Analysis<EvolutionReport> {
        if history.len() < MIN_SESSIONS {
            return Analysis::InsufficientData {
                sessions_needed: MIN_SESSIONS - history.len(),
            };
        }

        let origin = history[0].timestamp;
        let xs: Vec<f64> = history
            .iter()
            .map(|s| (s.timestamp - origin).num_seconds() as f64 / SECONDS_PER_DAY)
            .collect();
        let last_day = xs[xs.len() - 1];
        let target_day = last_day + forecast_days as f64;
        debug!(
            snapshots = history.len(),
            span_days = last_day,
            forecast_days,
            "fitting evolution forecast"
        );

        let predictions = PerTrait::from_fn(|t| {
            let ys: Vec<f64> = history.iter().map(|s| s.weights.get(t)).collect();
            let fit = linear_fit(&xs, &ys);
            let current = ys[ys.len() - 1];
            let predicted = round2(fit.at(target_day).clamp(0.0, 1.0));
            EvolutionForecast {
                current,
                predicted,
                change: round2(predicted - current),
                trend: classify_slope(fit.slope),
            }
        });

        Analysis::Analyzed(EvolutionReport {
            forecast_days,
            predictions,
            confidence: round2((history.len() as f64 / 20.0).min(1.0)),
        })
    }
}

fn classify_slope(slope: f64) -> TrendDirection {
    if slope > 1e-9 {
        TrendDirection::Increasing
    } else if slope < -1e-9 {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weights::{Trait, TraitWeights};
    use chrono::{TimeZone, Utc};

    fn snapshot(day: i64, logic: f64) -> PersonalitySnapshot {
        PersonalitySnapshot::new(
            Utc.timestamp_opt(1_700_000_000 + day * 86_400, 0).unwrap(),
            TraitWeights::new(logic, 1.0 - logic, 0.5, 0.5),
            "Balanced & Steady",
            0.5,
            1,
        )
    }

    #[test]
    fn test_short_history_reports_shortfall() {
        let history: Vec<_> = (0..4).map(|d| snapshot(d, 0.5)).collect();
        let result = PredictiveModel::default().forecast_evolution(&history, 30);
        assert_eq!(result.sessions_needed(), Some(1));
    }

    #[test]
    fn test_flat_history_forecasts_no_change() {
        let history: Vec<_> = (0..5).map(|d| snapshot(d, 0.5)).collect();
        let report = PredictiveModel::default()
            .forecast_evolution(&history, 30)
            .into_analyzed()
            .unwrap();
        for t in Trait::ALL {
            let forecast = report.predictions.get(t);
            assert_eq!(forecast.predicted, forecast.current, "{}", t);
            assert_eq!(forecast.change, 0.0, "{}", t);
            assert_eq!(forecast.trend, TrendDirection::Stable, "{}", t);
        }
    }

    #[test]
    fn test_daily_rise_extrapolates_by_days() {
        // Logic rises 0.02 per day over 5 days; 5 days out adds 0.1
        let history: Vec<_> = (0..5).map(|d| snapshot(d, 0.4 + 0.02 * d as f64)).collect();
        let report = PredictiveModel::default()
            .forecast_evolution(&history, 5)
            .into_analyzed()
            .unwrap();
        let logic = report.predictions.get(Trait::Logic);
        assert!((logic.current - 0.48).abs() < 1e-9, "current={}", logic.current);
        assert_eq!(logic.predicted, 0.58);
        assert_eq!(logic.change, 0.1);
        assert_eq!(logic.trend, TrendDirection::Increasing);
        assert_eq!(
            report.predictions.get(Trait::Intuition).trend,
            TrendDirection::Decreasing
        );
    }

    #[test]
    fn test_forecast_clipped_to_unit_range() {
        let history: Vec<_> = (0..5).map(|d| snapshot(d, 0.6 + 0.08 * d as f64)).collect();
        let report = PredictiveModel::default()
            .forecast_evolution(&history, 60)
            .into_analyzed()
            .unwrap();
        assert_eq!(report.predictions.get(Trait::Logic).predicted, 1.0);
    }

    #[test]
    fn test_irregular_spacing_uses_day_offsets() {
        // A long gap before the last snapshot flattens the fitted slope
        // relative to an index-based fit
        let history = vec![
            snapshot(0, 0.4),
            snapshot(1, 0.45),
            snapshot(2, 0.5),
            snapshot(3, 0.55),
            snapshot(60, 0.6),
        ];
        let report = PredictiveModel::default()
            .forecast_evolution(&history, 10)
            .into_analyzed()
            .unwrap();
        let logic = report.predictions.get(Trait::Logic);
        assert_eq!(logic.trend, TrendDirection::Increasing);
        // Slope is roughly 0.0026 per day, so 10 days adds only a few
        // hundredths rather than the 0.5 an index fit would add
        assert!(logic.predicted < 0.75, "predicted={}", logic.predicted);
    }

    #[test]
    fn test_confidence_saturates_at_twenty_snapshots() {
        let history: Vec<_> = (0..10).map(|d| snapshot(d, 0.5)).collect();
        let report = PredictiveModel::default()
            .forecast_evolution(&history, 30)
            .into_analyzed()
            .unwrap();
        assert_eq!(report.confidence, 0.5);

        let history: Vec<_> = (0..40).map(|d| snapshot(d, 0.5)).collect();
        let report = PredictiveModel::default()
            .forecast_evolution(&history, 30)
            .into_analyzed()
            .unwrap();
        assert_eq!(report.confidence, 1.0);
    }
}
