//! Predictive model: forward-looking analytics over the persisted histories.
//!
//! Four routines, each reading history the external persistence collaborator
//! owns and returning an [`Analysis`](crate::report::Analysis) outcome:
//!
//! | Routine | Input | Minimum sessions |
//! |---|---|---|
//! | [`PredictiveModel::predict_trend`] | profile evolution | 3 |
//! | [`PredictiveModel::detect_stress`] | session metrics | 1 |
//! | [`PredictiveModel::detect_anomalies`] | session metrics | 3 |
//! | [`PredictiveModel::forecast_evolution`] | profile evolution | 5 |
//!
//! # Invariants
//!
//! - **PC-001**: every predicted weight is clipped to [0.0, 1.0] before it is
//!   published, even when extrapolation leaves the range.
//! - **PC-007**: a history shorter than a routine's minimum always yields
//!   `InsufficientData` with the exact shortfall, never a partial report.

use serde::{Deserialize, Serialize};

mod anomaly;
mod evolution;
mod stress;
mod trend;

pub use anomaly::{Anomaly, AnomalyReport, AnomalySeverity, MetricKind};
pub use evolution::{EvolutionForecast, EvolutionReport};
pub use stress::{StressLevel, StressReport};
pub use trend::{TraitTrend, TrendReport};

/// Direction of a fitted per-trait line, shared by the trend and evolution
/// routines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Slope above the stability threshold.
    Increasing,
    /// Slope below the negative stability threshold.
    Decreasing,
    /// Slope within the stability band.
    Stable,
}

/// Default number of most-recent snapshots the trend routine looks at.
pub const DEFAULT_LOOKBACK_WINDOW: usize = 10;

/// Forward-looking analytics over the persisted session and profile
/// histories.
///
/// Stateless apart from configuration; every routine takes the history it
/// needs as an explicit slice.
#[derive(Clone, Copy, Debug)]
pub struct PredictiveModel {
    /// How many most-recent evolution snapshots the trend fit considers.
    lookback_window: usize,
}

impl PredictiveModel {
    /// Construct with an explicit lookback window (at least 2).
    pub fn new(lookback_window: usize) -> Self {
        Self {
            lookback_window: lookback_window.max(2),
        }
    }

    /// The configured lookback window.
    pub fn lookback_window(&self) -> usize {
        self.lookback_window
    }
}

impl Default for PredictiveModel {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKBACK_WINDOW)
    }
}
