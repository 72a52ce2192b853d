//! Z-score anomaly screening of the current session against recent history.
//!
//! Each metric is screened independently against its own distribution over
//! the last ten sessions. A series with fewer than two samples has no
//! deviation of its own, so it falls back to a fixed fraction of its mean;
//! a longer series with zero variance carries no screenable distribution
//! and is skipped outright.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::history::{SessionMetrics, SessionRecord};
use crate::report::Analysis;
use crate::stats::{mean, std_dev};
use crate::weights::round2;

use super::PredictiveModel;

/// Minimum historical sessions the screening needs.
pub const MIN_SESSIONS: usize = 3;

/// How many most-recent sessions form the screening distribution.
const SCREEN_WINDOW: usize = 10;

/// Z-score beyond which a metric is flagged.
const FLAG_THRESHOLD: f64 = 2.5;

/// Z-score beyond which a flagged metric is high severity.
const HIGH_THRESHOLD: f64 = 3.5;

/// The session metric a single anomaly refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Average decision latency in milliseconds.
    DecisionLatency,
    /// Revisions per session.
    RevisionRate,
    /// Path efficiency [0.0, 1.0].
    PathEfficiency,
}

impl MetricKind {
    /// Contribution of this metric to the composite anomaly score.
    fn score_weight(&self) -> f64 {
        match self {
            MetricKind::DecisionLatency => 0.3,
            MetricKind::RevisionRate => 0.3,
            MetricKind::PathEfficiency => 0.4,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            MetricKind::DecisionLatency => "decision latency",
            MetricKind::RevisionRate => "revision rate",
            MetricKind::PathEfficiency => "path efficiency",
        }
    }
}

/// Severity of a flagged metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalySeverity {
    /// Z-score in (2.5, 3.5].
    Medium,
    /// Z-score above 3.5.
    High,
}

/// One flagged metric.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    /// Which metric deviated.
    pub metric: MetricKind,
    /// How far it deviated.
    pub severity: AnomalySeverity,
    /// Z-score of the current value, rounded to 2 decimals.
    pub z_score: f64,
    /// Human-readable account of the deviation.
    pub description: String,
}

/// Outcome of screening one session against recent history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnomalyReport {
    /// `true` when at least one metric was flagged.
    pub has_anomaly: bool,
    /// Weighted composite score [0.0, 1.0] over the flagged metrics.
    pub anomaly_score: f64,
    /// Flagged metrics, in screening order.
    pub anomalies: Vec<Anomaly>,
}

impl PredictiveModel {
    /// Screen the current session's metrics for statistical outliers.
    ///
    /// Needs at least [`MIN_SESSIONS`] historical sessions; only the last
    /// ten contribute to the distributions. A metric absent from the current
    /// session is not screened.
    pub fn detect_anomalies(
        &self,
        history: &[SessionRecord],
        current: &SessionMetrics,
    ) -> Analysis<AnomalyReport> {
        if history.len() < MIN_SESSIONS {
            return Analysis::InsufficientData {
                sessions_needed: MIN_SESSIONS - history.len(),
            };
        }

        let window_start = history.len().saturating_sub(SCREEN_WINDOW);
        let window = &history[window_start..];
        debug!(window = window.len(), "screening session for anomalies");

        let mut anomalies = Vec::new();
        let mut anomaly_score = 0.0;

        let checks = [
            (
                MetricKind::DecisionLatency,
                latency_series(window),
                current.avg_decision_latency,
            ),
            (
                MetricKind::RevisionRate,
                revision_series(window),
                current.revision_rate,
            ),
            (
                MetricKind::PathEfficiency,
                efficiency_series(window),
                current.path_efficiency,
            ),
        ];

        for (metric, series, current_value) in checks {
            let Some(value) = current_value else {
                continue;
            };
            let Some(anomaly) = screen(metric, &series, value) else {
                continue;
            };
            anomaly_score += metric.score_weight();
            anomalies.push(anomaly);
        }

        Analysis::Analyzed(AnomalyReport {
            has_anomaly: !anomalies.is_empty(),
            anomaly_score: round2(anomaly_score.clamp(0.0, 1.0)),
            anomalies,
        })
    }
}

/// Screen one metric value against its historical series.
fn screen(metric: MetricKind, series: &[f64], value: f64) -> Option<Anomaly> {
    if series.is_empty() {
        return None;
    }
    let m = mean(series);
    let sd = effective_std(metric, series, m);
    if sd <= 0.0 {
        return None;
    }

    let z = (value - m).abs() / sd;
    if z <= FLAG_THRESHOLD {
        return None;
    }

    let severity = if z > HIGH_THRESHOLD {
        AnomalySeverity::High
    } else {
        AnomalySeverity::Medium
    };
    Some(Anomaly {
        metric,
        severity,
        z_score: round2(z),
        description: format!(
            "{} of {:.2} deviates sharply from the recent typical {:.2}",
            metric.label(),
            value,
            m
        ),
    })
}

/// Standard deviation of the series, or a fraction-of-mean fallback when
/// the series is too short to carry one. A zero result means the metric
/// cannot be screened.
fn effective_std(metric: MetricKind, series: &[f64], mean_value: f64) -> f64 {
    if series.len() >= 2 {
        return std_dev(series);
    }
    let fraction = match metric {
        MetricKind::DecisionLatency => 0.2,
        MetricKind::RevisionRate => 0.3,
        MetricKind::PathEfficiency => 0.2,
    };
    mean_value * fraction
}

/// Latency history. Unrecorded and non-positive entries carry no signal and
/// are skipped.
fn latency_series(window: &[SessionRecord]) -> Vec<f64> {
    window
        .iter()
        .filter_map(|r| r.metrics().avg_decision_latency)
        .filter(|&v| v > 0.0)
        .collect()
}

/// Revision history. An unrecorded value means no revisions happened.
fn revision_series(window: &[SessionRecord]) -> Vec<f64> {
    window
        .iter()
        .map(|r| r.metrics().revision_rate.unwrap_or(0.0))
        .collect()
}

/// Efficiency history. An unrecorded value means the path was not degraded.
fn efficiency_series(window: &[SessionRecord]) -> Vec<f64> {
    window
        .iter()
        .map(|r| r.metrics().path_efficiency.unwrap_or(1.0))
        .collect()
}

// ─── Tests ──────────────────────────────────────────────────────────────────
