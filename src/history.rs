//! Persisted history shapes consumed by the learner and the predictive model.
//!
//! - [`PersonalitySnapshot`]: one appended profile-evolution record. The
//!   external persistence collaborator owns the append-only sequence; this
//!   core only ever reads it.
//! - [`SessionRecord`]: one behavioral-session row, as the persistence layer
//!   stores it — flat metric columns plus an optional `raw_metrics` JSON
//!   payload carrying the full ingestion profile.
//!
//! # Tolerant reading
//!
//! Session rows are heterogeneous: older rows carry only flat columns, newer
//! rows carry the nested `raw_metrics` payload, and individual values may be
//! missing or malformed. [`SessionRecord::metrics`] resolves the three
//! stress/anomaly metrics from the nested `summary` block first and falls
//! back to the flat columns; malformed payloads are logged and skipped,
//! never fatal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::weights::TraitWeights;

// ─── PersonalitySnapshot ────────────────────────────────────────────────────

/// Flat persisted row shape (`logic_weight` … column names).
#[derive(Serialize, Deserialize, Clone)]
struct SnapshotRow {
    timestamp: DateTime<Utc>,
    logic_weight: f64,
    intuition_weight: f64,
    fluidity_weight: f64,
    complexity_weight: f64,
    archetype: String,
    confidence_score: f64,
    session_count: u32,
}

/// A persisted, timestamped profile snapshot.
///
/// Created by the Continuous Learner after each session and appended (never
/// mutated) to the externally owned evolution history. Serialises to the
/// persistence layer's flat row shape (`logic_weight`, `confidence_score`, …).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "SnapshotRow", into = "SnapshotRow")]
pub struct PersonalitySnapshot {
    /// When the snapshot was taken.
    pub timestamp: DateTime<Utc>,
    /// The stable profile weights at snapshot time.
    pub weights: TraitWeights,
    /// Archetype label generated for these weights.
    pub archetype: String,
    /// Profile confidence [0.0, 1.0] at snapshot time.
    pub confidence: f64,
    /// Number of sessions contributing to the profile so far.
    pub session_count: u32,
}

impl PersonalitySnapshot {
    /// Construct a snapshot record.
    pub fn new(
        timestamp: DateTime<Utc>,
        weights: TraitWeights,
        archetype: impl Into<String>,
        confidence: f64,
        session_count: u32,
    ) -> Self {
        Self {
            timestamp,
            weights,
            archetype: archetype.into(),
            confidence,
            session_count,
        }
    }
}

impl From<SnapshotRow> for PersonalitySnapshot {
    fn from(row: SnapshotRow) -> Self {
        Self {
            timestamp: row.timestamp,
            weights: TraitWeights::new(
                row.logic_weight,
                row.intuition_weight,
                row.fluidity_weight,
                row.complexity_weight,
            ),
            archetype: row.archetype,
            confidence: row.confidence_score,
            session_count: row.session_count,
        }
    }
}

impl From<PersonalitySnapshot> for SnapshotRow {
    fn from(snapshot: PersonalitySnapshot) -> Self {
        Self {
            timestamp: snapshot.timestamp,
            logic_weight: snapshot.weights.logic,
            intuition_weight: snapshot.weights.intuition,
            fluidity_weight: snapshot.weights.fluidity,
            complexity_weight: snapshot.weights.complexity,
            archetype: snapshot.archetype,
            confidence_score: snapshot.confidence,
            session_count: snapshot.session_count,
        }
    }
}

// ─── SessionRecord ──────────────────────────────────────────────────────────

/// One behavioral-session row from the external metric history.
///
/// Every field is optional — see the module docs for the resolution rules.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionRecord {
    /// When the session was recorded.
    pub timestamp: Option<DateTime<Utc>>,
    /// Flat column: average decision latency in milliseconds.
    #[serde(alias = "avgDecisionLatency")]
    pub avg_decision_latency: Option<f64>,
    /// Flat column: revisions per session.
    #[serde(alias = "revisionRate")]
    pub revision_rate: Option<f64>,
    /// Flat column: path efficiency [0.0, 1.0].
    #[serde(alias = "pathEfficiency")]
    pub path_efficiency: Option<f64>,
    /// Full ingestion profile as a JSON string, if the persistence layer
    /// stored one. Its `summary` block takes precedence over flat columns.
    pub raw_metrics: Option<String>,
}

/// The three metrics the stress and anomaly routines operate on, after
/// tolerant resolution. `None` means the session carries no usable value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SessionMetrics {
    /// Average decision latency in milliseconds.
    pub avg_decision_latency: Option<f64>,
    /// Revisions per session.
    pub revision_rate: Option<f64>,
    /// Path efficiency [0.0, 1.0].
    pub path_efficiency: Option<f64>,
}

impl SessionRecord {
    /// Build a record from the three flat metrics (test and demo helper).
    pub fn from_metrics(latency: f64, revision_rate: f64, path_efficiency: f64) -> Self {
        Self {
            avg_decision_latency: Some(latency),
            revision_rate: Some(revision_rate),
            path_efficiency: Some(path_efficiency),
            ..Self::default()
        }
    }

    /// Resolve the stress/anomaly metrics for this session.
    ///
    /// The nested `raw_metrics.summary` block (camelCase keys, as the
    /// ingestion layer writes them) is preferred; flat columns fill in
    /// whatever the payload did not provide. A malformed payload is logged
    /// at `warn` and treated as absent.
    pub fn metrics(&self) -> SessionMetrics {
        let mut resolved = SessionMetrics::default();

        if let Some(raw) = &self.raw_metrics {
            match serde_json::from_str::<serde_json::Value>(raw) {
                Ok(parsed) => {
                    if let Some(summary) = parsed.get("summary") {
                        resolved.avg_decision_latency =
                            number_field(summary, "avgDecisionLatency");
                        resolved.revision_rate = number_field(summary, "revisionRate");
                        resolved.path_efficiency = number_field(summary, "pathEfficiency");
                    }
                }
                Err(err) => {
                    warn!(error = %err, "failed to parse raw_metrics payload, using flat columns");
                }
            }
        }

        resolved.avg_decision_latency = resolved
            .avg_decision_latency
            .or(self.avg_decision_latency);
        resolved.revision_rate = resolved.revision_rate.or(self.revision_rate);
        resolved.path_efficiency = resolved.path_efficiency.or(self.path_efficiency);
        resolved
    }
}

/// Read `key` from a JSON object as a number. `null` counts as 0.0 (the
/// persistence layer writes nulls for unrecorded metrics); anything else
/// non-numeric counts as absent.
fn number_field(value: &serde_json::Value, key: &str) -> Option<f64> {
    match value.get(key) {
        Some(serde_json::Value::Null) => Some(0.0),
        Some(v) => v.as_f64(),
        None => None,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
