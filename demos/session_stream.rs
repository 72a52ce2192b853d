//! Streams a simulated user through the full pipeline.
//!
//! Ten sessions arrive one by one: the first half deliberate and analytical,
//! the second half fast and intuitive. Each session is decoded, folded into
//! the stable profile, and snapshotted; once the histories are long enough
//! the predictive routines start reporting.
//!
//! Run with:
//! ```text
//! cargo run --example session_stream
//! ```

use chrono::{Duration, Utc};
use persona_core::culture::CulturalTable;
use persona_core::decoder::decode;
use persona_core::history::{PersonalitySnapshot, SessionRecord};
use persona_core::learner::ContinuousLearner;
use persona_core::predictive::PredictiveModel;
use persona_core::report::Analysis;
use persona_core::sample::BehavioralSample;
use persona_core::weights::TraitWeights;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let table = CulturalTable::builtin();
    let learner = ContinuousLearner::default();
    let model = PredictiveModel::default();

    let mut weights = TraitWeights::neutral();
    let mut evolution: Vec<PersonalitySnapshot> = Vec::new();
    let mut sessions: Vec<SessionRecord> = Vec::new();
    let start = Utc::now() - Duration::days(10);

    for session in 0..10usize {
        let sample = simulated_sample(session);
        let decoded = decode(&sample, &table);
        weights = learner.update_weights(&weights, &decoded.traits.weights);

        let confidence = learner.compute_confidence(session + 1, 0.7);
        let archetype = learner.generate_archetype(&weights);
        evolution.push(PersonalitySnapshot::new(
            start + Duration::days(session as i64),
            weights,
            archetype.clone(),
            confidence,
            (session + 1) as u32,
        ));

        println!(
            "session {:>2}  sync {:.2}  logic {:.2}  intuition {:.2}  {}",
            session + 1,
            decoded.sync_score,
            weights.logic,
            weights.intuition,
            archetype
        );

        let record = SessionRecord::from_metrics(
            sample.decision_latency_ms(),
            sample.revision_count() as f64,
            sample.path_efficiency(),
        );
        match model.detect_stress(&sessions, &record.metrics()) {
            Analysis::Analyzed(stress) => {
                println!(
                    "            stress {:.2} ({:?})  {}",
                    stress.stress_level, stress.category, stress.recommendation
                )
            }
            Analysis::InsufficientData { sessions_needed } => {
                println!("            stress: {} more session(s) needed", sessions_needed)
            }
        }
        sessions.push(record);
    }

    println!();
    if let Analysis::Analyzed(drift) = learner.calculate_drift(&evolution) {
        println!(
            "drift over {} sessions: logic {:+.3}, intuition {:+.3}",
            drift.session_count, drift.traits.logic.delta, drift.traits.intuition.delta
        );
    }
    if let Analysis::Analyzed(trend) = model.predict_trend(&evolution) {
        println!(
            "next session: logic {:.2} ({:?}), intuition {:.2} ({:?})",
            trend.trends.logic.predicted,
            trend.trends.logic.trend,
            trend.trends.intuition.predicted,
            trend.trends.intuition.trend
        );
    }
    if let Analysis::Analyzed(evo) = model.forecast_evolution(&evolution, 30) {
        println!(
            "30-day forecast: logic {:.2}, intuition {:.2} (confidence {:.2})",
            evo.predictions.logic.predicted, evo.predictions.intuition.predicted, evo.confidence
        );
    }
}

/// Deliberate early sessions, fast and fluid later ones.
fn simulated_sample(session: usize) -> BehavioralSample {
    if session < 5 {
        BehavioralSample {
            decision_latency_ms: Some(3800.0 + 200.0 * session as f64),
            revision_count: Some(4),
            path_efficiency: Some(0.75),
            task_completion: Some(0.9),
            ..BehavioralSample::default()
        }
    } else {
        BehavioralSample {
            decision_latency_ms: Some(1200.0),
            revision_count: Some(1),
            path_efficiency: Some(0.95),
            task_completion: Some(0.95),
            ..BehavioralSample::default()
        }
    }
}
