//! # persona-core
//!
//! Behavioral personality decoding — stable trait profiles earned from
//! observed interaction, not questionnaires.
//!
//! ---
//!
//! ## This is not a scoring rubric. It is a learning pipeline.
//!
//! Three stages combine to turn raw session telemetry into a profile that
//! converges over time without any self-reported input.
//!
//! **The decoder** — one session's behavioral metrics (decision latency,
//! revision rate, path efficiency) become a four-trait weight vector, every
//! component bounded [0.0, 1.0]. Cultural context shifts interpretation
//! additively; maturity calibrates how far weights stray from neutral.
//! > "One session is an observation, never a verdict."
//!
//! **The continuous learner** — each decoded session blends into the stable
//! profile by exponential moving average. Early sessions move the profile;
//! later ones refine it. Confidence grows with session volume and weight
//! stability, and drift between the first and latest snapshot is surfaced,
//! never silently absorbed.
//!
//! **The predictive model** — once enough history accumulates, per-trait
//! trends are fitted and extrapolated, stress is measured against the user's
//! own recent baseline, statistical outliers are flagged, and long-horizon
//! evolution is forecast in wall-clock days. Every routine answers
//! "not enough data yet" as a first-class result, never an error.
//!
//! ---
//!
//! ## The pipeline
//!
//! ```text
//! BehavioralSample → decode → DecodedResult → ContinuousLearner → TraitWeights
//!        ↑              ↑                            ↓
//!  session metrics  CulturalTable          PersonalitySnapshot history
//!                                                    ↓
//!                                            PredictiveModel
//!                                   (trend / stress / anomaly / evolution)
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`weights`] | [`TraitWeights`], [`Trait`], [`PerTrait`] | Bounded four-trait vector and per-trait containers |
//! | [`sample`] | [`BehavioralSample`], [`MaturityLevel`] | Tolerant session input with resolved defaults |
//! | [`culture`] | [`CulturalTable`], `CulturalProfile` | Additive cultural interpretation, total lookup |
//! | [`decoder`] | [`DecodedResult`], `Evidence` | Single-session metrics-to-traits decode |
//! | [`learner`] | [`ContinuousLearner`], `DriftReport` | EMA profile updates, drift, confidence, archetype |
//! | [`predictive`] | [`PredictiveModel`] | Trend, stress, anomaly, and evolution analytics |
//! | [`history`] | [`PersonalitySnapshot`], [`SessionRecord`] | Persisted row shapes, tolerant metric resolution |
//! | [`report`] | [`Analysis`] | `analyzed` / `insufficient_data` outcome type |
//! | [`stats`] | `LinearFit` | Mean, deviation, degree-1 least squares |
//! | [`error`] | `ConfigError` | Configuration loading failures |
//!
//! ## Boundaries
//!
//! The crate computes; collaborators own everything else. Persistence,
//! transport, and session capture live outside — histories arrive as slices,
//! reports leave as serialisable values.

#![deny(unsafe_code)]
#![deny(missing_docs)]

pub mod culture;
pub mod decoder;
pub mod error;
pub mod history;
pub mod learner;
pub mod predictive;
pub mod report;
pub mod sample;
pub mod stats;
pub mod weights;

pub use culture::CulturalTable;
pub use decoder::{decode, DecodedResult};
pub use history::{PersonalitySnapshot, SessionRecord};
pub use learner::ContinuousLearner;
pub use predictive::PredictiveModel;
pub use report::Analysis;
pub use sample::{BehavioralSample, MaturityLevel};
pub use weights::{PerTrait, Trait, TraitWeights};
