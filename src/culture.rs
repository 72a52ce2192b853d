//! Cultural modifier table — per-culture weight adjustments and archetype names.
//!
//! The same raw behavior reads differently across cultural contexts: long
//! deliberation may be the norm rather than evidence of analyticity, frequent
//! revision may signal craft rather than confusion. The table corrects for
//! that with small additive adjustments per trait, plus culture-local
//! archetype display names.
//!
//! The table is loaded once at process start and never mutated afterwards —
//! it may be read concurrently from any number of threads without
//! synchronisation.
//!
//! # Invariants
//!
//! - **PC-003**: `lookup_or_default` is total — an unknown culture key
//!   silently resolves to identity modifiers, never an error.
//! - **PC-004**: modifiers adjust each trait independently; no
//!   renormalisation of `Logic + Intuition` is applied after adjustment.
//!
//! # File format
//!
//! ```json
//! {
//!   "cultures": {
//!     "east_asian": {
//!       "latency_interpretation": { "logic_boost": 0.05, "intuition_reduction": 0.05 },
//!       "revision_interpretation": { "complexity_boost": 0.1 },
//!       "efficiency_interpretation": { "fluidity_boost": 0.0 },
//!       "archetype_mappings": {
//!         "high_logic_high_complexity": "Strategic Sage"
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Missing groups default to identity; missing archetype keys fall back to
//! `"Balanced & Steady"`.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::weights::TraitWeights;

/// Label returned when a culture provides no mapping for an archetype bucket.
pub const FALLBACK_ARCHETYPE: &str = "Balanced & Steady";

// ─── Modifier groups ────────────────────────────────────────────────────────

/// How decision latency should be re-weighted for a culture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyInterpretation {
    /// Additive boost applied to the Logic weight.
    pub logic_boost: f64,
    /// Subtractive adjustment applied to the Intuition weight.
    pub intuition_reduction: f64,
}

/// How revision frequency should be re-weighted for a culture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevisionInterpretation {
    /// Additive boost applied to the Complexity weight.
    pub complexity_boost: f64,
}

/// How path efficiency should be re-weighted for a culture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EfficiencyInterpretation {
    /// Additive boost applied to the Fluidity weight.
    pub fluidity_boost: f64,
}

// ─── Archetype buckets ──────────────────────────────────────────────────────

/// The three weight buckets a culture maps to display names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchetypeBucket {
    /// Logic > 0.6 and Complexity > 0.6.
    HighLogicHighComplexity,
    /// Intuition > 0.6 and Fluidity > 0.6.
    HighIntuitionHighFluidity,
    /// Everything else.
    Balanced,
}

impl ArchetypeBucket {
    /// Classify a weight vector into its archetype bucket.
    pub fn classify(weights: &TraitWeights) -> Self {
        if weights.logic > 0.6 && weights.complexity > 0.6 {
            ArchetypeBucket::HighLogicHighComplexity
        } else if weights.intuition > 0.6 && weights.fluidity > 0.6 {
            ArchetypeBucket::HighIntuitionHighFluidity
        } else {
            ArchetypeBucket::Balanced
        }
    }
}

// ─── CulturalProfile ────────────────────────────────────────────────────────

/// Per-culture record: the three modifier groups and the archetype name map.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CulturalProfile {
    /// Latency re-weighting for this culture.
    pub latency_interpretation: LatencyInterpretation,
    /// Revision re-weighting for this culture.
    pub revision_interpretation: RevisionInterpretation,
    /// Efficiency re-weighting for this culture.
    pub efficiency_interpretation: EfficiencyInterpretation,
    /// Bucket → culture-local archetype display name.
    pub archetype_mappings: HashMap<ArchetypeBucket, String>,
}

impl CulturalProfile {
    /// The identity profile: no-op modifiers, no archetype overrides.
    pub fn identity() -> Self {
        Self::default()
    }

    /// `true` when every modifier is zero.
    pub fn is_identity(&self) -> bool {
        self.latency_interpretation.logic_boost == 0.0
            && self.latency_interpretation.intuition_reduction == 0.0
            && self.revision_interpretation.complexity_boost == 0.0
            && self.efficiency_interpretation.fluidity_boost == 0.0
    }

    /// Apply this culture's modifiers to a weight vector (PC-004).
    ///
    /// Each trait is adjusted additively and reclamped to [0.0, 1.0]
    /// independently; `Logic + Intuition` is not renormalised.
    pub fn apply(&self, weights: &TraitWeights) -> TraitWeights {
        TraitWeights {
            logic: weights.logic + self.latency_interpretation.logic_boost,
            intuition: weights.intuition - self.latency_interpretation.intuition_reduction,
            fluidity: weights.fluidity + self.efficiency_interpretation.fluidity_boost,
            complexity: weights.complexity + self.revision_interpretation.complexity_boost,
        }
        .clamped()
    }

    /// Resolve the culture-local archetype name for a weight vector.
    ///
    /// Falls back to [`FALLBACK_ARCHETYPE`] when the bucket has no mapping.
    pub fn archetype_for(&self, weights: &TraitWeights) -> &str {
        let bucket = ArchetypeBucket::classify(weights);
        self.archetype_mappings
            .get(&bucket)
            .map_or(FALLBACK_ARCHETYPE, String::as_str)
    }
}

// ─── CulturalTable ──────────────────────────────────────────────────────────

/// On-disk shape of the cultural table file.
#[derive(Deserialize)]
struct CulturalTableFile {
    cultures: HashMap<String, CulturalProfile>,
}

/// The full cultural modifier table, keyed by culture id.
///
/// Read-only for the lifetime of the process. Lookup is total (PC-003):
/// an unknown key resolves to the identity profile.
#[derive(Clone, Debug)]
pub struct CulturalTable {
    cultures: HashMap<String, CulturalProfile>,
    fallback: CulturalProfile,
}

impl CulturalTable {
    /// Build a table from explicit culture entries.
    ///
    /// A `"default"` entry is added with identity modifiers if absent.
    pub fn new(mut cultures: HashMap<String, CulturalProfile>) -> Self {
        cultures
            .entry("default".to_string())
            .or_insert_with(CulturalProfile::identity);
        Self {
            cultures,
            fallback: CulturalProfile::identity(),
        }
    }

    /// The built-in table shipped with the crate.
    ///
    /// Carries `default` (identity) plus three non-identity cultures with
    /// conservative modifier magnitudes.
    pub fn builtin() -> Self {
        let mut cultures = HashMap::new();

        cultures.insert("default".to_string(), CulturalProfile::identity());

        cultures.insert(
            "east_asian".to_string(),
            CulturalProfile {
                latency_interpretation: LatencyInterpretation {
                    logic_boost: 0.05,
                    intuition_reduction: 0.05,
                },
                revision_interpretation: RevisionInterpretation {
                    complexity_boost: 0.10,
                },
                efficiency_interpretation: EfficiencyInterpretation { fluidity_boost: 0.0 },
                archetype_mappings: HashMap::from([
                    (
                        ArchetypeBucket::HighLogicHighComplexity,
                        "Strategic Sage".to_string(),
                    ),
                    (
                        ArchetypeBucket::HighIntuitionHighFluidity,
                        "Flowing River".to_string(),
                    ),
                    (ArchetypeBucket::Balanced, "Balanced Harmony".to_string()),
                ]),
            },
        );

        cultures.insert(
            "western".to_string(),
            CulturalProfile {
                latency_interpretation: LatencyInterpretation::default(),
                revision_interpretation: RevisionInterpretation::default(),
                efficiency_interpretation: EfficiencyInterpretation {
                    fluidity_boost: 0.05,
                },
                archetype_mappings: HashMap::from([
                    (
                        ArchetypeBucket::HighLogicHighComplexity,
                        "Systems Architect".to_string(),
                    ),
                    (
                        ArchetypeBucket::HighIntuitionHighFluidity,
                        "Creative Navigator".to_string(),
                    ),
                    (ArchetypeBucket::Balanced, "Steady Generalist".to_string()),
                ]),
            },
        );

        cultures.insert(
            "nordic".to_string(),
            CulturalProfile {
                latency_interpretation: LatencyInterpretation {
                    logic_boost: 0.03,
                    intuition_reduction: 0.0,
                },
                revision_interpretation: RevisionInterpretation {
                    complexity_boost: 0.05,
                },
                efficiency_interpretation: EfficiencyInterpretation {
                    fluidity_boost: 0.03,
                },
                archetype_mappings: HashMap::from([
                    (
                        ArchetypeBucket::HighLogicHighComplexity,
                        "Quiet Strategist".to_string(),
                    ),
                    (
                        ArchetypeBucket::HighIntuitionHighFluidity,
                        "Open Explorer".to_string(),
                    ),
                    (ArchetypeBucket::Balanced, "Grounded Wanderer".to_string()),
                ]),
            },
        );

        Self::new(cultures)
    }

    /// Parse a table from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let file: CulturalTableFile = serde_json::from_str(json)?;
        Ok(Self::new(file.cultures))
    }

    /// Load a table from a JSON file on disk.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Total lookup (PC-003): the profile for `key`, or identity modifiers
    /// when the key is unknown.
    pub fn lookup_or_default(&self, key: &str) -> &CulturalProfile {
        match self.cultures.get(key) {
            Some(profile) => profile,
            None => {
                debug!(culture = key, "unknown culture key, using identity modifiers");
                self.cultures.get("default").unwrap_or(&self.fallback)
            }
        }
    }

    /// `true` when `key` names a configured culture.
    pub fn contains(&self, key: &str) -> bool {
        self.cultures.contains_key(key)
    }

    /// All configured culture keys, sorted for stable output.
    pub fn available_cultures(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.cultures.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl Default for CulturalTable {
    fn default() -> Self {
        Self::builtin()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
