//! Bounded four-dimensional trait weights and per-trait containers.
//!
//! - [`TraitWeights`]: the `{Logic, Intuition, Fluidity, Complexity}` vector,
//!   every component bounded [0.0, 1.0].
//! - [`Trait`]: the four trait axes, for keyed access and iteration.
//! - [`PerTrait`]: generic four-field container used by every per-trait report.
//!
//! # Invariants
//!
//! - **PC-001**: All published trait weights are bounded [0.0, 1.0].
//! - **PC-002**: `TraitWeights` values are never mutated in place — every
//!   adjustment produces a new value.

use serde::{Deserialize, Serialize};

// ─── Rounding helpers ───────────────────────────────────────────────────────

/// Round to 2 decimal places. Every published weight uses this precision.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Round to 3 decimal places. Drift deltas are published at this precision.
pub fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

// ─── Trait axis ─────────────────────────────────────────────────────────────

/// One of the four personality trait axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trait {
    /// Deliberate, analytical decision making. Evidence: long decision latency.
    Logic,
    /// Fast, instinctive decision making. Complement of Logic at decode time.
    Intuition,
    /// Confidence and stability of movement. Evidence: path efficiency.
    Fluidity,
    /// Engagement and detail focus. Evidence: revisions plus latency.
    Complexity,
}

impl Trait {
    /// All four axes in canonical order.
    pub const ALL: [Trait; 4] = [
        Trait::Logic,
        Trait::Intuition,
        Trait::Fluidity,
        Trait::Complexity,
    ];

    /// Canonical display name ("Logic", "Intuition", "Fluidity", "Complexity").
    pub fn name(&self) -> &'static str {
        match self {
            Trait::Logic => "Logic",
            Trait::Intuition => "Intuition",
            Trait::Fluidity => "Fluidity",
            Trait::Complexity => "Complexity",
        }
    }
}

impl core::fmt::Display for Trait {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ─── TraitWeights ───────────────────────────────────────────────────────────

/// The four-dimensional personality weight vector.
///
/// Each component is bounded [0.0, 1.0] (PC-001). `Logic + Intuition` sums to
/// 1.0 only straight out of the base decode — cultural modifiers and maturity
/// calibration move the two independently and no renormalisation is applied
/// afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraitWeights {
    /// Logic weight [0.0, 1.0].
    pub logic: f64,
    /// Intuition weight [0.0, 1.0].
    pub intuition: f64,
    /// Fluidity weight [0.0, 1.0].
    pub fluidity: f64,
    /// Complexity weight [0.0, 1.0].
    pub complexity: f64,
}

impl TraitWeights {
    /// Construct from the four components, clamping each to [0.0, 1.0].
    pub fn new(logic: f64, intuition: f64, fluidity: f64, complexity: f64) -> Self {
        Self {
            logic,
            intuition,
            fluidity,
            complexity,
        }
        .clamped()
    }

    /// The neutral midpoint profile: every trait at 0.5.
    pub fn neutral() -> Self {
        Self {
            logic: 0.5,
            intuition: 0.5,
            fluidity: 0.5,
            complexity: 0.5,
        }
    }

    /// Read one component by axis.
    pub fn get(&self, trait_axis: Trait) -> f64 {
        match trait_axis {
            Trait::Logic => self.logic,
            Trait::Intuition => self.intuition,
            Trait::Fluidity => self.fluidity,
            Trait::Complexity => self.complexity,
        }
    }

    /// A copy with one component replaced (clamped to [0.0, 1.0]).
    pub fn with(&self, trait_axis: Trait, value: f64) -> Self {
        let value = value.clamp(0.0, 1.0);
        let mut next = *self;
        match trait_axis {
            Trait::Logic => next.logic = value,
            Trait::Intuition => next.intuition = value,
            Trait::Fluidity => next.fluidity = value,
            Trait::Complexity => next.complexity = value,
        }
        next
    }

    /// A copy with every component passed through `f` and reclamped.
    pub fn map(&self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self {
            logic: f(self.logic),
            intuition: f(self.intuition),
            fluidity: f(self.fluidity),
            complexity: f(self.complexity),
        }
        .clamped()
    }

    /// A copy with every component clamped to [0.0, 1.0] (PC-001).
    pub fn clamped(&self) -> Self {
        Self {
            logic: self.logic.clamp(0.0, 1.0),
            intuition: self.intuition.clamp(0.0, 1.0),
            fluidity: self.fluidity.clamp(0.0, 1.0),
            complexity: self.complexity.clamp(0.0, 1.0),
        }
    }

    /// A copy with every component rounded to 2 decimal places.
    pub fn rounded(&self) -> Self {
        self.map(round2)
    }

    /// `true` when every component lies within [0.0, 1.0].
    pub fn in_range(&self) -> bool {
        Trait::ALL
            .iter()
            .all(|&t| (0.0..=1.0).contains(&self.get(t)))
    }
}

impl Default for TraitWeights {
    fn default() -> Self {
        Self::neutral()
    }
}

// ─── PerTrait ───────────────────────────────────────────────────────────────

/// A value of type `T` for each of the four trait axes.
///
/// Used by drift, trend, and evolution reports, which carry one record per
/// trait.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerTrait<T> {
    /// Record for the Logic axis.
    pub logic: T,
    /// Record for the Intuition axis.
    pub intuition: T,
    /// Record for the Fluidity axis.
    pub fluidity: T,
    /// Record for the Complexity axis.
    pub complexity: T,
}

impl<T> PerTrait<T> {
    /// Build a record per axis from a closure.
    pub fn from_fn(mut f: impl FnMut(Trait) -> T) -> Self {
        Self {
            logic: f(Trait::Logic),
            intuition: f(Trait::Intuition),
            fluidity: f(Trait::Fluidity),
            complexity: f(Trait::Complexity),
        }
    }

    /// Read the record for one axis.
    pub fn get(&self, trait_axis: Trait) -> &T {
        match trait_axis {
            Trait::Logic => &self.logic,
            Trait::Intuition => &self.intuition,
            Trait::Fluidity => &self.fluidity,
            Trait::Complexity => &self.complexity,
        }
    }

    /// Map every per-axis record through `f`.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PerTrait<U> {
        PerTrait {
            logic: f(&self.logic),
            intuition: f(&self.intuition),
            fluidity: f(&self.fluidity),
            complexity: f(&self.complexity),
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Rounding ──────────────────────────────────────────────────────────

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.654), 0.65);
        assert_eq!(round2(0.655), 0.66);
        assert_eq!(round2(1.0), 1.0);
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(0.2004), 0.2);
        assert_eq!(round3(0.1996), 0.2);
    }

    // ── TraitWeights ──────────────────────────────────────────────────────

    #[test]
    fn test_neutral_is_midpoint() {
        let w = TraitWeights::neutral();
        for t in Trait::ALL {
            assert_eq!(w.get(t), 0.5, "{} should start neutral", t);
        }
    }

    #[test]
    fn test_new_clamps_out_of_range_components() {
        // PC-001
        let w = TraitWeights::new(1.4, -0.2, 0.5, 2.0);
        assert!(w.in_range());
        assert_eq!(w.logic, 1.0);
        assert_eq!(w.intuition, 0.0);
        assert_eq!(w.complexity, 1.0);
    }

    #[test]
    fn test_with_replaces_single_component() {
        let w = TraitWeights::neutral().with(Trait::Fluidity, 0.9);
        assert_eq!(w.fluidity, 0.9);
        assert_eq!(w.logic, 0.5);
        assert_eq!(w.intuition, 0.5);
        assert_eq!(w.complexity, 0.5);
    }

    #[test]
    fn test_map_reclamps() {
        let w = TraitWeights::neutral().map(|v| v + 0.8);
        assert!(w.in_range());
        assert_eq!(w.logic, 1.0);
    }

    #[test]
    fn test_rounded_two_decimals() {
        let w = TraitWeights::new(0.333333, 0.666666, 0.125, 0.875);
        let r = w.rounded();
        assert_eq!(r.logic, 0.33);
        assert_eq!(r.intuition, 0.67);
        assert_eq!(r.fluidity, 0.13);
        assert_eq!(r.complexity, 0.88);
    }

    #[test]
    fn test_serde_round_trip() {
        let w = TraitWeights::new(0.65, 0.35, 0.57, 0.65);
        let json = serde_json::to_string(&w).unwrap();
        let back: TraitWeights = serde_json::from_str(&json).unwrap();
        assert_eq!(w, back);
    }

    // ── PerTrait ──────────────────────────────────────────────────────────

    #[test]
    fn test_per_trait_from_fn_and_get() {
        let names = PerTrait::from_fn(|t| t.name().to_string());
        assert_eq!(names.get(Trait::Logic), "Logic");
        assert_eq!(names.get(Trait::Complexity), "Complexity");
    }

    #[test]
    fn test_per_trait_map() {
        let lengths = PerTrait::from_fn(|t| t.name().to_string()).map(|s| s.len());
        assert_eq!(lengths.logic, 5);
        assert_eq!(lengths.intuition, 9);
    }
}
