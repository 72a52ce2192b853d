//! The typed outcome carried by every history-driven analysis.
//!
//! "Not enough data yet" is a normal, first-class result of this pipeline,
//! never an error: a fresh profile simply has not accumulated the sessions a
//! routine needs. [`Analysis`] makes that explicit at the type level, so
//! callers must handle both arms and nothing is ever thrown for a short
//! history.

use serde::{Deserialize, Serialize};

/// Outcome of a history-driven analysis routine.
///
/// Serialises with a `status` tag (`"analyzed"` / `"insufficient_data"`) so
/// the external API layer can pass reports through unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Analysis<T> {
    /// The routine had enough history and produced a report.
    Analyzed(T),
    /// The structural precondition (minimum session count) is unmet.
    InsufficientData {
        /// How many further sessions the routine needs before it can report.
        sessions_needed: usize,
    },
}

impl<T> Analysis<T> {
    /// `true` when a report was produced.
    pub fn is_analyzed(&self) -> bool {
        matches!(self, Analysis::Analyzed(_))
    }

    /// Borrow the report, if one was produced.
    pub fn as_analyzed(&self) -> Option<&T> {
        match self {
            Analysis::Analyzed(report) => Some(report),
            Analysis::InsufficientData { .. } => None,
        }
    }

    /// Consume into the report, if one was produced.
    pub fn into_analyzed(self) -> Option<T> {
        match self {
            Analysis::Analyzed(report) => Some(report),
            Analysis::InsufficientData { .. } => None,
        }
    }

    /// The number of further sessions needed, when data was insufficient.
    pub fn sessions_needed(&self) -> Option<usize> {
        match self {
            Analysis::Analyzed(_) => None,
            Analysis::InsufficientData { sessions_needed } => Some(*sessions_needed),
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Dummy {
        value: f64,
    }

    #[test]
    fn test_accessors() {
        let ok: Analysis<Dummy> = Analysis::Analyzed(Dummy { value: 0.5 });
        assert!(ok.is_analyzed());
        assert_eq!(ok.as_analyzed().unwrap().value, 0.5);
        assert_eq!(ok.sessions_needed(), None);

        let short: Analysis<Dummy> = Analysis::InsufficientData { sessions_needed: 2 };
        assert!(!short.is_analyzed());
        assert_eq!(short.sessions_needed(), Some(2));
        assert_eq!(short.into_analyzed(), None);
    }

    #[test]
    fn test_status_tagging() {
        let ok: Analysis<Dummy> = Analysis::Analyzed(Dummy { value: 1.0 });
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["status"], "analyzed");
        assert_eq!(json["value"], 1.0);

        let short: Analysis<Dummy> = Analysis::InsufficientData { sessions_needed: 3 };
        let json = serde_json::to_value(&short).unwrap();
        assert_eq!(json["status"], "insufficient_data");
        assert_eq!(json["sessions_needed"], 3);
    }
}
