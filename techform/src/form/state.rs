//! Submission bookkeeping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Submission counters exposed to the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    /// Number of submit attempts.
    pub submit_count: u32,
    /// True once a submit has been attempted.
    pub is_submitted: bool,
    /// True if the latest submit passed validation.
    pub is_submit_successful: bool,
}

impl FormState {
    /// Records a submit attempt.
    pub fn record_submit(&mut self, successful: bool) {
        self.submit_count = self.submit_count.saturating_add(1);
        self.is_submitted = true;
        self.is_submit_successful = successful;
    }
}

/// Result of a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Validation passed and the completion callback ran.
    Accepted,
    /// Validation failed; errors are available for display.
    Rejected,
}

impl SubmitOutcome {
    /// Returns true if the submission was accepted.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl fmt::Display for SubmitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => write!(f, "accepted"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_submit() {
        let mut state = FormState::default();
        assert!(!state.is_submitted);

        state.record_submit(false);
        assert_eq!(state.submit_count, 1);
        assert!(state.is_submitted);
        assert!(!state.is_submit_successful);

        state.record_submit(true);
        assert_eq!(state.submit_count, 2);
        assert!(state.is_submit_successful);
    }

    #[test]
    fn test_submit_outcome_display() {
        assert_eq!(SubmitOutcome::Accepted.to_string(), "accepted");
        assert_eq!(SubmitOutcome::Rejected.to_string(), "rejected");
        assert!(SubmitOutcome::Accepted.is_accepted());
        assert!(!SubmitOutcome::Rejected.is_accepted());
    }
}
