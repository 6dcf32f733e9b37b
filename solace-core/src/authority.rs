//! Authority escalation exhaustion sentinel.
//!
//! Detects dead-end or circular escalation paths before Solace hands a
//! decision further up its authority chain. Exhaustion is a normal, expected
//! outcome and is returned as data, never as an error; the caller decides
//! whether to halt, degrade, or refuse.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Terminal state an exhausted escalation lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerminalState {
    /// Unrecoverable structural failure; no further reasoning is safe.
    /// Callers must treat this as fatal and log it.
    Halt,
    /// The depth budget was legitimately spent. Degrade gracefully.
    SafeMode,
    /// There was never a valid path to begin with. Refuse politely.
    DeadEndRefusal,
}

/// Why the sentinel declared the path exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetectionReason {
    NoValidAuthority,
    CircularEscalation,
    SaturatedEscalation,
}

/// Outcome of one escalation-path evaluation.
///
/// Stateless: nothing persists between calls, and identical inputs always
/// produce identical results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExhaustionResult {
    pub exhausted: bool,
    pub terminal_state: Option<TerminalState>,
    pub detection_reason: Option<DetectionReason>,
}

impl ExhaustionResult {
    fn terminal(state: TerminalState, reason: DetectionReason) -> Self {
        Self {
            exhausted: true,
            terminal_state: Some(state),
            detection_reason: Some(reason),
        }
    }

    fn not_exhausted() -> Self {
        Self {
            exhausted: false,
            terminal_state: None,
            detection_reason: None,
        }
    }

    /// Whether the caller must stop reasoning entirely.
    pub fn is_fatal(&self) -> bool {
        self.terminal_state == Some(TerminalState::Halt)
    }
}

/// Evaluate an already-visited escalation path against a depth budget.
///
/// The check order is load-bearing: invalid budget, then cycle, then
/// saturation, then empty path. Reordering changes which reason wins when
/// several conditions hold at once (an empty path with a zero budget must
/// report the budget, not the emptiness).
pub fn detect_authority_exhaustion<S: AsRef<str>>(path: &[S], max_depth: usize) -> ExhaustionResult {
    if max_depth == 0 {
        return ExhaustionResult::terminal(
            TerminalState::Halt,
            DetectionReason::NoValidAuthority,
        );
    }

    // Scan in path order so the first repeat wins deterministically.
    let mut seen = HashSet::new();
    for authority in path {
        if !seen.insert(authority.as_ref()) {
            return ExhaustionResult::terminal(
                TerminalState::Halt,
                DetectionReason::CircularEscalation,
            );
        }
    }

    if path.len() >= max_depth {
        return ExhaustionResult::terminal(
            TerminalState::SafeMode,
            DetectionReason::SaturatedEscalation,
        );
    }

    // Checked last so emptiness cannot mask an invalid depth budget.
    if path.is_empty() {
        return ExhaustionResult::terminal(
            TerminalState::DeadEndRefusal,
            DetectionReason::NoValidAuthority,
        );
    }

    ExhaustionResult::not_exhausted()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_halts() {
        let result = detect_authority_exhaustion(&["a", "b", "c", "b"], 10);
        assert!(result.exhausted);
        assert_eq!(result.terminal_state, Some(TerminalState::Halt));
        assert_eq!(
            result.detection_reason,
            Some(DetectionReason::CircularEscalation)
        );
        assert!(result.is_fatal());
    }

    #[test]
    fn test_saturated_path_enters_safe_mode() {
        let result = detect_authority_exhaustion(&["a", "b", "c", "d", "e"], 5);
        assert!(result.exhausted);
        assert_eq!(result.terminal_state, Some(TerminalState::SafeMode));
        assert_eq!(
            result.detection_reason,
            Some(DetectionReason::SaturatedEscalation)
        );
        assert!(!result.is_fatal());
    }

    #[test]
    fn test_empty_path_is_a_dead_end() {
        let result = detect_authority_exhaustion::<&str>(&[], 3);
        assert!(result.exhausted);
        assert_eq!(result.terminal_state, Some(TerminalState::DeadEndRefusal));
        assert_eq!(
            result.detection_reason,
            Some(DetectionReason::NoValidAuthority)
        );
    }

    #[test]
    fn test_short_clean_path_is_not_exhausted() {
        let result = detect_authority_exhaustion(&["a", "b", "c"], 5);
        assert_eq!(
            result,
            ExhaustionResult {
                exhausted: false,
                terminal_state: None,
                detection_reason: None,
            }
        );
    }

    #[test]
    fn test_zero_depth_budget_halts_even_when_empty() {
        // Precedence: the invalid budget wins over the empty-path dead end.
        let result = detect_authority_exhaustion::<&str>(&[], 0);
        assert_eq!(result.terminal_state, Some(TerminalState::Halt));
        assert_eq!(
            result.detection_reason,
            Some(DetectionReason::NoValidAuthority)
        );
    }

    #[test]
    fn test_cycle_wins_over_saturation() {
        // Path both cycles and meets the budget; the cycle check runs first.
        let result = detect_authority_exhaustion(&["a", "b", "a"], 3);
        assert_eq!(
            result.detection_reason,
            Some(DetectionReason::CircularEscalation)
        );
    }

    #[test]
    fn test_determinism_across_calls() {
        let path = ["root", "ops", "root", "exec"];
        let first = detect_authority_exhaustion(&path, 8);
        for _ in 0..10 {
            assert_eq!(detect_authority_exhaustion(&path, 8), first);
        }
    }

    #[test]
    fn test_result_serializes_in_screaming_snake_case() {
        let result = detect_authority_exhaustion(&["a", "b", "c", "b"], 10);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["exhausted"], true);
        assert_eq!(json["terminal_state"], "HALT");
        assert_eq!(json["detection_reason"], "CIRCULAR_ESCALATION");
    }
}
