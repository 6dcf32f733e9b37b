//! QA tests for the two decision-support sentinels.
//!
//! The authority exhaustion sentinel and the confidence decay evaluator are
//! used independently of the envelope pipeline; these tests pin down their
//! contract tables and laws.
//!
//! Run with: `cargo test -p solace-core qa_sentinels`

use solace_core::{
    compute_confidence, detect_authority_exhaustion, ConfidenceError, ConfidenceSpec,
    DetectionReason, TerminalState,
};

// =============================================================================
// AUTHORITY EXHAUSTION
// =============================================================================

#[test]
fn test_exhaustion_contract_table() {
    let cases: Vec<(Vec<&str>, usize, bool, Option<TerminalState>, Option<DetectionReason>)> = vec![
        (
            vec!["a", "b", "c", "b"],
            10,
            true,
            Some(TerminalState::Halt),
            Some(DetectionReason::CircularEscalation),
        ),
        (
            vec!["a", "b", "c", "d", "e"],
            5,
            true,
            Some(TerminalState::SafeMode),
            Some(DetectionReason::SaturatedEscalation),
        ),
        (
            vec![],
            3,
            true,
            Some(TerminalState::DeadEndRefusal),
            Some(DetectionReason::NoValidAuthority),
        ),
        (vec!["a", "b", "c"], 5, false, None, None),
    ];

    for (path, max_depth, exhausted, state, reason) in cases {
        let result = detect_authority_exhaustion(&path, max_depth);
        assert_eq!(result.exhausted, exhausted, "path {path:?}");
        assert_eq!(result.terminal_state, state, "path {path:?}");
        assert_eq!(result.detection_reason, reason, "path {path:?}");
    }
}

#[test]
fn test_exhaustion_precedence_when_conditions_overlap() {
    // Zero budget beats everything, including an empty path.
    let result = detect_authority_exhaustion::<&str>(&[], 0);
    assert_eq!(result.terminal_state, Some(TerminalState::Halt));

    // A cycle beats saturation even when the path also fills the budget.
    let result = detect_authority_exhaustion(&["x", "y", "x"], 3);
    assert_eq!(
        result.detection_reason,
        Some(DetectionReason::CircularEscalation)
    );

    // Exactly at budget, no cycle: saturation, the graceful degrade.
    let result = detect_authority_exhaustion(&["x", "y", "z"], 3);
    assert_eq!(result.terminal_state, Some(TerminalState::SafeMode));
    assert!(!result.is_fatal());
}

#[test]
fn test_exhaustion_result_is_plain_data() {
    let result = detect_authority_exhaustion(&["a"], 4);
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["exhausted"], false);
    assert!(json["terminal_state"].is_null());
    assert!(json["detection_reason"].is_null());
}

// =============================================================================
// CONFIDENCE DECAY
// =============================================================================

const ISSUED: &str = "2024-01-01T00:00:00Z";

#[test]
fn test_confidence_exactness_table() {
    // Linear: 1.0 - 0.1 * 5 days = 0.5
    let linear = compute_confidence(
        &ConfidenceSpec::linear(1.0, 0.1),
        ISSUED,
        "2024-01-06T00:00:00Z",
    )
    .unwrap();
    assert!((linear - 0.5).abs() < 1e-9);

    // Exponential: 1.0 * e^(-1 * 1 day)
    let exponential = compute_confidence(
        &ConfidenceSpec::exponential(1.0, 1.0),
        ISSUED,
        "2024-01-02T00:00:00Z",
    )
    .unwrap();
    assert!((exponential - (-1.0f64).exp()).abs() < 1e-9);

    // Step: 4 elapsed days >= 3 day threshold, drops to exactly 0.2
    let step = compute_confidence(
        &ConfidenceSpec::step(0.8, 3.0, 0.2),
        ISSUED,
        "2024-01-05T00:00:00Z",
    )
    .unwrap();
    assert_eq!(step, 0.2);
}

#[test]
fn test_confidence_clamp_and_monotonicity_laws() {
    let specs = [
        ConfidenceSpec::linear(1.0, 0.07),
        ConfidenceSpec::exponential(1.0, 0.4),
    ];
    let checkpoints = [
        "2024-01-02T00:00:00Z",
        "2024-01-15T00:00:00Z",
        "2024-03-01T00:00:00Z",
        "2025-01-01T00:00:00Z",
        "2040-01-01T00:00:00Z",
    ];

    for spec in specs {
        let mut previous = f64::INFINITY;
        for now in checkpoints {
            let current = compute_confidence(&spec, ISSUED, now).unwrap();
            assert!(
                (0.0..=1.0).contains(&current),
                "confidence {current} escaped [0,1]"
            );
            assert!(current <= previous, "confidence rose at {now}");
            previous = current;
        }
    }
}

#[test]
fn test_confidence_no_backward_time_law() {
    let later_issued = "2024-06-01T00:00:00Z";
    for spec in [
        ConfidenceSpec::linear(0.6, 0.3),
        ConfidenceSpec::exponential(0.6, 0.3),
        ConfidenceSpec::step(0.6, 0.5, 0.0),
    ] {
        // Strictly before issuance and exactly at issuance.
        for now in ["2024-01-01T00:00:00Z", later_issued] {
            let current = compute_confidence(&spec, later_issued, now).unwrap();
            assert_eq!(current, 0.6);
        }
    }
}

#[test]
fn test_confidence_failures_are_typed() {
    let spec = ConfidenceSpec::linear(1.0, 0.1);
    assert!(matches!(
        compute_confidence(&spec, "not-a-time", ISSUED),
        Err(ConfidenceError::InvalidTimestamp(_))
    ));

    let spec = ConfidenceSpec::linear(1.0, f64::NAN);
    assert!(matches!(
        compute_confidence(&spec, ISSUED, "2024-01-02T00:00:00Z"),
        Err(ConfidenceError::InvalidDecayParams(_))
    ));
}
