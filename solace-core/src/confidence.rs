//! Time-decayed confidence for asserted claims.
//!
//! Three curve families, deliberately kept apart: linear models steady
//! erosion of trust in a static claim, exponential models relevance that
//! decays in proportion to remaining confidence, and step models a hard
//! validity cutoff ("valid until next audit"). Confidence feeds audit
//! records, so evaluation fails loudly instead of guessing.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Elapsed time is measured in days; decay rates are per-day.
const MS_PER_DAY: f64 = 86_400_000.0;

/// Errors from confidence evaluation.
#[derive(Debug, Error)]
pub enum ConfidenceError {
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid decay params: {0}")]
    InvalidDecayParams(String),

    #[error("CUSTOM decay curves are not implemented")]
    CustomCurveNotImplemented,
}

/// Decay curve families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecayCurve {
    Linear,
    Exponential,
    Step,
    /// Explicit extension point. Evaluation always fails for this variant:
    /// the caller must know the path was never exercised rather than receive
    /// a placeholder number.
    Custom,
}

/// Curve parameters.
///
/// Which fields are required depends on the curve; validation happens at
/// evaluation time so a stored spec round-trips unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct DecayParams {
    /// Per-day decay rate for LINEAR and EXPONENTIAL curves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,

    /// Days until a STEP curve drops.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_days: Option<f64>,

    /// Confidence a STEP curve drops to past its threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop_to: Option<f64>,
}

/// A confidence assertion and its decay behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceSpec {
    /// Initial confidence, clamped to [0, 1] at evaluation.
    pub value: f64,

    pub decay_curve: DecayCurve,

    #[serde(default)]
    pub decay_params: DecayParams,
}

impl ConfidenceSpec {
    /// A claim whose trust erodes steadily.
    pub fn linear(value: f64, rate: f64) -> Self {
        Self {
            value,
            decay_curve: DecayCurve::Linear,
            decay_params: DecayParams {
                rate: Some(rate),
                ..DecayParams::default()
            },
        }
    }

    /// A claim whose relevance decays in proportion to what remains.
    pub fn exponential(value: f64, rate: f64) -> Self {
        Self {
            value,
            decay_curve: DecayCurve::Exponential,
            decay_params: DecayParams {
                rate: Some(rate),
                ..DecayParams::default()
            },
        }
    }

    /// A claim with a hard validity cutoff.
    pub fn step(value: f64, threshold_days: f64, drop_to: f64) -> Self {
        Self {
            value,
            decay_curve: DecayCurve::Step,
            decay_params: DecayParams {
                threshold_days: Some(threshold_days),
                drop_to: Some(drop_to),
                rate: None,
            },
        }
    }
}

/// Compute the decayed confidence of a claim at `now`.
///
/// Both timestamps are RFC 3339. A `now` at or before issuance returns the
/// clamped initial value for every curve; elapsed time never goes negative.
/// The result is always clamped to [0, 1].
pub fn compute_confidence(
    spec: &ConfidenceSpec,
    issued_at: &str,
    now: &str,
) -> Result<f64, ConfidenceError> {
    let issued = parse_rfc3339(issued_at)?;
    let now = parse_rfc3339(now)?;

    let initial = spec.value.clamp(0.0, 1.0);
    if now <= issued {
        return Ok(initial);
    }

    let elapsed_days = (now - issued).num_milliseconds() as f64 / MS_PER_DAY;

    let current = match spec.decay_curve {
        DecayCurve::Linear => initial - required_rate(&spec.decay_params)? * elapsed_days,
        DecayCurve::Exponential => {
            initial * (-required_rate(&spec.decay_params)? * elapsed_days).exp()
        }
        DecayCurve::Step => {
            let threshold = match spec.decay_params.threshold_days {
                Some(t) if t.is_finite() && t >= 0.0 => t,
                Some(t) => {
                    return Err(ConfidenceError::InvalidDecayParams(format!(
                        "threshold_days must be finite and >= 0, got {t}"
                    )))
                }
                None => {
                    return Err(ConfidenceError::InvalidDecayParams(
                        "threshold_days is required for STEP".to_string(),
                    ))
                }
            };
            let drop_to = match spec.decay_params.drop_to {
                Some(d) if d.is_finite() => d,
                Some(d) => {
                    return Err(ConfidenceError::InvalidDecayParams(format!(
                        "drop_to must be finite, got {d}"
                    )))
                }
                None => {
                    return Err(ConfidenceError::InvalidDecayParams(
                        "drop_to is required for STEP".to_string(),
                    ))
                }
            };
            if elapsed_days >= threshold {
                drop_to
            } else {
                initial
            }
        }
        DecayCurve::Custom => return Err(ConfidenceError::CustomCurveNotImplemented),
    };

    Ok(current.clamp(0.0, 1.0))
}

fn parse_rfc3339(raw: &str) -> Result<DateTime<FixedOffset>, ConfidenceError> {
    DateTime::parse_from_rfc3339(raw)
        .map_err(|_| ConfidenceError::InvalidTimestamp(raw.to_string()))
}

fn required_rate(params: &DecayParams) -> Result<f64, ConfidenceError> {
    match params.rate {
        Some(rate) if rate.is_finite() && rate >= 0.0 => Ok(rate),
        Some(rate) => Err(ConfidenceError::InvalidDecayParams(format!(
            "rate must be finite and >= 0, got {rate}"
        ))),
        None => Err(ConfidenceError::InvalidDecayParams(
            "rate is required".to_string(),
        )),
    }
}
