//! Risk signal inference from declared options.
//!
//! Maps the coarse action category a player declares for the turn onto a
//! fixed set of structural risk signals and the intent behind the action.
//! The mapping is a pure lookup table: coarse buckets deliberately
//! over-approximate risk so the envelope builder never under-estimates
//! danger.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for option parsing.
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("Invalid option kind: {0}")]
    InvalidOptionKind(String),
}

/// The coarse action category a player declares for the turn.
///
/// Only these four categories exist; anything else is rejected at the
/// parsing boundary rather than coerced to a default, because a silently
/// substituted category would change the risk semantics of the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Safe,
    Environmental,
    Risky,
    Contested,
}

impl OptionKind {
    /// Get the display name for this option kind.
    pub fn name(&self) -> &'static str {
        match self {
            OptionKind::Safe => "safe",
            OptionKind::Environmental => "environmental",
            OptionKind::Risky => "risky",
            OptionKind::Contested => "contested",
        }
    }
}

impl FromStr for OptionKind {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "safe" => Ok(OptionKind::Safe),
            "environmental" => Ok(OptionKind::Environmental),
            "risky" => Ok(OptionKind::Risky),
            "contested" => Ok(OptionKind::Contested),
            other => Err(SignalError::InvalidOptionKind(other.to_string())),
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What the character is actually trying to do this turn.
///
/// Derived 1:1 from the declared option kind; only used to select which
/// resource categories an envelope covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentType {
    Rest,
    Hunt,
    Gather,
    Travel,
    Tend,
}

impl IntentType {
    /// Get the display name for this intent.
    pub fn name(&self) -> &'static str {
        match self {
            IntentType::Rest => "rest",
            IntentType::Hunt => "hunt",
            IntentType::Gather => "gather",
            IntentType::Travel => "travel",
            IntentType::Tend => "tend",
        }
    }
}

impl fmt::Display for IntentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The five independent structural risk signals for a turn.
///
/// Never set directly by a client; derived deterministically from the
/// declared option kind and immutable once computed for a given turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RiskSignals {
    /// The character's body is on the line.
    pub bodily_exposure: bool,
    /// Resources are committed up front and may be lost.
    pub resource_commitment: bool,
    /// The action locks the turn in; no backing out partway.
    pub time_lock_in: bool,
    /// Outcome depends on conditions the character doesn't control.
    pub environmental_volatility: bool,
    /// Losing costs more than winning gains.
    pub asymmetric_stakes: bool,
}

impl RiskSignals {
    /// Count how many signals are raised (0-5).
    pub fn count(&self) -> u8 {
        [
            self.bodily_exposure,
            self.resource_commitment,
            self.time_lock_in,
            self.environmental_volatility,
            self.asymmetric_stakes,
        ]
        .iter()
        .filter(|raised| **raised)
        .count() as u8
    }

    /// All five signals raised.
    pub fn all() -> Self {
        Self {
            bodily_exposure: true,
            resource_commitment: true,
            time_lock_in: true,
            environmental_volatility: true,
            asymmetric_stakes: true,
        }
    }
}

/// Derive the risk signals and intent for a declared option.
///
/// A fixed table, no computation and no randomness. Invalid categories
/// cannot reach this function: rejection happens when parsing `OptionKind`.
pub fn infer_signals(kind: OptionKind) -> (RiskSignals, IntentType) {
    match kind {
        OptionKind::Safe => (RiskSignals::default(), IntentType::Rest),
        OptionKind::Environmental => (
            RiskSignals {
                resource_commitment: true,
                time_lock_in: true,
                environmental_volatility: true,
                ..RiskSignals::default()
            },
            IntentType::Travel,
        ),
        OptionKind::Risky => (
            RiskSignals {
                bodily_exposure: true,
                asymmetric_stakes: true,
                ..RiskSignals::default()
            },
            IntentType::Gather,
        ),
        OptionKind::Contested => (RiskSignals::all(), IntentType::Hunt),
    }
}
