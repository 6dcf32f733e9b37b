//! Outcome envelope construction.
//!
//! An envelope is structural permission, never a committed outcome: it
//! bounds what a turn may do to each resource. The concrete delta is chosen
//! later by a separate resolver (dice or narrative judgment) working inside
//! these bounds, which keeps structural authority separate from narrative
//! authority.

use crate::signals::{IntentType, RiskSignals};
use serde::{Deserialize, Serialize};

/// Stamina ceiling while carrying a minor injury.
const MINOR_INJURY_STAMINA_CAP: i32 = 7;

/// Stamina ceiling while carrying a major injury.
const MAJOR_INJURY_STAMINA_CAP: i32 = 5;

/// Injury severity of the party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InjuryLevel {
    Minor,
    Major,
    /// Unrecognized severity strings deserialize here: an unknown injury is
    /// treated as uninjured rather than rejected. This is looser than option
    /// parsing, which fails loudly; an injury default relaxes a cap instead
    /// of changing which risks the turn is exposed to.
    #[default]
    #[serde(other)]
    None,
}

impl InjuryLevel {
    /// Get the display name for this injury level.
    pub fn name(&self) -> &'static str {
        match self {
            InjuryLevel::None => "none",
            InjuryLevel::Minor => "minor",
            InjuryLevel::Major => "major",
        }
    }
}

/// Live party state supplied by the caller each turn.
///
/// Read-only input; this core never owns or mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SurvivalContext {
    pub has_shelter: bool,
    pub has_fire: bool,
    #[serde(default)]
    pub injury_level: InjuryLevel,
}

/// Inclusive bound on how much a named resource may change this turn.
///
/// `min > 0` guarantees gain, `max < 0` guarantees loss, and a range
/// spanning zero permits either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDeltaRange {
    pub min: i32,
    pub max: i32,
}

impl ResourceDeltaRange {
    /// Create a new inclusive range.
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Check whether a concrete delta falls inside the permitted bound.
    pub fn contains(&self, delta: i32) -> bool {
        delta >= self.min && delta <= self.max
    }

    /// The turn cannot fail to gain this resource.
    pub fn guarantees_gain(&self) -> bool {
        self.min > 0
    }

    /// The turn cannot avoid losing this resource.
    pub fn guarantees_loss(&self) -> bool {
        self.max < 0
    }

    /// The turn may gain or lose this resource.
    pub fn spans_zero(&self) -> bool {
        self.min <= 0 && self.max >= 0
    }
}

/// Risk tier for a turn.
///
/// Only three coarse tiers exist: fine-grained risk scores would invite
/// gameable tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Low,
    Medium,
    High,
}

impl RiskProfile {
    /// Quantize a raised-signal count (0-5) into a tier.
    pub fn from_signal_count(count: u8) -> Self {
        match count {
            0 | 1 => RiskProfile::Low,
            2 | 3 => RiskProfile::Medium,
            _ => RiskProfile::High,
        }
    }

    /// Get the display name for this tier.
    pub fn name(&self) -> &'static str {
        match self {
            RiskProfile::Low => "low",
            RiskProfile::Medium => "medium",
            RiskProfile::High => "high",
        }
    }
}

/// Ceilings the recovery mechanism must respect, independent of tier.
///
/// Injury must degrade long-run recovery potential, not just instantaneous
/// risk, so the cap layers on top of whatever positive bound the tier grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryCaps {
    /// Highest value stamina may recover to while the injury lasts.
    pub stamina_max: i32,
}

impl RecoveryCaps {
    /// The cap imposed by an injury level, if any.
    pub fn from_injury(injury: InjuryLevel) -> Option<RecoveryCaps> {
        match injury {
            InjuryLevel::None => None,
            InjuryLevel::Minor => Some(RecoveryCaps {
                stamina_max: MINOR_INJURY_STAMINA_CAP,
            }),
            InjuryLevel::Major => Some(RecoveryCaps {
                stamina_max: MAJOR_INJURY_STAMINA_CAP,
            }),
        }
    }

    /// Clamp a recovered stamina value to the cap.
    pub fn clamp_stamina(&self, stamina: i32) -> i32 {
        stamina.min(self.stamina_max)
    }
}

/// Permitted per-resource delta ranges for one turn.
///
/// Stamina is always bounded; food and fire only exist when the tier and
/// intent make them relevant. Fields are private so the ranges cannot be
/// widened after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDeltas {
    stamina: ResourceDeltaRange,
    food: Option<ResourceDeltaRange>,
    fire: Option<ResourceDeltaRange>,
}

impl ResourceDeltas {
    /// Permitted stamina change.
    pub fn stamina(&self) -> ResourceDeltaRange {
        self.stamina
    }

    /// Permitted food change, when food is in play this turn.
    pub fn food(&self) -> Option<ResourceDeltaRange> {
        self.food
    }

    /// Permitted fire change, when fire is in play this turn.
    pub fn fire(&self) -> Option<ResourceDeltaRange> {
        self.fire
    }
}

/// The structural permission for one resolved action.
///
/// Constructed fresh per turn, frozen after construction, and discarded once
/// the outcome resolver and journal have consumed it. Multiple downstream
/// consumers (narration, persistence, UI) must see identical bounds, so the
/// fields are private and only copies escape through the accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeEnvelope {
    risk_profile: RiskProfile,
    resource_deltas: ResourceDeltas,
    recovery_caps: Option<RecoveryCaps>,
    secondary_effects_allowed: bool,
}

impl OutcomeEnvelope {
    /// The risk tier this turn resolved to.
    pub fn risk_profile(&self) -> RiskProfile {
        self.risk_profile
    }

    /// Permitted resource delta ranges.
    pub fn resource_deltas(&self) -> ResourceDeltas {
        self.resource_deltas
    }

    /// Recovery ceilings imposed by injury, if any.
    pub fn recovery_caps(&self) -> Option<RecoveryCaps> {
        self.recovery_caps
    }

    /// Whether the narrator may attach secondary effects to the outcome.
    pub fn secondary_effects_allowed(&self) -> bool {
        self.secondary_effects_allowed
    }
}

/// Build the outcome envelope for a turn.
///
/// Pure function: no I/O, no randomness, no shared state. Only ever produced
/// from finite enumerations, so no runtime errors are possible.
pub fn build_outcome_envelope(
    signals: &RiskSignals,
    intent: IntentType,
    context: &SurvivalContext,
) -> OutcomeEnvelope {
    let risk_profile = RiskProfile::from_signal_count(signals.count());

    let resource_deltas = match risk_profile {
        RiskProfile::Low => ResourceDeltas {
            stamina: if intent == IntentType::Rest {
                ResourceDeltaRange::new(1, 4)
            } else {
                ResourceDeltaRange::new(0, 2)
            },
            food: if intent == IntentType::Gather {
                Some(ResourceDeltaRange::new(0, 2))
            } else {
                None
            },
            fire: None,
        },
        RiskProfile::Medium => ResourceDeltas {
            stamina: ResourceDeltaRange::new(-1, 3),
            food: if intent == IntentType::Hunt {
                Some(ResourceDeltaRange::new(-1, 5))
            } else {
                None
            },
            fire: if intent == IntentType::Tend {
                Some(ResourceDeltaRange::new(0, 2))
            } else {
                None
            },
        },
        RiskProfile::High => ResourceDeltas {
            stamina: ResourceDeltaRange::new(-4, 5),
            food: if intent == IntentType::Hunt {
                Some(ResourceDeltaRange::new(-3, 10))
            } else {
                None
            },
            // At high risk the fire is always in danger, whatever the intent.
            fire: Some(ResourceDeltaRange::new(-2, 3)),
        },
    };

    OutcomeEnvelope {
        risk_profile,
        resource_deltas,
        recovery_caps: RecoveryCaps::from_injury(context.injury_level),
        secondary_effects_allowed: risk_profile != RiskProfile::Low,
    }
}
