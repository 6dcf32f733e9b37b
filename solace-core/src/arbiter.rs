//! Turn arbitration pipeline.
//!
//! The server-side path a declared option takes each turn:
//! 1. The player declares an option kind and supplies the survival context
//! 2. Risk signals and intent are inferred from the declared kind
//! 3. The outcome envelope bounds what the turn may do to each resource
//! 4. The resolution record is appended to the journal
//!
//! The engine never commits a concrete outcome. `roll_outcome` is the
//! dice-style resolver that picks one delta inside each permitted range
//! after the envelope is sealed, keeping structural judgment separate from
//! whatever finally happens in the story.

use crate::envelope::{build_outcome_envelope, OutcomeEnvelope, SurvivalContext};
use crate::signals::{infer_signals, IntentType, OptionKind, RiskSignals};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a turn resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolutionId(Uuid);

impl ResolutionId {
    /// Create a new unique resolution ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ResolutionId {
    fn default() -> Self {
        Self::new()
    }
}

/// A declared action for the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRequest {
    /// The coarse category the player declared.
    pub option_kind: OptionKind,

    /// Current party state, read-only.
    pub context: SurvivalContext,
}

/// The immutable record of one arbitrated turn.
///
/// One record per turn goes to the journal and is never rewritten. The
/// envelope inside is sealed; everything else is the audit trail of how it
/// was derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResolution {
    /// Unique identifier.
    pub id: ResolutionId,

    /// What the player declared.
    pub option_kind: OptionKind,

    /// Signals inferred from the declaration.
    pub signals: RiskSignals,

    /// Intent inferred from the declaration.
    pub intent: IntentType,

    /// Party state at resolution time.
    pub context: SurvivalContext,

    /// The bounds this turn must stay inside.
    pub envelope: OutcomeEnvelope,

    /// Human-readable summary for the game log.
    pub narrative: String,
}

/// The arbitration engine.
///
/// Stateless: every turn is resolved solely from its own request, so any
/// number of callers may resolve concurrently.
pub struct ArbiterEngine;

impl ArbiterEngine {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a declared option into an envelope record.
    ///
    /// Pure apart from the freshly minted id; identical requests produce
    /// identical envelopes.
    pub fn resolve_turn(&self, request: &TurnRequest) -> TurnResolution {
        let (signals, intent) = infer_signals(request.option_kind);
        let envelope = build_outcome_envelope(&signals, intent, &request.context);
        let narrative = self.describe(request, intent, &envelope);

        TurnResolution {
            id: ResolutionId::new(),
            option_kind: request.option_kind,
            signals,
            intent,
            context: request.context,
            envelope,
            narrative,
        }
    }

    fn describe(
        &self,
        request: &TurnRequest,
        intent: IntentType,
        envelope: &OutcomeEnvelope,
    ) -> String {
        let deltas = envelope.resource_deltas();
        let stamina = deltas.stamina();

        let mut parts = vec![format!(
            "A {} {} is judged {} risk: stamina may shift {}..{}",
            request.option_kind.name(),
            intent.name(),
            envelope.risk_profile().name(),
            stamina.min,
            stamina.max
        )];

        if let Some(food) = deltas.food() {
            parts.push(format!("food {}..{}", food.min, food.max));
        }
        if let Some(fire) = deltas.fire() {
            parts.push(format!("fire {}..{}", fire.min, fire.max));
        }
        if let Some(caps) = envelope.recovery_caps() {
            parts.push(format!(
                "recovery capped at {} stamina ({} injury)",
                caps.stamina_max,
                request.context.injury_level.name()
            ));
        }

        let mut narrative = parts.join(", ");
        if !request.context.has_shelter {
            narrative.push_str(". The tribe has no shelter");
        }
        if !request.context.has_fire {
            narrative.push_str(". The fire is out");
        }
        narrative.push('.');
        narrative
    }
}

impl Default for ArbiterEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// A concrete outcome chosen inside an envelope's bounds.
///
/// Each delta is guaranteed to sit inside the corresponding permitted range.
/// The recovery cap is *not* applied here: it is a ceiling on the stamina
/// stat, enforced by whoever applies the delta (`RecoveryCaps::clamp_stamina`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedOutcome {
    pub stamina_delta: i32,
    pub food_delta: Option<i32>,
    pub fire_delta: Option<i32>,
    /// Whether a secondary effect fired alongside the primary outcome.
    pub secondary_effect: bool,
}

/// Pick one concrete delta per permitted range using the supplied rng.
///
/// Takes the rng by argument so tests can seed it; this is the only place in
/// the crate where randomness lives.
pub fn roll_outcome_with<R: Rng>(envelope: &OutcomeEnvelope, rng: &mut R) -> ResolvedOutcome {
    let deltas = envelope.resource_deltas();
    let stamina = deltas.stamina();

    ResolvedOutcome {
        stamina_delta: rng.gen_range(stamina.min..=stamina.max),
        food_delta: deltas.food().map(|range| rng.gen_range(range.min..=range.max)),
        fire_delta: deltas.fire().map(|range| rng.gen_range(range.min..=range.max)),
        secondary_effect: envelope.secondary_effects_allowed() && rng.gen_bool(0.5),
    }
}

/// Roll an outcome with the thread rng.
pub fn roll_outcome(envelope: &OutcomeEnvelope) -> ResolvedOutcome {
    roll_outcome_with(envelope, &mut rand::thread_rng())
}
