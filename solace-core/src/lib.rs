//! Tribe-survival risk arbitration engine for the Solace game master.
//!
//! This crate provides:
//! - Risk signal inference from the option a player declares each turn
//! - Outcome envelopes that bound what a turn may do, without committing
//!   a concrete outcome
//! - Sentinels for authority-escalation exhaustion and time-decayed
//!   claim confidence
//! - An append-only journal of resolution records
//!
//! The envelope separates "what may happen" from "what did happen": the
//! server judges structure, and a dice or narrative resolver picks the
//! concrete result inside the stated bounds.
//!
//! # Quick Start
//!
//! ```
//! use solace_core::{ArbiterEngine, OptionKind, SurvivalContext, TurnRequest};
//!
//! let engine = ArbiterEngine::new();
//! let resolution = engine.resolve_turn(&TurnRequest {
//!     option_kind: OptionKind::Risky,
//!     context: SurvivalContext::default(),
//! });
//!
//! let stamina = resolution.envelope.resource_deltas().stamina();
//! assert!(stamina.min <= stamina.max);
//! println!("{}", resolution.narrative);
//! ```

pub mod arbiter;
pub mod authority;
pub mod confidence;
pub mod envelope;
pub mod persist;
pub mod signals;

// Primary public API
pub use arbiter::{
    roll_outcome, roll_outcome_with, ArbiterEngine, ResolutionId, ResolvedOutcome, TurnRequest,
    TurnResolution,
};
pub use authority::{detect_authority_exhaustion, DetectionReason, ExhaustionResult, TerminalState};
pub use confidence::{
    compute_confidence, ConfidenceError, ConfidenceSpec, DecayCurve, DecayParams,
};
pub use envelope::{
    build_outcome_envelope, InjuryLevel, OutcomeEnvelope, RecoveryCaps, ResourceDeltaRange,
    ResourceDeltas, RiskProfile, SurvivalContext,
};
pub use persist::{journal_path, list_journals, PersistError, ResolutionJournal};
pub use signals::{infer_signals, IntentType, OptionKind, RiskSignals, SignalError};
