//! Error types for the simulation core.
//!
//! Failures are split along the lines of §7 of the design: bugs that must
//! never happen in a correct caller (`MatchError`) versus ordinary,
//! non-exceptional rejections from the async envelope (`AsyncApplyError`).

use crate::action::TurnAction;
use crate::player::PlayerId;
use std::fmt;

/// Internal-bug and precondition failures.
///
/// These are never expected from a correct caller driving the core through
/// its documented contract; they exist so test harnesses and debug builds
/// can fail loudly instead of silently producing a corrupt state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchError {
    /// A state reaching a user-visible entry point fails a data-model
    /// invariant (§3).
    InvariantViolation(String),
    /// Caller passed a malformed input: unknown player id, missing
    /// per-player action, or similar.
    PreconditionViolation(String),
    /// `legal_actions` returned the empty list for a non-terminal state.
    AgentContractBreach,
    /// A diagnostic was called outside its documented precondition, e.g.
    /// `analyze_draw` on a non-draw state.
    DiagnosticsPrecondition(String),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::InvariantViolation(msg) => write!(f, "invariant violation: {msg}"),
            MatchError::PreconditionViolation(msg) => write!(f, "precondition violation: {msg}"),
            MatchError::AgentContractBreach => {
                write!(f, "legal_actions returned empty for a non-terminal state")
            }
            MatchError::DiagnosticsPrecondition(msg) => {
                write!(f, "diagnostics precondition violated: {msg}")
            }
        }
    }
}

impl std::error::Error for MatchError {}

/// Ordinary, non-exceptional rejection of an `async_apply` call.
///
/// Returned as `Err` alongside the unchanged envelope; never a panic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AsyncApplyError {
    /// The match already reached a terminal state.
    GameOver,
    /// `player_id` tried to act when it was the other player's turn.
    NotYourTurn {
        expected: PlayerId,
        got: PlayerId,
    },
    /// The submitted action is not a member of `legal_actions` for this
    /// player in the current state.
    IllegalAction {
        legal: Vec<TurnAction>,
    },
}

impl fmt::Display for AsyncApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsyncApplyError::GameOver => write!(f, "game over"),
            AsyncApplyError::NotYourTurn { expected, got } => {
                write!(f, "not your turn: expected {expected}, got {got}")
            }
            AsyncApplyError::IllegalAction { legal } => {
                write!(f, "illegal action; legal actions are {legal:?}")
            }
        }
    }
}

impl std::error::Error for AsyncApplyError {}
