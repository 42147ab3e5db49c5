//! Turn actions and action-log entries (§3).

use crate::player::PlayerId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnAction {
    Take { target_lane: usize },
    Burn,
    Stand { target_lane: usize },
    Pass,
    BlindHit { target_lane: usize },
    Bid { amount: u32, fallback_lane: usize },
}

impl TurnAction {
    /// Lexicographic name used by the agent's deterministic tie-break
    /// (§4.8): `(action_type_name, target_lane_if_any)`.
    pub fn type_name(&self) -> &'static str {
        match self {
            TurnAction::Bid { .. } => "bid",
            TurnAction::BlindHit { .. } => "blind_hit",
            TurnAction::Burn => "burn",
            TurnAction::Pass => "pass",
            TurnAction::Stand { .. } => "stand",
            TurnAction::Take { .. } => "take",
        }
    }

    pub fn target_lane(&self) -> Option<usize> {
        match self {
            TurnAction::Take { target_lane }
            | TurnAction::Stand { target_lane }
            | TurnAction::BlindHit { target_lane }
            | TurnAction::Bid {
                fallback_lane: target_lane,
                ..
            } => Some(*target_lane),
            TurnAction::Burn | TurnAction::Pass => None,
        }
    }
}

/// One player's submission for a turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSubmission {
    pub player_id: PlayerId,
    pub action: TurnAction,
}

impl ActionSubmission {
    pub fn new(player_id: PlayerId, action: TurnAction) -> Self {
        Self { player_id, action }
    }
}

/// The pair of simultaneous submissions resolved together for one turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnActions {
    pub first: ActionSubmission,
    pub second: ActionSubmission,
}

impl TurnActions {
    pub fn new(first: ActionSubmission, second: ActionSubmission) -> Self {
        Self { first, second }
    }

    pub fn for_player(&self, player_id: &PlayerId) -> Option<&ActionSubmission> {
        if &self.first.player_id == player_id {
            Some(&self.first)
        } else if &self.second.player_id == player_id {
            Some(&self.second)
        } else {
            None
        }
    }
}
