//! Legal action enumeration — the single source of truth (§4.3, §9).
//!
//! `is_legal` is defined purely in terms of `legal_actions`; no parallel
//! predicate is maintained, since those historically drift.

use crate::action::TurnAction;
use crate::config::{MatchConfig, LANE_COUNT};
use crate::player::{Player, PlayerId};
use crate::state::MatchState;

/// Enumerate every legal action for `player_id` in `state`.
///
/// Empty iff `state.game_over`. Otherwise at least one action; `[pass]`
/// alone iff no rule-bearing action qualifies. The order is deterministic:
/// bid (lane-ascending, amount-ascending), take (lane-ascending),
/// burn, stand (lane-ascending), blind-hit (lane-ascending).
pub fn legal_actions(state: &MatchState, player_id: &PlayerId) -> Vec<TurnAction> {
    legal_actions_with_config(state, player_id, &MatchConfig::default())
}

pub fn legal_actions_with_config(
    state: &MatchState,
    player_id: &PlayerId,
    config: &MatchConfig,
) -> Vec<TurnAction> {
    if state.game_over {
        return Vec::new();
    }

    let Some(player) = state.player(player_id) else {
        return Vec::new();
    };

    if config.is_auction_turn(state.turn_number) {
        return enumerate_bids(player);
    }

    let mut actions = Vec::new();
    enumerate_takes(state, player, &mut actions);
    enumerate_burns(state, player, &mut actions);
    enumerate_stands(player, config, &mut actions);
    enumerate_blind_hits(state, player, &mut actions);

    if actions.is_empty() {
        actions.push(TurnAction::Pass);
    }
    actions
}

fn enumerate_bids(player: &Player) -> Vec<TurnAction> {
    let mut bids = Vec::new();
    for (lane_index, lane) in player.lanes.iter().enumerate() {
        if lane.has_been_shackled {
            continue;
        }
        for amount in 0..=player.energy {
            bids.push(TurnAction::Bid {
                amount,
                fallback_lane: lane_index,
            });
        }
    }
    bids
}

fn enumerate_takes(state: &MatchState, player: &Player, actions: &mut Vec<TurnAction>) {
    if state.queue.is_empty() {
        return;
    }
    for lane_index in 0..LANE_COUNT {
        if !player.lanes[lane_index].locked {
            actions.push(TurnAction::Take { target_lane: lane_index });
        }
    }
}

fn enumerate_burns(state: &MatchState, player: &Player, actions: &mut Vec<TurnAction>) {
    if state.queue.is_empty() || player.energy < 1 || player.overheat != 0 {
        return;
    }
    actions.push(TurnAction::Burn);
}

fn enumerate_stands(player: &Player, config: &MatchConfig, actions: &mut Vec<TurnAction>) {
    for lane_index in 0..LANE_COUNT {
        let lane = &player.lanes[lane_index];
        if lane.locked {
            continue;
        }
        if lane.shackled && lane.total < config.shackle_stand_threshold {
            continue;
        }
        actions.push(TurnAction::Stand { target_lane: lane_index });
    }
}

fn enumerate_blind_hits(state: &MatchState, player: &Player, actions: &mut Vec<TurnAction>) {
    if state.deck.is_empty() || player.overheat != 0 {
        return;
    }
    for lane_index in 0..LANE_COUNT {
        let lane = &player.lanes[lane_index];
        if lane.shackled && !lane.locked {
            actions.push(TurnAction::BlindHit { target_lane: lane_index });
        }
    }
}

/// Membership in `legal_actions`, with the special case that `pass` is
/// legal iff the enumeration is exactly `[pass]`.
pub fn is_legal(state: &MatchState, player_id: &PlayerId, action: &TurnAction) -> bool {
    is_legal_with_config(state, player_id, action, &MatchConfig::default())
}

pub fn is_legal_with_config(
    state: &MatchState,
    player_id: &PlayerId,
    action: &TurnAction,
    config: &MatchConfig,
) -> bool {
    let legal = legal_actions_with_config(state, player_id, config);
    if matches!(action, TurnAction::Pass) {
        return legal == [TurnAction::Pass];
    }
    legal.contains(action)
}
