//! Turn resolution (§4.4): the interaction matrix, card/lane lifecycle,
//! queue refill, end-of-match detection, and winner determination.

use crate::action::{ActionSubmission, TurnAction, TurnActions};
use crate::card::Card;
use crate::config::MatchConfig;
use crate::outcome::determine_winner;
use crate::player::PlayerId;
use crate::state::MatchState;

/// What the interaction matrix decided for one player this turn.
struct PlacementPlan {
    card_to_place: Option<(Card, usize)>,
    energy_cost: u32,
}

impl PlacementPlan {
    fn none() -> Self {
        Self { card_to_place: None, energy_cost: 0 }
    }
}

/// Apply one turn to `state`, producing a new value. The input is never
/// mutated. Returns the unchanged state (structurally) if the match is
/// already over or a submission is missing — both defensive, documented
/// preconditions (§4.4 steps 1-2, §7 `PreconditionViolation`).
pub fn resolve(state: &MatchState, turn_actions: &TurnActions) -> MatchState {
    resolve_with_config(state, turn_actions, &MatchConfig::default())
}

pub fn resolve_with_config(
    state: &MatchState,
    turn_actions: &TurnActions,
    config: &MatchConfig,
) -> MatchState {
    // Step 1: terminal short-circuit.
    if state.game_over {
        return state.clone();
    }

    let mut next = state.clone();
    let turn_number = state.turn_number;

    // Step 2: action extraction (defensive; both ids must be present).
    let p1_id = next.players[0].id.clone();
    let p2_id = next.players[1].id.clone();
    let (Some(sub1), Some(sub2)) = (turn_actions.for_player(&p1_id), turn_actions.for_player(&p2_id))
    else {
        return state.clone();
    };

    let is_auction = config.is_auction_turn(turn_number);

    if is_auction {
        apply_bid_turn(&mut next, sub1, sub2, turn_number);
    } else {
        apply_standard_turn(&mut next, sub1, sub2, turn_number, config);
    }

    // Step 10: burn overheat (handled inside apply_standard_turn for the
    // acting players; auction turns have no burns).

    // Step 11: queue refill happens inside the interaction-matrix path for
    // standard turns; auction turns never touch the queue.

    // Step 12: overheat decay for every player, every turn.
    for player in &mut next.players {
        player.decay_overheat();
    }

    // Step 13 + 14: end-of-match test and winner determination.
    let both_passed = matches!(sub1.action, TurnAction::Pass) && matches!(sub2.action, TurnAction::Pass);
    let deck_and_queue_empty = next.deck.is_empty() && next.queue.is_empty();
    let all_lanes_locked = next.players.iter().all(|p| p.all_lanes_locked());

    if all_lanes_locked || deck_and_queue_empty || both_passed {
        next.game_over = true;
        next.winner = determine_winner(&next.players[0], &next.players[1]);
    }

    next.turn_number = turn_number + 1;
    tracing::debug!(turn_number, game_over = next.game_over, "resolved turn");
    next
}

fn apply_standard_turn(
    next: &mut MatchState,
    sub1: &ActionSubmission,
    sub2: &ActionSubmission,
    turn_number: u32,
    config: &MatchConfig,
) {
    let front_card = next.queue.first().cloned();

    let (plan1, plan2, consumed) = match front_card {
        Some(card) => interaction_matrix(&sub1.action, &sub2.action, card, turn_number, &sub1.player_id, &sub2.player_id),
        None => (PlacementPlan::none(), PlacementPlan::none(), false),
    };

    // Step 4 + 5: placement and energy debits.
    place_and_debit(next, &sub1.player_id, plan1);
    place_and_debit(next, &sub2.player_id, plan2);

    // Step 6: stand application.
    apply_stand(next, &sub1.player_id, &sub1.action);
    apply_stand(next, &sub2.player_id, &sub2.action);

    // Step 7: bust/21 sweep over every lane of every player (non-shackled
    // auto-lock rules; shackled lanes are exempt).
    for player in &mut next.players {
        for lane in &mut player.lanes {
            lane.apply_bust_sweep();
        }
    }

    // Step 8: blind-hit application.
    apply_blind_hit(next, &sub1.player_id, &sub1.action, config);
    apply_blind_hit(next, &sub2.player_id, &sub2.action, config);

    // Step 10: burn overheat override.
    if matches!(sub1.action, TurnAction::Burn) {
        set_overheat(next, &sub1.player_id, config.overheat_set_value);
    }
    if matches!(sub2.action, TurnAction::Burn) {
        set_overheat(next, &sub2.player_id, config.overheat_set_value);
    }

    // Step 11: queue refill.
    if consumed && !next.queue.is_empty() {
        next.queue.remove(0);
    }
    while next.queue.len() < config.queue_target_size && !next.deck.is_empty() {
        next.queue.push(next.deck.remove(0));
    }
}

fn apply_bid_turn(next: &mut MatchState, sub1: &ActionSubmission, sub2: &ActionSubmission, _turn_number: u32) {
    let TurnAction::Bid { amount: amount1, fallback_lane: fallback1 } = sub1.action else {
        return;
    };
    let TurnAction::Bid { amount: amount2, fallback_lane: fallback2 } = sub2.action else {
        return;
    };

    // Tie-break: player 1 wins.
    let (winner_id, loser_id, loser_amount, loser_fallback) = if amount1 >= amount2 {
        (sub1.player_id.clone(), sub2.player_id.clone(), amount2, fallback2)
    } else {
        (sub2.player_id.clone(), sub1.player_id.clone(), amount1, fallback1)
    };
    let _ = loser_amount; // loser pays 0 energy, per spec.

    let winner_bid = if winner_id == sub1.player_id { amount1 } else { amount2 };
    if let Some(winner) = next.player_mut(&winner_id) {
        winner.energy = winner.energy.saturating_sub(winner_bid);
    }

    if let Some(loser) = next.player_mut(&loser_id) {
        let lane = &mut loser.lanes[loser_fallback];
        if !lane.has_been_shackled {
            lane.shackle();
        }
    }
}

/// Step 3: the 2x2 (plus non-interacting) interaction matrix over the
/// front queue card. Returns each player's placement plan and whether the
/// front card was consumed.
fn interaction_matrix(
    a1: &TurnAction,
    a2: &TurnAction,
    front: Card,
    turn_number: u32,
    p1: &PlayerId,
    p2: &PlayerId,
) -> (PlacementPlan, PlacementPlan, bool) {
    let take1 = take_lane(a1);
    let take2 = take_lane(a2);
    let burn1 = matches!(a1, TurnAction::Burn);
    let burn2 = matches!(a2, TurnAction::Burn);

    match (take1, burn1, take2, burn2) {
        // take vs take: both receive the same card (identity preserved).
        (Some(lane1), _, Some(lane2), _) => (
            PlacementPlan { card_to_place: Some((front.clone(), lane1)), energy_cost: 0 },
            PlacementPlan { card_to_place: Some((front, lane2)), energy_cost: 0 },
            true,
        ),
        // burn vs burn: each pays 1 energy, no card placed.
        (None, true, None, true) => (
            PlacementPlan { card_to_place: None, energy_cost: 1 },
            PlacementPlan { card_to_place: None, energy_cost: 1 },
            true,
        ),
        // take vs burn: taker gets a fresh Ash card, burner pays energy.
        (Some(lane1), _, None, true) => (
            PlacementPlan { card_to_place: Some((Card::mint_ash(turn_number, p1), lane1)), energy_cost: 0 },
            PlacementPlan { card_to_place: None, energy_cost: 1 },
            true,
        ),
        (None, true, Some(lane2), _) => (
            PlacementPlan { card_to_place: None, energy_cost: 1 },
            PlacementPlan { card_to_place: Some((Card::mint_ash(turn_number, p2), lane2)), energy_cost: 0 },
            true,
        ),
        // one side takes, other non-interacting.
        (Some(lane1), _, None, false) => (
            PlacementPlan { card_to_place: Some((front, lane1)), energy_cost: 0 },
            PlacementPlan::none(),
            true,
        ),
        (None, false, Some(lane2), _) => (
            PlacementPlan::none(),
            PlacementPlan { card_to_place: Some((front, lane2)), energy_cost: 0 },
            true,
        ),
        // one side burns, other non-interacting.
        (None, true, None, false) => (
            PlacementPlan { card_to_place: None, energy_cost: 1 },
            PlacementPlan::none(),
            true,
        ),
        (None, false, None, true) => (
            PlacementPlan::none(),
            PlacementPlan { card_to_place: None, energy_cost: 1 },
            true,
        ),
        // neither side interacts: no card consumed.
        (None, false, None, false) => (PlacementPlan::none(), PlacementPlan::none(), false),
    }
}

fn take_lane(action: &TurnAction) -> Option<usize> {
    match action {
        TurnAction::Take { target_lane } => Some(*target_lane),
        _ => None,
    }
}

fn place_and_debit(next: &mut MatchState, player_id: &PlayerId, plan: PlacementPlan) {
    if let Some(player) = next.player_mut(player_id) {
        if let Some((card, lane_index)) = plan.card_to_place {
            player.lanes[lane_index].push_card(card);
        }
        player.energy = player.energy.saturating_sub(plan.energy_cost);
    }
}

fn apply_stand(next: &mut MatchState, player_id: &PlayerId, action: &TurnAction) {
    if let TurnAction::Stand { target_lane } = action {
        if let Some(player) = next.player_mut(player_id) {
            player.lanes[*target_lane].stand();
        }
    }
}

fn apply_blind_hit(next: &mut MatchState, player_id: &PlayerId, action: &TurnAction, config: &MatchConfig) {
    if let TurnAction::BlindHit { target_lane } = action {
        if next.deck.is_empty() {
            return;
        }
        let card = next.deck.remove(0);
        if let Some(player) = next.player_mut(player_id) {
            player.lanes[*target_lane].push_card(card);
            player.lanes[*target_lane].apply_bust_sweep();
            player.overheat = config.overheat_set_value.max(player.overheat);
        }
    }
}

fn set_overheat(next: &mut MatchState, player_id: &PlayerId, value: u32) {
    if let Some(player) = next.player_mut(player_id) {
        player.overheat = value.max(player.overheat);
    }
}
