//! Draw classification, decisiveness scoring, and cross-match aggregation
//! (§4.9). Every function here is a total pure function over a terminal
//! state (plus, optionally, its action log); none of it feeds back into
//! the engine.

use crate::action::{ActionSubmission, TurnAction};
use crate::config::MatchConfig;
use crate::error::MatchError;
use crate::outcome::{lane_outcomes, LaneOutcome};
use crate::player::PlayerId;
use crate::state::MatchState;
use std::collections::HashMap;

/// Structural classification of a terminal draw. Rules are ordered and
/// disjoint; the first one that matches wins. `OneWinEachEqualTotals` is
/// the only shape possible once two lane wins are ruled out per §4.5's
/// winner rule, so it doubles as the catch-all for any one-win-each draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawReason {
    /// Every lane ties because both players busted it.
    MutualBust,
    /// Every lane ties at exactly 21 for both players.
    BothTwentyOne,
    /// Every lane ties, for some other or mixed reason.
    AllLanesTied,
    /// One lane win each, with equal winning totals.
    OneWinEachEqualTotals,
    /// A draw shape not covered by the above; should not occur for a
    /// state that actually satisfies `determine_winner == None`, but kept
    /// as an explicit fallback rather than panicking.
    Unclassified,
}

pub fn analyze_draw(state: &MatchState) -> Result<DrawReason, MatchError> {
    if !state.game_over {
        return Err(MatchError::DiagnosticsPrecondition(
            "analyze_draw called on a non-terminal state".into(),
        ));
    }
    if state.winner.is_some() {
        return Err(MatchError::DiagnosticsPrecondition(
            "analyze_draw called on a decided match".into(),
        ));
    }

    let outcomes = lane_outcomes(&state.players[0], &state.players[1]);

    if outcomes.iter().all(|o| *o == LaneOutcome::Tie) {
        let p1 = &state.players[0];
        let p2 = &state.players[1];
        if (0..3).all(|i| p1.lanes[i].busted && p2.lanes[i].busted) {
            return Ok(DrawReason::MutualBust);
        }
        if (0..3).all(|i| p1.lanes[i].total == 21 && p2.lanes[i].total == 21) {
            return Ok(DrawReason::BothTwentyOne);
        }
        return Ok(DrawReason::AllLanesTied);
    }

    let wins = outcomes.iter().filter(|o| **o != LaneOutcome::Tie).count();
    if wins == 2 {
        return Ok(DrawReason::OneWinEachEqualTotals);
    }

    Ok(DrawReason::Unclassified)
}

/// Weighted sum over locked-lane count (0..30), the best unlocked lane's
/// proximity to 21 (0..20), locked lane-win count (0..45), and the
/// fraction of starting energy spent (0..5). Clamped to `[0, 100]` and
/// rounded to the nearest integer.
pub fn decisiveness_score(state: &MatchState, player_id: &PlayerId) -> u32 {
    decisiveness_score_with_config(state, player_id, &MatchConfig::default())
}

pub fn decisiveness_score_with_config(state: &MatchState, player_id: &PlayerId, config: &MatchConfig) -> u32 {
    let Some(player) = state.player(player_id) else {
        return 0;
    };
    let Some(opponent) = state.opponent(player_id) else {
        return 0;
    };

    let locked_count = player.lanes.iter().filter(|l| l.locked).count() as f64;
    let locked_term = locked_count * 10.0;

    let best_unlocked_pct = player
        .lanes
        .iter()
        .filter(|l| !l.locked)
        .map(|l| (l.total.min(21) as f64 / 21.0) * 100.0)
        .fold(0.0, f64::max);
    let proximity_term = best_unlocked_pct * 0.2;

    // lane_outcomes is always relative to the first argument, so a win for
    // `player` is always `FirstWins` here regardless of which of
    // state.players they are.
    let outcomes = lane_outcomes(player, opponent);
    let locked_lane_wins = outcomes
        .iter()
        .enumerate()
        .filter(|(i, o)| **o == LaneOutcome::FirstWins && player.lanes[*i].locked)
        .count() as f64;
    let wins_term = locked_lane_wins * 15.0;

    let energy_depletion = if config.initial_energy == 0 {
        0.0
    } else {
        (config.initial_energy.saturating_sub(player.energy)) as f64 / config.initial_energy as f64
    };
    let energy_term = energy_depletion * 5.0;

    let total = locked_term + proximity_term + wins_term + energy_term;
    total.round().clamp(0.0, 100.0) as u32
}

/// Counts unlocked lanes sitting at 17-20 where the opponent's same lane
/// is already locked at a lower value, plus unlocked lanes at 19-20;
/// capped at 3.
pub fn missed_win_opportunities(state: &MatchState, player_id: &PlayerId) -> u32 {
    let Some(player) = state.player(player_id) else {
        return 0;
    };
    let Some(opponent) = state.opponent(player_id) else {
        return 0;
    };

    let mut count = 0u32;
    for i in 0..3 {
        let lane = &player.lanes[i];
        if lane.locked {
            continue;
        }
        if (17..=20).contains(&lane.total) && opponent.lanes[i].locked && opponent.lanes[i].total < lane.total {
            count += 1;
        }
        if (19..=20).contains(&lane.total) {
            count += 1;
        }
    }
    count.min(3)
}

/// True iff `player_id` had no path left to influence the outcome: every
/// lane already locked, or no energy and no lane still able to act on, or
/// both deck and queue exhausted.
pub fn was_forced_draw(state: &MatchState, player_id: &PlayerId) -> bool {
    let Some(player) = state.player(player_id) else {
        return false;
    };

    let all_locked = player.all_lanes_locked();
    let no_energy_no_lane = player.energy == 0 && player.lanes.iter().all(|l| l.locked || l.busted);
    let supply_exhausted = state.deck.is_empty() && state.queue.is_empty();

    all_locked || no_energy_no_lane || supply_exhausted
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecisivenessMetrics {
    pub contestable_lanes: u32,
    pub energy_remaining: u32,
    pub forced_passes: u32,
    pub win_threats: u32,
}

/// `forced_passes` requires `action_log`; it is zero without one.
pub fn decisiveness_metrics(
    state: &MatchState,
    player_id: &PlayerId,
    action_log: Option<&[ActionSubmission]>,
) -> DecisivenessMetrics {
    let Some(player) = state.player(player_id) else {
        return DecisivenessMetrics {
            contestable_lanes: 0,
            energy_remaining: 0,
            forced_passes: 0,
            win_threats: 0,
        };
    };
    let opponent = state.opponent(player_id);

    let contestable_lanes = player.lanes.iter().filter(|l| !l.locked).count() as u32;
    let energy_remaining = player.energy;

    let forced_passes = action_log
        .map(|log| {
            log.iter()
                .filter(|entry| &entry.player_id == player_id && matches!(entry.action, TurnAction::Pass))
                .count() as u32
        })
        .unwrap_or(0);

    let win_threats = opponent
        .map(|opponent| {
            lane_outcomes(player, opponent)
                .iter()
                .filter(|o| **o == LaneOutcome::FirstWins)
                .count() as u32
        })
        .unwrap_or(0);

    DecisivenessMetrics {
        contestable_lanes,
        energy_remaining,
        forced_passes,
        win_threats,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawDiagnostics {
    pub reason: DrawReason,
    pub p1_metrics: DecisivenessMetrics,
    pub p2_metrics: DecisivenessMetrics,
}

pub fn draw_diagnostics(
    state: &MatchState,
    p1_id: &PlayerId,
    p2_id: &PlayerId,
    action_log: Option<&[ActionSubmission]>,
) -> Result<DrawDiagnostics, MatchError> {
    let reason = analyze_draw(state)?;
    Ok(DrawDiagnostics {
        reason,
        p1_metrics: decisiveness_metrics(state, p1_id, action_log),
        p2_metrics: decisiveness_metrics(state, p2_id, action_log),
    })
}

#[derive(Clone, Debug, PartialEq)]
pub struct AggregateDrawStatistics {
    pub counts_by_reason: HashMap<DrawReason, u32>,
    pub avg_contestable_lanes: f64,
    pub avg_energy_remaining: f64,
    pub avg_forced_passes: f64,
    pub avg_win_threats: f64,
}

/// Per-metric averages treat each draw as contributing the mean of its two
/// players' values; the reported figure is the arithmetic mean of those
/// per-draw means across the whole list.
pub fn aggregate_draw_statistics(draws: &[DrawDiagnostics]) -> AggregateDrawStatistics {
    let mut counts_by_reason: HashMap<DrawReason, u32> = HashMap::new();
    if draws.is_empty() {
        return AggregateDrawStatistics {
            counts_by_reason,
            avg_contestable_lanes: 0.0,
            avg_energy_remaining: 0.0,
            avg_forced_passes: 0.0,
            avg_win_threats: 0.0,
        };
    }

    let n = draws.len() as f64;
    let mut sum_contestable = 0.0;
    let mut sum_energy = 0.0;
    let mut sum_forced_passes = 0.0;
    let mut sum_win_threats = 0.0;

    for draw in draws {
        *counts_by_reason.entry(draw.reason).or_insert(0) += 1;
        sum_contestable += mean(draw.p1_metrics.contestable_lanes, draw.p2_metrics.contestable_lanes);
        sum_energy += mean(draw.p1_metrics.energy_remaining, draw.p2_metrics.energy_remaining);
        sum_forced_passes += mean(draw.p1_metrics.forced_passes, draw.p2_metrics.forced_passes);
        sum_win_threats += mean(draw.p1_metrics.win_threats, draw.p2_metrics.win_threats);
    }

    AggregateDrawStatistics {
        counts_by_reason,
        avg_contestable_lanes: sum_contestable / n,
        avg_energy_remaining: sum_energy / n,
        avg_forced_passes: sum_forced_passes / n,
        avg_win_threats: sum_win_threats / n,
    }
}

fn mean(a: u32, b: u32) -> f64 {
    (a as f64 + b as f64) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, CardId, Rank, Suit};
    use crate::state::initial_state;

    fn ids() -> (PlayerId, PlayerId) {
        (PlayerId::new("player1"), PlayerId::new("player2"))
    }

    fn push_total(state: &mut MatchState, player_id: &PlayerId, lane: usize, total: u32, busted: bool) {
        let p = state.player_mut(player_id).unwrap();
        p.lanes[lane].push_card(Card::new(CardId::new(format!("{player_id}-{lane}")), Suit::Spade, Rank::Ten));
        p.lanes[lane].total = total;
        p.lanes[lane].busted = busted;
        p.lanes[lane].locked = true;
    }

    #[test]
    fn analyze_draw_rejects_non_terminal_state() {
        let (p1, p2) = ids();
        let state = initial_state(42, p1, p2);
        assert!(matches!(analyze_draw(&state), Err(MatchError::DiagnosticsPrecondition(_))));
    }

    #[test]
    fn analyze_draw_rejects_decided_match() {
        let mut state = initial_state(42, PlayerId::new("a"), PlayerId::new("b"));
        state.game_over = true;
        state.winner = Some(PlayerId::new("a"));
        assert!(matches!(analyze_draw(&state), Err(MatchError::DiagnosticsPrecondition(_))));
    }

    #[test]
    fn mutual_bust_classification() {
        let (p1, p2) = ids();
        let mut state = initial_state(42, p1.clone(), p2.clone());
        state.game_over = true;
        for lane in 0..3 {
            push_total(&mut state, &p1, lane, 25, true);
            push_total(&mut state, &p2, lane, 24, true);
        }
        assert_eq!(analyze_draw(&state).unwrap(), DrawReason::MutualBust);
    }

    #[test]
    fn both_twenty_one_classification() {
        let (p1, p2) = ids();
        let mut state = initial_state(42, p1.clone(), p2.clone());
        state.game_over = true;
        for lane in 0..3 {
            push_total(&mut state, &p1, lane, 21, false);
            push_total(&mut state, &p2, lane, 21, false);
        }
        assert_eq!(analyze_draw(&state).unwrap(), DrawReason::BothTwentyOne);
    }

    #[test]
    fn all_lanes_tied_fallback_classification() {
        let (p1, p2) = ids();
        let mut state = initial_state(42, p1.clone(), p2.clone());
        state.game_over = true;
        for lane in 0..3 {
            push_total(&mut state, &p1, lane, 15, false);
            push_total(&mut state, &p2, lane, 15, false);
        }
        assert_eq!(analyze_draw(&state).unwrap(), DrawReason::AllLanesTied);
    }

    #[test]
    fn one_win_each_equal_totals_classification() {
        let (p1, p2) = ids();
        let mut state = initial_state(42, p1.clone(), p2.clone());
        state.game_over = true;
        push_total(&mut state, &p1, 0, 20, false);
        push_total(&mut state, &p2, 0, 18, false);
        push_total(&mut state, &p1, 1, 18, false);
        push_total(&mut state, &p2, 1, 20, false);
        push_total(&mut state, &p1, 2, 15, false);
        push_total(&mut state, &p2, 2, 15, false);
        assert_eq!(analyze_draw(&state).unwrap(), DrawReason::OneWinEachEqualTotals);
    }

    #[test]
    fn decisiveness_score_is_bounded() {
        let (p1, p2) = ids();
        let mut state = initial_state(42, p1.clone(), p2.clone());
        for lane in 0..3 {
            push_total(&mut state, &p1, lane, 21, false);
        }
        let score = decisiveness_score(&state, &p1);
        assert!(score <= 100);
        assert!(score > 0);
    }

    #[test]
    fn decisiveness_score_credits_player_two_for_their_own_locked_lane_wins() {
        let (p1, p2) = ids();
        let mut state = initial_state(42, p1.clone(), p2.clone());
        // player2 (state.players[1]) locks in three winning lanes; player1
        // is left with default (losing) lanes. The dominant side must score
        // higher than the losing side regardless of players[] ordering.
        for lane in 0..3 {
            push_total(&mut state, &p2, lane, 21, false);
        }
        let p2_score = decisiveness_score(&state, &p2);
        let p1_score = decisiveness_score(&state, &p1);
        assert!(p2_score > p1_score);
        assert!(p2_score >= 45);
    }

    #[test]
    fn missed_win_opportunities_caps_at_three() {
        let (p1, p2) = ids();
        let mut state = initial_state(42, p1.clone(), p2.clone());
        let player = state.player_mut(&p1).unwrap();
        for lane in 0..3 {
            player.lanes[lane].total = 19;
        }
        assert_eq!(missed_win_opportunities(&state, &p1), 3);
        let _ = p2;
    }

    #[test]
    fn was_forced_draw_true_when_all_lanes_locked() {
        let (p1, p2) = ids();
        let mut state = initial_state(42, p1.clone(), p2.clone());
        for lane in &mut state.player_mut(&p1).unwrap().lanes {
            lane.locked = true;
        }
        assert!(was_forced_draw(&state, &p1));
        let _ = p2;
    }

    #[test]
    fn was_forced_draw_true_when_supply_exhausted() {
        let (p1, p2) = ids();
        let mut state = initial_state(42, p1.clone(), p2.clone());
        state.deck.clear();
        state.queue.clear();
        assert!(was_forced_draw(&state, &p1));
        let _ = p2;
    }

    #[test]
    fn decisiveness_metrics_counts_forced_passes_only_with_log() {
        let (p1, p2) = ids();
        let state = initial_state(42, p1.clone(), p2.clone());
        let log = vec![
            ActionSubmission::new(p1.clone(), TurnAction::Pass),
            ActionSubmission::new(p2.clone(), TurnAction::Take { target_lane: 0 }),
            ActionSubmission::new(p1.clone(), TurnAction::Pass),
        ];
        let with_log = decisiveness_metrics(&state, &p1, Some(&log));
        assert_eq!(with_log.forced_passes, 2);
        let without_log = decisiveness_metrics(&state, &p1, None);
        assert_eq!(without_log.forced_passes, 0);
    }

    #[test]
    fn aggregate_draw_statistics_averages_across_draws() {
        let m1 = DecisivenessMetrics {
            contestable_lanes: 0,
            energy_remaining: 2,
            forced_passes: 0,
            win_threats: 1,
        };
        let m2 = DecisivenessMetrics {
            contestable_lanes: 1,
            energy_remaining: 0,
            forced_passes: 1,
            win_threats: 0,
        };
        let draw = DrawDiagnostics {
            reason: DrawReason::AllLanesTied,
            p1_metrics: m1,
            p2_metrics: m2,
        };
        let stats = aggregate_draw_statistics(&[draw.clone(), draw]);
        assert_eq!(stats.counts_by_reason.get(&DrawReason::AllLanesTied), Some(&2));
        assert_eq!(stats.avg_energy_remaining, 1.0);
        assert_eq!(stats.avg_contestable_lanes, 0.5);
    }

    #[test]
    fn aggregate_draw_statistics_empty_list_is_all_zero() {
        let stats = aggregate_draw_statistics(&[]);
        assert!(stats.counts_by_reason.is_empty());
        assert_eq!(stats.avg_energy_remaining, 0.0);
    }
}
