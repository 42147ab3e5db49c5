//! Store-and-forward async match envelope (§4.7).
//!
//! The envelope never stores a `MatchState`; the current state is always a
//! pure function of `(seed, player ids, action_log, pending_action)`
//! replayed from scratch. Resist caching `MatchState` inside the envelope —
//! replay is the correctness contract, not a performance shortcut. A caller
//! that wants to cache the derived state may do so one layer above.

use crate::action::{ActionSubmission, TurnAction, TurnActions};
use crate::config::MatchConfig;
use crate::error::AsyncApplyError;
use crate::legality::{is_legal_with_config, legal_actions_with_config};
use crate::player::PlayerId;
use crate::replay::run_replay_with_config;
use crate::resolution::resolve_with_config;
use crate::state::{initial_state_with_config, MatchState};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsyncMatchEnvelope {
    pub match_id: String,
    pub seed: u32,
    pub p1_id: PlayerId,
    pub p2_id: PlayerId,
    pub action_log: Vec<ActionSubmission>,
    pub pending_action: Option<ActionSubmission>,
    pub next_mover: PlayerId,
}

/// Snapshot of `(is_your_turn, waiting_for, game_over, winner, turn_number,
/// legal_actions_for_you_if_your_turn_else_empty)`, all derived from replay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsyncStatus {
    pub is_your_turn: bool,
    pub waiting_for: Option<PlayerId>,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
    pub turn_number: u32,
    pub legal_actions: Vec<TurnAction>,
}

pub fn create(match_id: impl Into<String>, p1_id: PlayerId, p2_id: PlayerId, seed: u32) -> AsyncMatchEnvelope {
    AsyncMatchEnvelope {
        match_id: match_id.into(),
        seed,
        p1_id: p1_id.clone(),
        p2_id,
        action_log: Vec::new(),
        pending_action: None,
        next_mover: p1_id,
    }
}

/// Reconstruct the current state by replaying the envelope's action log
/// over its initial state (does not include any pending half-turn).
pub fn replay(envelope: &AsyncMatchEnvelope) -> MatchState {
    replay_with_config(envelope, &MatchConfig::default())
}

pub fn replay_with_config(envelope: &AsyncMatchEnvelope, config: &MatchConfig) -> MatchState {
    let initial = initial_state_with_config(
        envelope.seed,
        envelope.p1_id.clone(),
        envelope.p2_id.clone(),
        config,
    );
    let turns = paired_turns(&envelope.action_log);
    run_replay_with_config(&initial, &turns, config)
}

fn paired_turns(log: &[ActionSubmission]) -> Vec<TurnActions> {
    log.chunks_exact(2)
        .map(|pair| TurnActions::new(pair[0].clone(), pair[1].clone()))
        .collect()
}

/// Transactional: on failure the envelope returned is the unchanged input.
pub fn apply(
    envelope: &AsyncMatchEnvelope,
    player_id: &PlayerId,
    action: TurnAction,
) -> Result<AsyncMatchEnvelope, (AsyncMatchEnvelope, AsyncApplyError)> {
    apply_with_config(envelope, player_id, action, &MatchConfig::default())
}

pub fn apply_with_config(
    envelope: &AsyncMatchEnvelope,
    player_id: &PlayerId,
    action: TurnAction,
    config: &MatchConfig,
) -> Result<AsyncMatchEnvelope, (AsyncMatchEnvelope, AsyncApplyError)> {
    let state = replay_with_config(envelope, config);

    if state.game_over {
        tracing::warn!(match_id = %envelope.match_id, "async_apply rejected: game over");
        return Err((envelope.clone(), AsyncApplyError::GameOver));
    }

    if player_id != &envelope.next_mover {
        tracing::warn!(match_id = %envelope.match_id, %player_id, "async_apply rejected: not your turn");
        return Err((
            envelope.clone(),
            AsyncApplyError::NotYourTurn {
                expected: envelope.next_mover.clone(),
                got: player_id.clone(),
            },
        ));
    }

    if !is_legal_with_config(&state, player_id, &action, config) {
        let legal = legal_actions_with_config(&state, player_id, config);
        tracing::warn!(match_id = %envelope.match_id, %player_id, "async_apply rejected: illegal action");
        return Err((envelope.clone(), AsyncApplyError::IllegalAction { legal }));
    }

    let mut next = envelope.clone();
    let submission = ActionSubmission::new(player_id.clone(), action);

    match &next.pending_action {
        None => {
            let opponent = opponent_of(&next, player_id);
            next.pending_action = Some(submission);
            next.next_mover = opponent;
            tracing::trace!(match_id = %next.match_id, "async_apply stored pending half-turn");
        }
        Some(pending) => {
            let pending = pending.clone();
            let turn = canonical_order(&next, pending, submission);
            let _ = resolve_with_config(&state, &turn, config);
            next.action_log.push(turn.first);
            next.action_log.push(turn.second);
            next.pending_action = None;
            next.next_mover = next.p1_id.clone();
            tracing::info!(match_id = %next.match_id, "async_apply completed turn");
        }
    }

    Ok(next)
}

fn opponent_of(envelope: &AsyncMatchEnvelope, player_id: &PlayerId) -> PlayerId {
    if player_id == &envelope.p1_id {
        envelope.p2_id.clone()
    } else {
        envelope.p1_id.clone()
    }
}

/// Assemble the completed pair in canonical `(player1, player2)` order
/// regardless of submission order.
fn canonical_order(
    envelope: &AsyncMatchEnvelope,
    a: ActionSubmission,
    b: ActionSubmission,
) -> TurnActions {
    if a.player_id == envelope.p1_id {
        TurnActions::new(a, b)
    } else {
        TurnActions::new(b, a)
    }
}

pub fn status(envelope: &AsyncMatchEnvelope, player_id: &PlayerId) -> AsyncStatus {
    status_with_config(envelope, player_id, &MatchConfig::default())
}

pub fn status_with_config(
    envelope: &AsyncMatchEnvelope,
    player_id: &PlayerId,
    config: &MatchConfig,
) -> AsyncStatus {
    let state = replay_with_config(envelope, config);
    let is_your_turn = !state.game_over && player_id == &envelope.next_mover;
    AsyncStatus {
        is_your_turn,
        waiting_for: if state.game_over { None } else { Some(envelope.next_mover.clone()) },
        game_over: state.game_over,
        winner: state.winner.clone(),
        turn_number: state.turn_number,
        legal_actions: if is_your_turn {
            legal_actions_with_config(&state, player_id, config)
        } else {
            Vec::new()
        },
    }
}

/// True iff identifiers are present, the log has even length, and replay
/// completes without violating any data-model invariant.
pub fn verify(envelope: &AsyncMatchEnvelope) -> bool {
    verify_with_config(envelope, &MatchConfig::default())
}

pub fn verify_with_config(envelope: &AsyncMatchEnvelope, config: &MatchConfig) -> bool {
    if envelope.p1_id.0.is_empty() || envelope.p2_id.0.is_empty() {
        return false;
    }
    if envelope.action_log.len() % 2 != 0 {
        return false;
    }
    let state = replay_with_config(envelope, config);
    state.check_no_duplicate_deck_queue_cards()
        && state.queue.len() <= config.queue_target_size
        && state.players.iter().all(|p| {
            p.lanes.iter().all(|l| {
                (!l.busted || l.total > 21)
                    && (l.total <= 21 || l.busted)
                    && (l.total != 21 || l.locked || l.shackled)
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (PlayerId, PlayerId) {
        (PlayerId::new("a"), PlayerId::new("b"))
    }

    #[test]
    fn create_starts_with_empty_log_and_p1_as_next_mover() {
        let (p1, p2) = ids();
        let env = create("m", p1.clone(), p2, 7);
        assert!(env.action_log.is_empty());
        assert!(env.pending_action.is_none());
        assert_eq!(env.next_mover, p1);
    }

    #[test]
    fn apply_out_of_turn_is_rejected_and_envelope_unchanged() {
        let (p1, p2) = ids();
        let env = create("m", p1, p2.clone(), 7);
        let result = apply(&env, &p2, TurnAction::Pass);
        let (unchanged, err) = result.unwrap_err();
        assert_eq!(unchanged, env);
        assert!(matches!(err, AsyncApplyError::NotYourTurn { .. }));
    }

    #[test]
    fn apply_illegal_action_is_rejected_with_legal_set() {
        let (p1, p2) = ids();
        let env = create("m", p1.clone(), p2, 7);
        // Pass is illegal at the start (other actions exist).
        let result = apply(&env, &p1, TurnAction::Pass);
        let (unchanged, err) = result.unwrap_err();
        assert_eq!(unchanged, env);
        match err {
            AsyncApplyError::IllegalAction { legal } => assert!(!legal.is_empty()),
            other => panic!("expected IllegalAction, got {other:?}"),
        }
    }

    #[test]
    fn first_submission_is_stored_pending_and_flips_next_mover() {
        let (p1, p2) = ids();
        let env = create("m", p1.clone(), p2.clone(), 7);
        let applied = apply(&env, &p1, TurnAction::Take { target_lane: 0 }).unwrap();
        assert!(applied.pending_action.is_some());
        assert_eq!(applied.next_mover, p2);
        assert!(applied.action_log.is_empty());
    }

    #[test]
    fn second_submission_resolves_the_turn_and_appends_canonical_pair() {
        let (p1, p2) = ids();
        let env = create("m", p1.clone(), p2.clone(), 7);
        let after_first = apply(&env, &p1, TurnAction::Take { target_lane: 0 }).unwrap();
        let after_second = apply(&after_first, &p2, TurnAction::Take { target_lane: 0 }).unwrap();

        assert_eq!(after_second.action_log.len(), 2);
        assert_eq!(after_second.action_log[0].player_id, p1);
        assert_eq!(after_second.action_log[1].player_id, p2);
        assert!(after_second.pending_action.is_none());
        assert_eq!(after_second.next_mover, p1);
    }

    #[test]
    fn status_reports_your_turn_and_legal_actions() {
        let (p1, p2) = ids();
        let env = create("m", p1.clone(), p2.clone(), 7);
        let s1 = status(&env, &p1);
        assert!(s1.is_your_turn);
        assert!(!s1.legal_actions.is_empty());

        let s2 = status(&env, &p2);
        assert!(!s2.is_your_turn);
        assert!(s2.legal_actions.is_empty());
        assert_eq!(s2.waiting_for, Some(p1));
    }

    #[test]
    fn verify_rejects_odd_length_logs() {
        let (p1, p2) = ids();
        let mut env = create("m", p1.clone(), p2.clone(), 7);
        env.action_log.push(ActionSubmission::new(p1, TurnAction::Pass));
        assert!(!verify(&env));
    }

    #[test]
    fn verify_accepts_a_fresh_envelope() {
        let (p1, p2) = ids();
        let env = create("m", p1, p2, 7);
        assert!(verify(&env));
    }

    #[test]
    fn rejected_apply_leaves_pending_action_untouched() {
        let (p1, p2) = ids();
        let env = apply(&create("m", p1.clone(), p2.clone(), 7), &p1, TurnAction::Take { target_lane: 0 })
            .unwrap();
        assert!(env.pending_action.is_some());
        // p1 already submitted; p1 acting again is out of turn and must not
        // disturb the pending half-turn.
        let (unchanged, err) = apply(&env, &p1, TurnAction::Take { target_lane: 1 }).unwrap_err();
        assert_eq!(unchanged, env);
        assert!(matches!(err, AsyncApplyError::NotYourTurn { .. }));
    }
}
