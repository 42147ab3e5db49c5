//! Replay: sequential application of a turn-action list (§4.6).

use crate::action::TurnActions;
use crate::config::MatchConfig;
use crate::resolution::resolve_with_config;
use crate::state::MatchState;

/// An initial state plus an ordered list of turn-actions sufficient to
/// reproduce every subsequent state.
#[derive(Clone, Debug)]
pub struct Replay {
    pub initial_state: MatchState,
    pub turns: Vec<TurnActions>,
}

impl Replay {
    pub fn new(initial_state: MatchState, turns: Vec<TurnActions>) -> Self {
        Self { initial_state, turns }
    }
}

/// Fold `resolve` across the action list starting from `initial_state`,
/// stopping early once the match reaches a terminal state.
pub fn run_replay(initial_state: &MatchState, turns: &[TurnActions]) -> MatchState {
    run_replay_with_config(initial_state, turns, &MatchConfig::default())
}

pub fn run_replay_with_config(
    initial_state: &MatchState,
    turns: &[TurnActions],
    config: &MatchConfig,
) -> MatchState {
    let mut state = initial_state.clone();
    for turn in turns {
        if state.game_over {
            break;
        }
        state = resolve_with_config(&state, turn, config);
    }
    state
}

/// As `run_replay`, but records every intermediate value including the
/// initial state.
pub fn run_replay_with_history(initial_state: &MatchState, turns: &[TurnActions]) -> Vec<MatchState> {
    run_replay_with_history_and_config(initial_state, turns, &MatchConfig::default())
}

pub fn run_replay_with_history_and_config(
    initial_state: &MatchState,
    turns: &[TurnActions],
    config: &MatchConfig,
) -> Vec<MatchState> {
    let mut history = vec![initial_state.clone()];
    for turn in turns {
        let last = history.last().unwrap();
        if last.game_over {
            break;
        }
        history.push(resolve_with_config(last, turn, config));
    }
    history
}

/// Structural equality of the final states of two replays.
pub fn compare_replays(a: &Replay, b: &Replay) -> bool {
    run_replay(&a.initial_state, &a.turns) == run_replay(&b.initial_state, &b.turns)
}
