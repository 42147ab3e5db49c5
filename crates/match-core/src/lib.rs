//! Match core for a simultaneous-move, imperfect-information card duel.
//!
//! Deterministic simulation only: seeded shuffle, legality, resolution,
//! replay, an async store-and-forward envelope, a difficulty-tiered agent,
//! and pure post-game diagnostics. This crate is compiled to:
//! - Native (server-side match resolution and conformance testing)
//! - WASM (frontend replay and local play), behind the `wasm` feature

mod action;
mod agent;
mod async_match;
mod card;
mod config;
mod diagnostics;
mod error;
mod lane;
mod legality;
mod outcome;
mod player;
mod random;
mod replay;
mod resolution;
mod scoring;
mod state;

#[cfg(feature = "wasm")]
mod wasm;

pub use action::{ActionSubmission, TurnAction, TurnActions};
pub use agent::{choose_action, choose_action_with_config, Difficulty};
pub use async_match::{
    apply as async_apply, apply_with_config as async_apply_with_config, create as async_create,
    replay as async_replay, replay_with_config as async_replay_with_config, status as async_status,
    status_with_config as async_status_with_config, verify as async_verify,
    verify_with_config as async_verify_with_config, AsyncMatchEnvelope, AsyncStatus,
};
pub use card::{Card, CardId, Rank, Suit};
pub use config::{MatchConfig, LANE_COUNT, PLAYER_COUNT};
pub use diagnostics::{
    aggregate_draw_statistics, analyze_draw, decisiveness_metrics, decisiveness_score,
    decisiveness_score_with_config, draw_diagnostics, missed_win_opportunities, was_forced_draw,
    AggregateDrawStatistics, DecisivenessMetrics, DrawDiagnostics, DrawReason,
};
pub use error::{AsyncApplyError, MatchError};
pub use lane::Lane;
pub use legality::{is_legal, is_legal_with_config, legal_actions, legal_actions_with_config};
pub use outcome::determine_winner;
pub use player::{Player, PlayerId};
pub use random::{ordered_deck, shuffle, shuffled_deck, Prng};
pub use replay::{
    compare_replays, run_replay, run_replay_with_config, run_replay_with_history,
    run_replay_with_history_and_config, Replay,
};
pub use resolution::{resolve, resolve_with_config};
pub use scoring::lane_total;
pub use state::{initial_state, initial_state_with_config, MatchState};

#[cfg(feature = "wasm")]
pub use wasm::*;
