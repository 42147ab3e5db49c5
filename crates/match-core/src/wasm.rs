//! WASM bindings for frontend-driven replay and play (optional, behind the
//! `wasm` feature). JSON in, JSON out, mirroring the rest of the core's
//! serialization contract so a browser client never needs a second schema.

#![cfg(feature = "wasm")]

use crate::action::{ActionSubmission, TurnAction, TurnActions};
use crate::agent::{choose_action_with_config, Difficulty};
use crate::async_match::{self, AsyncMatchEnvelope};
use crate::config::MatchConfig;
use crate::legality::{is_legal_with_config, legal_actions_with_config};
use crate::player::PlayerId;
use crate::replay::run_replay_with_config;
use crate::resolution::resolve_with_config;
use crate::state::{initial_state_with_config, MatchState};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

fn parse<T: serde::de::DeserializeOwned>(json: &str, what: &str) -> Result<T, JsError> {
    serde_json::from_str(json).map_err(|e| JsError::new(&format!("invalid {what}: {e}")))
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&format!("serialization error: {e}")))
}

#[wasm_bindgen]
pub fn wasm_initial_state(seed: u32, p1_id: String, p2_id: String) -> Result<JsValue, JsError> {
    let state = initial_state_with_config(seed, PlayerId::new(p1_id), PlayerId::new(p2_id), &MatchConfig::default());
    to_js(&state)
}

#[wasm_bindgen]
pub fn wasm_legal_actions(state_json: &str, player_id: String) -> Result<JsValue, JsError> {
    let state: MatchState = parse(state_json, "match state")?;
    let actions = legal_actions_with_config(&state, &PlayerId::new(player_id), &MatchConfig::default());
    to_js(&actions)
}

#[wasm_bindgen]
pub fn wasm_is_legal(state_json: &str, player_id: String, action_json: &str) -> Result<bool, JsError> {
    let state: MatchState = parse(state_json, "match state")?;
    let action: TurnAction = parse(action_json, "turn action")?;
    Ok(is_legal_with_config(&state, &PlayerId::new(player_id), &action, &MatchConfig::default()))
}

#[wasm_bindgen]
pub fn wasm_resolve(state_json: &str, turn_actions_json: &str) -> Result<JsValue, JsError> {
    let state: MatchState = parse(state_json, "match state")?;
    let turn: TurnActions = parse(turn_actions_json, "turn actions")?;
    let next = resolve_with_config(&state, &turn, &MatchConfig::default());
    to_js(&next)
}

#[wasm_bindgen]
pub fn wasm_run_replay(state_json: &str, turns_json: &str) -> Result<JsValue, JsError> {
    let state: MatchState = parse(state_json, "match state")?;
    let turns: Vec<TurnActions> = parse(turns_json, "turn actions list")?;
    let result = run_replay_with_config(&state, &turns, &MatchConfig::default());
    to_js(&result)
}

#[wasm_bindgen]
pub fn wasm_choose_action(state_json: &str, player_id: String, difficulty: &str, rng_seed: u32) -> Result<JsValue, JsError> {
    let state: MatchState = parse(state_json, "match state")?;
    let difficulty = match difficulty {
        "easy" => Difficulty::Easy,
        "medium" => Difficulty::Medium,
        "hard" => Difficulty::Hard,
        other => return Err(JsError::new(&format!("unknown difficulty: {other}"))),
    };
    let mut rng = StdRng::seed_from_u64(rng_seed as u64);
    let action = choose_action_with_config(&state, &PlayerId::new(player_id), difficulty, &mut rng, &MatchConfig::default())
        .map_err(|e| JsError::new(&e.to_string()))?;
    to_js(&action)
}

#[wasm_bindgen]
pub fn wasm_async_create(match_id: String, p1_id: String, p2_id: String, seed: u32) -> Result<JsValue, JsError> {
    let envelope = async_match::create(match_id, PlayerId::new(p1_id), PlayerId::new(p2_id), seed);
    to_js(&envelope)
}

#[wasm_bindgen]
pub fn wasm_async_replay(envelope_json: &str) -> Result<JsValue, JsError> {
    let envelope: AsyncMatchEnvelope = parse(envelope_json, "async envelope")?;
    let state = async_match::replay_with_config(&envelope, &MatchConfig::default());
    to_js(&state)
}

#[derive(serde::Serialize)]
struct ApplyResult {
    ok: bool,
    envelope: AsyncMatchEnvelope,
    error: Option<String>,
}

#[wasm_bindgen]
pub fn wasm_async_apply(envelope_json: &str, player_id: String, action_json: &str) -> Result<JsValue, JsError> {
    let envelope: AsyncMatchEnvelope = parse(envelope_json, "async envelope")?;
    let action: TurnAction = parse(action_json, "turn action")?;
    let result = async_match::apply_with_config(&envelope, &PlayerId::new(player_id), action, &MatchConfig::default());
    let payload = match result {
        Ok(next) => ApplyResult { ok: true, envelope: next, error: None },
        Err((unchanged, err)) => ApplyResult { ok: false, envelope: unchanged, error: Some(err.to_string()) },
    };
    to_js(&payload)
}

#[wasm_bindgen]
pub fn wasm_async_status(envelope_json: &str, player_id: String) -> Result<JsValue, JsError> {
    let envelope: AsyncMatchEnvelope = parse(envelope_json, "async envelope")?;
    let status = async_match::status_with_config(&envelope, &PlayerId::new(player_id), &MatchConfig::default());
    to_js(&status)
}

#[wasm_bindgen]
pub fn wasm_async_verify(envelope_json: &str) -> Result<bool, JsError> {
    let envelope: AsyncMatchEnvelope = parse(envelope_json, "async envelope")?;
    Ok(async_match::verify_with_config(&envelope, &MatchConfig::default()))
}

// Re-exported so a JS caller can round-trip a single submission without
// hand-assembling the JSON shape.
#[wasm_bindgen]
pub fn wasm_make_submission(player_id: String, action_json: &str) -> Result<JsValue, JsError> {
    let action: TurnAction = parse(action_json, "turn action")?;
    to_js(&ActionSubmission::new(PlayerId::new(player_id), action))
}
