//! Immutable match state (§3) and its constructor.

use crate::card::Card;
use crate::config::MatchConfig;
use crate::player::{Player, PlayerId};
use crate::random::shuffled_deck;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub deck: Vec<Card>,
    pub queue: Vec<Card>,
    pub players: [Player; 2],
    pub turn_number: u32,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
}

impl MatchState {
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| &p.id == id)
    }

    pub fn opponent(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id != id)
    }

    /// No card identifier appears in both `deck` and `queue` (§8 invariant
    /// 5); violating this indicates an engine bug.
    pub fn check_no_duplicate_deck_queue_cards(&self) -> bool {
        let deck_ids: std::collections::HashSet<_> = self.deck.iter().map(|c| &c.id).collect();
        !self.queue.iter().any(|c| deck_ids.contains(&c.id))
    }
}

/// Construct the initial state for a fresh match with the given `seed` and
/// player ids, using the default `MatchConfig`.
pub fn initial_state(seed: u32, p1: PlayerId, p2: PlayerId) -> MatchState {
    initial_state_with_config(seed, p1, p2, &MatchConfig::default())
}

pub fn initial_state_with_config(
    seed: u32,
    p1: PlayerId,
    p2: PlayerId,
    config: &MatchConfig,
) -> MatchState {
    let (queue, deck) = shuffled_deck(seed);
    MatchState {
        deck,
        queue,
        players: [Player::new(p1, config), Player::new(p2, config)],
        turn_number: 1,
        game_over: false,
        winner: None,
    }
}
