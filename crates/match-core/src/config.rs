//! Tunable constants fixed at the boundary (§6).
//!
//! Bundled into a `Copy` struct rather than hardcoded so a conformance
//! suite (or a future rule variant) can override them without forking the
//! engine. `MatchConfig::default()` matches the values named in the spec;
//! changing them breaks cross-version replay equivalence and must be
//! versioned by the caller, not by editing this default.

/// Number of scoring lanes per player.
pub const LANE_COUNT: usize = 3;

/// Number of players in a match.
pub const PLAYER_COUNT: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchConfig {
    /// Visible queue target size; refilled from the deck up to this size.
    pub queue_target_size: usize,
    /// Initial energy granted to each player.
    pub initial_energy: u32,
    /// Energy cost of a single burn action.
    pub burn_cost: u32,
    /// Overheat value set after a successful burn or blind-hit.
    pub overheat_set_value: u32,
    /// Turn numbers on which a scripted auction (bid) occurs.
    pub auction_turns: &'static [u32],
    /// Minimum total required to stand on a shackled lane.
    pub shackle_stand_threshold: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            queue_target_size: 3,
            initial_energy: 2,
            burn_cost: 1,
            overheat_set_value: 2,
            auction_turns: &[4, 8],
            shackle_stand_threshold: 20,
        }
    }
}

impl MatchConfig {
    pub fn is_auction_turn(&self, turn_number: u32) -> bool {
        self.auction_turns.contains(&turn_number)
    }
}
