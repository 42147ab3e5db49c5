//! Per-player scoring lane (§3).

use crate::card::Card;
use crate::scoring::lane_total;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lane {
    pub cards: Vec<Card>,
    pub total: u32,
    pub locked: bool,
    pub busted: bool,
    pub shackled: bool,
    pub has_been_shackled: bool,
}

impl Lane {
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            total: 0,
            locked: false,
            busted: false,
            shackled: false,
            has_been_shackled: false,
        }
    }

    /// Append `card` and recompute the cached total (§4.4 step 4).
    pub fn push_card(&mut self, card: Card) {
        self.cards.push(card);
        self.total = lane_total(&self.cards);
    }

    /// Bust/21 sweep for one lane (§4.4 step 7). Shackled lanes are exempt
    /// from the automatic 21 lock; they require an explicit stand at
    /// `total >= threshold`.
    pub fn apply_bust_sweep(&mut self) {
        if self.locked {
            return;
        }
        if self.total > 21 {
            self.busted = true;
            self.locked = true;
        } else if self.total == 21 && !self.shackled {
            self.locked = true;
        }
    }

    /// Shackle this lane as the loser of a bid (§4.4 step 9). A previously
    /// locked-but-not-busted lane unlocks as part of this transition.
    pub fn shackle(&mut self) {
        self.shackled = true;
        self.has_been_shackled = true;
        if self.locked && !self.busted {
            self.locked = false;
        }
    }

    pub fn stand(&mut self) {
        self.locked = true;
    }
}

impl Default for Lane {
    fn default() -> Self {
        Self::new()
    }
}
