//! Lane total with Ace-optimized scoring (§4.2).

use crate::card::{Card, Rank};

/// Sum base values, then downgrade Aces from 11 to 1 one at a time — never
/// more than necessary — until the total is at most 21 or no upgraded Ace
/// remains.
pub fn lane_total(cards: &[Card]) -> u32 {
    let mut total: u32 = cards.iter().map(|c| c.rank.base_value()).sum();
    let mut aces_as_eleven = cards.iter().filter(|c| c.rank.is_ace()).count();

    while total > 21 && aces_as_eleven > 0 {
        total -= 10;
        aces_as_eleven -= 1;
    }

    total
}
