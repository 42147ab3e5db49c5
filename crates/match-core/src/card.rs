//! Card identity and scoring values (§3).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a card, unique within a deck/replay. Identity, not
/// value: two cards with the same rank/suit are distinct entities.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Unique Ash-card identifier, embedding the turn number and receiving
    /// player so at most one Ash card is minted per player per turn.
    pub fn ash(turn_number: u32, player_id: &crate::player::PlayerId) -> Self {
        Self(format!("ash-turn{turn_number}-{}", player_id.0))
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Suit {
    Spade,
    Heart,
    Diamond,
    Club,
    /// Suit of a synthesized Ash card.
    None,
}

impl Suit {
    pub fn name(&self) -> &'static str {
        match self {
            Suit::Spade => "spade",
            Suit::Heart => "heart",
            Suit::Diamond => "diamond",
            Suit::Club => "club",
            Suit::None => "none",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    /// Synthesized consolation card minted only by resolution.
    Ash,
}

impl Rank {
    pub fn name(&self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Ash => "ASH",
        }
    }

    /// Base scoring value before Ace-optimization (§4.2): Ace counts as 11
    /// until downgraded, face cards are 10, Ash is 1, numerics by face value.
    pub fn base_value(&self) -> u32 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Ace => 11,
            Rank::Ash => 1,
        }
    }

    pub fn is_ace(&self) -> bool {
        matches!(self, Rank::Ace)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(id: CardId, suit: Suit, rank: Rank) -> Self {
        Self { id, suit, rank }
    }

    /// Mint a fresh Ash card for `player_id` at `turn_number` (§4.4 step 3,
    /// the take-vs-burn case).
    pub fn mint_ash(turn_number: u32, player_id: &crate::player::PlayerId) -> Self {
        Self {
            id: CardId::ash(turn_number, player_id),
            suit: Suit::None,
            rank: Rank::Ash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerId;

    #[test]
    fn ash_card_identifiers_are_unique_per_player_per_turn() {
        let p1 = PlayerId::new("p1");
        let p2 = PlayerId::new("p2");
        let a = Card::mint_ash(3, &p1);
        let b = Card::mint_ash(3, &p2);
        let c = Card::mint_ash(4, &p1);
        assert_ne!(a.id, b.id);
        assert_ne!(a.id, c.id);
        assert_eq!(a.rank, Rank::Ash);
        assert_eq!(a.suit, Suit::None);
        assert_eq!(a.rank.base_value(), 1);
    }

    #[test]
    fn base_values_match_spec() {
        assert_eq!(Rank::Ace.base_value(), 11);
        assert_eq!(Rank::King.base_value(), 10);
        assert_eq!(Rank::Queen.base_value(), 10);
        assert_eq!(Rank::Jack.base_value(), 10);
        assert_eq!(Rank::Ten.base_value(), 10);
        assert_eq!(Rank::Two.base_value(), 2);
        assert_eq!(Rank::Ash.base_value(), 1);
    }
}
