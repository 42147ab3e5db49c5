//! Seeded pseudo-random stream and deck construction (§4.1).
//!
//! Mulberry32 variant. The constants and the wrapping 32-bit arithmetic are
//! part of the cross-platform contract: any reimplementation must match the
//! test vectors below bit-for-bit.

use crate::card::{Card, CardId, Rank, Suit};

/// Single-word-state PRNG producing uniform values in `[0, 1)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prng {
    state: u32,
}

impl Prng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance the generator and return the next output in `[0, 1)`,
    /// represented as a 32-bit fraction (`numerator / 2^32`) to keep the
    /// core free of floating-point nondeterminism across platforms.
    ///
    /// Exposed as `f64` for callers that want a conventional `[0,1)` value;
    /// internal draws that need an index use `next_below` instead, which
    /// avoids the float round-trip entirely.
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32_output() as f64 / 4_294_967_296.0
    }

    /// Draw a value in `[0, bound)`. Used by the Fisher–Yates shuffle.
    pub fn next_below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        let frac = self.next_u32_output() as u64;
        ((frac * bound as u64) >> 32) as u32
    }

    fn next_u32_output(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }
}

/// Standard 52-card deck in fixed suit/rank enumeration order, unshuffled.
pub fn ordered_deck() -> Vec<Card> {
    let suits = [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club];
    let ranks = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    let mut deck = Vec::with_capacity(52);
    let mut global_index = 0u32;
    for suit in suits {
        for rank in ranks {
            let id = CardId::new(format!("{}-{}-{}", suit.name(), rank.name(), global_index));
            deck.push(Card::new(id, suit, rank));
            global_index += 1;
        }
    }
    deck
}

/// Fisher–Yates shuffle driven by `rng`, in place, from the last index down
/// to 1 as specified (`j = floor(r * (i+1))`, swap `i` and `j`).
pub fn shuffle(cards: &mut [Card], rng: &mut Prng) {
    let len = cards.len();
    if len < 2 {
        return;
    }
    for i in (1..len).rev() {
        let j = rng.next_below((i + 1) as u32) as usize;
        cards.swap(i, j);
    }
}

/// Produce a freshly shuffled 52-card deck from `seed`, split into the
/// initial 3-card queue (front) and the remaining 49-card deck.
pub fn shuffled_deck(seed: u32) -> (Vec<Card>, Vec<Card>) {
    let mut rng = Prng::new(seed);
    let mut cards = ordered_deck();
    shuffle(&mut cards, &mut rng);
    let queue: Vec<Card> = cards.drain(0..3.min(cards.len())).collect();
    (queue, cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed test vectors: first five raw 32-bit outputs for seed 0 and 42,
    /// per the exact constants in §4.1. Any conforming reimplementation
    /// must reproduce these bit-for-bit; `next_f64` is checked against the
    /// same raw values via the documented `numerator / 2^32` projection
    /// rather than asserting on float literals directly.
    #[test]
    fn seed_zero_test_vector() {
        const EXPECTED: [u32; 5] = [1144304738, 1416247, 958946056, 627933444, 2007157716];
        let mut rng = Prng::new(0);
        let raw: Vec<u32> = (0..5).map(|_| rng.next_u32_output()).collect();
        assert_eq!(raw, EXPECTED);

        let mut rng = Prng::new(0);
        let as_f64: Vec<f64> = (0..5).map(|_| rng.next_f64()).collect();
        let expected_f64: Vec<f64> = EXPECTED.iter().map(|&o| o as f64 / 4_294_967_296.0).collect();
        assert_eq!(as_f64, expected_f64);
    }

    #[test]
    fn seed_forty_two_test_vector() {
        const EXPECTED: [u32; 5] = [2581720956, 1925393290, 3661312704, 2876485805, 750819978];
        let mut rng = Prng::new(42);
        let raw: Vec<u32> = (0..5).map(|_| rng.next_u32_output()).collect();
        assert_eq!(raw, EXPECTED);

        let mut rng = Prng::new(42);
        let as_f64: Vec<f64> = (0..5).map(|_| rng.next_f64()).collect();
        let expected_f64: Vec<f64> = EXPECTED.iter().map(|&o| o as f64 / 4_294_967_296.0).collect();
        assert_eq!(as_f64, expected_f64);
    }

    #[test]
    fn determinism_same_seed_same_stream() {
        let mut a = Prng::new(42);
        let mut b = Prng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = Prng::new(1);
        let mut b = Prng::new(2);
        let seq_a: Vec<f64> = (0..10).map(|_| a.next_f64()).collect();
        let seq_b: Vec<f64> = (0..10).map(|_| b.next_f64()).collect();
        assert_ne!(seq_a, seq_b);
    }

    #[test]
    fn next_below_respects_bound() {
        let mut rng = Prng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_below(13) < 13);
        }
        assert_eq!(rng.next_below(0), 0);
    }

    #[test]
    fn ordered_deck_has_52_unique_cards_in_fixed_order() {
        let deck = ordered_deck();
        assert_eq!(deck.len(), 52);
        assert_eq!(deck[0].suit, Suit::Spade);
        assert_eq!(deck[0].rank, Rank::Two);
        assert_eq!(deck[12].rank, Rank::Ace);
        assert_eq!(deck[13].suit, Suit::Heart);
        assert_eq!(deck[51].suit, Suit::Club);
        assert_eq!(deck[51].rank, Rank::Ace);

        let mut ids: Vec<_> = deck.iter().map(|c| c.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 52);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = Prng::new(42);
        let mut deck = ordered_deck();
        let before: std::collections::HashSet<_> = deck.iter().map(|c| c.id.clone()).collect();
        shuffle(&mut deck, &mut rng);
        let after: std::collections::HashSet<_> = deck.iter().map(|c| c.id.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn shuffled_deck_determinism_and_split() {
        let (queue1, deck1) = shuffled_deck(42);
        let (queue2, deck2) = shuffled_deck(42);
        assert_eq!(queue1, queue2);
        assert_eq!(deck1, deck2);
        assert_eq!(queue1.len(), 3);
        assert_eq!(deck1.len(), 49);

        let (queue3, _) = shuffled_deck(43);
        assert_ne!(queue1, queue3);
    }
}
