//! A single 52-card deck with a discard history.

use alloc::vec::Vec;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, DECK_SIZE, full_deck, is_valid_rank};
use crate::error::DeckError;

/// A shuffled deck that draws without replacement.
///
/// Cards leave the end of the draw pile and are appended to the discard pile,
/// so the two piles always partition the 52 unique cards.
#[derive(Debug, Clone)]
pub struct Deck {
    draw_pile: Vec<Card>,
    discards: Vec<Card>,
    rng: ChaCha8Rng,
}

impl Deck {
    /// Creates a freshly shuffled deck from the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let draw_pile = Self::shuffled(&mut rng);
        Self {
            draw_pile,
            discards: Vec::new(),
            rng,
        }
    }

    /// Creates a deck whose next draws are `top`, in order.
    ///
    /// The remaining cards sit underneath in shuffled order, so the deck is
    /// still a complete 52-card deck.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::DuplicateCard`] if `top` names a card twice or
    /// contains an invalid rank.
    ///
    /// # Example
    ///
    /// ```
    /// use aceyrs::{Card, Deck, Suit};
    ///
    /// let mut deck = Deck::stacked(&[Card::new(Suit::Hearts, 7)], 1).unwrap();
    /// assert_eq!(deck.draw(1).unwrap(), vec![Card::new(Suit::Hearts, 7)]);
    /// ```
    pub fn stacked(top: &[Card], seed: u64) -> Result<Self, DeckError> {
        for (index, card) in top.iter().enumerate() {
            if !is_valid_rank(card.rank) || top[..index].contains(card) {
                return Err(DeckError::DuplicateCard);
            }
        }

        let mut deck = Self::new(seed);
        deck.draw_pile.retain(|card| !top.contains(card));
        deck.draw_pile.extend(top.iter().rev());
        Ok(deck)
    }

    fn shuffled(rng: &mut ChaCha8Rng) -> Vec<Card> {
        let mut cards = full_deck();
        cards.shuffle(rng);
        cards
    }

    /// Draws `count` cards off the top of the pile, in draw order.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::InsufficientCards`] if fewer than `count` cards
    /// remain. Callers reshuffle before this can happen.
    pub fn draw(&mut self, count: usize) -> Result<Vec<Card>, DeckError> {
        let remaining = self.draw_pile.len();
        if count > remaining {
            return Err(DeckError::InsufficientCards {
                requested: count,
                remaining,
            });
        }

        let drawn: Vec<Card> = self.draw_pile.drain(remaining - count..).rev().collect();
        self.discards.extend_from_slice(&drawn);
        Ok(drawn)
    }

    /// Rebuilds and reshuffles all 52 cards and clears the discard history.
    pub fn reset(&mut self) {
        self.draw_pile = Self::shuffled(&mut self.rng);
        self.discards.clear();
    }

    /// Returns the number of undrawn cards.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.draw_pile.len()
    }

    /// Returns the undrawn cards; the last card is drawn next.
    #[must_use]
    pub fn draw_pile(&self) -> &[Card] {
        &self.draw_pile
    }

    /// Returns the cards drawn since the last reset, oldest first.
    #[must_use]
    pub fn discards(&self) -> &[Card] {
        &self.discards
    }

    /// Returns whether the draw and discard piles partition a full deck.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        if self.draw_pile.len() + self.discards.len() != DECK_SIZE {
            return false;
        }
        full_deck()
            .iter()
            .all(|card| self.draw_pile.contains(card) ^ self.discards.contains(card))
    }
}
