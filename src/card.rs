//! Card types and deck utilities.

use alloc::vec::Vec;

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suit {
    /// Hearts.
    #[cfg_attr(feature = "serde", serde(rename = "H"))]
    Hearts,
    /// Diamonds.
    #[cfg_attr(feature = "serde", serde(rename = "D"))]
    Diamonds,
    /// Clubs.
    #[cfg_attr(feature = "serde", serde(rename = "C"))]
    Clubs,
    /// Spades.
    #[cfg_attr(feature = "serde", serde(rename = "S"))]
    Spades,
}

impl Suit {
    /// All suits in deck-building order.
    pub const ALL: [Self; 4] = [Self::Hearts, Self::Diamonds, Self::Clubs, Self::Spades];
}

/// A playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    /// The rank of the card (2..=10, 11 = Jack, 12 = Queen, 13 = King, 14 = Ace).
    pub rank: u8,
    /// The suit of the card.
    pub suit: Suit,
}

impl Card {
    /// Creates a new card.
    ///
    /// Note: This function does not validate the rank. Use [`is_valid_rank`]
    /// when the rank comes from outside the crate.
    #[must_use]
    pub const fn new(suit: Suit, rank: u8) -> Self {
        Self { rank, suit }
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;

/// Lowest rank (deuce).
pub const MIN_RANK: u8 = 2;

/// Highest rank (ace, always high).
pub const MAX_RANK: u8 = 14;

/// Number of distinct ranks.
pub const RANK_COUNT: usize = 13;

/// Returns whether `rank` is a legal card rank.
#[must_use]
pub const fn is_valid_rank(rank: u8) -> bool {
    rank >= MIN_RANK && rank <= MAX_RANK
}

/// Parses a rank label such as `"7"`, `"10"`, `"J"` or `"a"`.
///
/// # Example
///
/// ```
/// use aceyrs::card::rank_from_label;
///
/// assert_eq!(rank_from_label("q"), Some(12));
/// assert_eq!(rank_from_label("10"), Some(10));
/// assert_eq!(rank_from_label("1"), None);
/// ```
#[must_use]
pub fn rank_from_label(label: &str) -> Option<u8> {
    match label.trim() {
        "J" | "j" => Some(11),
        "Q" | "q" => Some(12),
        "K" | "k" => Some(13),
        "A" | "a" => Some(14),
        digits => digits.parse::<u8>().ok().filter(|rank| (2..=10).contains(rank)),
    }
}

/// Returns the label for a rank, the inverse of [`rank_from_label`].
#[must_use]
pub const fn rank_label(rank: u8) -> &'static str {
    match rank {
        2 => "2",
        3 => "3",
        4 => "4",
        5 => "5",
        6 => "6",
        7 => "7",
        8 => "8",
        9 => "9",
        10 => "10",
        11 => "J",
        12 => "Q",
        13 => "K",
        14 => "A",
        _ => "?",
    }
}

/// Builds the 52 unique cards of a fresh deck, suit by suit, in rank order.
#[must_use]
pub fn full_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in MIN_RANK..=MAX_RANK {
            cards.push(Card::new(suit, rank));
        }
    }
    cards
}
