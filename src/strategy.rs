//! Betting strategies and the per-turn bet decision.

use alloc::vec::Vec;

use crate::card::{Card, full_deck, is_valid_rank};
use crate::deck::Deck;
use crate::error::ConfigError;
use crate::options::RoundingMode;
use crate::player::Cents;
use crate::probability::{EvEstimate, SPREAD_COUNT, bet_expected_values};

/// How much to bet for one spread.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BetMode {
    /// Bet one ante.
    #[default]
    Min,
    /// Bet the ante times this multiplier.
    AnteMultiple(f64),
    /// Bet this percentage of the pot.
    PotPercent(f64),
}

impl BetMode {
    /// The bet before capping at the pot, rounded to whole units.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "pot and ante amounts are far below f64 precision limits"
    )]
    pub fn amount(self, pot: Cents, ante: Cents, rounding: RoundingMode) -> Cents {
        match self {
            Self::Min => ante,
            Self::AnteMultiple(multiplier) => rounding.apply(ante as f64 * multiplier),
            Self::PotPercent(percent) => rounding.apply(pot as f64 * (percent / 100.0)),
        }
    }

    const fn value(self) -> f64 {
        match self {
            Self::Min => 0.0,
            Self::AnteMultiple(value) | Self::PotPercent(value) => value,
        }
    }
}

/// One [`BetMode`] per spread, indexed `0..=12`.
///
/// ```
/// use aceyrs::{BetMode, BettingStrategy};
///
/// let strategy = BettingStrategy::default()
///     .with_entry(10, BetMode::AnteMultiple(5.0))
///     .with_entry(12, BetMode::PotPercent(100.0));
/// assert_eq!(strategy.entry(0), BetMode::Min);
/// assert_eq!(strategy.entry(12), BetMode::PotPercent(100.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BettingStrategy([BetMode; SPREAD_COUNT]);

impl Default for BettingStrategy {
    fn default() -> Self {
        Self::uniform(BetMode::Min)
    }
}

impl BettingStrategy {
    /// The same mode at every spread.
    #[must_use]
    pub const fn uniform(mode: BetMode) -> Self {
        Self([mode; SPREAD_COUNT])
    }

    /// Builds a strategy from a table of exactly 13 entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::StrategyLength`] when the table is the wrong size.
    pub fn from_entries(entries: &[BetMode]) -> Result<Self, ConfigError> {
        let table = entries
            .try_into()
            .map_err(|_| ConfigError::StrategyLength(entries.len()))?;
        Ok(Self(table))
    }

    /// Replaces the entry for `spread`. Out-of-range spreads are ignored.
    #[must_use]
    pub fn with_entry(mut self, spread: usize, mode: BetMode) -> Self {
        if let Some(entry) = self.0.get_mut(spread) {
            *entry = mode;
        }
        self
    }

    /// The entry for `spread`, clamped into range.
    #[must_use]
    pub fn entry(&self, spread: usize) -> BetMode {
        self.0[spread.min(SPREAD_COUNT - 1)]
    }

    /// All entries in spread order.
    #[must_use]
    pub const fn entries(&self) -> &[BetMode; SPREAD_COUNT] {
        &self.0
    }

    /// Checks every value is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStrategyValue`] for the first bad entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (spread, mode) in self.0.iter().enumerate() {
            let value = mode.value();
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidStrategyValue { spread });
            }
        }
        Ok(())
    }
}

/// What a player remembers about cards already drawn.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CardCounting {
    /// Always reasons about a fresh 52-card deck.
    #[default]
    None,
    /// Knows the exact draw pile.
    Full,
    /// Tracks discards of these ranks only.
    Custom(Vec<u8>),
}

impl CardCounting {
    /// The deck this player believes the next card comes from.
    #[must_use]
    pub fn perceived_deck(&self, deck: &Deck) -> Vec<Card> {
        match self {
            Self::None => full_deck(),
            Self::Full => deck.draw_pile().to_vec(),
            Self::Custom(ranks) => {
                let mut cards = full_deck();
                cards.retain(|card| {
                    !(ranks.contains(&card.rank) && deck.discards().contains(card))
                });
                cards
            }
        }
    }

    /// Checks tracked ranks are legal.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRank`] for a rank outside `2..=14`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Custom(ranks) if !ranks.iter().all(|&rank| is_valid_rank(rank)) => {
                Err(ConfigError::InvalidRank)
            }
            _ => Ok(()),
        }
    }
}

/// Table state a bet decision depends on.
#[derive(Debug, Clone, Copy)]
pub struct BetContext<'a> {
    /// Current pot.
    pub pot: Cents,
    /// Ante unit.
    pub ante: Cents,
    /// The live deck, with both boundary cards already drawn.
    pub deck: &'a Deck,
    /// The two boundary cards.
    pub boundaries: [Card; 2],
    /// Rounding for computed bets.
    pub rounding: RoundingMode,
}

/// A bet and the bettor's expected-value view of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetDecision {
    /// Bet amount, never negative and never above the pot.
    pub bet: Cents,
    /// Expected profit estimates for the bet.
    pub ev: EvEstimate,
}

/// Sizes a bet for `mode` and estimates its value from the player's
/// perceived deck.
#[must_use]
pub fn decide_bet(mode: BetMode, counting: &CardCounting, context: &BetContext<'_>) -> BetDecision {
    let cap = context.pot.max(0);
    let bet = mode
        .amount(context.pot, context.ante, context.rounding)
        .clamp(0, cap);

    let perceived = counting.perceived_deck(context.deck);
    BetDecision {
        bet,
        ev: bet_expected_values(bet, context.boundaries, &perceived),
    }
}
