//! Theoretical and contextual probabilities for a rank spread.
//!
//! A spread is the absolute rank distance between the two boundary cards,
//! `0` for a pair up to `12` for deuce/ace. Against a spread a third card
//! either lands strictly between the boundaries (win), matches one of them
//! (double-loss), or falls outside (loss).
//!
//! Theoretical figures assume an idealized 52-card deck. Contextual figures
//! are measured against an actual set of cards, such as the live draw pile or
//! a player's perceived deck.

use crate::card::{Card, RANK_COUNT, full_deck};
use crate::result::Outcome;

/// Number of distinct spreads (`0..=12`).
pub const SPREAD_COUNT: usize = 13;

/// Number of unordered two-card draws from a full deck, `C(52, 2)`.
pub const TOTAL_PAIRS: u32 = 1326;

/// Ranks that win, lose, and double-lose against a spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankSplit {
    /// Ranks strictly between the boundaries.
    pub win: u8,
    /// Ranks outside the boundaries.
    pub loss: u8,
    /// Ranks equal to a boundary.
    pub double_loss: u8,
}

impl RankSplit {
    /// Splits the 13 ranks for `spread`.
    #[must_use]
    pub const fn for_spread(spread: usize) -> Self {
        let win = if spread > 0 { spread as u8 - 1 } else { 0 };
        let double_loss = if spread > 0 { 2 } else { 1 };
        Self {
            win,
            loss: RANK_COUNT as u8 - win - double_loss,
            double_loss,
        }
    }

    /// Expected value in multiples of the bet.
    #[must_use]
    pub fn expected_value(&self) -> f64 {
        (f64::from(self.win) - f64::from(self.loss) - 2.0 * f64::from(self.double_loss))
            / RANK_COUNT as f64
    }
}

/// Win, loss, and double-loss probabilities in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutcomeOdds {
    /// Chance of a win, in percent.
    pub win: f64,
    /// Chance of a loss, in percent.
    pub loss: f64,
    /// Chance of a double-loss, in percent.
    pub double_loss: f64,
}

impl OutcomeOdds {
    /// Expected value in multiples of the bet.
    #[must_use]
    pub fn expected_value(&self) -> f64 {
        (self.win - self.loss - 2.0 * self.double_loss) / 100.0
    }
}

/// Occurrence, outcome odds and expected value for one spread.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpreadFigures {
    /// Chance this spread is dealt, in percent.
    pub occurrence: f64,
    /// Outcome probabilities.
    pub outcomes: OutcomeOdds,
    /// Expected value in multiples of the bet.
    pub ev: f64,
}

/// Idealized figures for every spread.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TheoreticalStats {
    /// Figures indexed by spread.
    pub spreads: [SpreadFigures; SPREAD_COUNT],
}

/// Number of two-card draws from a full deck that produce `spread`.
#[must_use]
pub const fn pair_count(spread: usize) -> u32 {
    if spread == 0 {
        // C(4, 2) same-rank pairs for each of the 13 ranks.
        13 * 6
    } else {
        (RANK_COUNT - spread) as u32 * 16
    }
}

/// Chance of dealing `spread` from a full deck, in percent.
#[must_use]
pub fn theoretical_occurrence(spread: usize) -> f64 {
    f64::from(pair_count(spread)) / f64::from(TOTAL_PAIRS) * 100.0
}

/// Expected value of `spread` in multiples of the bet.
#[must_use]
pub fn theoretical_ev(spread: usize) -> f64 {
    RankSplit::for_spread(spread).expected_value()
}

/// Computes the idealized figures for every spread.
#[must_use]
pub fn theoretical_stats() -> TheoreticalStats {
    let mut spreads = [SpreadFigures::default(); SPREAD_COUNT];
    for (spread, theory) in spreads.iter_mut().enumerate() {
        let split = RankSplit::for_spread(spread);
        let percent = |ranks: u8| f64::from(ranks) / RANK_COUNT as f64 * 100.0;
        *theory = SpreadFigures {
            occurrence: theoretical_occurrence(spread),
            outcomes: OutcomeOdds {
                win: percent(split.win),
                loss: percent(split.loss),
                double_loss: percent(split.double_loss),
            },
            ev: split.expected_value(),
        };
    }
    TheoreticalStats { spreads }
}

/// Classifies a third card's rank against the boundary ranks.
#[must_use]
pub const fn classify(rank: u8, low: u8, high: u8) -> Outcome {
    if rank == low || rank == high {
        Outcome::DoubleLoss
    } else if rank > low && rank < high {
        Outcome::Win
    } else {
        Outcome::Loss
    }
}

/// Outcome counts for every card of a reference deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutcomeCounts {
    /// Cards that would win.
    pub wins: usize,
    /// Cards that would lose.
    pub losses: usize,
    /// Cards that would double-lose.
    pub double_losses: usize,
}

impl OutcomeCounts {
    /// Classifies each card in `cards` against the boundary ranks.
    #[must_use]
    pub fn tally(cards: &[Card], low: u8, high: u8) -> Self {
        cards
            .iter()
            .fold(Self::default(), |mut counts, card| {
                match classify(card.rank, low, high) {
                    Outcome::Win => counts.wins += 1,
                    Outcome::Loss => counts.losses += 1,
                    Outcome::DoubleLoss => counts.double_losses += 1,
                }
                counts
            })
    }

    /// Number of cards tallied.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.wins + self.losses + self.double_losses
    }

    /// Outcome probabilities in percent, all zero for an empty deck.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "card counts are far below f64 precision limits"
    )]
    pub fn odds(&self) -> OutcomeOdds {
        let total = self.total();
        if total == 0 {
            return OutcomeOdds::default();
        }
        let percent = |count: usize| count as f64 / total as f64 * 100.0;
        OutcomeOdds {
            win: percent(self.wins),
            loss: percent(self.losses),
            double_loss: percent(self.double_losses),
        }
    }
}

/// Outcome probabilities for the next card of `pile`, in percent.
#[must_use]
pub fn contextual_outcomes(pile: &[Card], low: u8, high: u8) -> OutcomeOdds {
    OutcomeCounts::tally(pile, low, high).odds()
}

/// Expected value in multiples of the bet when the next card comes from
/// `reference`.
#[must_use]
pub fn contextual_ev(reference: &[Card], low: u8, high: u8) -> f64 {
    contextual_outcomes(reference, low, high).expected_value()
}

/// Distribution of rank distances over all unordered pairs in `pile`.
///
/// Pairs `1..=13` ranks apart land in buckets `0..=12`; same-rank pairs are
/// not bucketed but still count toward the total. Percentages are all zero
/// when fewer than two cards remain.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "pair counts are far below f64 precision limits"
)]
pub fn contextual_occurrence(pile: &[Card]) -> [f64; SPREAD_COUNT] {
    let mut buckets = [0_u32; SPREAD_COUNT];
    let n = pile.len();
    if n < 2 {
        return [0.0; SPREAD_COUNT];
    }

    for (i, first) in pile.iter().enumerate() {
        for second in &pile[i + 1..] {
            let distance = usize::from(first.rank.abs_diff(second.rank));
            if (1..=SPREAD_COUNT).contains(&distance) {
                buckets[distance - 1] += 1;
            }
        }
    }

    let total_pairs = (n * (n - 1) / 2) as f64;
    buckets.map(|count| f64::from(count) / total_pairs * 100.0)
}

/// A bettor's expected profit for one bet, in minor currency units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvEstimate {
    /// Against a full deck minus the two boundary cards.
    pub theoretical: f64,
    /// Against the bettor's perceived deck.
    pub perceived: f64,
}

/// Computes the expected profit of `bet` against the two boundary cards.
///
/// A zero bet is worth zero under both views.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "bet amounts are far below f64 precision limits"
)]
pub fn bet_expected_values(bet: i64, boundaries: [Card; 2], perceived: &[Card]) -> EvEstimate {
    if bet == 0 {
        return EvEstimate::default();
    }

    let low = boundaries[0].rank.min(boundaries[1].rank);
    let high = boundaries[0].rank.max(boundaries[1].rank);

    let mut idealized = full_deck();
    idealized.retain(|card| !boundaries.contains(card));

    let stake = bet as f64;
    EvEstimate {
        theoretical: contextual_ev(&idealized, low, high) * stake,
        perceived: contextual_ev(perceived, low, high) * stake,
    }
}
