//! Cross-game aggregation of game statistics.
//!
//! Turns a list of finished games into the comparisons a report needs:
//! measured spread outcomes next to their contextual and theoretical
//! counterparts, per-player money summaries, and histograms of numeric
//! series.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::player::Cents;
use crate::probability::{OutcomeOdds, SPREAD_COUNT, SpreadFigures, theoretical_stats};
use crate::stats::GameStatistics;

/// Measured, contextual and theoretical figures for one spread.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpreadRow {
    /// Spread index.
    pub spread: usize,
    /// Observed frequencies of resolved bets.
    pub measured: SpreadFigures,
    /// Averages of the live-deck figures recorded at each bet.
    pub contextual: SpreadFigures,
    /// Idealized full-deck figures.
    pub theoretical: SpreadFigures,
    /// Resolved bets at this spread.
    pub occurrences: u32,
    /// Largest single win, in antes.
    pub max_win_antes: f64,
}

/// Per-spread comparison across many games.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpreadAnalysis {
    /// Rows indexed by spread.
    pub rows: [SpreadRow; SPREAD_COUNT],
    /// Resolved bets across all spreads.
    pub total_bets: u32,
}

#[derive(Default)]
struct SpreadTotals {
    occurrences: u32,
    wins: u32,
    losses: u32,
    double_losses: u32,
    sum_ev: f64,
    sum_win: f64,
    sum_loss: f64,
    sum_double_loss: f64,
    sum_occurrence: f64,
    max_win: Cents,
}

fn ratio(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { part / whole } else { 0.0 }
}

/// Aggregates spread tallies over `games`.
///
/// `ante` converts the largest win into ante units.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "money amounts are far below f64 precision limits"
)]
pub fn analyze_spreads<'a, I>(games: I, ante: Cents) -> SpreadAnalysis
where
    I: IntoIterator<Item = &'a GameStatistics>,
{
    let mut totals: [SpreadTotals; SPREAD_COUNT] = Default::default();
    let mut samples = 0_u32;

    for game in games {
        samples += game.contextual_samples;
        for (total, tally) in totals.iter_mut().zip(&game.spreads) {
            total.occurrences += tally.occurrences;
            total.wins += tally.wins;
            total.losses += tally.losses;
            total.double_losses += tally.double_losses;
            total.sum_ev += tally.sum_contextual_ev;
            total.sum_win += tally.sum_contextual_win;
            total.sum_loss += tally.sum_contextual_loss;
            total.sum_double_loss += tally.sum_contextual_double_loss;
            total.max_win = total.max_win.max(tally.max_win);
        }
        for (total, sum) in totals.iter_mut().zip(&game.contextual_occurrence) {
            total.sum_occurrence += sum;
        }
    }

    let total_bets: u32 = totals.iter().map(|total| total.occurrences).sum();
    let theoretical = theoretical_stats();
    let mut rows = [SpreadRow::default(); SPREAD_COUNT];

    for (spread, (row, total)) in rows.iter_mut().zip(&totals).enumerate() {
        let outcomes = f64::from(total.wins + total.losses + total.double_losses);
        let measured_odds = OutcomeOdds {
            win: ratio(f64::from(total.wins), outcomes) * 100.0,
            loss: ratio(f64::from(total.losses), outcomes) * 100.0,
            double_loss: ratio(f64::from(total.double_losses), outcomes) * 100.0,
        };

        *row = SpreadRow {
            spread,
            measured: SpreadFigures {
                occurrence: ratio(f64::from(total.occurrences), f64::from(total_bets)) * 100.0,
                outcomes: measured_odds,
                ev: measured_odds.expected_value(),
            },
            contextual: SpreadFigures {
                occurrence: ratio(total.sum_occurrence, f64::from(samples)),
                outcomes: OutcomeOdds {
                    win: ratio(total.sum_win, outcomes),
                    loss: ratio(total.sum_loss, outcomes),
                    double_loss: ratio(total.sum_double_loss, outcomes),
                },
                ev: ratio(total.sum_ev, f64::from(total.occurrences)),
            },
            theoretical: theoretical.spreads[spread],
            occurrences: total.occurrences,
            max_win_antes: ratio(total.max_win as f64, ante as f64),
        };
    }

    SpreadAnalysis { rows, total_bets }
}

/// Money results of one player across many games.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSummary {
    /// Player identifier.
    pub player: String,
    /// Net result of every game, in order.
    pub net_results: Vec<Cents>,
    /// Sum of net results.
    pub total_net: Cents,
    /// Mean net result per game.
    pub mean_net: f64,
    /// Games finished with a profit.
    pub winning_games: u32,
    /// Total added through rebuys.
    pub total_rebuys: Cents,
    /// Every bet placed, in order.
    pub bets: Vec<Cents>,
    /// Mean bet size.
    pub mean_bet: f64,
}

/// Summarizes each seat's results over `games`, in seat order.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "money amounts and counts are far below f64 precision limits"
)]
pub fn summarize_players<'a, I>(games: I) -> Vec<PlayerSummary>
where
    I: IntoIterator<Item = &'a GameStatistics>,
{
    let mut summaries: Vec<PlayerSummary> = Vec::new();

    for game in games {
        for (seat, financials) in game.financials.iter().enumerate() {
            if summaries.len() <= seat {
                summaries.push(PlayerSummary {
                    player: financials.player.clone(),
                    net_results: Vec::new(),
                    total_net: 0,
                    mean_net: 0.0,
                    winning_games: 0,
                    total_rebuys: 0,
                    bets: Vec::new(),
                    mean_bet: 0.0,
                });
            }
            let summary = &mut summaries[seat];
            let net = financials.net();
            summary.net_results.push(net);
            summary.total_net += net;
            summary.total_rebuys += financials.rebuy_amount_used;
            if net > 0 {
                summary.winning_games += 1;
            }
            if let Some(bets) = game.bet_history.get(seat) {
                summary.bets.extend_from_slice(bets);
            }
        }
    }

    for summary in &mut summaries {
        summary.mean_net = ratio(summary.total_net as f64, summary.net_results.len() as f64);
        let wagered: Cents = summary.bets.iter().sum();
        summary.mean_bet = ratio(wagered as f64, summary.bets.len() as f64);
    }
    summaries
}

/// Equal-width bins over a numeric series.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Histogram {
    /// Bin midpoints.
    pub centers: Vec<f64>,
    /// Values per bin.
    pub counts: Vec<u32>,
}

/// Bins `values` into `bins` equal-width bins between their min and max.
///
/// A series with a single distinct value collapses into one bin.
///
/// ```
/// use aceyrs::analysis::histogram;
///
/// let binned = histogram(&[0.0, 1.0, 1.0, 4.0], 4);
/// assert_eq!(binned.counts, vec![1, 2, 0, 1]);
/// ```
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "bin counts are far below f64 precision limits"
)]
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    let Some(&first) = values.first() else {
        return Histogram::default();
    };
    let (min, max) = values
        .iter()
        .fold((first, first), |(min, max), &value| (min.min(value), max.max(value)));

    if bins == 0 || max <= min {
        return Histogram {
            centers: vec![min],
            counts: vec![values.len() as u32],
        };
    }

    let width = (max - min) / bins as f64;
    let centers = (0..bins)
        .map(|bin| min + (bin as f64 + 0.5) * width)
        .collect();
    let mut counts = vec![0_u32; bins];
    for &value in values {
        let bin = (((value - min) / width) as usize).min(bins - 1);
        counts[bin] += 1;
    }
    Histogram { centers, counts }
}
