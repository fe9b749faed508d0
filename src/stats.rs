//! Per-game statistics.

use core::time::Duration;

use alloc::vec;
use alloc::vec::Vec;

use crate::player::Cents;
use crate::probability::{OutcomeOdds, SPREAD_COUNT};
use crate::result::{EndReason, Outcome, PlayerFinancials};

/// Outcome tallies for resolved bets at one spread.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpreadTally {
    /// Resolved bets.
    pub occurrences: u32,
    /// Wins.
    pub wins: u32,
    /// Losses.
    pub losses: u32,
    /// Double-losses.
    pub double_losses: u32,
    /// Sum of the live-deck expected values, in multiples of the bet.
    pub sum_contextual_ev: f64,
    /// Sum of live-deck win percentages.
    pub sum_contextual_win: f64,
    /// Sum of live-deck loss percentages.
    pub sum_contextual_loss: f64,
    /// Sum of live-deck double-loss percentages.
    pub sum_contextual_double_loss: f64,
    /// Largest single win.
    pub max_win: Cents,
}

impl SpreadTally {
    /// Adds one resolved bet.
    pub fn record(&mut self, outcome: Outcome, contextual: OutcomeOdds, winnings: Cents) {
        self.occurrences += 1;
        match outcome {
            Outcome::Win => {
                self.wins += 1;
                self.max_win = self.max_win.max(winnings);
            }
            Outcome::Loss => self.losses += 1,
            Outcome::DoubleLoss => self.double_losses += 1,
        }
        self.sum_contextual_ev += contextual.expected_value();
        self.sum_contextual_win += contextual.win;
        self.sum_contextual_loss += contextual.loss;
        self.sum_contextual_double_loss += contextual.double_loss;
    }
}

/// Everything recorded about one game.
///
/// Built turn by turn and frozen once the game ends.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameStatistics {
    /// Pot after every turn.
    pub pot_history: Vec<Cents>,
    /// Each player's net pot contribution after every turn since the last
    /// pot clear, indexed by player.
    pub contribution_history: Vec<Vec<Cents>>,
    /// Outcome tallies indexed by spread.
    pub spreads: [SpreadTally; SPREAD_COUNT],
    /// Every bet placed, indexed by player.
    pub bet_history: Vec<Vec<Cents>>,
    /// Turns played.
    pub turns: u32,
    /// Deck reshuffles.
    pub shuffles: u32,
    /// Ante rounds collected.
    pub antes: u32,
    /// Players who gave up, quit, or hit their stop-loss.
    pub players_gave_up: u32,
    /// Summed per-turn distance distributions of the live draw pile.
    pub contextual_occurrence: [f64; SPREAD_COUNT],
    /// Number of distributions summed into `contextual_occurrence`.
    pub contextual_samples: u32,
    /// Money position of every player at game end.
    pub financials: Vec<PlayerFinancials>,
    /// Why the game stopped, `None` while it is still running.
    pub end_reason: Option<EndReason>,
    /// Wall-clock time the game took, when measured.
    pub duration: Option<Duration>,
}

impl GameStatistics {
    /// Empty statistics for `players` players.
    #[must_use]
    pub fn new(players: usize) -> Self {
        Self {
            pot_history: Vec::new(),
            contribution_history: vec![Vec::new(); players],
            spreads: [SpreadTally::default(); SPREAD_COUNT],
            bet_history: vec![Vec::new(); players],
            turns: 0,
            shuffles: 0,
            antes: 0,
            players_gave_up: 0,
            contextual_occurrence: [0.0; SPREAD_COUNT],
            contextual_samples: 0,
            financials: Vec::new(),
            end_reason: None,
            duration: None,
        }
    }

    /// Adds one live-deck distance distribution.
    pub fn record_occurrence(&mut self, distribution: &[f64; SPREAD_COUNT]) {
        for (sum, percent) in self.contextual_occurrence.iter_mut().zip(distribution) {
            *sum += percent;
        }
        self.contextual_samples += 1;
    }
}
