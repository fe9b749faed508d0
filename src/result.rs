//! Turn and game result types.

use alloc::string::String;
use alloc::vec::Vec;

use crate::card::Card;
use crate::player::Cents;
use crate::probability::EvEstimate;

/// Resolution of a bet against the third card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Outcome {
    /// Third card fell strictly between the boundaries.
    Win,
    /// Third card fell outside the boundaries.
    Loss,
    /// Third card matched a boundary rank.
    DoubleLoss,
}

/// What happened on a player's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TurnOutcome {
    /// The bet was zero; no third card was drawn.
    Pass,
    /// The player could not cover a positive bet and left the game.
    Quit,
    /// The bet was placed and resolved.
    Resolved(Outcome),
}

/// Bookkeeping events raised while a turn played out.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case", tag = "type"))]
pub enum TurnEvent {
    /// A player bought back in.
    Rebuy {
        /// Player identifier.
        player: String,
        /// Amount added to the bankroll.
        amount: Cents,
        /// Rebuys left, `None` when unlimited.
        remaining: Option<u32>,
    },
    /// A player breached their stop-loss and was withdrawn.
    StopLoss {
        /// Player identifier.
        player: String,
        /// The configured threshold.
        threshold: Cents,
    },
    /// A player could not pay the ante and gave up.
    GaveUp {
        /// Player identifier.
        player: String,
    },
}

/// Why a game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EndReason {
    /// Every player became inactive.
    NoActivePlayers,
    /// The pot was cleared after enough activity.
    PotCleared,
    /// Too many consecutive zero bets.
    Stagnation,
}

/// Full detail of one played turn.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnRecord {
    /// Index of the acting player.
    pub player: usize,
    /// First boundary card.
    pub card1: Card,
    /// Second boundary card.
    pub card2: Card,
    /// Rank distance between the boundary cards.
    pub spread: usize,
    /// Bet after capping and rounding.
    pub bet: Cents,
    /// Third card, when the bet was resolved.
    pub card3: Option<Card>,
    /// What happened.
    pub outcome: TurnOutcome,
    /// Player bankroll before the turn.
    pub money_before: Cents,
    /// Pot after the turn.
    pub pot: Cents,
    /// The player's own expected-value estimates for the bet.
    pub ev: EvEstimate,
    /// Rebuys, stop-loss and give-up events, in order.
    pub events: Vec<TurnEvent>,
    /// The freshly shuffled draw pile if the deck was reset this turn.
    pub reshuffled: Option<Vec<Card>>,
}

/// Money position of a player at game end.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerFinancials {
    /// Player identifier.
    pub player: String,
    /// Bankroll at game start.
    pub start_money: Cents,
    /// Bankroll at game end.
    pub final_money: Cents,
    /// Total added through rebuys.
    pub rebuy_amount_used: Cents,
    /// Rebuys counted against a finite limit.
    pub rebuys_used: u32,
    /// Whether the player was still active when the game ended.
    pub active: bool,
}

impl PlayerFinancials {
    /// Net result: final bankroll minus everything put in.
    #[must_use]
    pub const fn net(&self) -> Cents {
        self.final_money - self.start_money - self.rebuy_amount_used
    }
}
