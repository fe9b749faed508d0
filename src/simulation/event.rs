//! Messages the driver publishes to its host.

use core::time::Duration;
use std::sync::mpsc::Sender;

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::card::Card;
use crate::player::Cents;
use crate::probability::TheoreticalStats;
use crate::result::TurnRecord;
use crate::stats::GameStatistics;

/// Live view of the game in progress after one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnSnapshot {
    /// Zero-based index of the game.
    pub game: u32,
    /// Pot after the turn.
    pub pot: Cents,
    /// Net pot contribution per player since the last pot clear.
    pub contributions: Vec<Cents>,
    /// Most recent bet per player.
    pub latest_bets: Vec<Option<Cents>>,
    /// Detail of the turn, when live turns are enabled.
    pub turn: Option<TurnRecord>,
    /// Remaining draw pile, when the live deck is enabled.
    pub deck: Option<Vec<Card>>,
}

/// Run progress after a completed game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Completed share of the run, `0.0..=1.0`.
    pub fraction: f64,
    /// Wall-clock time since the run started.
    pub elapsed: Duration,
    /// Estimated time to finish from the average game duration.
    pub eta: Duration,
}

/// A finished game.
#[derive(Debug, Clone)]
pub struct GameComplete {
    /// The game's frozen statistics.
    pub stats: Arc<GameStatistics>,
    /// Run progress.
    pub progress: Progress,
    /// Zero-based index of the game.
    pub game_index: u32,
    /// Games requested for the run.
    pub total_games: u32,
}

/// A message from the simulation to its host.
#[derive(Debug, Clone)]
pub enum Event {
    /// The run started; sent once.
    Ready {
        /// Idealized per-spread figures.
        theoretical: TheoreticalStats,
    },
    /// The deck was shuffled, when the live deck is enabled.
    DeckShuffled {
        /// Zero-based index of the game.
        game: u32,
        /// The new draw pile; the last card is drawn next.
        deck: Vec<Card>,
    },
    /// A turn was played.
    TurnSnapshot(TurnSnapshot),
    /// A game finished.
    GameComplete(GameComplete),
    /// The run is halted and waits for a resume or single step.
    ReadyForStep,
    /// Every requested game finished.
    AllComplete,
}

/// Receives events from a running simulation.
pub trait EventSink {
    /// Delivers one event.
    fn emit(&mut self, event: Event);
}

impl EventSink for Vec<Event> {
    fn emit(&mut self, event: Event) {
        self.push(event);
    }
}

impl EventSink for Sender<Event> {
    fn emit(&mut self, event: Event) {
        // A host that hung up no longer needs updates.
        let _ = self.send(event);
    }
}

/// Adapts a closure into an [`EventSink`].
pub struct FnSink<F>(pub F);

impl<F: FnMut(Event)> EventSink for FnSink<F> {
    fn emit(&mut self, event: Event) {
        (self.0)(event);
    }
}
