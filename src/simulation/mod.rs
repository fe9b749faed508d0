//! Runs many games in sequence and streams their results to a host.
//!
//! A [`Simulation`] plays games strictly one after another on the calling
//! thread. Before every turn it passes a halt gate that a
//! [`SimulationHandle`] on another thread can engage, single-step, release,
//! or use to terminate the run. Progress is published as [`Event`]s through
//! an [`EventSink`]; every published value is an owned copy, so the host
//! never observes live simulation state.
//!
//! ```
//! use aceyrs::simulation::{Event, RunOutcome, Simulation, SimulationConfig};
//! use aceyrs::PlayerConfig;
//!
//! let config = SimulationConfig::new(vec![PlayerConfig::new("p1", 10_000)])
//!     .with_simulation_count(3)
//!     .with_seed(7);
//! let mut simulation = Simulation::new(config).unwrap();
//! let mut events = Vec::new();
//! assert_eq!(simulation.run(&mut events).unwrap(), RunOutcome::Completed);
//! assert!(matches!(events.last(), Some(Event::AllComplete)));
//! assert_eq!(simulation.state().completed.len(), 3);
//! ```

use core::time::Duration;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use alloc::sync::Arc;
use alloc::vec::Vec;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::error::{ConfigError, GameError};
use crate::game::{Game, validate_table};
use crate::options::GameOptions;
use crate::player::PlayerConfig;
use crate::probability::theoretical_stats;
use crate::stats::GameStatistics;

mod control;
mod event;

pub use control::{Resolution, SimulationHandle, Suspension};
pub use event::{Event, EventSink, FnSink, GameComplete, Progress, TurnSnapshot};

use control::Control;

/// Everything a simulation run needs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SimulationConfig {
    /// Players, in seat order.
    pub players: Vec<PlayerConfig>,
    /// Table rules.
    #[cfg_attr(feature = "serde", serde(default))]
    pub game: GameOptions,
    /// Number of games to play.
    #[cfg_attr(feature = "serde", serde(default = "one_game"))]
    pub simulation_count: u32,
    /// Publish the draw pile with every snapshot and reshuffle.
    #[cfg_attr(feature = "serde", serde(default))]
    pub show_live_deck: bool,
    /// Publish full turn detail with every snapshot.
    #[cfg_attr(feature = "serde", serde(default))]
    pub show_live_turn: bool,
    /// Engage the halt before the first turn.
    #[cfg_attr(feature = "serde", serde(default, alias = "shouldHaltInitially"))]
    pub start_halted: bool,
    /// Seed for the per-game deck seeds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: u64,
}

#[cfg(feature = "serde")]
const fn one_game() -> u32 {
    1
}

impl SimulationConfig {
    /// A single-game run with default table rules.
    #[must_use]
    pub fn new(players: Vec<PlayerConfig>) -> Self {
        Self {
            players,
            game: GameOptions::default(),
            simulation_count: 1,
            show_live_deck: false,
            show_live_turn: false,
            start_halted: false,
            seed: 0,
        }
    }

    /// Sets the table rules.
    #[must_use]
    pub fn with_game(mut self, game: GameOptions) -> Self {
        self.game = game;
        self
    }

    /// Sets the number of games.
    #[must_use]
    pub const fn with_simulation_count(mut self, count: u32) -> Self {
        self.simulation_count = count;
        self
    }

    /// Enables or disables live deck publishing.
    #[must_use]
    pub const fn with_live_deck(mut self, enabled: bool) -> Self {
        self.show_live_deck = enabled;
        self
    }

    /// Enables or disables live turn detail.
    #[must_use]
    pub const fn with_live_turn(mut self, enabled: bool) -> Self {
        self.show_live_turn = enabled;
        self
    }

    /// Starts the run halted.
    #[must_use]
    pub const fn with_start_halted(mut self, halted: bool) -> Self {
        self.start_halted = halted;
        self
    }

    /// Sets the seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks the table rules and every player.
    ///
    /// # Errors
    ///
    /// Returns the first configuration problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_table(&self.game, &self.players)
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every requested game was played.
    Completed,
    /// The host terminated the run; completed games are kept.
    Terminated,
}

/// Progress and results of one run.
#[derive(Debug, Clone, Default)]
pub struct SimulationRunState {
    /// Index of the game being played, or the next one to play.
    pub current_game: u32,
    /// Games requested.
    pub total_games: u32,
    /// Statistics of every completed game, in order.
    pub completed: Vec<Arc<GameStatistics>>,
    /// How the run ended, `None` while it has not.
    pub outcome: Option<RunOutcome>,
    /// Wall-clock time spent running.
    pub elapsed: Duration,
}

/// A sequential multi-game simulation.
pub struct Simulation {
    config: SimulationConfig,
    control: Arc<Control>,
    state: SimulationRunState,
    seeds: ChaCha8Rng,
}

impl Simulation {
    /// Validates the configuration and prepares a run.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            control: Control::new(config.start_halted),
            state: SimulationRunState {
                total_games: config.simulation_count,
                ..SimulationRunState::default()
            },
            seeds: ChaCha8Rng::seed_from_u64(config.seed),
            config,
        })
    }

    /// Returns a remote for halting, stepping and terminating the run.
    #[must_use]
    pub fn handle(&self) -> SimulationHandle {
        SimulationHandle::new(Arc::clone(&self.control))
    }

    /// Returns the run configuration.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Returns the run progress and results so far.
    #[must_use]
    pub const fn state(&self) -> &SimulationRunState {
        &self.state
    }

    /// Consumes the simulation, returning its results.
    #[must_use]
    pub fn into_state(self) -> SimulationRunState {
        self.state
    }

    /// Plays the remaining games, publishing events to `sink`.
    ///
    /// Blocks at the halt gate while the run is halted. A terminated run
    /// discards the game in progress and returns [`RunOutcome::Terminated`].
    ///
    /// # Errors
    ///
    /// Returns an error if a game hits an internal invariant violation.
    pub fn run<S: EventSink + ?Sized>(&mut self, sink: &mut S) -> Result<RunOutcome, GameError> {
        if let Some(outcome) = self.state.outcome {
            return Ok(outcome);
        }

        info!(
            games = self.config.simulation_count,
            players = self.config.players.len(),
            seed = self.config.seed,
            "simulation started"
        );
        sink.emit(Event::Ready {
            theoretical: theoretical_stats(),
        });

        let started = Instant::now();
        while self.state.current_game < self.state.total_games {
            if self.control.is_terminated() {
                return Ok(self.stop(RunOutcome::Terminated, started));
            }

            let index = self.state.current_game;
            let game_started = Instant::now();
            let Some(mut stats) = self.play_game(index, sink)? else {
                return Ok(self.stop(RunOutcome::Terminated, started));
            };
            stats.duration = Some(game_started.elapsed());
            debug!(
                game = index,
                turns = stats.turns,
                reason = ?stats.end_reason,
                "game complete"
            );

            let stats = Arc::new(stats);
            self.state.completed.push(Arc::clone(&stats));
            self.state.current_game += 1;

            sink.emit(Event::GameComplete(GameComplete {
                stats,
                progress: self.progress(started.elapsed()),
                game_index: index,
                total_games: self.state.total_games,
            }));
        }

        let outcome = self.stop(RunOutcome::Completed, started);
        sink.emit(Event::AllComplete);
        Ok(outcome)
    }

    /// Plays one game, or returns `None` if the run was terminated mid-game.
    fn play_game<S: EventSink + ?Sized>(
        &mut self,
        index: u32,
        sink: &mut S,
    ) -> Result<Option<GameStatistics>, GameError> {
        let mut game = Game::new(
            self.config.game.clone(),
            &self.config.players,
            self.seeds.next_u64(),
        )?;
        if self.config.show_live_deck {
            sink.emit(Event::DeckShuffled {
                game: index,
                deck: game.deck().draw_pile().to_vec(),
            });
        }

        while !game.is_over() {
            if let Some(suspension) = self.control.suspend() {
                sink.emit(Event::ReadyForStep);
                let resolution = suspension.wait();
                debug!(?resolution, "halt gate released");
            }
            if self.control.is_terminated() {
                return Ok(None);
            }

            let Some(mut record) = game.play_turn()? else {
                break;
            };

            if self.config.show_live_deck {
                if let Some(deck) = record.reshuffled.take() {
                    sink.emit(Event::DeckShuffled { game: index, deck });
                }
            }

            sink.emit(Event::TurnSnapshot(TurnSnapshot {
                game: index,
                pot: game.pot(),
                contributions: game.contributions().to_vec(),
                latest_bets: game.latest_bets(),
                turn: self.config.show_live_turn.then_some(record),
                deck: self
                    .config
                    .show_live_deck
                    .then(|| game.deck().draw_pile().to_vec()),
            }));
        }

        Ok(Some(game.finish()))
    }

    fn progress(&self, elapsed: Duration) -> Progress {
        let done = self.state.current_game;
        let total = self.state.total_games;
        let eta = if done == 0 {
            Duration::ZERO
        } else {
            elapsed / done * (total - done)
        };
        Progress {
            fraction: f64::from(done) / f64::from(total.max(1)),
            elapsed,
            eta,
        }
    }

    fn stop(&mut self, outcome: RunOutcome, started: Instant) -> RunOutcome {
        self.state.elapsed += started.elapsed();
        self.state.outcome = Some(outcome);
        info!(
            ?outcome,
            completed = self.state.completed.len(),
            elapsed_ms = self.state.elapsed.as_millis(),
            "simulation stopped"
        );
        outcome
    }
}

/// Runs a simulation on a worker thread.
///
/// Returns the remote, the event stream, and the worker's join handle, which
/// yields the final run state.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn spawn(
    config: SimulationConfig,
) -> Result<
    (
        SimulationHandle,
        Receiver<Event>,
        JoinHandle<Result<SimulationRunState, GameError>>,
    ),
    ConfigError,
> {
    let mut simulation = Simulation::new(config)?;
    let handle = simulation.handle();
    let (mut sender, receiver) = mpsc::channel();
    let worker = thread::spawn(move || -> Result<SimulationRunState, GameError> {
        simulation.run(&mut sender)?;
        Ok(simulation.into_state())
    });
    Ok((handle, receiver, worker))
}
