//! Game engine and state management.

use alloc::vec;
use alloc::vec::Vec;

use tracing::debug;

use crate::deck::Deck;
use crate::error::{ConfigError, GameError};
use crate::options::GameOptions;
use crate::player::{Cents, PlayerConfig, PlayerState};
use crate::result::EndReason;
use crate::stats::GameStatistics;

mod ante;
pub mod state;
mod turn;

pub use state::GamePhase;

/// One acey-deucey game from the opening ante to its end.
///
/// The game owns the deck, the pot, and every player's bankroll. Drive it
/// one turn at a time with [`Game::play_turn`], or to completion with
/// [`Game::play_to_end`], then collect the frozen statistics with
/// [`Game::finish`].
#[derive(Debug, Clone)]
pub struct Game {
    options: GameOptions,
    deck: Deck,
    players: Vec<PlayerState>,
    pot: Cents,
    /// Pot at the last contribution reset.
    pot_baseline: Cents,
    /// Net pot contribution per player since the last reset.
    contributions: Vec<Cents>,
    phase: GamePhase,
    /// Rotation pointer: the next seat to consider.
    next_seat: usize,
    consecutive_passes: u32,
    stats: GameStatistics,
}

impl Game {
    /// Creates a game with a deck shuffled from `seed`.
    ///
    /// # Errors
    ///
    /// Returns an error if the table rules or any player configuration is
    /// invalid, or no players are given.
    ///
    /// # Example
    ///
    /// ```
    /// use aceyrs::{Game, GameOptions, PlayerConfig};
    ///
    /// let players = [PlayerConfig::new("p1", 10_000), PlayerConfig::new("p2", 10_000)];
    /// let mut game = Game::new(GameOptions::default(), &players, 42).unwrap();
    /// game.play_to_end().unwrap();
    /// assert!(game.is_over());
    /// ```
    pub fn new(options: GameOptions, players: &[PlayerConfig], seed: u64) -> Result<Self, ConfigError> {
        Self::with_deck(options, players, Deck::new(seed))
    }

    /// Creates a game that plays from the given deck.
    ///
    /// # Errors
    ///
    /// Same as [`Game::new`].
    pub fn with_deck(
        options: GameOptions,
        players: &[PlayerConfig],
        deck: Deck,
    ) -> Result<Self, ConfigError> {
        validate_table(&options, players)?;

        Ok(Self {
            pot: options.starting_pot,
            pot_baseline: options.starting_pot,
            options,
            deck,
            players: players.iter().cloned().map(PlayerState::new).collect(),
            contributions: vec![0; players.len()],
            phase: GamePhase::AwaitingAnte,
            next_seat: 0,
            consecutive_passes: 0,
            stats: GameStatistics::new(players.len()),
        })
    }

    /// Plays turns until the game ends.
    ///
    /// # Errors
    ///
    /// Returns an error if a deck invariant is violated.
    pub fn play_to_end(&mut self) -> Result<(), GameError> {
        while !self.is_over() {
            self.play_turn()?;
        }
        Ok(())
    }

    /// Freezes the game into its statistics, with final financials.
    #[must_use]
    pub fn finish(mut self) -> GameStatistics {
        self.stats.financials = self.players.iter().map(PlayerState::financials).collect();
        self.stats.end_reason = match self.phase {
            GamePhase::GameOver(reason) => Some(reason),
            _ => None,
        };
        self.stats
    }

    fn end(&mut self, reason: EndReason) {
        debug!(?reason, turns = self.stats.turns, pot = self.pot, "game over");
        self.phase = GamePhase::GameOver(reason);
    }

    /// Returns the table rules.
    #[must_use]
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Returns whether the game has ended.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver(_))
    }

    /// Returns the current pot.
    #[must_use]
    pub const fn pot(&self) -> Cents {
        self.pot
    }

    /// Returns the pot at the last contribution reset.
    ///
    /// The pot always equals this baseline plus the sum of
    /// [`Game::contributions`].
    #[must_use]
    pub const fn pot_baseline(&self) -> Cents {
        self.pot_baseline
    }

    /// Returns each player's net pot contribution since the last reset.
    #[must_use]
    pub fn contributions(&self) -> &[Cents] {
        &self.contributions
    }

    /// Returns every player's state, in seat order.
    #[must_use]
    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    /// Returns the number of active players.
    #[must_use]
    pub fn active_players(&self) -> usize {
        self.players.iter().filter(|player| player.active).count()
    }

    /// Returns each player's most recent bet, if any.
    #[must_use]
    pub fn latest_bets(&self) -> Vec<Option<Cents>> {
        self.stats
            .bet_history
            .iter()
            .map(|bets| bets.last().copied())
            .collect()
    }

    /// Returns the deck.
    #[must_use]
    pub const fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Returns the deck for direct manipulation.
    pub const fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }

    /// Returns the statistics gathered so far.
    #[must_use]
    pub const fn stats(&self) -> &GameStatistics {
        &self.stats
    }
}

/// Checks table rules and every player before a game or run starts.
pub(crate) fn validate_table(options: &GameOptions, players: &[PlayerConfig]) -> Result<(), ConfigError> {
    if players.is_empty() {
        return Err(ConfigError::NoPlayers);
    }
    options.validate()?;

    for (index, player) in players.iter().enumerate() {
        player.validate()?;
        if players[..index].iter().any(|other| other.id == player.id) {
            return Err(ConfigError::DuplicatePlayer);
        }
    }
    Ok(())
}
