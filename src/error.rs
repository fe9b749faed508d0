//! Error types for configuration, deck and simulation operations.

use thiserror::Error;

/// Errors that reject a configuration before any game runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No players were configured.
    #[error("no players configured")]
    NoPlayers,
    /// The ante must be a positive amount.
    #[error("ante must be positive")]
    InvalidAnte,
    /// A money amount (starting pot, bankroll, stop-loss, threshold) is negative.
    #[error("money amounts must not be negative")]
    NegativeAmount,
    /// A strategy entry carries a negative or non-finite value.
    #[error("invalid betting strategy value for spread {spread}")]
    InvalidStrategyValue {
        /// Spread index of the offending entry.
        spread: usize,
    },
    /// A betting strategy table does not have one entry per spread.
    #[error("betting strategy has {0} entries, expected 13")]
    StrategyLength(usize),
    /// A fixed rebuy policy must add a positive amount.
    #[error("fixed rebuy amount must be positive")]
    InvalidRebuyAmount,
    /// A rebuy count is neither a number nor `"Infinity"`.
    #[error("rebuy count must be a number or \"Infinity\"")]
    InvalidRebuyCount,
    /// A tracked rank is outside 2..=14 or its label is unknown.
    #[error("invalid card rank")]
    InvalidRank,
    /// Two players share an identifier.
    #[error("duplicate player identifier")]
    DuplicatePlayer,
    /// The stagnation guard factor must be positive.
    #[error("stagnation factor must be positive")]
    InvalidStagnation,
}

/// Errors raised by deck operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    /// More cards were requested than the draw pile holds.
    #[error("requested {requested} cards but only {remaining} remain")]
    InsufficientCards {
        /// Cards requested.
        requested: usize,
        /// Cards left in the draw pile.
        remaining: usize,
    },
    /// A stacked deck named the same card twice or an invalid card.
    #[error("stacked deck contains a duplicate or invalid card")]
    DuplicateCard,
}

/// Errors that abort a game or a simulation run.
///
/// Cancellation is not an error: a terminated run reports
/// [`RunOutcome::Terminated`](crate::simulation::RunOutcome).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// An internal deck invariant was violated.
    #[error("deck invariant violated: {0}")]
    Deck(#[from] DeckError),
}
