//! An acey-deucey betting simulation engine with optional `no_std` support.
//!
//! Players take turns drawing two boundary cards and betting against a shared
//! pot that a third card lands strictly between them. The crate provides a
//! [`Game`] type that runs one game from the opening ante to its end, the
//! probability model behind every bet, and, with `std`, a
//! [`simulation`] driver that plays many games and streams results to a host.
//!
//! # Example
//!
//! ```
//! use aceyrs::{BetMode, BettingStrategy, Game, GameOptions, PlayerConfig};
//!
//! let strategy = BettingStrategy::default().with_entry(12, BetMode::PotPercent(50.0));
//! let players = [
//!     PlayerConfig::new("alice", 10_000).with_strategy(strategy),
//!     PlayerConfig::new("bob", 10_000),
//! ];
//! let mut game = Game::new(GameOptions::default(), &players, 42).unwrap();
//! game.play_to_end().unwrap();
//! let stats = game.finish();
//! assert!(stats.end_reason.is_some());
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod analysis;
pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod options;
pub mod player;
pub mod probability;
pub mod result;
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod simulation;
pub mod stats;
pub mod strategy;
#[cfg(feature = "std")]
mod sync;
#[cfg(feature = "serde")]
mod wire;

// Re-export main types
pub use card::{Card, DECK_SIZE, Suit};
pub use deck::Deck;
pub use error::{ConfigError, DeckError, GameError};
pub use game::{Game, GamePhase};
pub use options::{GameOptions, RoundingMode};
pub use player::{Cents, PlayerConfig, PlayerState, RebuyLimit, RebuyMode, RebuyPolicy};
pub use probability::{EvEstimate, OutcomeOdds, SpreadFigures, TheoreticalStats, theoretical_stats};
pub use result::{EndReason, Outcome, PlayerFinancials, TurnEvent, TurnOutcome, TurnRecord};
pub use stats::{GameStatistics, SpreadTally};
pub use strategy::{BetDecision, BetMode, BettingStrategy, CardCounting};
