//! Game state types.

use crate::result::EndReason;

/// Where a game is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// The opening ante has not been collected yet.
    AwaitingAnte,
    /// Players are taking turns.
    TurnInProgress,
    /// The game has ended.
    GameOver(EndReason),
}
