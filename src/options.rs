//! Game configuration options.

use crate::error::ConfigError;
use crate::player::Cents;

/// Rounding mode for fractional bets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest.
    #[default]
    Nearest,
}

impl RoundingMode {
    /// Rounds `amount` to whole minor currency units.
    #[cfg(feature = "std")]
    #[must_use]
    pub fn apply(self, amount: f64) -> Cents {
        match self {
            Self::Up => amount.ceil() as Cents,
            Self::Down => amount.floor() as Cents,
            Self::Nearest => amount.round() as Cents,
        }
    }

    /// Rounds `amount` to whole minor currency units.
    #[cfg(all(not(feature = "std"), feature = "alloc"))]
    #[must_use]
    pub fn apply(self, amount: f64) -> Cents {
        match self {
            Self::Up => libm::ceil(amount) as Cents,
            Self::Down => libm::floor(amount) as Cents,
            Self::Nearest => libm::round(amount) as Cents,
        }
    }
}

/// Table rules shared by every player in a game.
///
/// All money is in minor currency units. Use the builder methods to customize:
///
/// ```
/// use aceyrs::GameOptions;
///
/// let options = GameOptions::default()
///     .with_ante(50)
///     .with_starting_pot(200)
///     .with_min_total_bets(20);
/// assert_eq!(options.ante, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct GameOptions {
    /// Ante charged to every active player per ante round.
    pub ante: Cents,
    /// Pot at the start of each game.
    pub starting_pot: Cents,
    /// Turns that must have been played before a cleared pot ends the game.
    pub min_total_bets: u32,
    /// Pot magnitude that ends the game on a clear regardless of turn count.
    #[cfg_attr(feature = "serde", serde(rename = "minPotClearValue"))]
    pub min_pot_clear: Cents,
    /// The game ends after more than `stagnation_factor * players`
    /// consecutive zero bets.
    pub stagnation_factor: u32,
    /// Rounding applied to multiplier and percentage bets.
    pub bet_rounding: RoundingMode,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            ante: 100,
            starting_pot: 0,
            min_total_bets: 0,
            min_pot_clear: 0,
            stagnation_factor: 5,
            bet_rounding: RoundingMode::Nearest,
        }
    }
}

impl GameOptions {
    /// Sets the ante.
    ///
    /// # Example
    ///
    /// ```
    /// use aceyrs::GameOptions;
    ///
    /// let options = GameOptions::default().with_ante(25);
    /// assert_eq!(options.ante, 25);
    /// ```
    #[must_use]
    pub const fn with_ante(mut self, ante: Cents) -> Self {
        self.ante = ante;
        self
    }

    /// Sets the starting pot.
    #[must_use]
    pub const fn with_starting_pot(mut self, pot: Cents) -> Self {
        self.starting_pot = pot;
        self
    }

    /// Sets the minimum number of turns before a pot clear ends the game.
    #[must_use]
    pub const fn with_min_total_bets(mut self, turns: u32) -> Self {
        self.min_total_bets = turns;
        self
    }

    /// Sets the pot magnitude that ends the game on a clear.
    #[must_use]
    pub const fn with_min_pot_clear(mut self, value: Cents) -> Self {
        self.min_pot_clear = value;
        self
    }

    /// Sets the stagnation guard factor.
    ///
    /// # Example
    ///
    /// ```
    /// use aceyrs::GameOptions;
    ///
    /// let options = GameOptions::default().with_stagnation_factor(10);
    /// assert_eq!(options.stagnation_factor, 10);
    /// ```
    #[must_use]
    pub const fn with_stagnation_factor(mut self, factor: u32) -> Self {
        self.stagnation_factor = factor;
        self
    }

    /// Sets the rounding mode for computed bets.
    #[must_use]
    pub const fn with_bet_rounding(mut self, mode: RoundingMode) -> Self {
        self.bet_rounding = mode;
        self
    }

    /// Checks the table rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the ante is not positive, a money amount is
    /// negative, or the stagnation factor is zero.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.ante <= 0 {
            return Err(ConfigError::InvalidAnte);
        }
        if self.starting_pot < 0 || self.min_pot_clear < 0 {
            return Err(ConfigError::NegativeAmount);
        }
        if self.stagnation_factor == 0 {
            return Err(ConfigError::InvalidStagnation);
        }
        Ok(())
    }
}
