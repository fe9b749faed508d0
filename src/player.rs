//! Player configuration and per-game bankroll state.

use alloc::string::String;
use alloc::vec::Vec;

use tracing::debug;

use crate::error::ConfigError;
use crate::result::{PlayerFinancials, TurnEvent};
use crate::strategy::{BettingStrategy, CardCounting};

/// Money in minor currency units (cents).
pub type Cents = i64;

/// How a short player buys back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RebuyMode {
    /// Never rebuy.
    #[default]
    None,
    /// Add the configured amount per rebuy.
    Fixed,
    /// Add exactly the shortfall.
    CoverBet,
}

/// How many rebuys a player may make in one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RebuyLimit {
    /// At most this many rebuys.
    Limited(u32),
    /// No limit.
    Unlimited,
}

impl Default for RebuyLimit {
    fn default() -> Self {
        Self::Limited(0)
    }
}

impl RebuyLimit {
    /// Rebuys left after `used`, `None` when unlimited.
    #[must_use]
    pub const fn remaining(self, used: u32) -> Option<u32> {
        match self {
            Self::Limited(count) => Some(count.saturating_sub(used)),
            Self::Unlimited => None,
        }
    }
}

/// A player's rebuy policy.
///
/// ```
/// use aceyrs::{RebuyLimit, RebuyMode, RebuyPolicy};
///
/// let policy = RebuyPolicy::fixed(5_000).with_limit(RebuyLimit::Limited(2));
/// assert_eq!(policy.mode, RebuyMode::Fixed);
/// assert!(policy.allows(1));
/// assert!(!policy.allows(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RebuyPolicy {
    /// Rebuy mode.
    pub mode: RebuyMode,
    /// Amount added per fixed rebuy, and the fallback for cover-bet rebuys.
    pub amount: Cents,
    /// Rebuy count limit.
    pub limit: RebuyLimit,
}

impl RebuyPolicy {
    /// A policy that never rebuys.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            mode: RebuyMode::None,
            amount: 0,
            limit: RebuyLimit::Limited(0),
        }
    }

    /// Unlimited rebuys of a fixed amount.
    #[must_use]
    pub const fn fixed(amount: Cents) -> Self {
        Self {
            mode: RebuyMode::Fixed,
            amount,
            limit: RebuyLimit::Unlimited,
        }
    }

    /// Unlimited rebuys covering exactly the shortfall.
    #[must_use]
    pub const fn cover_bet() -> Self {
        Self {
            mode: RebuyMode::CoverBet,
            amount: 0,
            limit: RebuyLimit::Unlimited,
        }
    }

    /// Sets the rebuy count limit.
    #[must_use]
    pub const fn with_limit(mut self, limit: RebuyLimit) -> Self {
        self.limit = limit;
        self
    }

    /// Returns whether another rebuy is allowed after `used` counted rebuys.
    #[must_use]
    pub const fn allows(&self, used: u32) -> bool {
        match (self.mode, self.limit) {
            (RebuyMode::None, _) => false,
            (_, RebuyLimit::Unlimited) => true,
            (_, RebuyLimit::Limited(count)) => used < count,
        }
    }
}

/// Configuration of one player, immutable for the duration of a game.
///
/// With the `serde` feature this reads and writes the host's camelCase JSON
/// form, where a rebuy count may be `"Infinity"` and tracked ranks are labels.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "crate::wire::PlayerRepr", into = "crate::wire::PlayerRepr")
)]
pub struct PlayerConfig {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Bankroll at the start of each game.
    pub start_money: Cents,
    /// Cumulative loss beyond which the player is withdrawn.
    pub stop_loss: Option<Cents>,
    /// Rebuy policy.
    pub rebuy: RebuyPolicy,
    /// What the player remembers about drawn cards.
    pub card_counting: CardCounting,
    /// Bet per spread.
    pub strategy: BettingStrategy,
}

impl PlayerConfig {
    /// Creates a player with the minimum bet at every spread and no rebuys.
    ///
    /// # Example
    ///
    /// ```
    /// use aceyrs::{PlayerConfig, RebuyPolicy};
    ///
    /// let player = PlayerConfig::new("p1", 10_000)
    ///     .with_name("Alice")
    ///     .with_stop_loss(Some(5_000))
    ///     .with_rebuy(RebuyPolicy::cover_bet());
    /// assert_eq!(player.name, "Alice");
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, start_money: Cents) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            start_money,
            stop_loss: None,
            rebuy: RebuyPolicy::none(),
            card_counting: CardCounting::None,
            strategy: BettingStrategy::default(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the stop-loss threshold.
    #[must_use]
    pub const fn with_stop_loss(mut self, stop_loss: Option<Cents>) -> Self {
        self.stop_loss = stop_loss;
        self
    }

    /// Sets the rebuy policy.
    #[must_use]
    pub const fn with_rebuy(mut self, rebuy: RebuyPolicy) -> Self {
        self.rebuy = rebuy;
        self
    }

    /// Sets the card-counting capability.
    #[must_use]
    pub fn with_card_counting(mut self, card_counting: CardCounting) -> Self {
        self.card_counting = card_counting;
        self
    }

    /// Sets the betting strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: BettingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Checks the player configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for negative money amounts, a non-positive fixed
    /// rebuy amount, invalid strategy values, or invalid tracked ranks.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_money < 0 || self.stop_loss.is_some_and(|limit| limit < 0) {
            return Err(ConfigError::NegativeAmount);
        }
        if self.rebuy.mode == RebuyMode::Fixed && self.rebuy.amount <= 0 {
            return Err(ConfigError::InvalidRebuyAmount);
        }
        if self.rebuy.amount < 0 {
            return Err(ConfigError::NegativeAmount);
        }
        self.strategy.validate()?;
        self.card_counting.validate()
    }
}

/// Bankroll state of one player during a game.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    config: PlayerConfig,
    /// Current bankroll.
    pub money: Cents,
    /// Whether the player is still in the game.
    pub active: bool,
    /// Rebuys counted against a finite limit.
    pub rebuys_used: u32,
    /// Total money added through rebuys.
    pub rebuy_amount_used: Cents,
}

impl PlayerState {
    /// Seats a player with their starting bankroll.
    #[must_use]
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            money: config.start_money,
            active: true,
            rebuys_used: 0,
            rebuy_amount_used: 0,
            config,
        }
    }

    /// Returns the player's configuration.
    #[must_use]
    pub const fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Buys back in until the bankroll covers `needed` or the policy refuses.
    ///
    /// Each rebuy is appended to `events`.
    pub fn rebuy_until(&mut self, needed: Cents, events: &mut Vec<TurnEvent>) {
        let policy = self.config.rebuy;
        while self.money < needed && policy.allows(self.rebuys_used) {
            let mut amount = match policy.mode {
                RebuyMode::CoverBet => needed - self.money,
                RebuyMode::Fixed | RebuyMode::None => policy.amount,
            };
            if amount <= 0 {
                amount = policy.amount;
            }
            if amount <= 0 {
                break;
            }

            self.money += amount;
            self.rebuy_amount_used += amount;
            if matches!(policy.limit, RebuyLimit::Limited(_)) {
                self.rebuys_used += 1;
            }

            let remaining = policy.limit.remaining(self.rebuys_used);
            debug!(player = %self.config.id, amount, ?remaining, "rebuy");
            events.push(TurnEvent::Rebuy {
                player: self.config.id.clone(),
                amount,
                remaining,
            });
        }
    }

    /// Money lost so far, counting rebuys as money put in.
    #[must_use]
    pub const fn cumulative_loss(&self) -> Cents {
        self.config.start_money + self.rebuy_amount_used - self.money
    }

    /// Returns whether the player is active and past their stop-loss.
    #[must_use]
    pub fn breached_stop_loss(&self) -> bool {
        self.active
            && self
                .config
                .stop_loss
                .is_some_and(|limit| self.cumulative_loss() > limit)
    }

    /// Snapshot of the player's money position.
    #[must_use]
    pub fn financials(&self) -> PlayerFinancials {
        PlayerFinancials {
            player: self.config.id.clone(),
            start_money: self.config.start_money,
            final_money: self.money,
            rebuy_amount_used: self.rebuy_amount_used,
            rebuys_used: self.rebuys_used,
            active: self.active,
        }
    }
}
