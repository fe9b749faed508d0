//! JSON shape of player configurations.
//!
//! Hosts persist players in a flat camelCase form: rebuy counts may be the
//! string `"Infinity"`, tracked ranks are labels, and the betting strategy is
//! a list of `{type, value}` objects. These types convert between that form
//! and [`PlayerConfig`].

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::card::{rank_from_label, rank_label};
use crate::error::ConfigError;
use crate::player::{Cents, PlayerConfig, RebuyLimit, RebuyMode, RebuyPolicy};
use crate::strategy::{BetMode, BettingStrategy, CardCounting};

const INFINITY: &str = "Infinity";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RebuyCount {
    Finite(u32),
    Named(String),
}

impl TryFrom<RebuyCount> for RebuyLimit {
    type Error = ConfigError;

    fn try_from(count: RebuyCount) -> Result<Self, Self::Error> {
        match count {
            RebuyCount::Finite(count) => Ok(Self::Limited(count)),
            RebuyCount::Named(name) if name == INFINITY => Ok(Self::Unlimited),
            RebuyCount::Named(_) => Err(ConfigError::InvalidRebuyCount),
        }
    }
}

impl From<RebuyLimit> for RebuyCount {
    fn from(limit: RebuyLimit) -> Self {
        match limit {
            RebuyLimit::Limited(count) => Self::Finite(count),
            RebuyLimit::Unlimited => Self::Named(INFINITY.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RebuyRepr {
    #[serde(default)]
    strategy: RebuyMode,
    #[serde(default)]
    amount: Cents,
    #[serde(default = "no_rebuys")]
    count: RebuyCount,
}

const fn no_rebuys() -> RebuyCount {
    RebuyCount::Finite(0)
}

impl Default for RebuyRepr {
    fn default() -> Self {
        Self {
            strategy: RebuyMode::None,
            amount: 0,
            count: no_rebuys(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum CountingKind {
    #[default]
    None,
    Full,
    Custom,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum EntryKind {
    Min,
    #[serde(alias = "ante_multiple")]
    Ante,
    #[serde(alias = "pot_percent")]
    Pot,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct StrategyEntry {
    #[serde(rename = "type")]
    kind: EntryKind,
    #[serde(default)]
    value: f64,
}

impl From<StrategyEntry> for BetMode {
    fn from(entry: StrategyEntry) -> Self {
        match entry.kind {
            EntryKind::Min => Self::Min,
            EntryKind::Ante => Self::AnteMultiple(entry.value),
            EntryKind::Pot => Self::PotPercent(entry.value),
        }
    }
}

impl From<BetMode> for StrategyEntry {
    fn from(mode: BetMode) -> Self {
        let (kind, value) = match mode {
            BetMode::Min => (EntryKind::Min, 1.0),
            BetMode::AnteMultiple(value) => (EntryKind::Ante, value),
            BetMode::PotPercent(value) => (EntryKind::Pot, value),
        };
        Self { kind, value }
    }
}

/// Serialized form of a [`PlayerConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRepr {
    id: String,
    #[serde(default)]
    name: Option<String>,
    start_money: Cents,
    #[serde(default)]
    stop_loss: Option<Cents>,
    #[serde(default)]
    rebuy: RebuyRepr,
    #[serde(default)]
    card_counting: CountingKind,
    #[serde(default)]
    custom_ranks: Vec<String>,
    #[serde(default)]
    betting_strategy: Vec<StrategyEntry>,
}

impl TryFrom<PlayerRepr> for PlayerConfig {
    type Error = ConfigError;

    fn try_from(repr: PlayerRepr) -> Result<Self, Self::Error> {
        let card_counting = match repr.card_counting {
            CountingKind::None => CardCounting::None,
            CountingKind::Full => CardCounting::Full,
            CountingKind::Custom => CardCounting::Custom(
                repr.custom_ranks
                    .iter()
                    .map(|label| rank_from_label(label).ok_or(ConfigError::InvalidRank))
                    .collect::<Result<_, _>>()?,
            ),
        };

        let strategy = if repr.betting_strategy.is_empty() {
            BettingStrategy::default()
        } else {
            let modes: Vec<BetMode> = repr.betting_strategy.into_iter().map(BetMode::from).collect();
            BettingStrategy::from_entries(&modes)?
        };

        Ok(Self {
            name: repr.name.unwrap_or_else(|| repr.id.clone()),
            id: repr.id,
            start_money: repr.start_money,
            stop_loss: repr.stop_loss,
            rebuy: RebuyPolicy {
                mode: repr.rebuy.strategy,
                amount: repr.rebuy.amount,
                limit: repr.rebuy.count.try_into()?,
            },
            card_counting,
            strategy,
        })
    }
}

impl From<PlayerConfig> for PlayerRepr {
    fn from(config: PlayerConfig) -> Self {
        let (card_counting, custom_ranks) = match config.card_counting {
            CardCounting::None => (CountingKind::None, Vec::new()),
            CardCounting::Full => (CountingKind::Full, Vec::new()),
            CardCounting::Custom(ranks) => (
                CountingKind::Custom,
                ranks.iter().map(|&rank| rank_label(rank).to_string()).collect(),
            ),
        };

        Self {
            id: config.id,
            name: Some(config.name),
            start_money: config.start_money,
            stop_loss: config.stop_loss,
            rebuy: RebuyRepr {
                strategy: config.rebuy.mode,
                amount: config.rebuy.amount,
                count: config.rebuy.limit.into(),
            },
            card_counting,
            custom_ranks,
            betting_strategy: config
                .strategy
                .entries()
                .iter()
                .map(|&mode| StrategyEntry::from(mode))
                .collect(),
        }
    }
}
