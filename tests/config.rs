//! JSON configuration tests.

use aceyrs::simulation::SimulationConfig;
use aceyrs::{
    BetMode, CardCounting, GameOptions, PlayerConfig, RebuyLimit, RebuyMode, RoundingMode,
};

const CONFIG: &str = r#"{
    "game": { "ante": 100, "startingPot": 500, "minTotalBets": 20, "minPotClearValue": 5000 },
    "players": [
        {
            "id": "player-1",
            "name": "Nathan",
            "startMoney": 2000,
            "stopLoss": 5000,
            "rebuy": { "strategy": "cover_bet", "amount": 5000, "count": "Infinity" },
            "cardCounting": "custom",
            "customRanks": ["A", "K", "10"],
            "bettingStrategy": [
                { "type": "min", "value": 1 }, { "type": "min", "value": 1 },
                { "type": "min", "value": 1 }, { "type": "min", "value": 1 },
                { "type": "min", "value": 1 }, { "type": "min", "value": 1 },
                { "type": "min", "value": 1 }, { "type": "ante", "value": 1 },
                { "type": "ante_multiple", "value": 5 }, { "type": "ante", "value": 5 },
                { "type": "pot", "value": 100 }, { "type": "pot_percent", "value": 100 },
                { "type": "pot", "value": 100 }
            ]
        },
        {
            "id": "player-2",
            "startMoney": 2000,
            "rebuy": { "strategy": "fixed", "amount": 1000, "count": 3 }
        }
    ],
    "simulationCount": 50,
    "shouldHaltInitially": true
}"#;

#[test]
fn host_json_configuration_parses() {
    let config: SimulationConfig = serde_json::from_str(CONFIG).unwrap();

    assert_eq!(config.game.ante, 100);
    assert_eq!(config.game.starting_pot, 500);
    assert_eq!(config.game.min_total_bets, 20);
    assert_eq!(config.game.min_pot_clear, 5_000);
    assert_eq!(config.game.stagnation_factor, 5);
    assert_eq!(config.simulation_count, 50);
    assert!(config.start_halted);
    assert!(!config.show_live_deck);
    assert_eq!(config.seed, 0);
    config.validate().unwrap();

    let nathan = &config.players[0];
    assert_eq!(nathan.name, "Nathan");
    assert_eq!(nathan.stop_loss, Some(5_000));
    assert_eq!(nathan.rebuy.mode, RebuyMode::CoverBet);
    assert_eq!(nathan.rebuy.limit, RebuyLimit::Unlimited);
    assert_eq!(nathan.card_counting, CardCounting::Custom(vec![14, 13, 10]));
    assert_eq!(nathan.strategy.entry(0), BetMode::Min);
    assert_eq!(nathan.strategy.entry(8), BetMode::AnteMultiple(5.0));
    assert_eq!(nathan.strategy.entry(11), BetMode::PotPercent(100.0));

    let second = &config.players[1];
    assert_eq!(second.name, "player-2");
    assert_eq!(second.stop_loss, None);
    assert_eq!(second.rebuy.limit, RebuyLimit::Limited(3));
    assert_eq!(second.card_counting, CardCounting::None);
    assert_eq!(second.strategy.entry(12), BetMode::Min);
}

#[test]
fn player_configuration_serializes_to_host_shape() {
    let config: SimulationConfig = serde_json::from_str(CONFIG).unwrap();
    let json = serde_json::to_value(&config.players[0]).unwrap();

    assert_eq!(json["startMoney"], 2_000);
    assert_eq!(json["rebuy"]["count"], "Infinity");
    assert_eq!(json["customRanks"][0], "A");
    assert_eq!(json["bettingStrategy"][8]["type"], "ante");
    assert_eq!(json["bettingStrategy"][12]["type"], "pot");

    let parsed: PlayerConfig = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, config.players[0]);
}

#[test]
fn malformed_player_entries_are_rejected() {
    let bad_count = r#"{ "id": "p", "startMoney": 10, "rebuy": { "strategy": "fixed", "amount": 5, "count": "lots" } }"#;
    assert!(serde_json::from_str::<PlayerConfig>(bad_count).is_err());

    let bad_rank = r#"{ "id": "p", "startMoney": 10, "cardCounting": "custom", "customRanks": ["Z"] }"#;
    assert!(serde_json::from_str::<PlayerConfig>(bad_rank).is_err());

    let short_strategy = r#"{ "id": "p", "startMoney": 10, "bettingStrategy": [{ "type": "min" }] }"#;
    assert!(serde_json::from_str::<PlayerConfig>(short_strategy).is_err());

    let bad_type = r#"{ "id": "p", "startMoney": 10, "bettingStrategy": [{ "type": "all_in", "value": 1 }] }"#;
    assert!(serde_json::from_str::<PlayerConfig>(bad_type).is_err());
}

#[test]
fn game_options_fill_missing_fields_with_defaults() {
    let options: GameOptions = serde_json::from_str(r#"{ "ante": 25, "betRounding": "down" }"#).unwrap();

    assert_eq!(options.ante, 25);
    assert_eq!(options.bet_rounding, RoundingMode::Down);
    assert_eq!(options.starting_pot, 0);
    assert_eq!(options.stagnation_factor, 5);
}
