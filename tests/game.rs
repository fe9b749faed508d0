//! Game integration tests.

use aceyrs::{
    BetMode, BettingStrategy, Card, ConfigError, DECK_SIZE, Deck, EndReason, Game, GameOptions,
    GamePhase, Outcome, PlayerConfig, PlayerState, RebuyLimit, RebuyPolicy, Suit, TurnEvent,
    TurnOutcome,
};

const fn card(suit: Suit, rank: u8) -> Card {
    Card::new(suit, rank)
}

fn stacked_game(options: GameOptions, players: &[PlayerConfig], top: &[Card]) -> Game {
    let deck = Deck::stacked(top, 99).unwrap();
    Game::with_deck(options, players, deck).unwrap()
}

fn pot_bettor(id: &str, money: i64) -> PlayerConfig {
    PlayerConfig::new(id, money).with_strategy(BettingStrategy::uniform(BetMode::PotPercent(100.0)))
}

fn assert_pot_invariant(game: &Game) {
    let contributed: i64 = game.contributions().iter().sum();
    assert_eq!(game.pot(), game.pot_baseline() + contributed);
}

#[test]
fn double_loss_pays_twice_into_the_pot() {
    let players = [PlayerConfig::new("p1", 10_000)];
    let mut game = stacked_game(
        GameOptions::default(),
        &players,
        &[
            card(Suit::Hearts, 7),
            card(Suit::Diamonds, 7),
            card(Suit::Clubs, 7),
        ],
    );
    assert_eq!(game.phase(), GamePhase::AwaitingAnte);

    let record = game.play_turn().unwrap().unwrap();
    assert_eq!(record.spread, 0);
    assert_eq!(record.bet, 100);
    assert_eq!(record.money_before, 9_900);
    assert_eq!(record.card3, Some(card(Suit::Clubs, 7)));
    assert_eq!(record.outcome, TurnOutcome::Resolved(Outcome::DoubleLoss));

    assert_eq!(game.pot(), 300);
    assert_eq!(game.players()[0].money, 9_800);
    assert_eq!(game.contributions(), &[300]);
    assert_eq!(game.phase(), GamePhase::TurnInProgress);
    assert_pot_invariant(&game);

    let tally = game.stats().spreads[0];
    assert_eq!(tally.occurrences, 1);
    assert_eq!(tally.double_losses, 1);
    assert_eq!(game.stats().pot_history, vec![300]);
}

#[test]
fn stop_loss_then_pot_clear_restarts_with_new_ante() {
    let options = GameOptions::default()
        .with_starting_pot(1_000)
        .with_min_total_bets(1_000)
        .with_min_pot_clear(1_000_000);
    let players = [
        pot_bettor("p1", 10_000).with_stop_loss(Some(1_000)),
        pot_bettor("p2", 10_000),
    ];
    let mut game = stacked_game(
        options,
        &players,
        &[
            card(Suit::Hearts, 7),
            card(Suit::Diamonds, 9),
            card(Suit::Clubs, 2),
            card(Suit::Hearts, 2),
            card(Suit::Hearts, 14),
            card(Suit::Clubs, 8),
        ],
    );

    let first = game.play_turn().unwrap().unwrap();
    assert_eq!(first.player, 0);
    assert_eq!(first.spread, 2);
    assert_eq!(first.bet, 1_200);
    assert_eq!(first.outcome, TurnOutcome::Resolved(Outcome::Loss));
    assert_eq!(
        first.events,
        vec![TurnEvent::StopLoss {
            player: "p1".to_string(),
            threshold: 1_000,
        }]
    );
    assert_eq!(game.pot(), 2_400);
    assert_eq!(game.players()[0].money, 8_700);
    assert!(!game.players()[0].active);
    assert_pot_invariant(&game);

    let second = game.play_turn().unwrap().unwrap();
    assert_eq!(second.player, 1);
    assert_eq!(second.spread, 12);
    assert_eq!(second.bet, 2_400);
    assert_eq!(second.outcome, TurnOutcome::Resolved(Outcome::Win));
    assert_eq!(second.pot, 100);

    assert!(!game.is_over());
    assert_eq!(game.players()[1].money, 12_200);
    assert_eq!(game.pot_baseline(), 0);
    assert_eq!(game.contributions(), &[0, 100]);
    assert_pot_invariant(&game);

    let stats = game.stats();
    assert_eq!(stats.antes, 2);
    assert_eq!(stats.players_gave_up, 1);
    assert_eq!(stats.spreads[12].max_win, 2_400);
    assert_eq!(stats.bet_history, vec![vec![1_200], vec![2_400]]);
}

#[test]
fn pot_clear_ends_game_once_enough_turns_were_played() {
    let players = [pot_bettor("p1", 10_000)];
    let mut game = stacked_game(
        GameOptions::default(),
        &players,
        &[
            card(Suit::Hearts, 2),
            card(Suit::Spades, 14),
            card(Suit::Clubs, 9),
        ],
    );

    let record = game.play_turn().unwrap().unwrap();
    assert_eq!(record.outcome, TurnOutcome::Resolved(Outcome::Win));
    assert_eq!(game.pot(), 0);
    assert_eq!(game.phase(), GamePhase::GameOver(EndReason::PotCleared));
    assert!(game.play_turn().unwrap().is_none());

    let stats = game.finish();
    assert_eq!(stats.end_reason, Some(EndReason::PotCleared));
    assert_eq!(stats.financials[0].final_money, 10_000);
    assert_eq!(stats.financials[0].net(), 0);
}

#[test]
fn cover_bet_rebuy_adds_exact_shortfall() {
    let config = PlayerConfig::new("p1", 50).with_rebuy(RebuyPolicy::cover_bet());
    let mut player = PlayerState::new(config);
    let mut events = Vec::new();

    player.rebuy_until(200, &mut events);

    assert_eq!(player.money, 200);
    assert_eq!(player.rebuy_amount_used, 150);
    assert_eq!(player.rebuys_used, 0);
    assert_eq!(
        events,
        vec![TurnEvent::Rebuy {
            player: "p1".to_string(),
            amount: 150,
            remaining: None,
        }]
    );
}

#[test]
fn fixed_rebuys_stop_at_limit() {
    let config = PlayerConfig::new("p1", 0)
        .with_rebuy(RebuyPolicy::fixed(100).with_limit(RebuyLimit::Limited(2)));
    let mut player = PlayerState::new(config);
    let mut events = Vec::new();

    player.rebuy_until(500, &mut events);

    assert_eq!(player.money, 200);
    assert_eq!(player.rebuys_used, 2);
    assert_eq!(events.len(), 2);
    assert_eq!(player.cumulative_loss(), 0);
}

#[test]
fn short_player_quits_instead_of_betting() {
    let players = [pot_bettor("p1", 150)];
    let options = GameOptions::default().with_starting_pot(1_000);
    let mut game = stacked_game(
        options,
        &players,
        &[card(Suit::Hearts, 3), card(Suit::Spades, 12)],
    );

    let record = game.play_turn().unwrap().unwrap();
    assert_eq!(record.outcome, TurnOutcome::Quit);
    assert_eq!(record.card3, None);
    assert_eq!(game.players()[0].money, 50);
    assert_eq!(game.phase(), GamePhase::GameOver(EndReason::NoActivePlayers));
}

#[test]
fn player_who_cannot_ante_gives_up() {
    let players = [PlayerConfig::new("p1", 50), PlayerConfig::new("p2", 10_000)];
    let mut game = Game::new(GameOptions::default(), &players, 3).unwrap();

    let record = game.play_turn().unwrap().unwrap();
    assert_eq!(record.player, 1);
    assert!(record.events.contains(&TurnEvent::GaveUp {
        player: "p1".to_string(),
    }));
    assert!(!game.players()[0].active);
}

#[test]
fn low_deck_is_reshuffled_before_the_turn() {
    let players = [PlayerConfig::new("p1", 10_000)];
    let mut game = Game::new(GameOptions::default(), &players, 11).unwrap();
    game.deck_mut().draw(50).unwrap();

    let record = game.play_turn().unwrap().unwrap();
    let reshuffled = record.reshuffled.unwrap();
    assert_eq!(reshuffled.len(), DECK_SIZE);
    assert_eq!(game.stats().shuffles, 1);
    assert!(game.deck().is_complete());
    assert!(game.deck().remaining() < DECK_SIZE);
}

#[test]
fn zero_bets_end_game_by_stagnation() {
    let strategy = BettingStrategy::uniform(BetMode::PotPercent(0.0));
    let players = [PlayerConfig::new("p1", 10_000).with_strategy(strategy)];
    let mut game = Game::new(GameOptions::default(), &players, 5).unwrap();

    game.play_to_end().unwrap();

    let stats = game.finish();
    assert_eq!(stats.end_reason, Some(EndReason::Stagnation));
    assert_eq!(stats.turns, 5);
    assert!(stats.bet_history[0].is_empty());
}

#[test]
fn seeded_games_keep_pot_and_deck_invariants() {
    let aggressive = BettingStrategy::default()
        .with_entry(9, BetMode::AnteMultiple(3.0))
        .with_entry(10, BetMode::PotPercent(50.0))
        .with_entry(11, BetMode::PotPercent(100.0))
        .with_entry(12, BetMode::PotPercent(100.0));
    let players = [
        PlayerConfig::new("p1", 5_000)
            .with_strategy(aggressive)
            .with_rebuy(RebuyPolicy::cover_bet()),
        PlayerConfig::new("p2", 5_000)
            .with_strategy(aggressive)
            .with_rebuy(RebuyPolicy::fixed(1_000).with_limit(RebuyLimit::Limited(3))),
        PlayerConfig::new("p3", 2_000).with_stop_loss(Some(1_500)),
    ];
    let options = GameOptions::default()
        .with_starting_pot(500)
        .with_min_total_bets(40);

    for seed in 0..25 {
        let mut game = Game::new(options.clone(), &players, seed).unwrap();
        let mut pot_before = None;
        while let Some(record) = game.play_turn().unwrap() {
            if let Some(pot) = pot_before {
                assert!(record.bet <= pot);
            }
            assert!(record.bet >= 0);
            assert!(game.pot() >= 0);
            assert!(game.deck().is_complete());
            assert_pot_invariant(&game);
            pot_before = Some(game.pot());
        }
        assert!(game.is_over());

        let stats = game.finish();
        assert!(stats.end_reason.is_some());
        assert_eq!(stats.pot_history.len(), stats.turns as usize);
        let resolved: u32 = stats.spreads.iter().map(|tally| tally.occurrences).sum();
        let bets: usize = stats.bet_history.iter().map(Vec::len).sum();
        assert_eq!(resolved as usize, bets);
    }
}

#[test]
fn invalid_configurations_are_rejected() {
    let player = PlayerConfig::new("p1", 1_000);

    assert_eq!(
        Game::new(GameOptions::default(), &[], 0).unwrap_err(),
        ConfigError::NoPlayers
    );
    assert_eq!(
        Game::new(GameOptions::default().with_ante(0), &[player.clone()], 0).unwrap_err(),
        ConfigError::InvalidAnte
    );
    assert_eq!(
        Game::new(GameOptions::default(), &[player.clone(), player.clone()], 0).unwrap_err(),
        ConfigError::DuplicatePlayer
    );

    let negative = player.clone().with_stop_loss(Some(-1));
    assert_eq!(
        Game::new(GameOptions::default(), &[negative], 0).unwrap_err(),
        ConfigError::NegativeAmount
    );

    let bad_strategy = player
        .clone()
        .with_strategy(BettingStrategy::default().with_entry(4, BetMode::AnteMultiple(-2.0)));
    assert_eq!(
        Game::new(GameOptions::default(), &[bad_strategy], 0).unwrap_err(),
        ConfigError::InvalidStrategyValue { spread: 4 }
    );

    let bad_rebuy = player.with_rebuy(RebuyPolicy::fixed(0));
    assert_eq!(
        Game::new(GameOptions::default(), &[bad_rebuy], 0).unwrap_err(),
        ConfigError::InvalidRebuyAmount
    );

    assert_eq!(
        BettingStrategy::from_entries(&[BetMode::Min; 12]).unwrap_err(),
        ConfigError::StrategyLength(12)
    );
}

#[test]
fn stacked_deck_rejects_duplicates() {
    let top = [card(Suit::Hearts, 5), card(Suit::Hearts, 5)];
    assert!(Deck::stacked(&top, 0).is_err());

    let mut deck = Deck::new(1);
    assert!(deck.draw(53).is_err());
    assert_eq!(deck.draw(52).unwrap().len(), DECK_SIZE);
    assert!(deck.is_complete());
}
