//! Probability model and bet decision tests.

use aceyrs::card::full_deck;
use aceyrs::probability::{
    RankSplit, SPREAD_COUNT, bet_expected_values, classify, contextual_occurrence,
    contextual_outcomes, pair_count, theoretical_ev, theoretical_occurrence,
};
use aceyrs::strategy::{BetContext, decide_bet};
use aceyrs::{
    BetMode, Card, CardCounting, Deck, Outcome, RoundingMode, Suit, theoretical_stats,
};

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

#[test]
fn theoretical_occurrence_covers_every_pair() {
    let pairs: u32 = (0..SPREAD_COUNT).map(pair_count).sum();
    assert_eq!(pairs, 1326);

    let total: f64 = (0..SPREAD_COUNT).map(theoretical_occurrence).sum();
    assert!(close(total, 100.0));
    assert!(close(theoretical_occurrence(12), 16.0 / 1326.0 * 100.0));
}

#[test]
fn rank_split_partitions_thirteen_ranks() {
    for spread in 0..SPREAD_COUNT {
        let split = RankSplit::for_spread(spread);
        assert_eq!(split.win + split.loss + split.double_loss, 13);
    }

    let pair = RankSplit::for_spread(0);
    assert_eq!((pair.win, pair.loss, pair.double_loss), (0, 12, 1));

    let widest = RankSplit::for_spread(12);
    assert_eq!((widest.win, widest.loss, widest.double_loss), (11, 0, 2));
}

#[test]
fn theoretical_ev_matches_closed_form() {
    assert!(close(theoretical_ev(0), -14.0 / 13.0));
    assert!(close(theoretical_ev(1), -15.0 / 13.0));
    assert!(close(theoretical_ev(12), 7.0 / 13.0));

    for spread in 1..SPREAD_COUNT {
        let win = spread as f64 - 1.0;
        let loss = 11.0 - win;
        assert!(close(theoretical_ev(spread), (win - loss - 4.0) / 13.0));
    }
}

#[test]
fn theoretical_stats_are_stable() {
    let stats = theoretical_stats();
    assert_eq!(stats, theoretical_stats());

    for figures in &stats.spreads {
        let outcomes = figures.outcomes;
        assert!(close(outcomes.win + outcomes.loss + outcomes.double_loss, 100.0));
        assert!(close(figures.ev, outcomes.expected_value()));
    }
}

#[test]
fn third_card_classification() {
    assert_eq!(classify(7, 5, 9), Outcome::Win);
    assert_eq!(classify(5, 5, 9), Outcome::DoubleLoss);
    assert_eq!(classify(9, 5, 9), Outcome::DoubleLoss);
    assert_eq!(classify(10, 5, 9), Outcome::Loss);
    assert_eq!(classify(7, 7, 7), Outcome::DoubleLoss);
    assert_eq!(classify(8, 7, 8), Outcome::DoubleLoss);
    assert_eq!(classify(2, 7, 8), Outcome::Loss);
}

#[test]
fn contextual_outcomes_count_the_reference_deck() {
    let odds = contextual_outcomes(&full_deck(), 5, 9);
    assert!(close(odds.win, 12.0 / 52.0 * 100.0));
    assert!(close(odds.double_loss, 8.0 / 52.0 * 100.0));
    assert!(close(odds.loss, 32.0 / 52.0 * 100.0));

    let empty = contextual_outcomes(&[], 5, 9);
    assert!(close(empty.win + empty.loss + empty.double_loss, 0.0));
}

#[test]
fn contextual_occurrence_buckets_rank_distances() {
    let distribution = contextual_occurrence(&full_deck());
    for (index, percent) in distribution.iter().enumerate() {
        let distance = index + 1;
        let pairs = if distance < 13 { (13 - distance) * 16 } else { 0 };
        assert!(close(*percent, pairs as f64 / 1326.0 * 100.0));
    }

    let bucketed: f64 = distribution.iter().sum();
    assert!(close(bucketed, (1326.0 - 78.0) / 1326.0 * 100.0));

    let single = contextual_occurrence(&[Card::new(Suit::Hearts, 4)]);
    assert!(single.iter().all(|percent| *percent == 0.0));
}

#[test]
fn bet_expected_values_use_both_views() {
    let boundaries = [Card::new(Suit::Hearts, 2), Card::new(Suit::Spades, 14)];

    let estimate = bet_expected_values(100, boundaries, &full_deck());
    assert!(close(estimate.theoretical, 64.0));
    assert!(close(estimate.perceived, (44.0 - 16.0) / 52.0 * 100.0));

    let zero = bet_expected_values(0, boundaries, &full_deck());
    assert!(close(zero.theoretical, 0.0));
    assert!(close(zero.perceived, 0.0));
}

#[test]
fn bet_amounts_round_and_cap_at_pot() {
    assert_eq!(BetMode::Min.amount(1_000, 100, RoundingMode::Nearest), 100);
    assert_eq!(BetMode::AnteMultiple(2.5).amount(0, 100, RoundingMode::Down), 250);
    assert_eq!(BetMode::PotPercent(50.0).amount(1_001, 100, RoundingMode::Up), 501);
    assert_eq!(BetMode::PotPercent(50.0).amount(1_001, 100, RoundingMode::Down), 500);
    assert_eq!(BetMode::PotPercent(50.0).amount(1_001, 100, RoundingMode::Nearest), 501);

    let deck = Deck::new(4);
    let context = BetContext {
        pot: 1_000,
        ante: 100,
        deck: &deck,
        boundaries: [Card::new(Suit::Clubs, 3), Card::new(Suit::Clubs, 12)],
        rounding: RoundingMode::Nearest,
    };
    let capped = decide_bet(BetMode::AnteMultiple(50.0), &CardCounting::None, &context);
    assert_eq!(capped.bet, 1_000);

    let empty_pot = BetContext { pot: 0, ..context };
    let decision = decide_bet(BetMode::Min, &CardCounting::None, &empty_pot);
    assert_eq!(decision.bet, 0);
    assert!(close(decision.ev.perceived, 0.0));
}

#[test]
fn perceived_deck_follows_counting_mode() {
    let aces = [Card::new(Suit::Hearts, 14), Card::new(Suit::Diamonds, 14)];
    let mut deck = Deck::stacked(&[aces[0], aces[1], Card::new(Suit::Clubs, 5)], 8).unwrap();
    deck.draw(3).unwrap();

    assert_eq!(CardCounting::None.perceived_deck(&deck).len(), 52);
    assert_eq!(CardCounting::Full.perceived_deck(&deck).len(), 49);

    let tracked = CardCounting::Custom(vec![14]).perceived_deck(&deck);
    assert_eq!(tracked.len(), 50);
    assert!(!tracked.contains(&aces[0]));
    assert!(tracked.contains(&Card::new(Suit::Clubs, 5)));
}
