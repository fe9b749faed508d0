use alloc::vec::Vec;

use tracing::{debug, trace, warn};

use crate::card::Card;
use crate::error::GameError;
use crate::player::Cents;
use crate::probability::{classify, contextual_occurrence, contextual_outcomes};
use crate::result::{EndReason, Outcome, TurnEvent, TurnOutcome, TurnRecord};
use crate::strategy::{BetContext, decide_bet};

use super::{Game, GamePhase};

/// Cards a turn may need: two boundaries and a third.
const CARDS_PER_TURN: usize = 3;

impl Game {
    /// Plays the next active player's turn.
    ///
    /// Collects the opening ante first if it is still due. Returns the turn
    /// record, or `None` once the game is over; a turn that ends the game
    /// still returns its record.
    ///
    /// # Errors
    ///
    /// Returns an error if a deck invariant is violated.
    pub fn play_turn(&mut self) -> Result<Option<TurnRecord>, GameError> {
        if self.is_over() {
            return Ok(None);
        }

        let mut events = Vec::new();
        if self.phase == GamePhase::AwaitingAnte {
            if !self.ante_up(&mut events) {
                self.end(EndReason::NoActivePlayers);
                return Ok(None);
            }
            self.phase = GamePhase::TurnInProgress;
        }

        let Some(seat) = self.next_active_seat() else {
            self.end(EndReason::NoActivePlayers);
            return Ok(None);
        };

        let reshuffled = if self.deck.remaining() < CARDS_PER_TURN {
            self.deck.reset();
            self.stats.shuffles += 1;
            trace!(shuffles = self.stats.shuffles, "deck reshuffled");
            Some(self.deck.draw_pile().to_vec())
        } else {
            None
        };

        let occurrence = contextual_occurrence(self.deck.draw_pile());
        self.stats.record_occurrence(&occurrence);

        let drawn = self.deck.draw(2)?;
        let boundaries = [drawn[0], drawn[1]];
        let spread = usize::from(boundaries[0].rank.abs_diff(boundaries[1].rank));

        let player = &self.players[seat];
        let decision = decide_bet(
            player.config().strategy.entry(spread),
            &player.config().card_counting,
            &BetContext {
                pot: self.pot,
                ante: self.options.ante,
                deck: &self.deck,
                boundaries,
                rounding: self.options.bet_rounding,
            },
        );
        let bet = decision.bet;

        if bet > 0 {
            self.consecutive_passes = 0;
        } else {
            self.consecutive_passes += 1;
        }
        let seats = u32::try_from(self.players.len()).unwrap_or(u32::MAX);
        if self.consecutive_passes > self.options.stagnation_factor.saturating_mul(seats) {
            warn!(passes = self.consecutive_passes, "no bets placed, stopping game");
            self.end(EndReason::Stagnation);
            return Ok(None);
        }

        self.stats.turns += 1;
        let money_before = self.players[seat].money;
        self.players[seat].rebuy_until(bet, &mut events);

        let (outcome, card3) = if bet > 0 && self.players[seat].money >= bet {
            let (outcome, card3) = self.resolve_bet(seat, bet, spread, boundaries)?;
            (TurnOutcome::Resolved(outcome), Some(card3))
        } else if bet > 0 {
            let player = &mut self.players[seat];
            player.active = false;
            self.stats.players_gave_up += 1;
            debug!(player = %player.config().id, bet, money = player.money, "cannot cover bet");
            (TurnOutcome::Quit, None)
        } else {
            (TurnOutcome::Pass, None)
        };
        trace!(seat, spread, bet, ?outcome, pot = self.pot, "turn resolved");

        self.stats.pot_history.push(self.pot);
        for (history, amount) in self
            .stats
            .contribution_history
            .iter_mut()
            .zip(&self.contributions)
        {
            history.push(*amount);
        }

        let player = &mut self.players[seat];
        if player.breached_stop_loss() {
            player.active = false;
            self.stats.players_gave_up += 1;
            let threshold = player.config().stop_loss.unwrap_or_default();
            debug!(player = %player.config().id, loss = player.cumulative_loss(), threshold, "stop-loss hit");
            events.push(TurnEvent::StopLoss {
                player: player.config().id.clone(),
                threshold,
            });
        }

        if self.pot <= 0 {
            let busy = self.stats.turns >= self.options.min_total_bets;
            if busy || self.pot.abs() >= self.options.min_pot_clear {
                self.end(EndReason::PotCleared);
            } else if !self.restart_pot(&mut events) {
                self.end(EndReason::NoActivePlayers);
            }
        }

        if !self.is_over() && self.active_players() == 0 {
            self.end(EndReason::NoActivePlayers);
        }

        Ok(Some(TurnRecord {
            player: seat,
            card1: boundaries[0],
            card2: boundaries[1],
            spread,
            bet,
            card3,
            outcome,
            money_before,
            pot: self.pot,
            ev: decision.ev,
            events,
            reshuffled,
        }))
    }

    /// Finds the next active seat in round-robin order and advances past it.
    fn next_active_seat(&mut self) -> Option<usize> {
        let seats = self.players.len();
        let seat = (0..seats)
            .map(|offset| (self.next_seat + offset) % seats)
            .find(|&seat| self.players[seat].active)?;
        self.next_seat = (seat + 1) % seats;
        Some(seat)
    }

    /// Takes the bet, draws the third card and settles it against the pot.
    fn resolve_bet(
        &mut self,
        seat: usize,
        bet: Cents,
        spread: usize,
        boundaries: [Card; 2],
    ) -> Result<(Outcome, Card), GameError> {
        self.stats.bet_history[seat].push(bet);
        self.players[seat].money -= bet;

        let low = boundaries[0].rank.min(boundaries[1].rank);
        let high = boundaries[0].rank.max(boundaries[1].rank);
        let contextual = contextual_outcomes(self.deck.draw_pile(), low, high);

        let card3 = self.deck.draw(1)?[0];
        let outcome = classify(card3.rank, low, high);

        let winnings = match outcome {
            Outcome::DoubleLoss => {
                self.pot += bet * 2;
                self.contributions[seat] += bet * 2;
                0
            }
            Outcome::Win => {
                self.pot -= bet;
                self.contributions[seat] -= bet;
                self.players[seat].money += bet * 2;
                bet
            }
            Outcome::Loss => {
                self.pot += bet;
                self.contributions[seat] += bet;
                0
            }
        };

        self.stats.spreads[spread].record(outcome, contextual, winnings);
        Ok((outcome, card3))
    }
}
