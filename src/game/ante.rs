use alloc::vec::Vec;

use tracing::debug;

use crate::result::TurnEvent;

use super::Game;

impl Game {
    /// Charges every active player one ante.
    ///
    /// Players who cannot pay even after rebuying give up. Returns whether
    /// anyone is still active.
    pub(super) fn ante_up(&mut self, events: &mut Vec<TurnEvent>) -> bool {
        if self.active_players() == 0 {
            return false;
        }

        let ante = self.options.ante;
        for (index, player) in self.players.iter_mut().enumerate() {
            if !player.active {
                continue;
            }

            player.rebuy_until(ante, events);
            if player.money >= ante {
                player.money -= ante;
                self.pot += ante;
                self.contributions[index] += ante;
            } else {
                player.active = false;
                self.stats.players_gave_up += 1;
                debug!(player = %player.config().id, money = player.money, "cannot pay ante");
                events.push(TurnEvent::GaveUp {
                    player: player.config().id.clone(),
                });
            }
        }

        self.stats.antes += 1;
        self.active_players() > 0
    }

    /// Starts a fresh pot after a clear that did not end the game.
    ///
    /// Contribution tracking restarts from the residual pot before the new
    /// ante is collected. Returns whether anyone is still active.
    pub(super) fn restart_pot(&mut self, events: &mut Vec<TurnEvent>) -> bool {
        self.pot_baseline = self.pot;
        self.contributions.iter_mut().for_each(|amount| *amount = 0);
        self.stats
            .contribution_history
            .iter_mut()
            .for_each(Vec::clear);
        debug!(pot = self.pot, turns = self.stats.turns, "pot cleared, new ante round");
        self.ante_up(events)
    }
}
