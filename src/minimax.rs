//! Exhaustive minimax search
//!
//! The exact baseline every other algorithm is measured against. It explores
//! the complete tree below the decision state, so it is only practical for
//! small games.

use std::time::Instant;

use log::debug;

use crate::{
    game::{expandable_actions, Game},
    search::AdversarialSearch,
    stats::SearchStatistics,
    Result, SearchError,
};

/// Plain minimax decision procedure
///
/// Players are assumed to alternate: `max_value` maximizes and `min_value`
/// minimizes the utility of the player who makes the decision.
pub struct MinimaxSearch<G: Game> {
    game: G,
    statistics: SearchStatistics,
}

impl<G: Game> MinimaxSearch<G> {
    /// Creates a new minimax search for `game`
    pub fn new(game: G) -> Self {
        MinimaxSearch {
            game,
            statistics: SearchStatistics::new(),
        }
    }

    /// Returns the game being searched
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Returns the minimax value of `state` for `player`, with `player` to move
    pub fn max_value(&mut self, state: &G::State, player: &G::Player) -> Result<f64> {
        self.max_node(state, player, 0)
    }

    /// Returns the minimax value of `state` for `player`, with the opponent to move
    pub fn min_value(&mut self, state: &G::State, player: &G::Player) -> Result<f64> {
        self.min_node(state, player, 0)
    }

    fn max_node(&mut self, state: &G::State, player: &G::Player, depth: usize) -> Result<f64> {
        self.statistics.record_expansion(depth);
        if self.game.is_terminal(state) {
            return self.game.utility(state, player);
        }

        let mut value = f64::NEG_INFINITY;
        for action in expandable_actions(&self.game, state)? {
            let child = self.game.result(state, &action)?;
            value = value.max(self.min_node(&child, player, depth + 1)?);
        }
        Ok(value)
    }

    fn min_node(&mut self, state: &G::State, player: &G::Player, depth: usize) -> Result<f64> {
        self.statistics.record_expansion(depth);
        if self.game.is_terminal(state) {
            return self.game.utility(state, player);
        }

        let mut value = f64::INFINITY;
        for action in expandable_actions(&self.game, state)? {
            let child = self.game.result(state, &action)?;
            value = value.min(self.max_node(&child, player, depth + 1)?);
        }
        Ok(value)
    }
}

impl<G: Game> AdversarialSearch<G> for MinimaxSearch<G> {
    fn make_decision(&mut self, state: &G::State) -> Result<G::Action> {
        self.statistics = SearchStatistics::new();
        let start_time = Instant::now();

        let player = self.game.player_to_move(state);
        let mut best: Option<(G::Action, f64)> = None;

        for action in self.game.actions(state) {
            let child = self.game.result(state, &action)?;
            let value = self.min_node(&child, &player, 1)?;
            // Strict comparison keeps the first of several equally good actions.
            if best.as_ref().map_or(true, |(_, best_value)| value > *best_value) {
                best = Some((action, value));
            }
        }

        self.statistics.total_time = start_time.elapsed();
        let (action, value) = best.ok_or(SearchError::NoLegalActions)?;
        debug!(
            "minimax chose {:?} (value {:.3}, {} nodes)",
            action, value, self.statistics.nodes_expanded
        );
        Ok(action)
    }

    fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }
}
