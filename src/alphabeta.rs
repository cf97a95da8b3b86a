//! Minimax search with alpha-beta pruning
//!
//! Produces the same decision value as [`MinimaxSearch`](crate::MinimaxSearch)
//! while skipping branches that cannot influence it. `alpha` is the value
//! the maximizing player can already guarantee on the current path, `beta`
//! the value the minimizing player can already guarantee. As soon as a node's
//! value crosses the opposite bound its remaining siblings are not expanded.

use std::time::Instant;

use log::debug;

use crate::{
    game::{expandable_actions, Game},
    policy::ordering::{ActionOrdering, GameOrder},
    search::AdversarialSearch,
    stats::SearchStatistics,
    Result, SearchError,
};

/// Alpha-beta decision procedure
///
/// Every root action is searched with a full `(-inf, +inf)` window, so the
/// value reported for each root action is exact and ties resolve to the
/// first action in the ordering, exactly like plain minimax.
pub struct AlphaBetaSearch<G: Game> {
    game: G,
    ordering: Box<dyn ActionOrdering<G>>,
    statistics: SearchStatistics,
}

impl<G: Game> AlphaBetaSearch<G> {
    /// Creates a new alpha-beta search that expands actions in game order
    pub fn new(game: G) -> Self {
        AlphaBetaSearch {
            game,
            ordering: Box::new(GameOrder),
            statistics: SearchStatistics::new(),
        }
    }

    /// Sets the action ordering applied before every expansion
    pub fn with_action_ordering<O: ActionOrdering<G> + 'static>(mut self, ordering: O) -> Self {
        self.ordering = Box::new(ordering);
        self
    }

    /// Returns the game being searched
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Returns the value of `state` for `player` with `player` to move,
    /// searched within the window `(alpha, beta)`
    pub fn max_value(
        &mut self,
        state: &G::State,
        player: &G::Player,
        alpha: f64,
        beta: f64,
    ) -> Result<f64> {
        self.max_node(state, player, alpha, beta, 0)
    }

    /// Returns the value of `state` for `player` with the opponent to move,
    /// searched within the window `(alpha, beta)`
    pub fn min_value(
        &mut self,
        state: &G::State,
        player: &G::Player,
        alpha: f64,
        beta: f64,
    ) -> Result<f64> {
        self.min_node(state, player, alpha, beta, 0)
    }

    fn ordered_actions(
        &self,
        state: &G::State,
        player: &G::Player,
        depth: usize,
    ) -> Result<Vec<G::Action>> {
        let actions = expandable_actions(&self.game, state)?;
        Ok(self.ordering.order(&self.game, state, actions, player, depth))
    }

    fn max_node(
        &mut self,
        state: &G::State,
        player: &G::Player,
        mut alpha: f64,
        beta: f64,
        depth: usize,
    ) -> Result<f64> {
        self.statistics.record_expansion(depth);
        if self.game.is_terminal(state) {
            return self.game.utility(state, player);
        }

        let mut value = f64::NEG_INFINITY;
        for action in self.ordered_actions(state, player, depth)? {
            let child = self.game.result(state, &action)?;
            value = value.max(self.min_node(&child, player, alpha, beta, depth + 1)?);
            if value >= beta {
                return Ok(value);
            }
            alpha = alpha.max(value);
        }
        Ok(value)
    }

    fn min_node(
        &mut self,
        state: &G::State,
        player: &G::Player,
        alpha: f64,
        mut beta: f64,
        depth: usize,
    ) -> Result<f64> {
        self.statistics.record_expansion(depth);
        if self.game.is_terminal(state) {
            return self.game.utility(state, player);
        }

        let mut value = f64::INFINITY;
        for action in self.ordered_actions(state, player, depth)? {
            let child = self.game.result(state, &action)?;
            value = value.min(self.max_node(&child, player, alpha, beta, depth + 1)?);
            if value <= alpha {
                return Ok(value);
            }
            beta = beta.min(value);
        }
        Ok(value)
    }
}

impl<G: Game> AdversarialSearch<G> for AlphaBetaSearch<G> {
    fn make_decision(&mut self, state: &G::State) -> Result<G::Action> {
        self.statistics = SearchStatistics::new();
        let start_time = Instant::now();

        let player = self.game.player_to_move(state);
        let actions = self.game.actions(state);
        if actions.is_empty() {
            return Err(SearchError::NoLegalActions);
        }

        let mut best: Option<(G::Action, f64)> = None;
        for action in self.ordering.order(&self.game, state, actions, &player, 0) {
            let child = self.game.result(state, &action)?;
            let value = self.min_node(&child, &player, f64::NEG_INFINITY, f64::INFINITY, 1)?;
            if best.as_ref().map_or(true, |(_, best_value)| value > *best_value) {
                best = Some((action, value));
            }
        }

        self.statistics.total_time = start_time.elapsed();
        let (action, value) = best.ok_or(SearchError::NoLegalActions)?;
        debug!(
            "alpha-beta chose {:?} (value {:.3}, {} nodes)",
            action, value, self.statistics.nodes_expanded
        );
        Ok(action)
    }

    fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }
}
