//! The common interface of all adversarial search algorithms.

use crate::{game::Game, stats::SearchStatistics, Result};

/// An algorithm that chooses an action for the player to move
///
/// Implementations are single-threaded and keep no state between decisions
/// apart from the statistics of the most recent one.
pub trait AdversarialSearch<G: Game> {
    /// Returns the action chosen for the player to move in `state`
    ///
    /// Fails with [`SearchError::NoLegalActions`](crate::SearchError::NoLegalActions)
    /// if `state` offers no actions, and propagates any error raised by the game.
    fn make_decision(&mut self, state: &G::State) -> Result<G::Action>;

    /// Returns the statistics of the most recent decision
    fn statistics(&self) -> &SearchStatistics;
}
