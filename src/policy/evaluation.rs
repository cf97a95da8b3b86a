//! Heuristic evaluation at the depth cutoff
//!
//! When iterative deepening stops descending at its current depth limit, the
//! value of a non-terminal state is estimated by an [`Evaluator`] instead of
//! the game's true utility.

use std::marker::PhantomData;

use crate::{game::Game, Result};

/// Trait for functions that estimate the utility of non-terminal states
pub trait Evaluator<G: Game> {
    /// Estimates the utility of `state` for `player`
    ///
    /// `depth` is the ply of `state` below the decision state. The estimate
    /// should lie within the configured utility range.
    fn evaluate(&self, game: &G, state: &G::State, player: &G::Player, depth: usize)
        -> Result<f64>;
}

/// Evaluator without game knowledge
///
/// Every non-terminal state is scored at the midpoint of the utility range,
/// so only terminal states reached within the depth limit carry information.
#[derive(Debug, Clone, Copy)]
pub struct TerminalOnlyEvaluator {
    midpoint: f64,
}

impl TerminalOnlyEvaluator {
    /// Creates an evaluator for the utility range `[util_min, util_max]`
    pub fn new(util_min: f64, util_max: f64) -> Self {
        TerminalOnlyEvaluator {
            midpoint: (util_min + util_max) / 2.0,
        }
    }
}

impl Default for TerminalOnlyEvaluator {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

impl<G: Game> Evaluator<G> for TerminalOnlyEvaluator {
    fn evaluate(&self, game: &G, state: &G::State, player: &G::Player, _depth: usize) -> Result<f64> {
        if game.is_terminal(state) {
            return game.utility(state, player);
        }
        Ok(self.midpoint)
    }
}

/// Evaluates states with a closure
pub struct FnEvaluator<G, F> {
    evaluation: F,
    _phantom: PhantomData<fn() -> G>,
}

impl<G, F> FnEvaluator<G, F>
where
    G: Game,
    F: Fn(&G, &G::State, &G::Player, usize) -> f64,
{
    /// Creates a new evaluator from the given function
    pub fn new(evaluation: F) -> Self {
        FnEvaluator {
            evaluation,
            _phantom: PhantomData,
        }
    }
}

impl<G, F> Evaluator<G> for FnEvaluator<G, F>
where
    G: Game,
    F: Fn(&G, &G::State, &G::Player, usize) -> f64,
{
    fn evaluate(&self, game: &G, state: &G::State, player: &G::Player, depth: usize) -> Result<f64> {
        Ok((self.evaluation)(game, state, player, depth))
    }
}

// Implement Evaluator for Box<dyn Evaluator>
impl<G: Game> Evaluator<G> for Box<dyn Evaluator<G>> {
    fn evaluate(&self, game: &G, state: &G::State, player: &G::Player, depth: usize) -> Result<f64> {
        (**self).evaluate(game, state, player, depth)
    }
}
