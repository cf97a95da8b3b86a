//! Simulation policies for Monte Carlo Tree Search
//!
//! A simulation policy plays a game out from a node to a terminal state.
//! The terminal state is returned rather than a single score so that every
//! node on the path can be credited from its own player's perspective.

use rand::{rngs::StdRng, Rng};

use crate::{
    game::{expandable_actions, Game},
    Result,
};

/// Trait for policies that simulate games
pub trait SimulationPolicy<G: Game> {
    /// Plays from `state` until the game ends and returns the terminal state
    fn simulate(&self, game: &G, state: &G::State, rng: &mut StdRng) -> Result<G::State>;
}

/// Random rollout policy
///
/// Plays uniformly random legal actions until the game ends.
#[derive(Debug, Clone, Default)]
pub struct RandomRollout;

impl RandomRollout {
    /// Creates a new random rollout policy
    pub fn new() -> Self {
        RandomRollout
    }
}

impl<G: Game> SimulationPolicy<G> for RandomRollout {
    fn simulate(&self, game: &G, state: &G::State, rng: &mut StdRng) -> Result<G::State> {
        let mut current = state.clone();

        while !game.is_terminal(&current) {
            let actions = expandable_actions(game, &current)?;
            let action = &actions[rng.gen_range(0..actions.len())];
            current = game.result(&current, action)?;
        }

        Ok(current)
    }
}

// Implement SimulationPolicy for Box<dyn SimulationPolicy>
impl<G: Game> SimulationPolicy<G> for Box<dyn SimulationPolicy<G>> {
    fn simulate(&self, game: &G, state: &G::State, rng: &mut StdRng) -> Result<G::State> {
        (**self).simulate(game, state, rng)
    }
}
