//! Backpropagation policies for Monte Carlo Tree Search
//!
//! Backpropagation policies determine how to update node statistics
//! after a simulation.

use crate::{game::Game, tree::MCTSNode};

/// Trait for policies that backpropagate simulation results
pub trait BackpropagationPolicy<G: Game> {
    /// Updates statistics for a node given the reward for its player
    fn update_stats(&self, node: &mut MCTSNode<G>, reward: f64);
}

/// Standard backpropagation policy
///
/// Increments the visit count and adds the reward to the total.
#[derive(Debug, Clone, Default)]
pub struct StandardPolicy;

impl StandardPolicy {
    /// Creates a new standard policy
    pub fn new() -> Self {
        StandardPolicy
    }
}

impl<G: Game> BackpropagationPolicy<G> for StandardPolicy {
    fn update_stats(&self, node: &mut MCTSNode<G>, reward: f64) {
        node.increment_visits();
        node.add_reward(reward);
    }
}

// Implement BackpropagationPolicy for Box<dyn BackpropagationPolicy>
impl<G: Game> BackpropagationPolicy<G> for Box<dyn BackpropagationPolicy<G>> {
    fn update_stats(&self, node: &mut MCTSNode<G>, reward: f64) {
        (**self).update_stats(node, reward)
    }
}
