//! Selection policies for Monte Carlo Tree Search
//!
//! Selection policies determine which child to descend into during the
//! selection phase, balancing exploration and exploitation.

use crate::{game::Game, tree::MCTSNode, utils};

/// Trait for policies that select nodes to explore
pub trait SelectionPolicy<G: Game> {
    /// Selects a child index of `node`, which must have children
    fn select_child(&self, node: &MCTSNode<G>) -> usize;
}

/// Upper Confidence Bound for Trees (UCT) selection policy
///
/// Picks the child maximizing
///
/// ```text
/// UCT = mean_reward + C * sqrt(ln(parent_visits) / child_visits)
/// ```
///
/// where `mean_reward` is measured for the player choosing at `node`.
/// Unvisited children score infinitely high. Ties go to the child expanded
/// first.
#[derive(Debug, Clone)]
pub struct UCTPolicy {
    /// Exploration constant `C`
    pub exploration_constant: f64,
}

impl UCTPolicy {
    /// Creates a new UCT policy with the given exploration constant
    pub fn new(exploration_constant: f64) -> Self {
        UCTPolicy {
            exploration_constant,
        }
    }
}

impl Default for UCTPolicy {
    fn default() -> Self {
        Self::new(std::f64::consts::SQRT_2)
    }
}

impl<G: Game> SelectionPolicy<G> for UCTPolicy {
    fn select_child(&self, node: &MCTSNode<G>) -> usize {
        let parent_visits = node.visits();
        let mut best_value = f64::NEG_INFINITY;
        let mut best_index = 0;

        for (i, child) in node.children.iter().enumerate() {
            let value = utils::uct_value(
                child.total_reward(),
                child.visits(),
                parent_visits,
                self.exploration_constant,
            );

            if value > best_value {
                best_value = value;
                best_index = i;
            }
        }

        best_index
    }
}

// Implement SelectionPolicy for Box<dyn SelectionPolicy>
impl<G: Game> SelectionPolicy<G> for Box<dyn SelectionPolicy<G>> {
    fn select_child(&self, node: &MCTSNode<G>) -> usize {
        (**self).select_child(node)
    }
}
