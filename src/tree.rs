//! Tree data structures for Monte Carlo Tree Search
//!
//! Nodes own their children; there are no parent pointers. The way back to
//! the root is recorded as a [`NodePath`] during selection and replayed for
//! backpropagation, so the tree always has a single owner.

use std::fmt;

use crate::{
    game::{expandable_actions, Game},
    Result,
};

/// Represents a node in the MCTS tree
///
/// Each node holds the game state, the action that led to it, the player who
/// chose that action, and visit and reward statistics. Rewards are
/// accumulated from the perspective of `player`, so a parent selecting among
/// its children compares values from the point of view of the player to move.
pub struct MCTSNode<G: Game> {
    /// The game state at this node
    pub state: G::State,

    /// The action that led to this state (None for root)
    pub action: Option<G::Action>,

    /// Player who chose `action`; for the root, the player to move
    pub player: G::Player,

    /// Children nodes, in expansion order
    pub children: Vec<MCTSNode<G>>,

    /// Actions that have not yet been expanded into child nodes
    pub untried_actions: Vec<G::Action>,

    /// Depth of this node in the tree (root = 0)
    pub depth: usize,

    visits: u64,
    total_reward: f64,
}

impl<G: Game> MCTSNode<G> {
    /// Creates a new node for `state`
    ///
    /// Fails if `state` is non-terminal but offers no actions.
    pub fn new(
        game: &G,
        state: G::State,
        action: Option<G::Action>,
        player: G::Player,
        depth: usize,
    ) -> Result<Self> {
        let untried_actions = if game.is_terminal(&state) {
            Vec::new()
        } else {
            expandable_actions(game, &state)?
        };

        Ok(MCTSNode {
            state,
            action,
            player,
            children: Vec::new(),
            untried_actions,
            depth,
            visits: 0,
            total_reward: 0.0,
        })
    }

    /// Creates a root node for `state`
    pub fn root(game: &G, state: G::State) -> Result<Self> {
        let player = game.player_to_move(&state);
        Self::new(game, state, None, player, 0)
    }

    /// Returns the number of visits to this node
    pub fn visits(&self) -> u64 {
        self.visits
    }

    /// Returns the total reward accumulated at this node
    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    /// Returns the average reward (value) of this node
    pub fn value(&self) -> f64 {
        if self.visits == 0 {
            return 0.0;
        }
        self.total_reward / self.visits as f64
    }

    /// Increments the visit count
    pub fn increment_visits(&mut self) {
        self.visits += 1;
    }

    /// Adds reward to the total
    pub fn add_reward(&mut self, reward: f64) {
        self.total_reward += reward;
    }

    /// Returns true if every action has a child node
    pub fn is_fully_expanded(&self) -> bool {
        self.untried_actions.is_empty()
    }

    /// Returns true if this node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the number of nodes in the subtree rooted here
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(MCTSNode::subtree_size).sum::<usize>()
    }

    /// Expands the untried action at `action_index` into a new child
    ///
    /// Uses `swap_remove` on the untried actions, which changes the order of
    /// the remaining ones. Returns `None` if the index is out of bounds.
    pub fn expand(&mut self, game: &G, action_index: usize) -> Result<Option<&mut MCTSNode<G>>> {
        if action_index >= self.untried_actions.len() {
            return Ok(None);
        }

        let action = self.untried_actions.swap_remove(action_index);
        let next_state = game.result(&self.state, &action)?;
        let mover = game.player_to_move(&self.state);

        let child = MCTSNode::new(game, next_state, Some(action), mover, self.depth + 1)?;
        self.children.push(child);
        Ok(self.children.last_mut())
    }
}

impl<G: Game> fmt::Debug for MCTSNode<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MCTSNode")
            .field("action", &self.action)
            .field("player", &self.player)
            .field("visits", &self.visits)
            .field("value", &self.value())
            .field("children", &self.children.len())
            .field("untried_actions", &self.untried_actions.len())
            .finish()
    }
}

/// Represents a path through the MCTS tree
///
/// A path is a sequence of child indices leading from the root to a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath {
    /// Indices of children to follow from the root
    pub indices: Vec<usize>,
}

impl NodePath {
    /// Creates a new empty path (pointing to the root)
    pub fn new() -> Self {
        NodePath {
            indices: Vec::new(),
        }
    }

    /// Extends the path with a new index
    pub fn push(&mut self, index: usize) {
        self.indices.push(index);
    }

    /// Returns the length of the path
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if the path is empty
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "Path[root]");
        }
        write!(f, "Path[")?;
        for (i, idx) in self.indices.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", idx)?;
        }
        write!(f, "]")
    }
}
