//! Monte Carlo Tree Search
//!
//! Each decision builds a fresh tree below the decision state and runs
//! iterations of four phases until the iteration or time budget is spent:
//!
//! 1. **Selection**: descend from the root along the children maximizing the
//!    selection policy until reaching a node with untried actions or a
//!    terminal state.
//! 2. **Expansion**: turn one randomly chosen untried action into a child.
//! 3. **Simulation**: play out from the new node to a terminal state.
//! 4. **Backpropagation**: credit every node on the path with the terminal
//!    utility for the player who moved into it.
//!
//! The decision is the root child with the most visits (robust child).
//! The tree is discarded when the decision returns.

use std::time::{Duration, Instant};

use log::{debug, trace};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    config::{BestChildCriteria, MCTSConfig},
    game::Game,
    policy::{
        backpropagation::{BackpropagationPolicy, StandardPolicy},
        selection::{SelectionPolicy, UCTPolicy},
        simulation::{RandomRollout, SimulationPolicy},
    },
    search::AdversarialSearch,
    stats::SearchStatistics,
    tree::{MCTSNode, NodePath},
    Result, SearchError,
};

/// Monte Carlo Tree Search decision procedure
pub struct MonteCarloTreeSearch<G: Game> {
    game: G,

    /// Configuration for the search
    config: MCTSConfig,

    /// Statistics gathered during the last decision
    statistics: SearchStatistics,

    /// Policy for selecting nodes during the selection phase
    selection_policy: Box<dyn SelectionPolicy<G>>,

    /// Policy for simulating games during the simulation phase
    simulation_policy: Box<dyn SimulationPolicy<G>>,

    /// Policy for backpropagating results
    backpropagation_policy: Box<dyn BackpropagationPolicy<G>>,

    rng: StdRng,
}

impl<G: Game> MonteCarloTreeSearch<G> {
    /// Creates a new search with the given configuration
    pub fn new(game: G, config: MCTSConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        MonteCarloTreeSearch {
            game,
            selection_policy: Box::new(UCTPolicy::new(config.exploration_constant)),
            simulation_policy: Box::new(RandomRollout::new()),
            backpropagation_policy: Box::new(StandardPolicy::new()),
            config,
            statistics: SearchStatistics::new(),
            rng,
        }
    }

    /// Sets the selection policy to use
    pub fn with_selection_policy<P: SelectionPolicy<G> + 'static>(mut self, policy: P) -> Self {
        self.selection_policy = Box::new(policy);
        self
    }

    /// Sets the simulation policy to use
    pub fn with_simulation_policy<P: SimulationPolicy<G> + 'static>(mut self, policy: P) -> Self {
        self.simulation_policy = Box::new(policy);
        self
    }

    /// Sets the backpropagation policy to use
    pub fn with_backpropagation_policy<P: BackpropagationPolicy<G> + 'static>(
        mut self,
        policy: P,
    ) -> Self {
        self.backpropagation_policy = Box::new(policy);
        self
    }

    /// Returns the game being searched
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Returns the configuration
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// Runs a decision bounded only by `duration`
    ///
    /// The configured iteration budget is ignored for this call.
    pub fn search_for_time(&mut self, state: &G::State, duration: Duration) -> Result<G::Action> {
        let saved = self.config.clone();
        self.config.max_time = Some(duration);
        self.config.max_iterations = usize::MAX;

        let result = self.make_decision(state);
        self.config = saved;
        result
    }

    /// Runs the search and returns the finished tree
    ///
    /// [`make_decision`](AdversarialSearch::make_decision) is this followed by
    /// the best-child rule; exposing the tree lets callers inspect visit
    /// counts and values of the root's children.
    pub fn build_tree(&mut self, state: &G::State) -> Result<MCTSNode<G>> {
        self.config.validate()?;
        self.statistics = SearchStatistics::new();

        let mut root = MCTSNode::root(&self.game, state.clone())?;
        if root.untried_actions.is_empty() {
            return Err(SearchError::NoLegalActions);
        }
        self.statistics.tree_size = 1;

        // An iteration budget of zero alongside a time limit means time only.
        let iteration_budget = match (self.config.max_iterations, self.config.max_time) {
            (0, Some(_)) => usize::MAX,
            (n, _) => n,
        };

        let start_time = Instant::now();
        for i in 0..iteration_budget {
            if let Some(max_duration) = self.config.max_time {
                if start_time.elapsed() >= max_duration {
                    self.statistics.stopped_early = true;
                    debug!("search stopped after {} iterations due to time limit", i);
                    break;
                }
            }

            self.execute_iteration(&mut root)?;
            self.statistics.iterations = i + 1;
        }
        self.statistics.total_time = start_time.elapsed();

        Ok(root)
    }

    /// Execute a single iteration of the MCTS algorithm
    fn execute_iteration(&mut self, root: &mut MCTSNode<G>) -> Result<()> {
        // 1. Selection phase
        let mut path = self.selection(root);

        // 2. Expansion phase
        let leaf_state = self.expansion(root, &mut path)?;

        // 3. Simulation phase
        let terminal = self
            .simulation_policy
            .simulate(&self.game, &leaf_state, &mut self.rng)?;

        // 4. Backpropagation phase
        self.backpropagation(root, &path, &terminal)?;

        trace!("iteration finished at {}", path);
        Ok(())
    }

    /// Selection phase: descend to a node with untried actions or a terminal state
    fn selection(&mut self, root: &MCTSNode<G>) -> NodePath {
        let mut path = NodePath::new();
        let mut current = root;

        while !self.game.is_terminal(&current.state)
            && current.is_fully_expanded()
            && !current.is_leaf()
        {
            let best_child_idx = self.selection_policy.select_child(current);
            path.push(best_child_idx);
            current = &current.children[best_child_idx];
        }

        self.statistics.max_depth = self.statistics.max_depth.max(path.len());
        path
    }

    /// Expansion phase: add one child below the selected node
    ///
    /// Extends `path` to the new child and returns the state to simulate from.
    fn expansion(&mut self, root: &mut MCTSNode<G>, path: &mut NodePath) -> Result<G::State> {
        let mut node = root;
        for &index in &path.indices {
            node = &mut node.children[index];
        }

        if self.game.is_terminal(&node.state) || node.untried_actions.is_empty() {
            return Ok(node.state.clone());
        }

        let action_index = self.rng.gen_range(0..node.untried_actions.len());
        match node.expand(&self.game, action_index)? {
            Some(child) => {
                let state = child.state.clone();
                path.push(node.children.len() - 1);
                self.statistics.tree_size += 1;
                self.statistics.record_expansion(path.len());
                Ok(state)
            }
            None => Ok(node.state.clone()),
        }
    }

    /// Backpropagation phase: update every node from the root to the end of `path`
    fn backpropagation(
        &mut self,
        root: &mut MCTSNode<G>,
        path: &NodePath,
        terminal: &G::State,
    ) -> Result<()> {
        let reward = self.game.utility(terminal, &root.player)?;
        self.backpropagation_policy.update_stats(root, reward);

        let mut node = root;
        for &index in &path.indices {
            node = &mut node.children[index];
            let reward = self.game.utility(terminal, &node.player)?;
            self.backpropagation_policy.update_stats(node, reward);
        }

        Ok(())
    }

    /// Selects the final action according to the configured criteria
    fn select_best_action(&self, root: &MCTSNode<G>) -> Result<G::Action> {
        // The budget ran out before anything was expanded.
        if root.children.is_empty() {
            return root
                .untried_actions
                .first()
                .cloned()
                .ok_or(SearchError::NoLegalActions);
        }

        let mut best_index = 0;
        match self.config.best_child_criteria {
            BestChildCriteria::MostVisits => {
                let mut best_visits = 0;
                for (i, child) in root.children.iter().enumerate() {
                    if child.visits() > best_visits {
                        best_visits = child.visits();
                        best_index = i;
                    }
                }
            }
            BestChildCriteria::HighestValue => {
                let mut best_value = f64::NEG_INFINITY;
                for (i, child) in root.children.iter().enumerate() {
                    if child.visits() > 0 && child.value() > best_value {
                        best_value = child.value();
                        best_index = i;
                    }
                }
            }
        }

        root.children[best_index]
            .action
            .clone()
            .ok_or(SearchError::NoLegalActions)
    }
}

impl<G: Game> AdversarialSearch<G> for MonteCarloTreeSearch<G> {
    fn make_decision(&mut self, state: &G::State) -> Result<G::Action> {
        let root = self.build_tree(state)?;
        let action = self.select_best_action(&root)?;
        debug!(
            "mcts chose {:?} after {} iterations ({} nodes)",
            action, self.statistics.iterations, self.statistics.tree_size
        );
        Ok(action)
    }

    fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }
}
