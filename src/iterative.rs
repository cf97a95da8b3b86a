//! Iterative deepening alpha-beta search
//!
//! Repeats a depth-limited alpha-beta search with a growing depth limit until
//! the time budget is spent, the tree below the decision state has been
//! searched completely, or a decisive result is found. Non-terminal states at
//! the depth limit are scored by a pluggable [`Evaluator`].
//!
//! The search is anytime: the root actions are kept ordered by the values of
//! the deepest completed iteration, and the first of them is returned when
//! the budget expires. If not even the first iteration completes, the first
//! action of the initial ordering is returned.
//!
//! After every iteration the root actions are re-sorted by value so that the
//! next, deeper iteration searches the most promising action first.

use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::{
    config::IterativeDeepeningConfig,
    game::{expandable_actions, Game},
    policy::{
        evaluation::{Evaluator, TerminalOnlyEvaluator},
        ordering::{ActionOrdering, GameOrder},
    },
    search::AdversarialSearch,
    stats::SearchStatistics,
    Result, SearchError,
};

/// Iterative deepening alpha-beta decision procedure
pub struct IterativeDeepeningAlphaBetaSearch<G: Game> {
    game: G,
    config: IterativeDeepeningConfig,
    evaluator: Box<dyn Evaluator<G>>,
    ordering: Box<dyn ActionOrdering<G>>,
    statistics: SearchStatistics,
    timer: Timer,
    depth_limit: usize,
    /// Set when a non-terminal state was evaluated during the current iteration
    heuristic_evaluation_used: bool,
}

impl<G: Game> IterativeDeepeningAlphaBetaSearch<G> {
    /// Creates a new search with the given configuration
    ///
    /// Non-terminal states at the cutoff are scored at the midpoint of the
    /// configured utility range until an evaluator is supplied with
    /// [`with_evaluator`](Self::with_evaluator).
    pub fn new(game: G, config: IterativeDeepeningConfig) -> Self {
        let evaluator = TerminalOnlyEvaluator::new(config.util_min, config.util_max);
        let timer = Timer::new(config.time_limit);
        IterativeDeepeningAlphaBetaSearch {
            game,
            config,
            evaluator: Box::new(evaluator),
            ordering: Box::new(GameOrder),
            statistics: SearchStatistics::new(),
            timer,
            depth_limit: 0,
            heuristic_evaluation_used: false,
        }
    }

    /// Creates a new search for `game` using its utility range and the given budget
    pub fn for_game(game: G, time_limit: Duration) -> Self {
        let config = IterativeDeepeningConfig::for_game(&game).with_time_limit(time_limit);
        Self::new(game, config)
    }

    /// Sets the evaluation function used at the depth cutoff
    pub fn with_evaluator<E: Evaluator<G> + 'static>(mut self, evaluator: E) -> Self {
        self.evaluator = Box::new(evaluator);
        self
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

    /// Returns the configuration
    pub fn config(&self) -> &IterativeDeepeningConfig {
        &self.config
    }

    /// Returns true if `utility` is far enough from the midpoint to count
    /// as a forced win or loss
    pub fn has_safe_winner(&self, utility: f64) -> bool {
        (utility - self.config.utility_midpoint()).abs()
            > self.config.safe_winner_margin * self.config.utility_span()
    }

    /// Returns true if `new_utility` exceeds `utility` by more than the
    /// significance margin
    pub fn is_significantly_better(&self, new_utility: f64, utility: f64) -> bool {
        new_utility - utility > self.config.significance_margin * self.config.utility_span()
    }

    /// Shifts a decisive value by the bonus for the plies left below `depth`
    ///
    /// Wins found with more depth to spare are raised, losses found with more
    /// depth to spare are lowered, so quick wins and slow losses are preferred.
    fn with_decisive_bonus(&self, value: f64, depth: usize) -> f64 {
        if !self.has_safe_winner(value) {
            return value;
        }
        let remaining = self.depth_limit.saturating_sub(depth) as f64;
        let bonus = remaining * self.config.decisive_bonus_per_ply;
        if value > self.config.utility_midpoint() {
            value + bonus
        } else {
            value - bonus
        }
    }

    fn eval(&mut self, state: &G::State, player: &G::Player, depth: usize) -> Result<f64> {
        let value = if self.game.is_terminal(state) {
            self.game.utility(state, player)?
        } else {
            self.heuristic_evaluation_used = true;
            self.evaluator.evaluate(&self.game, state, player, depth)?
        };
        Ok(self.with_decisive_bonus(value, depth))
    }

    fn is_cutoff(&self, state: &G::State, depth: usize) -> bool {
        self.game.is_terminal(state) || depth >= self.depth_limit || self.timer.timed_out()
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

    fn max_value(
        &mut self,
        state: &G::State,
        player: &G::Player,
        mut alpha: f64,
        beta: f64,
        depth: usize,
    ) -> Result<f64> {
        self.statistics.record_expansion(depth);
        if self.is_cutoff(state, depth) {
            return self.eval(state, player, depth);
        }

        let mut value = f64::NEG_INFINITY;
        for action in self.ordered_actions(state, player, depth)? {
            let child = self.game.result(state, &action)?;
            value = value.max(self.min_value(&child, player, alpha, beta, depth + 1)?);
            if value >= beta {
                return Ok(value);
            }
            alpha = alpha.max(value);
        }
        Ok(value)
    }

    fn min_value(
        &mut self,
        state: &G::State,
        player: &G::Player,
        alpha: f64,
        mut beta: f64,
        depth: usize,
    ) -> Result<f64> {
        self.statistics.record_expansion(depth);
        if self.is_cutoff(state, depth) {
            return self.eval(state, player, depth);
        }

        let mut value = f64::INFINITY;
        for action in self.ordered_actions(state, player, depth)? {
            let child = self.game.result(state, &action)?;
            value = value.min(self.max_value(&child, player, alpha, beta, depth + 1)?);
            if value <= alpha {
                return Ok(value);
            }
            beta = beta.min(value);
        }
        Ok(value)
    }

    /// Searches every root action to the current depth limit
    ///
    /// Stops at the first action whose search was cut short by the timer;
    /// that action's value is unreliable and is not stored.
    fn search_depth(
        &mut self,
        state: &G::State,
        player: &G::Player,
        actions: &[G::Action],
    ) -> Result<ActionStore<G::Action>> {
        let mut store = ActionStore::new();
        for action in actions {
            let child = self.game.result(state, action)?;
            let value = self.min_value(&child, player, f64::NEG_INFINITY, f64::INFINITY, 1)?;
            if self.timer.timed_out() {
                break;
            }
            trace!("depth {}: {:?} -> {:.4}", self.depth_limit, action, value);
            store.add(action.clone(), value);
        }
        Ok(store)
    }
}

impl<G: Game> AdversarialSearch<G> for IterativeDeepeningAlphaBetaSearch<G> {
    fn make_decision(&mut self, state: &G::State) -> Result<G::Action> {
        self.config.validate()?;
        self.statistics = SearchStatistics::new();
        self.timer = Timer::new(self.config.time_limit);

        let player = self.game.player_to_move(state);
        let actions = self.game.actions(state);
        if actions.is_empty() {
            return Err(SearchError::NoLegalActions);
        }
        let mut results = self.ordering.order(&self.game, state, actions, &player, 0);
        if results.is_empty() {
            return Err(SearchError::NoLegalActions);
        }
        let mut best_value: Option<f64> = None;

        self.depth_limit = 0;
        loop {
            self.depth_limit += 1;
            self.heuristic_evaluation_used = false;
            self.statistics.iterations += 1;

            let store = self.search_depth(state, &player, &results)?;
            debug!("depth {}: {}", self.depth_limit, store.describe());

            if store.len() == results.len() {
                // A completed iteration replaces the previous ordering.
                self.statistics.depth_limit = self.depth_limit;
                let values = store.values();
                best_value = values.first().copied();
                results = store.into_actions();

                if let Some(&best) = values.first() {
                    if self.has_safe_winner(best) {
                        debug!("depth {}: safe winner found", self.depth_limit);
                        break;
                    }
                    if let Some(&second) = values.get(1) {
                        if self.is_significantly_better(best, second) {
                            debug!("depth {}: significantly better action found", self.depth_limit);
                            break;
                        }
                    }
                }
            } else if let Some((action, value)) = store.best() {
                // A truncated iteration only overrides a clearly worse result.
                let replaces = best_value.map_or(true, |prev| self.is_significantly_better(value, prev));
                if replaces {
                    if let Some(position) = results.iter().position(|a| a == action) {
                        let chosen = results.remove(position);
                        results.insert(0, chosen);
                    }
                    best_value = Some(value);
                }
            }

            if self.timer.timed_out() {
                self.statistics.stopped_early = true;
                break;
            }
            if !self.heuristic_evaluation_used {
                break;
            }
            if self.config.max_depth.map_or(false, |max| self.depth_limit >= max) {
                break;
            }
        }

        self.statistics.total_time = self.timer.elapsed();
        let action = results.into_iter().next().ok_or(SearchError::NoLegalActions)?;
        debug!(
            "iterative deepening chose {:?} (value {:?}, depth {}, {} nodes)",
            action, best_value, self.statistics.depth_limit, self.statistics.nodes_expanded
        );
        Ok(action)
    }

    fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }
}

/// Wall-clock budget of one decision
#[derive(Debug, Clone, Copy)]
struct Timer {
    start: Instant,
    duration: Duration,
}

impl Timer {
    fn new(duration: Duration) -> Self {
        Timer {
            start: Instant::now(),
            duration,
        }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    fn timed_out(&self) -> bool {
        self.start.elapsed() >= self.duration
    }
}

/// Actions sorted by descending value; equal values keep insertion order
#[derive(Debug)]
struct ActionStore<A> {
    entries: Vec<(A, f64)>,
}

impl<A: std::fmt::Debug> ActionStore<A> {
    fn new() -> Self {
        ActionStore {
            entries: Vec::new(),
        }
    }

    fn add(&mut self, action: A, value: f64) {
        let index = self
            .entries
            .iter()
            .position(|(_, v)| value > *v)
            .unwrap_or(self.entries.len());
        self.entries.insert(index, (action, value));
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn best(&self) -> Option<(&A, f64)> {
        self.entries.first().map(|(a, v)| (a, *v))
    }

    fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, v)| *v).collect()
    }

    fn into_actions(self) -> Vec<A> {
        self.entries.into_iter().map(|(a, _)| a).collect()
    }

    fn describe(&self) -> String {
        self.entries
            .iter()
            .map(|(a, v)| format!("{:?}->{:.4}", a, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
