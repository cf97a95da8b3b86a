//! Configuration options for the search algorithms
//!
//! This module defines the parameters that control the time-bounded
//! searches: iterative deepening alpha-beta and Monte Carlo Tree Search.
//! Minimax and plain alpha-beta have no tuning knobs.

use std::time::Duration;

use crate::{game::Game, Result, SearchError};

/// Criteria for selecting the best child after search is complete
///
/// This determines how the final action is selected after the search budget is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestChildCriteria {
    /// Select the child with the most visits (robust child)
    ///
    /// Relies on statistical confidence rather than potentially noisy value
    /// estimates. Ties go to the child that was expanded first.
    MostVisits,

    /// Select the child with the highest average reward
    ///
    /// Favors high-value moves even if they haven't been visited as often.
    HighestValue,
}

/// Configuration for Monte Carlo Tree Search
///
/// # Example
///
/// ```
/// use arboriter_adversarial::{MCTSConfig, config::BestChildCriteria};
/// use std::time::Duration;
///
/// let config = MCTSConfig::default()
///     .with_exploration_constant(1.5)
///     .with_max_iterations(10_000)
///     .with_max_time(Duration::from_secs(5))
///     .with_best_child_criteria(BestChildCriteria::MostVisits)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct MCTSConfig {
    /// Exploration constant `C` of the UCT formula
    ///
    /// Higher values favor exploration of less-visited nodes.
    /// The standard value is sqrt(2).
    pub exploration_constant: f64,

    /// Maximum number of iterations to run
    ///
    /// Zero together with `max_time` leaves only the time budget.
    pub max_iterations: usize,

    /// Maximum time to run the search
    ///
    /// Checked between iterations. If set, the search stops once this
    /// duration has elapsed, even if iterations remain.
    pub max_time: Option<Duration>,

    /// Criteria for selecting the final action
    pub best_child_criteria: BestChildCriteria,

    /// Seed for the random number generator
    ///
    /// `None` seeds from system entropy.
    pub seed: Option<u64>,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        MCTSConfig {
            exploration_constant: std::f64::consts::SQRT_2,
            max_iterations: 10_000,
            max_time: None,
            best_child_criteria: BestChildCriteria::MostVisits,
            seed: None,
        }
    }
}

impl MCTSConfig {
    /// Sets the exploration constant
    pub fn with_exploration_constant(mut self, constant: f64) -> Self {
        self.exploration_constant = constant;
        self
    }

    /// Sets the maximum number of iterations
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Sets the maximum time to run the search
    pub fn with_max_time(mut self, duration: Duration) -> Self {
        self.max_time = Some(duration);
        self
    }

    /// Sets the maximum time to run the search in milliseconds
    pub fn with_time_limit_millis(self, millis: u64) -> Self {
        self.with_max_time(Duration::from_millis(millis))
    }

    /// Sets the criteria for selecting the best child
    pub fn with_best_child_criteria(mut self, criteria: BestChildCriteria) -> Self {
        self.best_child_criteria = criteria;
        self
    }

    /// Sets the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that the configuration describes a usable search
    pub fn validate(&self) -> Result<()> {
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(SearchError::InvalidConfiguration(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        if self.max_iterations == 0 && self.max_time.is_none() {
            return Err(SearchError::InvalidConfiguration(
                "either an iteration budget or a time budget is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration for iterative deepening alpha-beta search
///
/// The margins are fractions of the utility range `util_max - util_min`.
///
/// # Example
///
/// ```
/// use arboriter_adversarial::IterativeDeepeningConfig;
///
/// let config = IterativeDeepeningConfig::default()
///     .with_time_limit_millis(500)
///     .with_utility_range(-1.0, 1.0)
///     .with_max_depth(12);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct IterativeDeepeningConfig {
    /// Search budget per decision, checked between depth iterations and
    /// at every node
    pub time_limit: Duration,

    /// Utility of the worst outcome
    pub util_min: f64,

    /// Utility of the best outcome
    pub util_max: f64,

    /// An evaluation further than this fraction of the range from the
    /// midpoint is treated as a forced win or loss
    pub safe_winner_margin: f64,

    /// A value exceeding another by more than this fraction of the range
    /// is significantly better
    pub significance_margin: f64,

    /// Bonus per remaining ply added to decisive wins and subtracted from
    /// decisive losses, preferring quick wins and slow losses
    pub decisive_bonus_per_ply: f64,

    /// Deepest depth limit to try; `None` deepens until the time budget
    /// runs out or the tree is exhausted
    pub max_depth: Option<usize>,
}

impl Default for IterativeDeepeningConfig {
    fn default() -> Self {
        IterativeDeepeningConfig {
            time_limit: Duration::from_secs(1),
            util_min: 0.0,
            util_max: 1.0,
            safe_winner_margin: 0.4,
            significance_margin: 0.4,
            decisive_bonus_per_ply: 0.001,
            max_depth: None,
        }
    }
}

impl IterativeDeepeningConfig {
    /// Creates a default configuration using the utility range of `game`
    pub fn for_game<G: Game>(game: &G) -> Self {
        let (util_min, util_max) = game.utility_range();
        Self::default().with_utility_range(util_min, util_max)
    }

    /// Sets the search budget per decision
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Sets the search budget per decision in milliseconds
    pub fn with_time_limit_millis(self, millis: u64) -> Self {
        self.with_time_limit(Duration::from_millis(millis))
    }

    /// Sets the utility bounds
    pub fn with_utility_range(mut self, util_min: f64, util_max: f64) -> Self {
        self.util_min = util_min;
        self.util_max = util_max;
        self
    }

    /// Sets the safe winner margin
    pub fn with_safe_winner_margin(mut self, margin: f64) -> Self {
        self.safe_winner_margin = margin;
        self
    }

    /// Sets the significance margin
    pub fn with_significance_margin(mut self, margin: f64) -> Self {
        self.significance_margin = margin;
        self
    }

    /// Sets the per-ply bonus for decisive evaluations; zero disables it
    pub fn with_decisive_bonus_per_ply(mut self, bonus: f64) -> Self {
        self.decisive_bonus_per_ply = bonus;
        self
    }

    /// Sets the deepest depth limit to try
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Returns the width of the utility range
    pub fn utility_span(&self) -> f64 {
        self.util_max - self.util_min
    }

    /// Returns the midpoint of the utility range
    pub fn utility_midpoint(&self) -> f64 {
        (self.util_min + self.util_max) / 2.0
    }

    /// Checks that the configuration describes a usable search
    pub fn validate(&self) -> Result<()> {
        if !(self.util_min.is_finite() && self.util_max.is_finite()) || self.util_min >= self.util_max
        {
            return Err(SearchError::InvalidConfiguration(format!(
                "utility range [{}, {}] is empty",
                self.util_min, self.util_max
            )));
        }
        for (name, value) in [
            ("safe winner margin", self.safe_winner_margin),
            ("significance margin", self.significance_margin),
            ("decisive bonus per ply", self.decisive_bonus_per_ply),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SearchError::InvalidConfiguration(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }
        if self.max_depth == Some(0) {
            return Err(SearchError::InvalidConfiguration(
                "max depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
