//! # arboriter-adversarial
//!
//! Adversarial game-tree search for deterministic, perfect-information,
//! turn-taking games.
//!
//! A game is described once by implementing the [`Game`] trait. Four decision
//! procedures are implemented against it, all behind the
//! [`AdversarialSearch`] trait:
//!
//! - [`MinimaxSearch`]: exhaustive, exact baseline
//! - [`AlphaBetaSearch`]: minimax with alpha-beta pruning; same decision
//!   value, fewer expanded nodes
//! - [`IterativeDeepeningAlphaBetaSearch`]: time-bounded anytime search with
//!   heuristic evaluation at the depth cutoff, safe-winner detection and
//!   action ordering
//! - [`MonteCarloTreeSearch`]: simulation-based search using UCT selection
//!   and random rollouts
//!
//! No search keeps a transposition table or reuses its tree between
//! decisions; every `make_decision` call starts from scratch.
//!
//! ## Basic Usage
//!
//! ```
//! use arboriter_adversarial::{
//!     AdversarialSearch, AlphaBetaSearch, Game, MinimaxSearch, Result, SearchError,
//! };
//!
//! /// Players alternately remove one or two stones; taking the last stone wins.
//! struct Pile(u8);
//!
//! #[derive(Clone, Debug)]
//! struct PileState {
//!     stones: u8,
//!     to_move: usize,
//! }
//!
//! impl Game for Pile {
//!     type State = PileState;
//!     type Action = u8;
//!     type Player = usize;
//!
//!     fn initial_state(&self) -> PileState {
//!         PileState { stones: self.0, to_move: 0 }
//!     }
//!
//!     fn players(&self) -> Vec<usize> {
//!         vec![0, 1]
//!     }
//!
//!     fn player_to_move(&self, state: &PileState) -> usize {
//!         state.to_move
//!     }
//!
//!     fn actions(&self, state: &PileState) -> Vec<u8> {
//!         (1..=2).filter(|n| *n <= state.stones).collect()
//!     }
//!
//!     fn result(&self, state: &PileState, action: &u8) -> Result<PileState> {
//!         if *action == 0 || *action > 2 || *action > state.stones {
//!             return Err(SearchError::InvalidAction(format!("{:?}", action)));
//!         }
//!         Ok(PileState { stones: state.stones - action, to_move: 1 - state.to_move })
//!     }
//!
//!     fn is_terminal(&self, state: &PileState) -> bool {
//!         state.stones == 0
//!     }
//!
//!     fn utility(&self, state: &PileState, player: &usize) -> Result<f64> {
//!         if !self.is_terminal(state) {
//!             return Err(SearchError::NotTerminal(format!("{:?}", state)));
//!         }
//!         Ok(if *player != state.to_move { 1.0 } else { 0.0 })
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     let game = Pile(5);
//!     let start = game.initial_state();
//!
//!     // Leaving a multiple of three stones wins: take two.
//!     let mut minimax = MinimaxSearch::new(Pile(5));
//!     assert_eq!(minimax.make_decision(&start)?, 2);
//!
//!     let mut alpha_beta = AlphaBetaSearch::new(Pile(5));
//!     assert_eq!(alpha_beta.make_decision(&start)?, 2);
//!     assert!(
//!         alpha_beta.statistics().nodes_expanded <= minimax.statistics().nodes_expanded
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Time-bounded search
//!
//! ```
//! # use arboriter_adversarial::{Game, Result, SearchError};
//! # struct Pile(u8);
//! # #[derive(Clone, Debug)]
//! # struct PileState { stones: u8, to_move: usize }
//! # impl Game for Pile {
//! #     type State = PileState;
//! #     type Action = u8;
//! #     type Player = usize;
//! #     fn initial_state(&self) -> PileState { PileState { stones: self.0, to_move: 0 } }
//! #     fn players(&self) -> Vec<usize> { vec![0, 1] }
//! #     fn player_to_move(&self, state: &PileState) -> usize { state.to_move }
//! #     fn actions(&self, state: &PileState) -> Vec<u8> { (1..=2).filter(|n| *n <= state.stones).collect() }
//! #     fn result(&self, state: &PileState, action: &u8) -> Result<PileState> {
//! #         Ok(PileState { stones: state.stones - action, to_move: 1 - state.to_move })
//! #     }
//! #     fn is_terminal(&self, state: &PileState) -> bool { state.stones == 0 }
//! #     fn utility(&self, state: &PileState, player: &usize) -> Result<f64> {
//! #         Ok(if *player != state.to_move { 1.0 } else { 0.0 })
//! #     }
//! # }
//! use arboriter_adversarial::{
//!     AdversarialSearch, IterativeDeepeningAlphaBetaSearch, IterativeDeepeningConfig,
//!     MCTSConfig, MonteCarloTreeSearch,
//! };
//!
//! fn main() -> Result<()> {
//!     let start = Pile(7).initial_state();
//!
//!     let config = IterativeDeepeningConfig::for_game(&Pile(7)).with_time_limit_millis(200);
//!     let mut search = IterativeDeepeningAlphaBetaSearch::new(Pile(7), config);
//!     assert_eq!(search.make_decision(&start)?, 1);
//!
//!     let config = MCTSConfig::default().with_max_iterations(2_000).with_seed(1);
//!     let mut mcts = MonteCarloTreeSearch::new(Pile(7), config);
//!     let action = mcts.make_decision(&start)?;
//!     println!("MCTS plays {} ({})", action, mcts.statistics().summary());
//!     Ok(())
//! }
//! ```

pub mod alphabeta;
pub mod config;
pub mod game;
pub mod iterative;
pub mod mcts;
pub mod minimax;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;
pub mod utils;

pub use alphabeta::AlphaBetaSearch;
pub use config::{IterativeDeepeningConfig, MCTSConfig};
pub use game::{Action, Game, Player};
pub use iterative::IterativeDeepeningAlphaBetaSearch;
pub use mcts::MonteCarloTreeSearch;
pub use minimax::MinimaxSearch;
pub use policy::{ActionOrdering, Evaluator};
pub use search::AdversarialSearch;
pub use stats::SearchStatistics;
pub use tree::{MCTSNode, NodePath};

/// Error types for the search algorithms
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// No legal actions are available from the decision state
    #[error("No legal actions available from current state")]
    NoLegalActions,

    /// A non-terminal state reached during search offers no actions
    #[error("Non-terminal state has no legal actions: {0}")]
    EmptyActions(String),

    /// An action outside `actions(state)` was applied
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Utility was requested for a non-terminal state
    #[error("Utility requested for non-terminal state: {0}")]
    NotTerminal(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
