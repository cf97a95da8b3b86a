//! Pluggable policies used by the search algorithms
//!
//! - Evaluation: how to score non-terminal states at a depth cutoff
//! - Ordering: in which order to expand a node's actions
//! - Selection: how to choose which MCTS child to descend into
//! - Simulation: how to play out a game from an MCTS node
//! - Backpropagation: how to update MCTS node statistics

pub mod backpropagation;
pub mod evaluation;
pub mod ordering;
pub mod selection;
pub mod simulation;

pub use backpropagation::{BackpropagationPolicy, StandardPolicy};
pub use evaluation::{Evaluator, FnEvaluator, TerminalOnlyEvaluator};
pub use ordering::{ActionOrdering, FnOrdering, GameOrder};
pub use selection::{SelectionPolicy, UCTPolicy};
pub use simulation::{RandomRollout, SimulationPolicy};
