//! Metrics of a single decision
//!
//! Every search object owns one [`SearchStatistics`] record which is reset at
//! the start of each `make_decision` call. The record is purely
//! observational and never influences the decision.

use std::time::Duration;

/// Counters collected during one decision
///
/// Fields that do not apply to an algorithm stay at zero: `depth_limit` is
/// only set by iterative deepening, `tree_size` only by Monte Carlo Tree
/// Search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStatistics {
    /// Nodes expanded: one per `max_value` / `min_value` call, or one per
    /// child created by Monte Carlo Tree Search. The decision state itself
    /// is not counted.
    pub nodes_expanded: u64,

    /// Deepest ply visited below the decision state
    pub max_depth: usize,

    /// Deepest depth limit whose iteration completed
    pub depth_limit: usize,

    /// Depth iterations or playouts performed
    pub iterations: usize,

    /// Nodes held in the search tree, root included
    pub tree_size: usize,

    /// Wall-clock time of the decision
    pub total_time: Duration,

    /// Whether the time budget cut the search short
    pub stopped_early: bool,
}

impl SearchStatistics {
    /// Creates an all-zero record
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one expanded node reached at `depth`
    pub fn record_expansion(&mut self, depth: usize) {
        self.nodes_expanded += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Returns the number of expanded nodes per second
    pub fn nodes_per_second(&self) -> f64 {
        let seconds = self.total_time.as_secs_f64();
        if seconds <= 0.0 {
            return 0.0;
        }
        self.nodes_expanded as f64 / seconds
    }

    /// Returns the mean duration of one iteration
    pub fn time_per_iteration(&self) -> Duration {
        match u32::try_from(self.iterations) {
            Ok(0) => Duration::ZERO,
            Ok(n) => self.total_time / n,
            Err(_) => self.total_time.div_f64(self.iterations as f64),
        }
    }

    /// Returns a one-line human-readable report
    pub fn summary(&self) -> String {
        let mut parts = vec![format!(
            "{} nodes expanded, max depth {}",
            self.nodes_expanded, self.max_depth
        )];
        if self.depth_limit > 0 {
            parts.push(format!("depth limit {}", self.depth_limit));
        }
        if self.tree_size > 0 {
            parts.push(format!("tree of {} nodes", self.tree_size));
        }
        if self.iterations > 0 {
            parts.push(format!(
                "{} iterations ({:.3}ms each)",
                self.iterations,
                self.time_per_iteration().as_secs_f64() * 1000.0
            ));
        } else {
            parts.push("0 iterations".to_string());
        }
        parts.push(format!(
            "{:.3}s ({:.0} nodes/s)",
            self.total_time.as_secs_f64(),
            self.nodes_per_second()
        ));
        if self.stopped_early {
            parts.push("stopped by time limit".to_string());
        }
        parts.join(", ")
    }
}
