//! Arithmetic helpers for the UCT selection formula

/// Calculates the exploitation term: the average reward of a node
pub fn exploitation_term(total_reward: f64, visits: u64) -> f64 {
    if visits == 0 {
        return 0.0;
    }
    total_reward / visits as f64
}

/// Calculates the exploration term `C * sqrt(ln(parent_visits) / child_visits)`
///
/// Unvisited children get an infinite bonus so that they are tried first.
pub fn exploration_term(parent_visits: u64, child_visits: u64, exploration_constant: f64) -> f64 {
    if child_visits == 0 {
        return f64::INFINITY;
    }

    exploration_constant * ((parent_visits as f64).ln() / child_visits as f64).sqrt()
}

/// Calculates the UCT score of a child node
pub fn uct_value(
    total_reward: f64,
    visits: u64,
    parent_visits: u64,
    exploration_constant: f64,
) -> f64 {
    if visits == 0 {
        return f64::INFINITY;
    }

    exploitation_term(total_reward, visits)
        + exploration_term(parent_visits, visits, exploration_constant)
}
