mod common;

use std::thread;
use std::time::{Duration, Instant};

use arboriter_adversarial::{
    policy::{FnEvaluator, FnOrdering},
    AdversarialSearch, Game, IterativeDeepeningAlphaBetaSearch, IterativeDeepeningConfig, Result,
    SearchError, SearchStatistics,
};
use common::{
    center_first, decision_states, forced_win_board, init_logging, Board, LeafTree, Mark, Nim,
    TicTacToe,
};

fn center_first_ordering() -> FnOrdering<
    TicTacToe,
    impl Fn(&TicTacToe, &Board, Vec<usize>, &Mark, usize) -> Vec<usize>,
> {
    FnOrdering::<TicTacToe, _>::new(
        |_game: &TicTacToe, _state: &Board, actions: Vec<usize>, _player: &Mark, _depth: usize| {
            center_first(actions)
        },
    )
}

#[test]
fn test_immediate_win_stops_after_first_iteration() {
    init_logging();
    let mut search = IterativeDeepeningAlphaBetaSearch::for_game(TicTacToe, Duration::from_secs(5));

    assert_eq!(search.make_decision(&forced_win_board()).unwrap(), 7);
    let stats = search.statistics();
    assert_eq!(stats.iterations, 1);
    assert_eq!(stats.depth_limit, 1);
    assert!(!stats.stopped_early);
}

#[test]
fn test_searches_fixed_tree_to_the_bottom() {
    let game = LeafTree;
    let config = IterativeDeepeningConfig::for_game(&game).with_time_limit(Duration::from_secs(5));
    let mut search = IterativeDeepeningAlphaBetaSearch::new(game, config);

    assert_eq!(search.make_decision(&game.initial_state()).unwrap(), 0);
    let stats = search.statistics();
    // Depth 4 reaches only terminal states, so deepening stops there.
    assert_eq!(stats.depth_limit, 4);
    assert_eq!(stats.iterations, 4);
    assert_eq!(stats.max_depth, 4);
    assert!(!stats.stopped_early);
}

#[test]
fn test_finds_winning_nim_moves() {
    let game = Nim::new(12, 3);
    let mut search = IterativeDeepeningAlphaBetaSearch::for_game(game, Duration::from_secs(10));

    for state in decision_states(&game) {
        let action = search.make_decision(&state).unwrap();
        assert!(game.actions(&state).contains(&action));
        if let Some(winning) = game.winning_take(state.heap) {
            assert_eq!(action, winning, "heap {}", state.heap);
        }
    }
}

#[test]
fn test_zero_budget_returns_first_ordered_action() {
    let game = TicTacToe;
    let state = game.initial_state();

    let mut plain = IterativeDeepeningAlphaBetaSearch::for_game(game, Duration::ZERO);
    assert_eq!(plain.make_decision(&state).unwrap(), 0);
    assert!(plain.statistics().stopped_early);
    assert_eq!(plain.statistics().depth_limit, 0);

    let mut ordered = IterativeDeepeningAlphaBetaSearch::for_game(game, Duration::ZERO)
        .with_action_ordering(center_first_ordering());
    assert_eq!(ordered.make_decision(&state).unwrap(), 4);
    assert!(ordered.statistics().stopped_early);
}

#[test]
fn test_respects_time_budget_on_deep_game() {
    let game = Nim::new(200, 3);
    let budget = Duration::from_millis(100);
    let mut search = IterativeDeepeningAlphaBetaSearch::for_game(game, budget);

    let start = Instant::now();
    let action = search.make_decision(&game.initial_state()).unwrap();
    let elapsed = start.elapsed();

    assert!((1..=3).contains(&action));
    assert!(search.statistics().stopped_early);
    assert!(search.statistics().iterations > 1);
    // The timer is checked at every node, so the overrun stays small.
    assert!(elapsed < budget + Duration::from_millis(500), "took {:?}", elapsed);
}

#[test]
fn test_max_depth_bounds_deepening() {
    let game = TicTacToe;
    let config = IterativeDeepeningConfig::for_game(&game)
        .with_time_limit(Duration::from_secs(5))
        .with_max_depth(2);
    let mut search = IterativeDeepeningAlphaBetaSearch::new(game, config);

    assert_eq!(search.make_decision(&game.initial_state()).unwrap(), 0);
    let stats = search.statistics();
    assert_eq!(stats.iterations, 2);
    assert_eq!(stats.depth_limit, 2);
    assert!(!stats.stopped_early);
}

#[test]
fn test_evaluator_scores_cutoff_states() {
    let game = TicTacToe;
    let config = IterativeDeepeningConfig::for_game(&game)
        .with_time_limit(Duration::from_secs(5))
        .with_max_depth(1);
    let evaluator = FnEvaluator::<TicTacToe, _>::new(
        |_game: &TicTacToe, state: &Board, player: &Mark, _depth: usize| {
            if state.cells[4] == Some(*player) {
                0.6
            } else {
                0.5
            }
        },
    );
    let mut search = IterativeDeepeningAlphaBetaSearch::new(game, config).with_evaluator(evaluator);

    assert_eq!(search.make_decision(&game.initial_state()).unwrap(), 4);
    assert_eq!(search.statistics().depth_limit, 1);
}

#[test]
fn test_safe_winner_and_significance_thresholds() {
    let search = IterativeDeepeningAlphaBetaSearch::for_game(TicTacToe, Duration::from_secs(1));
    assert!(search.has_safe_winner(1.0));
    assert!(search.has_safe_winner(0.0));
    assert!(!search.has_safe_winner(0.5));
    assert!(!search.has_safe_winner(0.75));

    assert!(search.is_significantly_better(1.0, 0.5));
    assert!(!search.is_significantly_better(0.75, 0.5));
    assert!(!search.is_significantly_better(0.5, 1.0));

    let config = IterativeDeepeningConfig::default().with_utility_range(-1.0, 1.0);
    let wide = IterativeDeepeningAlphaBetaSearch::new(TicTacToe, config);
    assert!(wide.has_safe_winner(0.9));
    assert!(!wide.has_safe_winner(0.7));
    assert!(wide.is_significantly_better(0.5, -0.5));
}

#[test]
fn test_for_game_sets_budget_and_range() {
    let search = IterativeDeepeningAlphaBetaSearch::for_game(LeafTree, Duration::from_millis(250));
    assert_eq!(search.config().time_limit, Duration::from_millis(250));
    assert_eq!(search.config().utility_span(), 1.0);
}

#[test]
fn test_ordering_that_drops_every_root_action_is_an_error() {
    let ordering = FnOrdering::<TicTacToe, _>::new(
        |_game: &TicTacToe, _state: &Board, _actions: Vec<usize>, _player: &Mark, _depth: usize| {
            Vec::new()
        },
    );
    let mut search = IterativeDeepeningAlphaBetaSearch::for_game(TicTacToe, Duration::from_secs(5))
        .with_action_ordering(ordering);

    let result = search.make_decision(&TicTacToe.initial_state());
    assert!(matches!(result, Err(SearchError::NoLegalActions)));
}

/// Central square scores `center` for its owner, anything else 0.4.
fn center_evaluator(
    center: f64,
) -> FnEvaluator<TicTacToe, impl Fn(&TicTacToe, &Board, &Mark, usize) -> f64> {
    FnEvaluator::<TicTacToe, _>::new(
        move |_game: &TicTacToe, state: &Board, player: &Mark, _depth: usize| {
            if state.cells[4] == Some(*player) {
                center
            } else {
                0.4
            }
        },
    )
}

#[test]
fn test_clearly_dominant_action_stops_deepening() {
    let game = TicTacToe;
    let config = IterativeDeepeningConfig::for_game(&game).with_time_limit(Duration::from_secs(5));
    // 0.85 is no safe winner, but it leads every other move by 0.45.
    let mut search =
        IterativeDeepeningAlphaBetaSearch::new(game, config).with_evaluator(center_evaluator(0.85));

    assert_eq!(search.make_decision(&game.initial_state()).unwrap(), 4);
    let stats = search.statistics();
    assert_eq!(stats.iterations, 1);
    assert_eq!(stats.depth_limit, 1);
    assert!(!stats.stopped_early);
}

#[test]
fn test_small_lead_keeps_deepening() {
    let game = TicTacToe;
    let config = IterativeDeepeningConfig::for_game(&game)
        .with_time_limit(Duration::from_secs(5))
        .with_max_depth(2);
    let mut search =
        IterativeDeepeningAlphaBetaSearch::new(game, config).with_evaluator(center_evaluator(0.7));

    assert_eq!(search.make_decision(&game.initial_state()).unwrap(), 4);
    let stats = search.statistics();
    assert_eq!(stats.iterations, 2);
    assert_eq!(stats.depth_limit, 2);
}

/// Three moves per turn, four plies deep; only the evaluator gives values.
#[derive(Clone, Copy)]
struct Fan;

impl Game for Fan {
    type State = Vec<usize>;
    type Action = usize;
    type Player = usize;

    fn initial_state(&self) -> Vec<usize> {
        Vec::new()
    }

    fn players(&self) -> Vec<usize> {
        vec![0, 1]
    }

    fn player_to_move(&self, state: &Vec<usize>) -> usize {
        state.len() % 2
    }

    fn actions(&self, state: &Vec<usize>) -> Vec<usize> {
        if self.is_terminal(state) {
            Vec::new()
        } else {
            vec![0, 1, 2]
        }
    }

    fn result(&self, state: &Vec<usize>, action: &usize) -> Result<Vec<usize>> {
        let mut next = state.clone();
        next.push(*action);
        Ok(next)
    }

    fn is_terminal(&self, state: &Vec<usize>) -> bool {
        state.len() >= 4
    }

    fn utility(&self, _state: &Vec<usize>, _player: &usize) -> Result<f64> {
        Ok(0.5)
    }
}

/// Runs a search whose second iteration scores root move 1 at `second_move`
/// and runs out of time while searching root move 2.
fn decide_with_truncated_second_iteration(second_move: f64) -> (usize, SearchStatistics) {
    let evaluator = FnEvaluator::<Fan, _>::new(
        move |_game: &Fan, state: &Vec<usize>, _player: &usize, _depth: usize| {
            match state.as_slice() {
                // First iteration: 0 leads narrowly.
                [0] => 0.5,
                [1] => 0.45,
                [2] => 0.4,
                // Second iteration.
                [0, _] => 0.3,
                [1, _] => second_move,
                [2, 0] => {
                    thread::sleep(Duration::from_millis(400));
                    0.5
                }
                _ => 0.5,
            }
        },
    );
    let config =
        IterativeDeepeningConfig::for_game(&Fan).with_time_limit(Duration::from_millis(150));
    let mut search = IterativeDeepeningAlphaBetaSearch::new(Fan, config).with_evaluator(evaluator);

    let action = search.make_decision(&Fan.initial_state()).unwrap();
    (action, search.statistics().clone())
}

#[test]
fn test_truncated_iteration_overrides_only_with_a_clear_improvement() {
    // 0.95 beats the previous best of 0.5 by more than the margin.
    let (action, stats) = decide_with_truncated_second_iteration(0.95);
    assert_eq!(action, 1);
    assert_eq!(stats.iterations, 2);
    assert_eq!(stats.depth_limit, 1);
    assert!(stats.stopped_early);

    // 0.8 is better, but not by enough to trust a partial iteration.
    let (action, stats) = decide_with_truncated_second_iteration(0.8);
    assert_eq!(action, 0);
    assert_eq!(stats.iterations, 2);
    assert!(stats.stopped_early);
}
