//! Nim played between two search algorithms
//!
//! Players alternately take one to three objects from a single heap; whoever
//! takes the last object wins. Iterative deepening alpha-beta plays first
//! against Monte Carlo Tree Search.
//!
//! Run with `RUST_LOG=debug cargo run --example nim` to see the search logs.

use std::time::Duration;

use arboriter_adversarial::{
    AdversarialSearch, Game, IterativeDeepeningAlphaBetaSearch, MCTSConfig, MonteCarloTreeSearch,
    Result, SearchError,
};

const HEAP: u32 = 21;
const MAX_TAKE: u32 = 3;

fn main() -> Result<()> {
    env_logger::init();

    println!("Nim: {} objects, take 1-{} per turn", HEAP, MAX_TAKE);
    println!();

    let game = Nim;
    let mut players: [Box<dyn AdversarialSearch<Nim>>; 2] = [
        Box::new(IterativeDeepeningAlphaBetaSearch::for_game(
            Nim,
            Duration::from_millis(500),
        )),
        Box::new(MonteCarloTreeSearch::new(
            Nim,
            MCTSConfig::default().with_time_limit_millis(500),
        )),
    ];
    let names = ["Iterative deepening", "MCTS"];

    let mut state = game.initial_state();
    while !game.is_terminal(&state) {
        let mover = game.player_to_move(&state);
        let take = players[mover].make_decision(&state)?;
        let stats = players[mover].statistics();
        println!(
            "{:>20} takes {} from {:>2} ({} nodes, {:.0} ms)",
            names[mover],
            take,
            state.heap,
            stats.nodes_expanded,
            stats.total_time.as_secs_f64() * 1000.0
        );
        state = game.result(&state, &take)?;
    }

    // The player not to move took the last object.
    println!();
    println!("{} wins!", names[1 - state.to_move]);
    Ok(())
}

#[derive(Debug, Clone)]
struct Heap {
    heap: u32,
    to_move: usize,
}

struct Nim;

impl Game for Nim {
    type State = Heap;
    type Action = u32;
    type Player = usize;

    fn initial_state(&self) -> Heap {
        Heap {
            heap: HEAP,
            to_move: 0,
        }
    }

    fn players(&self) -> Vec<usize> {
        vec![0, 1]
    }

    fn player_to_move(&self, state: &Heap) -> usize {
        state.to_move
    }

    fn actions(&self, state: &Heap) -> Vec<u32> {
        (1..=MAX_TAKE.min(state.heap)).collect()
    }

    fn result(&self, state: &Heap, action: &u32) -> Result<Heap> {
        if *action == 0 || *action > MAX_TAKE.min(state.heap) {
            return Err(SearchError::InvalidAction(format!(
                "take {} from {}",
                action, state.heap
            )));
        }
        Ok(Heap {
            heap: state.heap - action,
            to_move: 1 - state.to_move,
        })
    }

    fn is_terminal(&self, state: &Heap) -> bool {
        state.heap == 0
    }

    fn utility(&self, state: &Heap, player: &usize) -> Result<f64> {
        if !self.is_terminal(state) {
            return Err(SearchError::NotTerminal(format!("{:?}", state)));
        }
        Ok(if *player != state.to_move { 1.0 } else { 0.0 })
    }
}
