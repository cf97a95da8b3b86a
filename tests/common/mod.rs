//! Games shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashSet;
use std::hash::Hash;

use arboriter_adversarial::{Game, Player, Result, SearchError};

// ---------------------------------------------------------------------------
// Tic-tac-toe

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl Player for Mark {}

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Cells are indexed row by row, 0 (top left) to 8 (bottom right).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    pub cells: [Option<Mark>; 9],
    pub to_move: Mark,
}

impl Board {
    pub fn empty() -> Self {
        Board {
            cells: [None; 9],
            to_move: Mark::X,
        }
    }

    /// Parses rows like `"XOX/OO./..."`; X always moves first.
    pub fn parse(layout: &str) -> Self {
        let mut cells = [None; 9];
        let marks = layout.chars().filter(|c| *c != '/');
        for (i, c) in marks.enumerate() {
            cells[i] = match c {
                'X' => Some(Mark::X),
                'O' => Some(Mark::O),
                _ => None,
            };
        }
        let x_count = cells.iter().filter(|c| **c == Some(Mark::X)).count();
        let o_count = cells.iter().filter(|c| **c == Some(Mark::O)).count();
        let to_move = if x_count == o_count { Mark::X } else { Mark::O };
        Board { cells, to_move }
    }

    pub fn winner(&self) -> Option<Mark> {
        LINES.iter().find_map(|line| {
            let first = self.cells[line[0]]?;
            if line.iter().all(|&i| self.cells[i] == Some(first)) {
                Some(first)
            } else {
                None
            }
        })
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TicTacToe;

impl Game for TicTacToe {
    type State = Board;
    type Action = usize;
    type Player = Mark;

    fn initial_state(&self) -> Board {
        Board::empty()
    }

    fn players(&self) -> Vec<Mark> {
        vec![Mark::X, Mark::O]
    }

    fn player_to_move(&self, state: &Board) -> Mark {
        state.to_move
    }

    fn actions(&self, state: &Board) -> Vec<usize> {
        if self.is_terminal(state) {
            return Vec::new();
        }
        (0..9).filter(|&i| state.cells[i].is_none()).collect()
    }

    fn result(&self, state: &Board, action: &usize) -> Result<Board> {
        if self.is_terminal(state) || *action >= 9 || state.cells[*action].is_some() {
            return Err(SearchError::InvalidAction(format!(
                "cell {} on {:?}",
                action, state
            )));
        }
        let mut next = state.clone();
        next.cells[*action] = Some(state.to_move);
        next.to_move = state.to_move.opponent();
        Ok(next)
    }

    fn is_terminal(&self, state: &Board) -> bool {
        state.winner().is_some() || state.is_full()
    }

    fn utility(&self, state: &Board, player: &Mark) -> Result<f64> {
        if !self.is_terminal(state) {
            return Err(SearchError::NotTerminal(format!("{:?}", state)));
        }
        Ok(match state.winner() {
            Some(winner) if winner == *player => 1.0,
            Some(_) => 0.0,
            None => 0.5,
        })
    }
}

/// O to move with cells 6 and 7 free; 7 wins, 6 draws.
pub fn forced_win_board() -> Board {
    Board::parse("XOX/XOO/..X")
}

/// Searches the center first, then corners, then edges.
pub fn center_first(actions: Vec<usize>) -> Vec<usize> {
    const PRIORITY: [usize; 9] = [1, 2, 1, 2, 0, 2, 1, 2, 1];
    let mut actions = actions;
    actions.sort_by_key(|&cell| PRIORITY[cell]);
    actions
}

// ---------------------------------------------------------------------------
// Complete binary tree of depth four with fixed leaf utilities for player 0

pub const LEAVES: [f64; 16] = [
    0.3, 0.8, 0.1, 0.6, 0.9, 0.2, 0.4, 0.7, 0.5, 0.0, 1.0, 0.35, 0.65, 0.25, 0.15, 0.45,
];

/// Player 0 moves first; its minimax value is 0.3, reached by action 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeafTree;

impl LeafTree {
    pub const DEPTH: usize = 4;

    fn leaf_value(path: &[usize]) -> f64 {
        let index = path.iter().fold(0, |acc, bit| acc * 2 + bit);
        LEAVES[index]
    }

    /// Exact minimax value of the node at `path` for player 0.
    pub fn value_of(path: &[usize]) -> f64 {
        if path.len() == Self::DEPTH {
            return Self::leaf_value(path);
        }
        let values = (0..2).map(|a| {
            let mut child = path.to_vec();
            child.push(a);
            Self::value_of(&child)
        });
        if path.len() % 2 == 0 {
            values.fold(f64::NEG_INFINITY, f64::max)
        } else {
            values.fold(f64::INFINITY, f64::min)
        }
    }

    /// Orders actions so the best for the player to move comes first.
    pub fn best_first(path: &[usize], actions: Vec<usize>) -> Vec<usize> {
        let mut scored: Vec<(usize, f64)> = actions
            .into_iter()
            .map(|a| {
                let mut child = path.to_vec();
                child.push(a);
                (a, Self::value_of(&child))
            })
            .collect();
        if path.len() % 2 == 0 {
            scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        } else {
            scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        }
        scored.into_iter().map(|(a, _)| a).collect()
    }
}

impl Game for LeafTree {
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
            return Vec::new();
        }
        vec![0, 1]
    }

    fn result(&self, state: &Vec<usize>, action: &usize) -> Result<Vec<usize>> {
        if self.is_terminal(state) || *action > 1 {
            return Err(SearchError::InvalidAction(format!("{} at {:?}", action, state)));
        }
        let mut next = state.clone();
        next.push(*action);
        Ok(next)
    }

    fn is_terminal(&self, state: &Vec<usize>) -> bool {
        state.len() >= Self::DEPTH
    }

    fn utility(&self, state: &Vec<usize>, player: &usize) -> Result<f64> {
        if !self.is_terminal(state) {
            return Err(SearchError::NotTerminal(format!("{:?}", state)));
        }
        let value = Self::leaf_value(state);
        Ok(if *player == 0 { value } else { 1.0 - value })
    }
}

// ---------------------------------------------------------------------------
// Nim: take 1..=max_take objects from one heap; whoever takes the last wins

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NimState {
    pub heap: u32,
    pub to_move: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct Nim {
    pub heap: u32,
    pub max_take: u32,
}

impl Nim {
    pub fn new(heap: u32, max_take: u32) -> Self {
        Nim { heap, max_take }
    }

    /// Winning move for the player to move, if the heap is not lost.
    pub fn winning_take(&self, heap: u32) -> Option<u32> {
        let take = heap % (self.max_take + 1);
        if take == 0 {
            None
        } else {
            Some(take)
        }
    }
}

impl Game for Nim {
    type State = NimState;
    type Action = u32;
    type Player = usize;

    fn initial_state(&self) -> NimState {
        NimState {
            heap: self.heap,
            to_move: 0,
        }
    }

    fn players(&self) -> Vec<usize> {
        vec![0, 1]
    }

    fn player_to_move(&self, state: &NimState) -> usize {
        state.to_move
    }

    fn actions(&self, state: &NimState) -> Vec<u32> {
        (1..=self.max_take.min(state.heap)).collect()
    }

    fn result(&self, state: &NimState, action: &u32) -> Result<NimState> {
        if *action == 0 || *action > self.max_take || *action > state.heap {
            return Err(SearchError::InvalidAction(format!(
                "take {} from {}",
                action, state.heap
            )));
        }
        Ok(NimState {
            heap: state.heap - action,
            to_move: 1 - state.to_move,
        })
    }

    fn is_terminal(&self, state: &NimState) -> bool {
        state.heap == 0
    }

    fn utility(&self, state: &NimState, player: &usize) -> Result<f64> {
        if !self.is_terminal(state) {
            return Err(SearchError::NotTerminal(format!("{:?}", state)));
        }
        // The player who is not to move took the last object.
        Ok(if *player != state.to_move { 1.0 } else { 0.0 })
    }
}

// ---------------------------------------------------------------------------
// A game that violates the contract: its second ply has no actions

#[derive(Debug, Clone, Copy, Default)]
pub struct DeadEnd;

impl Game for DeadEnd {
    type State = u8;
    type Action = u8;
    type Player = usize;

    fn initial_state(&self) -> u8 {
        0
    }

    fn players(&self) -> Vec<usize> {
        vec![0, 1]
    }

    fn player_to_move(&self, state: &u8) -> usize {
        (*state % 2) as usize
    }

    fn actions(&self, state: &u8) -> Vec<u8> {
        if *state == 0 {
            vec![1, 2]
        } else {
            Vec::new()
        }
    }

    fn result(&self, _state: &u8, action: &u8) -> Result<u8> {
        Ok(*action)
    }

    fn is_terminal(&self, _state: &u8) -> bool {
        false
    }

    fn utility(&self, state: &u8, _player: &usize) -> Result<f64> {
        Err(SearchError::NotTerminal(format!("{:?}", state)))
    }
}

// ---------------------------------------------------------------------------
// Helpers

/// All non-terminal states reachable from the initial state.
pub fn decision_states<G>(game: &G) -> Vec<G::State>
where
    G: Game,
    G::State: Eq + Hash,
{
    let mut seen = HashSet::new();
    let mut stack = vec![game.initial_state()];
    let mut states = Vec::new();

    while let Some(state) = stack.pop() {
        if game.is_terminal(&state) || !seen.insert(state.clone()) {
            continue;
        }
        for action in game.actions(&state) {
            stack.push(game.result(&state, &action).expect("legal action"));
        }
        states.push(state);
    }

    states
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
