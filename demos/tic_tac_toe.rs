//! Tic-Tac-Toe against the computer
//!
//! Run with `cargo run --example tic_tac_toe -- <algorithm>` where the
//! algorithm is one of `minimax`, `alphabeta`, `iterative` or `mcts`
//! (the default).

use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

use arboriter_adversarial::{
    AdversarialSearch, AlphaBetaSearch, Game, IterativeDeepeningAlphaBetaSearch, MCTSConfig,
    MinimaxSearch, MonteCarloTreeSearch, Result, SearchError,
};

fn main() {
    // Initialize logging
    env_logger::init();

    let algorithm = std::env::args().nth(1).unwrap_or_else(|| "mcts".to_string());
    let mut ai: Box<dyn AdversarialSearch<TicTacToe>> = match algorithm.as_str() {
        "minimax" => Box::new(MinimaxSearch::new(TicTacToe)),
        "alphabeta" => Box::new(AlphaBetaSearch::new(TicTacToe)),
        "iterative" => Box::new(IterativeDeepeningAlphaBetaSearch::for_game(
            TicTacToe,
            Duration::from_secs(1),
        )),
        "mcts" => Box::new(MonteCarloTreeSearch::new(
            TicTacToe,
            MCTSConfig::default().with_max_iterations(10_000),
        )),
        other => {
            eprintln!("Unknown algorithm '{}'", other);
            eprintln!("Expected one of: minimax, alphabeta, iterative, mcts");
            return;
        }
    };

    println!("Tic-Tac-Toe ({})", algorithm);
    println!("================");
    println!();

    let game = TicTacToe;
    let mut board = game.initial_state();

    while !game.is_terminal(&board) {
        println!("{}", board);

        if board.to_move == Mark::X {
            // Human player (X)
            print!("Your move (enter row column, e.g. '1 2'): ");
            io::stdout().flush().ok();

            let mut input = String::new();
            if io::stdin().read_line(&mut input).unwrap_or(0) == 0 {
                return;
            }
            let coords: Vec<usize> = input
                .split_whitespace()
                .filter_map(|s| s.parse::<usize>().ok())
                .collect();
            if coords.len() != 2 || coords[0] > 2 || coords[1] > 2 {
                println!("Invalid move! Enter row and column (0-2).");
                continue;
            }

            match game.result(&board, &(coords[0] * 3 + coords[1])) {
                Ok(next) => board = next,
                Err(_) => println!("Illegal move! Try again."),
            }
        } else {
            // AI player (O)
            println!("AI is thinking...");
            match ai.make_decision(&board) {
                Ok(cell) => {
                    println!("AI chooses row {}, col {}", cell / 3, cell % 3);
                    println!("{}", ai.statistics().summary());
                    match game.result(&board, &cell) {
                        Ok(next) => board = next,
                        Err(e) => {
                            println!("Error: {}", e);
                            break;
                        }
                    }
                }
                Err(e) => {
                    println!("Error: {}", e);
                    break;
                }
            }
        }
    }

    println!("{}", board);
    match board.winner() {
        Some(winner) => println!("Player {:?} wins!", winner),
        None => println!("The game is a draw!"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    X,
    O,
}

impl arboriter_adversarial::Player for Mark {}

/// Board cells are numbered 0-8, row by row
#[derive(Debug, Clone)]
struct Board {
    cells: [Option<Mark>; 9],
    to_move: Mark,
}

impl Board {
    fn winner(&self) -> Option<Mark> {
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
        LINES.iter().find_map(|&[a, b, c]| {
            let mark = self.cells[a]?;
            (self.cells[b] == Some(mark) && self.cells[c] == Some(mark)).then_some(mark)
        })
    }
}

struct TicTacToe;

impl Game for TicTacToe {
    type State = Board;
    type Action = usize;
    type Player = Mark;

    fn initial_state(&self) -> Board {
        Board {
            cells: [None; 9],
            to_move: Mark::X,
        }
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
        if !self.actions(state).contains(action) {
            return Err(SearchError::InvalidAction(format!("cell {}", action)));
        }
        let mut next = state.clone();
        next.cells[*action] = Some(state.to_move);
        next.to_move = match state.to_move {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        };
        Ok(next)
    }

    fn is_terminal(&self, state: &Board) -> bool {
        state.winner().is_some() || state.cells.iter().all(Option::is_some)
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

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  0 1 2")?;
        for row in 0..3 {
            write!(f, "{} ", row)?;
            for col in 0..3 {
                let symbol = match self.cells[row * 3 + col] {
                    Some(Mark::X) => "X",
                    Some(Mark::O) => "O",
                    None => ".",
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "\nPlayer {:?}'s turn", self.to_move)
    }
}
