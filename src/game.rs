//! Traits defining the game contract consumed by every search algorithm.
//!
//! A [`Game`] is a stateless rules object: it never holds a "current" state.
//! States are values produced by [`Game::result`] and are never mutated by the
//! search engine, which keeps recursive search referentially transparent.

use std::fmt::Debug;

use crate::{Result, SearchError};

/// Trait for actions that can be taken in a game
///
/// Actions identify a legal move from a particular state.
pub trait Action: Clone + Debug + PartialEq {}

/// Trait for players in a game
///
/// Players identify whose utility is being maximized at a given ply.
pub trait Player: Clone + Debug + PartialEq {}

/// Trait defining a deterministic, perfect-information, turn-taking game
///
/// The search algorithms in this crate are implemented once against this
/// trait. Implementations must be pure: `result` returns a new state and
/// leaves its input untouched.
///
/// # Example
///
/// ```
/// use arboriter_adversarial::{Game, Result, SearchError};
///
/// /// Players alternately remove one or two stones; taking the last wins.
/// struct Pile;
///
/// #[derive(Clone, Debug)]
/// struct PileState { stones: u8, to_move: usize }
///
/// impl Game for Pile {
///     type State = PileState;
///     type Action = u8;
///     type Player = usize;
///
///     fn initial_state(&self) -> PileState { PileState { stones: 4, to_move: 0 } }
///     fn players(&self) -> Vec<usize> { vec![0, 1] }
///     fn player_to_move(&self, state: &PileState) -> usize { state.to_move }
///     fn actions(&self, state: &PileState) -> Vec<u8> {
///         (1..=2).filter(|n| *n <= state.stones).collect()
///     }
///     fn result(&self, state: &PileState, action: &u8) -> Result<PileState> {
///         if *action == 0 || *action > 2 || *action > state.stones {
///             return Err(SearchError::InvalidAction(format!("{:?}", action)));
///         }
///         Ok(PileState { stones: state.stones - action, to_move: 1 - state.to_move })
///     }
///     fn is_terminal(&self, state: &PileState) -> bool { state.stones == 0 }
///     fn utility(&self, state: &PileState, player: &usize) -> Result<f64> {
///         if !self.is_terminal(state) {
///             return Err(SearchError::NotTerminal(format!("{:?}", state)));
///         }
///         // The player who just moved took the last stone.
///         Ok(if *player != state.to_move { 1.0 } else { 0.0 })
///     }
/// }
/// ```
pub trait Game {
    /// Game-specific state representation
    type State: Clone + Debug;

    /// The type of actions that can be taken in this game
    type Action: Action;

    /// The type of players in this game
    type Player: Player;

    /// Returns the state the game starts in
    fn initial_state(&self) -> Self::State;

    /// Returns all players, in turn order
    fn players(&self) -> Vec<Self::Player>;

    /// Returns the player whose turn it is in `state`
    fn player_to_move(&self, state: &Self::State) -> Self::Player;

    /// Returns the legal actions from `state`
    ///
    /// Must be non-empty for every non-terminal state. The order of the
    /// returned actions is the tie-break order used by the search algorithms.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Returns the state reached by playing `action` in `state`
    ///
    /// Fails with [`SearchError::InvalidAction`] if `action` is not a member
    /// of `actions(state)`.
    fn result(&self, state: &Self::State, action: &Self::Action) -> Result<Self::State>;

    /// Returns true if the game is over in `state`
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Returns the payoff of terminal `state` for `player`
    ///
    /// The value lies within [`Game::utility_range`]. Fails with
    /// [`SearchError::NotTerminal`] if `state` is not terminal.
    fn utility(&self, state: &Self::State, player: &Self::Player) -> Result<f64>;

    /// Returns the `(min, max)` bounds of [`Game::utility`]
    fn utility_range(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}

/// Returns the actions of a state that is about to be expanded
///
/// A non-terminal state without actions violates the game contract and is
/// reported as [`SearchError::EmptyActions`].
pub(crate) fn expandable_actions<G: Game>(game: &G, state: &G::State) -> Result<Vec<G::Action>> {
    let actions = game.actions(state);
    if actions.is_empty() {
        return Err(SearchError::EmptyActions(format!("{:?}", state)));
    }
    Ok(actions)
}

impl Action for usize {}
impl Action for u8 {}
impl Action for u32 {}
impl Action for i32 {}
impl Action for char {}
impl Action for (usize, usize) {}

impl Player for usize {}
impl Player for u8 {}
impl Player for i32 {}
impl Player for char {}
impl Player for String {}
impl Player for &'static str {}
