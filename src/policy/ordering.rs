//! Action ordering hooks
//!
//! Alpha-beta pruning cuts off more of the tree when the best action is
//! searched first. An [`ActionOrdering`] reorders a node's actions before
//! they are expanded. Ordering never changes the value of a complete search;
//! under a time budget it can change which action is best so far.

use std::marker::PhantomData;

use crate::game::Game;

/// Trait for policies that reorder actions before expansion
pub trait ActionOrdering<G: Game> {
    /// Returns `actions` in the order they should be searched
    ///
    /// `player` is the player the search is maximizing for and `depth` the
    /// ply of `state` below the decision state. The result must be a
    /// permutation of `actions`.
    fn order(
        &self,
        game: &G,
        state: &G::State,
        actions: Vec<G::Action>,
        player: &G::Player,
        depth: usize,
    ) -> Vec<G::Action>;
}

/// Keeps the order produced by [`Game::actions`]
#[derive(Debug, Clone, Copy, Default)]
pub struct GameOrder;

impl<G: Game> ActionOrdering<G> for GameOrder {
    fn order(
        &self,
        _game: &G,
        _state: &G::State,
        actions: Vec<G::Action>,
        _player: &G::Player,
        _depth: usize,
    ) -> Vec<G::Action> {
        actions
    }
}

/// Orders actions with a closure
///
/// ```
/// # use arboriter_adversarial::policy::ordering::FnOrdering;
/// # use arboriter_adversarial::Game;
/// fn reversed<G: Game>() -> impl arboriter_adversarial::policy::ActionOrdering<G> {
///     FnOrdering::<G, _>::new(|_game: &G, _state: &G::State, mut actions: Vec<G::Action>, _player: &G::Player, _depth: usize| {
///         actions.reverse();
///         actions
///     })
/// }
/// ```
pub struct FnOrdering<G, F> {
    ordering: F,
    _phantom: PhantomData<fn() -> G>,
}

impl<G, F> FnOrdering<G, F>
where
    G: Game,
    F: Fn(&G, &G::State, Vec<G::Action>, &G::Player, usize) -> Vec<G::Action>,
{
    /// Creates a new ordering from the given function
    pub fn new(ordering: F) -> Self {
        FnOrdering {
            ordering,
            _phantom: PhantomData,
        }
    }
}

impl<G, F> ActionOrdering<G> for FnOrdering<G, F>
where
    G: Game,
    F: Fn(&G, &G::State, Vec<G::Action>, &G::Player, usize) -> Vec<G::Action>,
{
    fn order(
        &self,
        game: &G,
        state: &G::State,
        actions: Vec<G::Action>,
        player: &G::Player,
        depth: usize,
    ) -> Vec<G::Action> {
        (self.ordering)(game, state, actions, player, depth)
    }
}

// Implement ActionOrdering for Box<dyn ActionOrdering>
impl<G: Game> ActionOrdering<G> for Box<dyn ActionOrdering<G>> {
    fn order(
        &self,
        game: &G,
        state: &G::State,
        actions: Vec<G::Action>,
        player: &G::Player,
        depth: usize,
    ) -> Vec<G::Action> {
        (**self).order(game, state, actions, player, depth)
    }
}
