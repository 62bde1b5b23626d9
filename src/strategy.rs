use crate::action::{Action, PlayerId};
use crate::card::Card;
use crate::error::{ContractViolation, GameError};
use crate::state::GameStateView;

/// Outcome of one resolved placement, reported to the acting player's
/// strategy through [`Strategy::observe`].
///
/// `reward` is the negative of the points the placement cost the player
/// (zero for a clean placement), so a learning policy minimizes points by
/// maximizing reward. `legal_actions` are the actions available to the same
/// player in `after`; empty when the round is over for them.
#[derive(Clone, Debug)]
pub struct Step {
    pub action: Action,
    pub reward: i32,
    pub before: GameStateView,
    pub after: GameStateView,
    pub legal_actions: Vec<Action>,
}

/// Interface for defining custom decision policies.
///
/// A strategy is constructed unbound and bound to exactly one player before
/// first use; binding is one-way and permanent. Decisions read only the
/// snapshot: `choose_card_to_play` must return a card present in
/// `view.hand`, and `choose_pile_to_replace` must return an index below
/// `view.total_piles` — the engine treats anything else as a fatal contract
/// violation rather than guessing a fallback.
pub trait Strategy {
    /// Binds the strategy to its player. Must fail on any second call.
    fn bind(&mut self, player: PlayerId) -> Result<(), GameError>;

    /// Picks the card to commit this turn from `view.hand`.
    fn choose_card_to_play(&mut self, view: &GameStateView) -> Card;

    /// Picks the pile to seize after failing the playability check.
    fn choose_pile_to_replace(&mut self, view: &GameStateView) -> usize;

    /// Learning hook, called after each of the player's own placements
    /// resolves. No-op by default.
    fn observe(&mut self, _step: &Step) {}
}

/// One-way player binding shared by strategy implementations.
#[derive(Clone, Copy, Debug, Default)]
pub struct Binding(Option<PlayerId>);

impl Binding {
    pub fn bind(&mut self, player: PlayerId) -> Result<(), GameError> {
        match self.0 {
            Some(bound) => Err(ContractViolation::StrategyRebound {
                bound,
                attempted: player,
            }
            .into()),
            None => {
                self.0 = Some(player);
                Ok(())
            }
        }
    }

    pub fn player(&self) -> Option<PlayerId> {
        self.0
    }
}
