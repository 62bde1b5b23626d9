use crate::action::PlayerId;
use crate::card::Card;
use crate::error::GameError;
use crate::state::GameStateView;
use crate::strategies::lowest_points_pile;
use crate::strategy::{Binding, Strategy};

/// Deterministic policy: always plays the highest-numbered card in hand and
/// seizes the cheapest pile, breaking point ties toward the candidate whose
/// last card has the lowest number.
#[derive(Default)]
pub struct DescendingOrderStrategy {
    binding: Binding,
}

impl DescendingOrderStrategy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Strategy for DescendingOrderStrategy {
    fn bind(&mut self, player: PlayerId) -> Result<(), GameError> {
        self.binding.bind(player)
    }

    fn choose_card_to_play(&mut self, view: &GameStateView) -> Card {
        // The hand is ascending, so the last card is the highest.
        *view.hand.last().expect("hand must not be empty")
    }

    fn choose_pile_to_replace(&mut self, view: &GameStateView) -> usize {
        lowest_points_pile(view, |card| card.number())
    }
}
