use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::PlayerId;
use crate::card::Card;
use crate::error::GameError;
use crate::state::GameStateView;
use crate::strategies::lowest_points_pile;
use crate::strategy::{Binding, Strategy};

/// Baseline policy: a uniformly random card and a uniformly random pile.
pub struct FullRandomStrategy<R: Rng> {
    rng: R,
    binding: Binding,
}

impl<R: Rng> FullRandomStrategy<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            binding: Binding::default(),
        }
    }
}

impl<R: Rng> Strategy for FullRandomStrategy<R> {
    fn bind(&mut self, player: PlayerId) -> Result<(), GameError> {
        self.binding.bind(player)
    }

    fn choose_card_to_play(&mut self, view: &GameStateView) -> Card {
        view.hand
            .choose(&mut self.rng)
            .copied()
            .expect("hand must not be empty")
    }

    fn choose_pile_to_replace(&mut self, view: &GameStateView) -> usize {
        self.rng.gen_range(0..view.total_piles)
    }
}

/// Random card choice with a deliberate replacement rule: seize the
/// cheapest pile, breaking point ties toward the candidate whose last card
/// carries the fewest points.
pub struct RandomCardStrategy<R: Rng> {
    rng: R,
    binding: Binding,
}

impl<R: Rng> RandomCardStrategy<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            binding: Binding::default(),
        }
    }
}

impl<R: Rng> Strategy for RandomCardStrategy<R> {
    fn bind(&mut self, player: PlayerId) -> Result<(), GameError> {
        self.binding.bind(player)
    }

    fn choose_card_to_play(&mut self, view: &GameStateView) -> Card {
        view.hand
            .choose(&mut self.rng)
            .copied()
            .expect("hand must not be empty")
    }

    fn choose_pile_to_replace(&mut self, view: &GameStateView) -> usize {
        lowest_points_pile(view, |card| u32::from(card.points()))
    }
}
