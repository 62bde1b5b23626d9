use std::collections::HashMap;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::{Action, PlayerId};
use crate::card::Card;
use crate::error::GameError;
use crate::state::GameStateView;
use crate::strategy::{Binding, Step, Strategy};

/// The state as the learner sees it: last card per pile plus its own hand.
type StateKey = (Vec<u16>, Vec<u16>);

/// Tabular Q-learning policy driven by the engine's reward signal.
///
/// Decisions are epsilon-greedy over the hand (card choices) or the pile
/// indices (replacement choices); `observe` applies the one-step Q-learning
/// update. Rewards are non-positive, so learning steers toward placements
/// that avoid taking points.
pub struct QLearningStrategy<R: Rng> {
    q_table: HashMap<(StateKey, Action), f64>,
    epsilon: f64,
    alpha: f64,
    gamma: f64,
    rng: R,
    binding: Binding,
}

impl<R: Rng> QLearningStrategy<R> {
    pub fn new(rng: R) -> Self {
        Self::with_parameters(rng, 0.1, 0.1, 0.99)
    }

    pub fn with_parameters(rng: R, epsilon: f64, alpha: f64, gamma: f64) -> Self {
        Self {
            q_table: HashMap::new(),
            epsilon,
            alpha,
            gamma,
            rng,
            binding: Binding::default(),
        }
    }

    /// Current estimate for taking `action` in the state `view` encodes.
    pub fn q_value(&self, view: &GameStateView, action: Action) -> f64 {
        self.lookup(&Self::encode(view), action)
    }

    pub fn table_len(&self) -> usize {
        self.q_table.len()
    }

    fn encode(view: &GameStateView) -> StateKey {
        (
            view.last_cards_per_pile.iter().map(Card::number).collect(),
            view.hand.iter().map(Card::number).collect(),
        )
    }

    fn lookup(&self, state: &StateKey, action: Action) -> f64 {
        self.q_table
            .get(&(state.clone(), action))
            .copied()
            .unwrap_or(0.0)
    }
}

impl<R: Rng> Strategy for QLearningStrategy<R> {
    fn bind(&mut self, player: PlayerId) -> Result<(), GameError> {
        self.binding.bind(player)
    }

    fn choose_card_to_play(&mut self, view: &GameStateView) -> Card {
        if self.rng.gen_range(0.0..1.0) < self.epsilon {
            return *view
                .hand
                .choose(&mut self.rng)
                .expect("hand must not be empty");
        }
        let state = Self::encode(view);
        let mut cards = view.hand.iter();
        let mut best = *cards.next().expect("hand must not be empty");
        let mut best_q = self.lookup(&state, Action::PlayCard(best));
        for &card in cards {
            let q = self.lookup(&state, Action::PlayCard(card));
            if q > best_q {
                best = card;
                best_q = q;
            }
        }
        best
    }

    fn choose_pile_to_replace(&mut self, view: &GameStateView) -> usize {
        if self.rng.gen_range(0.0..1.0) < self.epsilon {
            return self.rng.gen_range(0..view.total_piles);
        }
        let state = Self::encode(view);
        let mut best = 0;
        let mut best_q = self.lookup(&state, Action::ReplacePile(0));
        for index in 1..view.total_piles {
            let q = self.lookup(&state, Action::ReplacePile(index));
            if q > best_q {
                best = index;
                best_q = q;
            }
        }
        best
    }

    fn observe(&mut self, step: &Step) {
        let state = Self::encode(&step.before);
        let next = Self::encode(&step.after);
        let old = self.lookup(&state, step.action);
        let future = step
            .legal_actions
            .iter()
            .map(|&action| self.lookup(&next, action))
            .fold(None::<f64>, |best, q| Some(best.map_or(q, |b| b.max(q))))
            .unwrap_or(0.0);
        let updated = old + self.alpha * (f64::from(step.reward) + self.gamma * future - old);
        self.q_table.insert((state, step.action), updated);
    }
}
