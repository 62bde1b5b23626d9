use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::card::Card;

/// Read-only snapshot of the game handed to strategies at every decision
/// point.
///
/// The engine rebuilds this before each decision; strategies own their copy
/// and can never mutate shared state through it. `hand` always belongs to the
/// player the snapshot was built for.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateView {
    pub total_players: usize,
    /// Smallest card number still in the live deck, `None` once drained.
    pub min_card_in_deck: Option<u16>,
    /// Largest card number still in the live deck, `None` once drained.
    pub max_card_in_deck: Option<u16>,
    pub cards_per_player: usize,
    pub total_piles: usize,
    pub total_rounds: usize,
    /// Every card currently resting on any pile, in pile order.
    pub played_cards: Vec<Card>,
    /// Each pile's current last card, in pile order.
    pub last_cards_per_pile: Vec<Card>,
    /// Full pile contents, in pile order.
    pub piles: Vec<Vec<Card>>,
    /// Point sum per pile, in pile order.
    pub points_per_pile: Vec<u32>,
    /// Running cumulative turn score per player for the current round,
    /// one slot per turn.
    pub turn_scores: BTreeMap<PlayerId, Vec<u32>>,
    /// Score per player per round, one slot per round.
    pub round_scores: BTreeMap<PlayerId, Vec<u32>>,
    /// 1-based index of the round in progress.
    pub current_round: usize,
    /// 1-based index of the turn in progress within the round.
    pub current_turn: usize,
    /// Cards committed by players already processed earlier in the current
    /// placement phase. `Some` only when asked to pick a replacement pile.
    pub cards_played: Option<Vec<Card>>,
    /// The perspective player's own hand, ascending by card number.
    pub hand: Vec<Card>,
}

impl GameStateView {
    /// Indices of the piles the given card could legally be appended to.
    pub fn playable_piles(&self, card: Card) -> Vec<usize> {
        self.last_cards_per_pile
            .iter()
            .enumerate()
            .filter(|(_, last)| last.number() < card.number())
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playable_piles_require_a_strictly_lower_last_card() {
        let view = GameStateView {
            total_players: 2,
            min_card_in_deck: Some(1),
            max_card_in_deck: Some(103),
            cards_per_player: 10,
            total_piles: 3,
            total_rounds: 5,
            played_cards: vec![Card::new(10), Card::new(40), Card::new(50)],
            last_cards_per_pile: vec![Card::new(10), Card::new(40), Card::new(50)],
            piles: vec![
                vec![Card::new(10)],
                vec![Card::new(40)],
                vec![Card::new(50)],
            ],
            points_per_pile: vec![3, 3, 3],
            turn_scores: BTreeMap::new(),
            round_scores: BTreeMap::new(),
            current_round: 1,
            current_turn: 1,
            cards_played: None,
            hand: Vec::new(),
        };
        assert_eq!(view.playable_piles(Card::new(40)), vec![0]);
        assert_eq!(view.playable_piles(Card::new(41)), vec![0, 1]);
        assert_eq!(view.playable_piles(Card::new(9)), Vec::<usize>::new());
    }
}
