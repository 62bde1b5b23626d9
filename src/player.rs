use std::collections::BTreeMap;

use crate::action::PlayerId;
use crate::card::{Card, points_of};
use crate::error::GameError;
use crate::strategy::Strategy;

/// A participant: hand, taken cards, score counters and the owned strategy.
///
/// Only the engine and the player's own strategy callbacks mutate this state.
/// The hand is keyed by card number, so iteration is always ascending.
pub struct Player {
    id: PlayerId,
    hand: BTreeMap<u16, Card>,
    taken_cards: Vec<Card>,
    turn_score: u32,
    round_score: u32,
    strategy: Box<dyn Strategy>,
}

impl Player {
    /// Creates a player and permanently binds the strategy to it.
    ///
    /// Fails if the strategy was already bound to another player.
    pub fn new(id: PlayerId, mut strategy: Box<dyn Strategy>) -> Result<Self, GameError> {
        strategy.bind(id)?;
        Ok(Self {
            id,
            hand: BTreeMap::new(),
            taken_cards: Vec::new(),
            turn_score: 0,
            round_score: 0,
            strategy,
        })
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Hand contents, ascending by card number.
    pub fn hand_cards(&self) -> Vec<Card> {
        self.hand.values().copied().collect()
    }

    pub fn hand_len(&self) -> usize {
        self.hand.len()
    }

    /// Cards taken so far this round.
    pub fn taken_cards(&self) -> &[Card] {
        &self.taken_cards
    }

    /// Points accumulated across the turns of the current round.
    pub fn turn_score(&self) -> u32 {
        self.turn_score
    }

    /// Lifetime points across all scored rounds. Lower is better.
    pub fn round_score(&self) -> u32 {
        self.round_score
    }

    /// Merges dealt cards into the hand, keyed by number.
    pub fn receive_cards(&mut self, cards: Vec<Card>) {
        for card in cards {
            self.hand.insert(card.number(), card);
        }
    }

    /// Credits a seized pile: cards go to `taken_cards`, their point sum to
    /// the turn score. Returns the points credited.
    pub fn take_pile(&mut self, cards: Vec<Card>) -> u32 {
        let points = points_of(&cards);
        self.turn_score += points;
        self.taken_cards.extend(cards);
        points
    }

    /// Folds the finished round's turn score into the lifetime score and
    /// returns the round's total.
    pub(crate) fn accumulate_round(&mut self) -> u32 {
        let round_total = self.turn_score;
        self.round_score += round_total;
        round_total
    }

    /// Clears hand, taken cards and turn score for the next round. The
    /// lifetime round score is never reset.
    pub fn reset_for_next_round(&mut self) {
        self.hand.clear();
        self.taken_cards.clear();
        self.turn_score = 0;
    }

    pub(crate) fn remove_from_hand(&mut self, number: u16) -> Option<Card> {
        self.hand.remove(&number)
    }

    pub(crate) fn strategy_mut(&mut self) -> &mut dyn Strategy {
        self.strategy.as_mut()
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("id", &self.id)
            .field("hand", &self.hand)
            .field("taken_cards", &self.taken_cards)
            .field("turn_score", &self.turn_score)
            .field("round_score", &self.round_score)
            .finish_non_exhaustive()
    }
}
