use serde::{Deserialize, Serialize};

use crate::card::{Card, points_of};

/// A pile may never hold more cards than this; reaching the capacity forces
/// an immediate take-and-restart.
pub const PILE_CAPACITY: usize = 6;

/// An ordered pile of cards, append-only until it is seized.
///
/// The placement rule keeps card numbers strictly increasing; the only way a
/// larger number is followed by a smaller one is a full restart through
/// [`Pile::seize_and_restart`] or [`Pile::collect_overflow`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pile {
    cards: Vec<Card>,
}

impl Pile {
    /// Starts a pile from its seed card.
    pub fn seeded(card: Card) -> Self {
        let mut cards = Vec::with_capacity(PILE_CAPACITY);
        cards.push(card);
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn last(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Point sum over the whole pile.
    pub fn points(&self) -> u32 {
        points_of(&self.cards)
    }

    pub(crate) fn append(&mut self, card: Card) {
        debug_assert!(
            self.cards
                .last()
                .is_none_or(|last| last.number() < card.number()),
            "pile order must stay strictly increasing"
        );
        self.cards.push(card);
    }

    /// Empties the pile into the returned cards and restarts it with the
    /// replacement card as its only content.
    pub(crate) fn seize_and_restart(&mut self, replacement: Card) -> Vec<Card> {
        std::mem::replace(&mut self.cards, vec![replacement])
    }

    /// Removes and returns every card except the most recently placed one.
    pub(crate) fn collect_overflow(&mut self) -> Vec<Card> {
        let kept = self.cards.pop();
        let taken = std::mem::take(&mut self.cards);
        self.cards.extend(kept);
        taken
    }
}
