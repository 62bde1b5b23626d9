use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::card::{
    Card, DEFAULT_END_CARD, DEFAULT_MAX_POINTS, DEFAULT_MIN_POINTS, DEFAULT_START_CARD,
};
use crate::error::GameError;

/// Numeric range and point bounds for one round's deck.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckConfig {
    pub start: u16,
    pub end: u16,
    pub min_points: u8,
    pub max_points: u8,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_CARD,
            end: DEFAULT_END_CARD,
            min_points: DEFAULT_MIN_POINTS,
            max_points: DEFAULT_MAX_POINTS,
        }
    }
}

impl DeckConfig {
    /// Number of cards a freshly built deck holds.
    pub fn size(&self) -> usize {
        if self.start > self.end {
            0
        } else {
            usize::from(self.end - self.start) + 1
        }
    }
}

/// One round's card set: exactly one card per number in the configured range.
///
/// Draws are destructive; the deck is rebuilt from scratch at every round
/// boundary and never persists across rounds.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: BTreeMap<u16, Card>,
    // Draw order, consumed from the back.
    order: Vec<u16>,
}

impl Deck {
    /// Builds and validates a deck, then shuffles its draw order.
    pub fn new<R: Rng>(config: DeckConfig, rng: &mut R) -> Result<Self, GameError> {
        let mut deck = Self::build(config)?;
        deck.order.shuffle(rng);
        Ok(deck)
    }

    /// Builds a deck that draws the given numbers first, in order, followed
    /// by the remaining numbers ascending. Deterministic seam for tests and
    /// replays.
    pub fn with_order(config: DeckConfig, order: &[u16]) -> Result<Self, GameError> {
        let mut deck = Self::build(config)?;
        let mut problems = Vec::new();
        let mut forced: Vec<u16> = Vec::with_capacity(order.len());
        for &number in order {
            if !deck.cards.contains_key(&number) {
                problems.push(format!("draw order references unknown card {number}"));
            } else if forced.contains(&number) {
                problems.push(format!("draw order repeats card {number}"));
            } else {
                forced.push(number);
            }
        }
        if !problems.is_empty() {
            return Err(GameError::InvalidDeck { problems });
        }
        let mut rest: Vec<u16> = deck
            .cards
            .keys()
            .copied()
            .filter(|number| !forced.contains(number))
            .collect();
        rest.reverse();
        forced.reverse();
        rest.extend(forced);
        deck.order = rest;
        Ok(deck)
    }

    fn build(config: DeckConfig) -> Result<Self, GameError> {
        let mut problems = Vec::new();
        if config.start > config.end {
            problems.push(format!(
                "card range {}..={} is empty",
                config.start, config.end
            ));
        }
        let mut cards = BTreeMap::new();
        if config.start <= config.end {
            for number in config.start..=config.end {
                cards.insert(number, Card::new(number));
            }
        }
        // The construction above upholds these by itself; the checks guard the
        // configured point bounds and report every offender at once.
        for (&number, card) in &cards {
            if card.number() != number {
                problems.push(format!(
                    "card number mismatch: expected {number}, got {}",
                    card.number()
                ));
            }
            if !(config.min_points..=config.max_points).contains(&card.points()) {
                problems.push(format!(
                    "card {number} has {} points, outside [{}, {}]",
                    card.points(),
                    config.min_points,
                    config.max_points
                ));
            }
        }
        if !problems.is_empty() {
            return Err(GameError::InvalidDeck { problems });
        }
        let order: Vec<u16> = cards.keys().rev().copied().collect();
        Ok(Self { cards, order })
    }

    /// Removes and returns a card.
    ///
    /// With `Some(number)` the exact card is removed, failing with
    /// [`GameError::CardNotInDeck`] when absent. With `None` the next card in
    /// draw order is removed, failing with [`GameError::DeckExhausted`] once
    /// the deck is drained.
    pub fn draw(&mut self, number: Option<u16>) -> Result<Card, GameError> {
        match number {
            Some(number) => {
                let card = self
                    .cards
                    .remove(&number)
                    .ok_or(GameError::CardNotInDeck(number))?;
                if let Some(position) = self.order.iter().position(|&n| n == number) {
                    self.order.remove(position);
                }
                Ok(card)
            }
            None => {
                let number = self.order.pop().ok_or(GameError::DeckExhausted)?;
                self.cards
                    .remove(&number)
                    .ok_or(GameError::CardNotInDeck(number))
            }
        }
    }

    /// Smallest card number still in the deck.
    pub fn min_card(&self) -> Option<u16> {
        self.cards.keys().next().copied()
    }

    /// Largest card number still in the deck.
    pub fn max_card(&self) -> Option<u16> {
        self.cards.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn builds_one_card_per_number() {
        let deck = Deck::new(DeckConfig::default(), &mut rng()).unwrap();
        assert_eq!(deck.len(), 103);
        assert_eq!(deck.min_card(), Some(1));
        assert_eq!(deck.max_card(), Some(103));
    }

    #[test]
    fn draw_specific_card_removes_exactly_that_card() {
        let mut deck = Deck::new(DeckConfig::default(), &mut rng()).unwrap();
        let card = deck.draw(Some(55)).unwrap();
        assert_eq!(card.number(), 55);
        assert_eq!(card.points(), 7);
        assert_eq!(deck.len(), 102);
        assert!(matches!(
            deck.draw(Some(55)),
            Err(GameError::CardNotInDeck(55))
        ));
    }

    #[test]
    fn unspecified_draws_drain_the_deck() {
        let config = DeckConfig {
            start: 1,
            end: 10,
            ..DeckConfig::default()
        };
        let mut deck = Deck::new(config, &mut rng()).unwrap();
        let mut seen = Vec::new();
        for _ in 0..10 {
            seen.push(deck.draw(None).unwrap().number());
        }
        seen.sort_unstable();
        assert_eq!(seen, (1..=10).collect::<Vec<_>>());
        assert!(matches!(deck.draw(None), Err(GameError::DeckExhausted)));
    }

    #[test]
    fn validation_aggregates_every_offender() {
        let config = DeckConfig {
            start: 1,
            end: 4,
            min_points: 2,
            max_points: 7,
        };
        // Cards 1, 2, 3 and 4 are all worth a single point.
        let err = Deck::new(config, &mut rng()).unwrap_err();
        match err {
            GameError::InvalidDeck { problems } => assert_eq!(problems.len(), 4),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_range_is_rejected() {
        let config = DeckConfig {
            start: 10,
            end: 5,
            ..DeckConfig::default()
        };
        assert!(matches!(
            Deck::new(config, &mut rng()),
            Err(GameError::InvalidDeck { .. })
        ));
    }

    #[test]
    fn forced_order_draws_first() {
        let config = DeckConfig {
            start: 1,
            end: 8,
            ..DeckConfig::default()
        };
        let mut deck = Deck::with_order(config, &[3, 7, 1]).unwrap();
        assert_eq!(deck.draw(None).unwrap().number(), 3);
        assert_eq!(deck.draw(None).unwrap().number(), 7);
        assert_eq!(deck.draw(None).unwrap().number(), 1);
        assert_eq!(deck.draw(None).unwrap().number(), 2);
    }

    #[test]
    fn forced_order_rejects_unknown_and_duplicate_numbers() {
        let config = DeckConfig {
            start: 1,
            end: 8,
            ..DeckConfig::default()
        };
        assert!(matches!(
            Deck::with_order(config, &[9]),
            Err(GameError::InvalidDeck { .. })
        ));
        assert!(matches!(
            Deck::with_order(config, &[2, 2]),
            Err(GameError::InvalidDeck { .. })
        ));
    }
}
