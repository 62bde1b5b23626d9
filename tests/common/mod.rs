#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use takesix::{Binding, Card, GameError, GameStateView, Player, PlayerId, Strategy};

/// Shared log of the `cards_played` context a strategy saw at each
/// replacement decision.
pub type ReplacementLog = Rc<RefCell<Vec<Vec<Card>>>>;

/// Strategy driven by pre-scripted card numbers and pile choices.
///
/// Card choices are constructed from the scripted number without consulting
/// the hand, so a script can deliberately violate the strategy contract.
pub struct ScriptedStrategy {
    plays: VecDeque<u16>,
    replacements: VecDeque<usize>,
    log: Option<ReplacementLog>,
    binding: Binding,
}

impl ScriptedStrategy {
    pub fn new(plays: &[u16], replacements: &[usize]) -> Self {
        Self {
            plays: plays.iter().copied().collect(),
            replacements: replacements.iter().copied().collect(),
            log: None,
            binding: Binding::default(),
        }
    }

    pub fn with_log(plays: &[u16], replacements: &[usize], log: ReplacementLog) -> Self {
        Self {
            log: Some(log),
            ..Self::new(plays, replacements)
        }
    }
}

impl Strategy for ScriptedStrategy {
    fn bind(&mut self, player: PlayerId) -> Result<(), GameError> {
        self.binding.bind(player)
    }

    fn choose_card_to_play(&mut self, _view: &GameStateView) -> Card {
        Card::new(self.plays.pop_front().expect("script ran out of card plays"))
    }

    fn choose_pile_to_replace(&mut self, view: &GameStateView) -> usize {
        if let Some(log) = &self.log {
            log.borrow_mut()
                .push(view.cards_played.clone().unwrap_or_default());
        }
        self.replacements
            .pop_front()
            .expect("script ran out of pile choices")
    }
}

pub fn scripted_player(id: PlayerId, plays: &[u16], replacements: &[usize]) -> Player {
    Player::new(id, Box::new(ScriptedStrategy::new(plays, replacements)))
        .expect("fresh strategy binds cleanly")
}

pub fn logging_player(
    id: PlayerId,
    plays: &[u16],
    replacements: &[usize],
    log: ReplacementLog,
) -> Player {
    Player::new(id, Box::new(ScriptedStrategy::with_log(plays, replacements, log)))
        .expect("fresh strategy binds cleanly")
}

pub fn numbers(cards: &[Card]) -> Vec<u16> {
    cards.iter().map(Card::number).collect()
}
