use serde::{Deserialize, Serialize};

use crate::card::Card;

/// Stable identifier of a player within the game.
pub type PlayerId = usize;

/// A resolved decision taken by a player during the placement phase.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// The committed card was placed onto a pile.
    PlayCard(Card),
    /// The committed card was unplayable and the pile at this index was
    /// seized and restarted.
    ReplacePile(usize),
}

impl Action {
    /// Returns the played card when the action is a placement.
    pub fn card(&self) -> Option<Card> {
        match self {
            Action::PlayCard(card) => Some(*card),
            Action::ReplacePile(_) => None,
        }
    }
}
