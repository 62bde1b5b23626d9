//! Take-until-six card game engine with pluggable decision strategies.
//!
//! Players simultaneously commit one card per turn; cards are routed onto
//! ordered piles by numeric comparison. A pile overflowing past six cards is
//! collected by whoever caused the overflow, and a card that cannot be
//! legally placed forces its player to seize a pile and restart it. Taken
//! cards score penalty points per turn, per round and across the game; the
//! lowest total wins.

pub mod action;
pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod pile;
pub mod player;
pub mod score;
pub mod state;
pub mod strategies;
pub mod strategy;
pub mod visualize;

pub use crate::action::{Action, PlayerId};
pub use crate::card::{Card, points_for, points_of};
pub use crate::deck::{Deck, DeckConfig};
pub use crate::error::{ContractViolation, GameError};
pub use crate::game::{Game, GameBuilder, GameConfig};
pub use crate::pile::{PILE_CAPACITY, Pile};
pub use crate::player::Player;
pub use crate::score::{round_winner, standings};
pub use crate::state::GameStateView;
pub use crate::strategies::{
    DescendingOrderStrategy, FullRandomStrategy, HumanInputStrategy, QLearningStrategy,
    RandomCardStrategy,
};
pub use crate::strategy::{Binding, Step, Strategy};
pub use crate::visualize::{describe_card, render_state};
