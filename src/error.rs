use thiserror::Error;

use crate::action::PlayerId;

/// Errors that can occur when configuring or running a game.
///
/// None of these are retried: every variant terminates the run, except that
/// construction-time variants aggregate all offending entries before failing.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid deck: {}", problems.join("; "))]
    InvalidDeck { problems: Vec<String> },
    #[error("invalid configuration: {}", problems.join("; "))]
    InvalidConfiguration { problems: Vec<String> },
    #[error("card {0} is not present in the deck")]
    CardNotInDeck(u16),
    #[error("deck is exhausted")]
    DeckExhausted,
    #[error("player {0} is not part of this game")]
    UnknownPlayer(PlayerId),
    #[error("game is already over")]
    GameOver,
    #[error("contract violation: {0}")]
    ContractViolation(#[from] ContractViolation),
}

/// A strategy broke its side of the decision contract.
///
/// The engine never substitutes a fallback action for a violating strategy;
/// doing so would silently corrupt game fairness.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    #[error("player {player} chose card {card}, which is not in their hand")]
    CardNotInHand { player: PlayerId, card: u16 },
    #[error("player {player} chose pile {index}, but only {piles} piles exist")]
    PileIndexOutOfRange {
        player: PlayerId,
        index: usize,
        piles: usize,
    },
    #[error("strategy is already bound to player {bound}, cannot rebind to {attempted}")]
    StrategyRebound {
        bound: PlayerId,
        attempted: PlayerId,
    },
    #[error("strategy was used before being bound to a player")]
    StrategyUnbound,
}
