//! Scoring utilities for take-until-six simulations.
//!
//! Points are penalties: every card a player takes adds its point value to
//! the player's totals, and the player with the fewest accumulated points
//! wins the game.

use std::collections::BTreeMap;

use crate::action::PlayerId;

/// Players ranked by total accumulated points across all scored rounds,
/// ascending. Ties keep ascending player-id order.
pub fn standings(round_scores: &BTreeMap<PlayerId, Vec<u32>>) -> Vec<(PlayerId, u32)> {
    let mut totals: Vec<(PlayerId, u32)> = round_scores
        .iter()
        .map(|(&id, slots)| (id, slots.iter().sum()))
        .collect();
    totals.sort_by_key(|&(id, total)| (total, id));
    totals
}

/// The player with the fewest points in the given 0-based round, if that
/// round has been scored. Ties go to the lowest player id.
pub fn round_winner(
    round_scores: &BTreeMap<PlayerId, Vec<u32>>,
    round: usize,
) -> Option<PlayerId> {
    round_scores
        .iter()
        .filter_map(|(&id, slots)| slots.get(round).map(|&score| (score, id)))
        .min()
        .map(|(_, id)| id)
}
