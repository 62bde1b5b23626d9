pub mod descending;
pub mod human;
pub mod q_learning;
pub mod random;

pub use descending::DescendingOrderStrategy;
pub use human::HumanInputStrategy;
pub use q_learning::QLearningStrategy;
pub use random::{FullRandomStrategy, RandomCardStrategy};

use crate::card::Card;
use crate::state::GameStateView;

/// Replacement rule shared by the deliberate built-in policies: seize the
/// pile worth the fewest points, breaking ties by `tie_key` over the
/// candidates' last cards (first minimum wins).
///
/// The tie key is what distinguishes the built-ins: lowest last-card
/// *points* versus lowest last-card *number* are different policies.
pub(crate) fn lowest_points_pile<K: Ord>(
    view: &GameStateView,
    tie_key: impl Fn(&Card) -> K,
) -> usize {
    let min_points = view
        .points_per_pile
        .iter()
        .min()
        .copied()
        .unwrap_or_default();
    let candidates: Vec<usize> = view
        .points_per_pile
        .iter()
        .enumerate()
        .filter(|&(_, &points)| points == min_points)
        .map(|(index, _)| index)
        .collect();
    if candidates.len() == 1 {
        return candidates[0];
    }
    candidates
        .into_iter()
        .min_by_key(|&index| tie_key(&view.last_cards_per_pile[index]))
        .expect("a game always has at least one pile")
}
