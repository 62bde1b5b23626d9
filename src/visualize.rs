use std::fmt::Write;

use crate::card::Card;
use crate::state::GameStateView;

/// Renders the table as seen by the perspective player: round/turn
/// progress, every pile with its point sum, and the player's hand.
pub fn render_state(state: &GameStateView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Round {}/{}, turn {}/{}",
        state.current_round, state.total_rounds, state.current_turn, state.cards_per_player
    );
    let _ = writeln!(out, "{}", render_piles(state));
    let _ = write!(out, "{}", render_hand(state));
    out
}

/// One line per pile: contents and point sum.
pub fn render_piles(state: &GameStateView) -> String {
    let mut out = String::new();
    for (index, pile) in state.piles.iter().enumerate() {
        let cards = pile
            .iter()
            .map(|card| card.number().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(
            out,
            "Pile {}: [{cards}] ({} points)",
            index + 1,
            state.points_per_pile.get(index).copied().unwrap_or(0)
        );
    }
    out
}

/// The perspective player's hand, one card per line.
pub fn render_hand(state: &GameStateView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Hand with {} cards:", state.hand.len());
    for card in &state.hand {
        let _ = writeln!(out, "  {card}");
    }
    out
}

/// The cards committed earlier in the current placement phase, if any.
pub fn render_cards_played(state: &GameStateView) -> String {
    match state.cards_played.as_deref() {
        None | Some([]) => String::from("No cards have been played yet this turn.\n"),
        Some(cards) => {
            let mut out = String::from("Already played this turn:\n");
            for card in cards {
                let _ = writeln!(out, "  {card}");
            }
            out
        }
    }
}

/// Short human-readable card description.
pub fn describe_card(card: Card) -> String {
    card.to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn state() -> GameStateView {
        GameStateView {
            total_players: 2,
            min_card_in_deck: Some(1),
            max_card_in_deck: Some(103),
            cards_per_player: 10,
            total_piles: 2,
            total_rounds: 5,
            played_cards: vec![Card::new(5), Card::new(8)],
            last_cards_per_pile: vec![Card::new(5), Card::new(8)],
            piles: vec![vec![Card::new(5)], vec![Card::new(8)]],
            points_per_pile: vec![2, 1],
            turn_scores: BTreeMap::new(),
            round_scores: BTreeMap::new(),
            current_round: 1,
            current_turn: 1,
            cards_played: None,
            hand: vec![Card::new(3), Card::new(20)],
        }
    }

    #[test]
    fn renders_piles_with_points() {
        let rendered = render_piles(&state());
        assert!(rendered.contains("Pile 1: [5] (2 points)"));
        assert!(rendered.contains("Pile 2: [8] (1 points)"));
    }

    #[test]
    fn renders_hand_ascending() {
        let rendered = render_hand(&state());
        assert!(rendered.contains("Hand with 2 cards:"));
        let three = rendered.find("Card 3").unwrap();
        let twenty = rendered.find("Card 20").unwrap();
        assert!(three < twenty);
    }
}
