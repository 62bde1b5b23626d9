use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use takesix::{
    Action, Card, DescendingOrderStrategy, FullRandomStrategy, GameStateView, QLearningStrategy,
    RandomCardStrategy, Step, Strategy, points_of,
};

fn view_with(piles: &[&[u16]], hand: &[u16]) -> GameStateView {
    let piles: Vec<Vec<Card>> = piles
        .iter()
        .map(|numbers| numbers.iter().map(|&n| Card::new(n)).collect())
        .collect();
    GameStateView {
        total_players: 2,
        min_card_in_deck: Some(1),
        max_card_in_deck: Some(103),
        cards_per_player: 10,
        total_piles: piles.len(),
        total_rounds: 5,
        played_cards: piles.iter().flatten().copied().collect(),
        last_cards_per_pile: piles
            .iter()
            .filter_map(|pile| pile.last().copied())
            .collect(),
        points_per_pile: piles.iter().map(|pile| points_of(pile)).collect(),
        piles,
        turn_scores: BTreeMap::new(),
        round_scores: BTreeMap::new(),
        current_round: 1,
        current_turn: 1,
        cards_played: None,
        hand: hand.iter().map(|&n| Card::new(n)).collect(),
    }
}

#[test]
fn descending_order_plays_the_highest_card() {
    let view = view_with(&[&[50]], &[5, 12, 40]);
    let mut strategy = DescendingOrderStrategy::new();
    assert_eq!(strategy.choose_card_to_play(&view).number(), 40);
}

#[test]
fn the_two_replacement_tie_breaks_are_distinct_policies() {
    // Both piles are worth 5 points. Pile 0 ends on 11 (5 points, low
    // number); pile 1 ends on 21 (1 point, high number). The two built-in
    // tie-breaks pick opposite piles.
    let view = view_with(&[&[11], &[3, 20, 21]], &[2]);
    assert_eq!(view.points_per_pile, vec![5, 5]);

    let mut by_number = DescendingOrderStrategy::new();
    assert_eq!(by_number.choose_pile_to_replace(&view), 0);

    let mut by_points = RandomCardStrategy::new(StdRng::seed_from_u64(1));
    assert_eq!(by_points.choose_pile_to_replace(&view), 1);
}

#[test]
fn replacement_prefers_the_cheapest_pile_outright() {
    // No tie: pile 1 is strictly cheaper, both policies agree.
    let view = view_with(&[&[55], &[4]], &[2]);
    let mut by_number = DescendingOrderStrategy::new();
    let mut by_points = RandomCardStrategy::new(StdRng::seed_from_u64(1));
    assert_eq!(by_number.choose_pile_to_replace(&view), 1);
    assert_eq!(by_points.choose_pile_to_replace(&view), 1);
}

#[test]
fn full_random_decisions_stay_legal() {
    let view = view_with(&[&[10], &[30], &[50]], &[7, 20, 33]);
    let mut strategy = FullRandomStrategy::new(StdRng::seed_from_u64(9));
    for _ in 0..20 {
        let card = strategy.choose_card_to_play(&view);
        assert!(view.hand.contains(&card));
        let pile = strategy.choose_pile_to_replace(&view);
        assert!(pile < view.total_piles);
    }
}

#[test]
fn strategies_cannot_be_rebound() {
    let mut strategy = DescendingOrderStrategy::new();
    strategy.bind(1).unwrap();
    assert!(strategy.bind(2).is_err());
}

#[test]
fn q_learning_update_steers_away_from_penalties() {
    let before = view_with(&[&[50]], &[2, 7]);
    let after = view_with(&[&[50]], &[7]);
    let mut strategy = QLearningStrategy::with_parameters(
        StdRng::seed_from_u64(3),
        0.0, // greedy only
        0.1,
        0.99,
    );

    // Untrained, all estimates are zero and ties go to the first card.
    assert_eq!(strategy.choose_card_to_play(&before).number(), 2);

    let step = Step {
        action: Action::PlayCard(Card::new(2)),
        reward: -5,
        before: before.clone(),
        after: after.clone(),
        legal_actions: vec![Action::PlayCard(Card::new(7))],
    };
    strategy.observe(&step);

    let q = strategy.q_value(&before, Action::PlayCard(Card::new(2)));
    assert!((q - (-0.5)).abs() < 1e-9, "got {q}");
    assert_eq!(strategy.table_len(), 1);

    // Card 2 now looks costly; the greedy choice moves to card 7.
    assert_eq!(strategy.choose_card_to_play(&before).number(), 7);
}

#[test]
fn q_learning_discounts_future_estimates() {
    let before = view_with(&[&[50]], &[2, 7]);
    let after = view_with(&[&[50]], &[7]);
    let mut strategy =
        QLearningStrategy::with_parameters(StdRng::seed_from_u64(3), 0.0, 0.5, 0.5);

    // Seed a future estimate for the follow-up action, then check that the
    // update blends reward and discounted future value.
    let seed_step = Step {
        action: Action::PlayCard(Card::new(7)),
        reward: -4,
        before: after.clone(),
        after: view_with(&[&[50]], &[]),
        legal_actions: vec![],
    };
    strategy.observe(&seed_step);
    assert_eq!(strategy.q_value(&after, Action::PlayCard(Card::new(7))), -2.0);

    let step = Step {
        action: Action::PlayCard(Card::new(2)),
        reward: 0,
        before: before.clone(),
        after: after.clone(),
        legal_actions: vec![Action::PlayCard(Card::new(7))],
    };
    strategy.observe(&step);
    // 0 + 0.5 * (0 + 0.5 * -2.0 - 0) = -0.5
    let q = strategy.q_value(&before, Action::PlayCard(Card::new(2)));
    assert!((q - (-0.5)).abs() < 1e-9, "got {q}");
}

#[test]
fn exploring_q_learner_still_answers_from_the_hand() {
    let view = view_with(&[&[10], &[30]], &[7, 20, 33]);
    let mut strategy = QLearningStrategy::with_parameters(
        StdRng::seed_from_u64(11),
        1.0, // explore every time
        0.1,
        0.99,
    );
    for _ in 0..20 {
        let card = strategy.choose_card_to_play(&view);
        assert!(view.hand.contains(&card));
        let pile = strategy.choose_pile_to_replace(&view);
        assert!(pile < view.total_piles);
    }
}
