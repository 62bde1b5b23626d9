use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::action::{Action, PlayerId};
use crate::card::Card;
use crate::deck::{Deck, DeckConfig};
use crate::error::{ContractViolation, GameError};
use crate::pile::{PILE_CAPACITY, Pile};
use crate::player::Player;
use crate::score;
use crate::state::GameStateView;
use crate::strategy::Step;

const DEFAULT_SEED: u64 = 0xCA2D_0106_0D9E_C4B5;

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    pub rounds: usize,
    pub piles: usize,
    pub cards_per_player: usize,
    pub deck: DeckConfig,
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rounds: 5,
            piles: 4,
            cards_per_player: 10,
            deck: DeckConfig::default(),
            seed: DEFAULT_SEED,
        }
    }
}

/// Builder that enables deterministic deck injection for tests and
/// reproducible experiments.
pub struct GameBuilder {
    config: GameConfig,
    players: Vec<Player>,
    draw_order: Option<Vec<u16>>,
}

impl GameBuilder {
    pub fn new(players: Vec<Player>) -> Self {
        Self {
            config: GameConfig::default(),
            players,
            draw_order: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.config.rounds = rounds;
        self
    }

    pub fn with_piles(mut self, piles: usize) -> Self {
        self.config.piles = piles;
        self
    }

    pub fn with_cards_per_player(mut self, cards_per_player: usize) -> Self {
        self.config.cards_per_player = cards_per_player;
        self
    }

    pub fn with_deck_config(mut self, deck: DeckConfig) -> Self {
        self.config.deck = deck;
        self
    }

    /// Forces every round's deck to draw the given numbers first, in order,
    /// followed by the remaining numbers ascending.
    pub fn with_draw_order(mut self, order: Vec<u16>) -> Self {
        self.draw_order = Some(order);
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

/// The round/turn engine and game controller.
///
/// Owns deck, piles and players for the whole run. A game is a fixed number
/// of rounds; a round deals a fresh deck, runs one turn per dealt card,
/// scores, and resets. Progress is tracked by explicit monotonic round/turn
/// counters, never inferred from score contents.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    players: Vec<Player>,
    deck: Deck,
    piles: Vec<Pile>,
    turn_scores: BTreeMap<PlayerId, Vec<u32>>,
    round_scores: BTreeMap<PlayerId, Vec<u32>>,
    /// Completed rounds, 0-based.
    round: usize,
    /// Turns completed within the current round, 0-based.
    turn: usize,
    draw_order: Option<Vec<u16>>,
    rng: StdRng,
}

impl Game {
    pub fn builder(players: Vec<Player>) -> GameBuilder {
        GameBuilder::new(players)
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder {
            config,
            players,
            draw_order,
        } = builder;

        let mut problems = Vec::new();
        if players.len() < 2 {
            problems.push(String::from("at least two players are required"));
        }
        let mut seen_ids = BTreeSet::new();
        for player in &players {
            if !seen_ids.insert(player.id()) {
                problems.push(format!("duplicate player id {}", player.id()));
            }
        }
        if config.rounds == 0 {
            problems.push(String::from("at least one round is required"));
        }
        if config.piles == 0 {
            problems.push(String::from("at least one pile is required"));
        }
        if config.cards_per_player == 0 {
            problems.push(String::from("players must receive at least one card"));
        }
        let needed = players.len() * config.cards_per_player + config.piles;
        if config.deck.size() < needed {
            problems.push(format!(
                "deck of {} cards cannot cover one deal of {needed} cards",
                config.deck.size()
            ));
        }
        if !problems.is_empty() {
            return Err(GameError::InvalidConfiguration { problems });
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let deck = Self::fresh_deck(&config, draw_order.as_deref(), &mut rng)?;
        let turn_scores = players
            .iter()
            .map(|player| (player.id(), vec![0; config.cards_per_player]))
            .collect();
        let round_scores = players
            .iter()
            .map(|player| (player.id(), vec![0; config.rounds]))
            .collect();

        let mut game = Game {
            config,
            players,
            deck,
            piles: Vec::new(),
            turn_scores,
            round_scores,
            round: 0,
            turn: 0,
            draw_order,
            rng,
        };
        game.deal()?;
        Ok(game)
    }

    fn fresh_deck(
        config: &GameConfig,
        draw_order: Option<&[u16]>,
        rng: &mut StdRng,
    ) -> Result<Deck, GameError> {
        match draw_order {
            Some(order) => Deck::with_order(config.deck, order),
            None => Deck::new(config.deck, rng),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// 1-based index of the round in progress (capped once the game ends).
    pub fn current_round(&self) -> usize {
        (self.round + 1).min(self.config.rounds)
    }

    /// 1-based index of the turn in progress within the round.
    pub fn current_turn(&self) -> usize {
        (self.turn + 1).min(self.config.cards_per_player)
    }

    pub fn is_finished(&self) -> bool {
        self.round >= self.config.rounds
    }

    /// Score per player per round, keyed by player id.
    pub fn round_scores(&self) -> &BTreeMap<PlayerId, Vec<u32>> {
        &self.round_scores
    }

    /// Running cumulative turn scores for the current round, keyed by
    /// player id.
    pub fn turn_scores(&self) -> &BTreeMap<PlayerId, Vec<u32>> {
        &self.turn_scores
    }

    /// Players ranked by accumulated points, ascending. Lower is better.
    pub fn standings(&self) -> Vec<(PlayerId, u32)> {
        score::standings(&self.round_scores)
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.players
            .iter()
            .find(|player| player.id() == id)
            .ok_or(GameError::UnknownPlayer(id))
    }

    /// Snapshot from the given player's perspective.
    pub fn state_view(&self, perspective: PlayerId) -> Result<GameStateView, GameError> {
        let player = self.player(perspective)?;
        let mut view = self.base_view(None);
        view.hand = player.hand_cards();
        Ok(view)
    }

    /// Runs every remaining round to completion.
    pub fn play_game(&mut self) -> Result<(), GameError> {
        while self.round < self.config.rounds {
            self.play_round()?;
        }
        Ok(())
    }

    /// Runs the remaining turns of the current round, scores it, and resets
    /// for the next round (unless it was the last).
    pub fn play_round(&mut self) -> Result<(), GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        while self.turn < self.config.cards_per_player {
            self.play_turn()?;
        }
        self.finish_round()
    }

    /// Resolves a single turn: simultaneous commit, then deterministic
    /// placement in ascending card order.
    pub fn play_turn(&mut self) -> Result<(), GameError> {
        if self.is_finished() || self.turn >= self.config.cards_per_player {
            return Err(GameError::GameOver);
        }
        let turn_index = self.turn;
        debug!(
            "round {} turn {}: collecting commits",
            self.round + 1,
            turn_index + 1
        );

        // Every player decides against the same pre-placement snapshot, with
        // only the hand substituted. Chosen cards leave the hand immediately.
        let base = self.base_view(None);
        let mut commits: Vec<(usize, PlayerId, Card)> = Vec::with_capacity(self.players.len());
        for position in 0..self.players.len() {
            let player_id = self.players[position].id();
            let mut view = base.clone();
            view.hand = self.players[position].hand_cards();
            let chosen = self.players[position].strategy_mut().choose_card_to_play(&view);
            let card = self.players[position]
                .remove_from_hand(chosen.number())
                .ok_or(ContractViolation::CardNotInHand {
                    player: player_id,
                    card: chosen.number(),
                })?;
            debug!("player {player_id} commits card {}", card.number());
            commits.push((position, player_id, card));
        }

        // Ascending card number; the sort is stable, so equal numbers keep
        // commit order.
        commits.sort_by_key(|(_, _, card)| card.number());

        let mut processed: Vec<Card> = Vec::with_capacity(commits.len());
        for (position, player_id, card) in commits {
            self.resolve_placement(position, player_id, card, &processed)?;
            processed.push(card);
        }

        for position in 0..self.players.len() {
            let id = self.players[position].id();
            let cumulative = self.players[position].turn_score();
            let slots = self
                .turn_scores
                .get_mut(&id)
                .expect("turn score table covers every player");
            slots[turn_index] = cumulative;
        }
        self.turn += 1;
        Ok(())
    }

    fn resolve_placement(
        &mut self,
        position: usize,
        player_id: PlayerId,
        card: Card,
        processed: &[Card],
    ) -> Result<(), GameError> {
        let before = {
            let mut view = self.base_view(Some(processed.to_vec()));
            view.hand = self.players[position].hand_cards();
            view
        };

        let playable = self
            .piles
            .iter()
            .any(|pile| pile.last().is_some_and(|last| last.number() < card.number()));

        let (action, points_taken) = if playable {
            // Closest lower match: the candidate pile with the highest last
            // card still below the played number.
            let target = self
                .piles
                .iter()
                .enumerate()
                .filter_map(|(index, pile)| pile.last().map(|last| (index, last.number())))
                .filter(|&(_, last)| last < card.number())
                .max_by_key(|&(_, last)| last)
                .map(|(index, _)| index)
                .expect("playability check found a candidate pile");
            self.piles[target].append(card);
            debug!(
                "player {player_id} plays card {} onto pile {} ({} cards, {} points)",
                card.number(),
                target + 1,
                self.piles[target].len(),
                self.piles[target].points()
            );
            let mut points = 0;
            if self.piles[target].len() >= PILE_CAPACITY {
                let taken = self.piles[target].collect_overflow();
                points = self.players[position].take_pile(taken);
                debug!(
                    "pile {} reached {PILE_CAPACITY} cards; player {player_id} takes {points} \
                     points and card {} restarts the pile",
                    target + 1,
                    card.number()
                );
            }
            (Action::PlayCard(card), points)
        } else {
            debug!(
                "player {player_id} cannot play card {} and must replace a pile",
                card.number()
            );
            let index = self.players[position]
                .strategy_mut()
                .choose_pile_to_replace(&before);
            if index >= self.piles.len() {
                return Err(ContractViolation::PileIndexOutOfRange {
                    player: player_id,
                    index,
                    piles: self.piles.len(),
                }
                .into());
            }
            let taken = self.piles[index].seize_and_restart(card);
            let points = self.players[position].take_pile(taken);
            debug!(
                "player {player_id} seizes pile {} for {points} points; card {} restarts it",
                index + 1,
                card.number()
            );
            (Action::ReplacePile(index), points)
        };

        let after = {
            let mut view = self.base_view(None);
            view.hand = self.players[position].hand_cards();
            view
        };
        let legal_actions: Vec<Action> =
            after.hand.iter().map(|card| Action::PlayCard(*card)).collect();
        let step = Step {
            action,
            reward: -(points_taken as i32),
            before,
            after,
            legal_actions,
        };
        self.players[position].strategy_mut().observe(&step);
        Ok(())
    }

    fn finish_round(&mut self) -> Result<(), GameError> {
        let round_index = self.round;
        for position in 0..self.players.len() {
            let id = self.players[position].id();
            let round_total = self.players[position].accumulate_round();
            let slots = self
                .round_scores
                .get_mut(&id)
                .expect("round score table covers every player");
            slots[round_index] = round_total;
            info!(
                "round {}: player {id} scored {round_total} points ({} overall)",
                round_index + 1,
                self.players[position].round_score()
            );
        }
        self.round += 1;
        self.turn = 0;
        if self.round < self.config.rounds {
            self.reset_for_next_round()?;
        }
        Ok(())
    }

    fn reset_for_next_round(&mut self) -> Result<(), GameError> {
        self.deck = Self::fresh_deck(&self.config, self.draw_order.as_deref(), &mut self.rng)?;
        self.piles.clear();
        for player in &mut self.players {
            player.reset_for_next_round();
        }
        for slots in self.turn_scores.values_mut() {
            slots.fill(0);
        }
        self.deal()
    }

    /// Deals hands and seeds each pile with one card.
    fn deal(&mut self) -> Result<(), GameError> {
        for position in 0..self.players.len() {
            let mut cards = Vec::with_capacity(self.config.cards_per_player);
            for _ in 0..self.config.cards_per_player {
                cards.push(self.deck.draw(None)?);
            }
            debug!(
                "player {} receives {} cards",
                self.players[position].id(),
                cards.len()
            );
            self.players[position].receive_cards(cards);
        }
        let mut piles = Vec::with_capacity(self.config.piles);
        for _ in 0..self.config.piles {
            piles.push(Pile::seeded(self.deck.draw(None)?));
        }
        self.piles = piles;
        Ok(())
    }

    fn base_view(&self, cards_played: Option<Vec<Card>>) -> GameStateView {
        GameStateView {
            total_players: self.players.len(),
            min_card_in_deck: self.deck.min_card(),
            max_card_in_deck: self.deck.max_card(),
            cards_per_player: self.config.cards_per_player,
            total_piles: self.config.piles,
            total_rounds: self.config.rounds,
            played_cards: self
                .piles
                .iter()
                .flat_map(|pile| pile.cards().iter().copied())
                .collect(),
            last_cards_per_pile: self
                .piles
                .iter()
                .filter_map(|pile| pile.last().copied())
                .collect(),
            piles: self.piles.iter().map(|pile| pile.cards().to_vec()).collect(),
            points_per_pile: self.piles.iter().map(Pile::points).collect(),
            turn_scores: self.turn_scores.clone(),
            round_scores: self.round_scores.clone(),
            current_round: self.current_round(),
            current_turn: self.current_turn(),
            cards_played,
            hand: Vec::new(),
        }
    }
}
