use std::io::{self, Write};

use crate::action::PlayerId;
use crate::card::Card;
use crate::error::GameError;
use crate::state::GameStateView;
use crate::strategy::{Binding, Strategy};
use crate::visualize::{render_cards_played, render_hand, render_piles};

/// Interactive policy that queries a human via standard input.
///
/// Blocks the whole simulation while waiting for a line of input; invalid
/// input re-prompts locally and never aborts the round. Not meant for
/// unattended simulations or training runs.
pub struct HumanInputStrategy {
    name: String,
    binding: Binding,
}

impl HumanInputStrategy {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            binding: Binding::default(),
        }
    }
}

impl Default for HumanInputStrategy {
    fn default() -> Self {
        Self::new("Human")
    }
}

fn read_choice() -> String {
    print!("Your choice: ");
    if io::stdout().flush().is_err() {
        eprintln!("failed to flush stdout");
    }
    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        eprintln!("failed to read input");
        return String::new();
    }
    input.trim().to_string()
}

fn pile_summary(view: &GameStateView) -> String {
    view.piles
        .iter()
        .enumerate()
        .map(|(index, pile)| {
            let last = view
                .last_cards_per_pile
                .get(index)
                .map(|card| card.to_string())
                .unwrap_or_else(|| String::from("-"));
            format!("Pile {} of size {}, last card: {last}", index + 1, pile.len())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

impl Strategy for HumanInputStrategy {
    fn bind(&mut self, player: PlayerId) -> Result<(), GameError> {
        self.binding.bind(player)
    }

    fn choose_card_to_play(&mut self, view: &GameStateView) -> Card {
        let menu = format!(
            "{}\nType one of the following options:\n\
             1: Show full piles\n\
             2: Show your hand\n\
             3: Show cards already played this turn\n\
             4: Choose card to play\n\
             (or 'q' to quit)",
            pile_summary(view)
        );
        println!("\n=== {}'s turn ===", self.name);
        println!("{menu}");
        loop {
            match read_choice().as_str() {
                "1" => print!("{}", render_piles(view)),
                "2" => print!("{}", render_hand(view)),
                "3" => print!("{}", render_cards_played(view)),
                "4" => {
                    println!("Enter the card number to play, or 0 to return:");
                    print!("{}", render_hand(view));
                    loop {
                        let input = read_choice();
                        let Ok(number) = input.parse::<u16>() else {
                            println!("Invalid input: '{input}'. Please enter a number.");
                            continue;
                        };
                        if number == 0 {
                            println!("{menu}");
                            break;
                        }
                        if let Some(card) =
                            view.hand.iter().find(|card| card.number() == number)
                        {
                            println!("You play {card}.");
                            return *card;
                        }
                        println!("Card {number} is not in your hand. Please try again.");
                    }
                }
                input if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") => {
                    println!("Exiting game at user's request.");
                    std::process::exit(0);
                }
                _ => println!("Invalid option. Please try again."),
            }
        }
    }

    fn choose_pile_to_replace(&mut self, view: &GameStateView) -> usize {
        let back = view.total_piles + 1;
        let menu = "Your card cannot be played; you must replace a pile.\n\
             Type one of the following options:\n\
             1: Show piles\n\
             2: Show your hand\n\
             3: Show cards already played this turn\n\
             4: Choose pile to replace\n\
             (or 'q' to quit)";
        println!("\n=== {} must replace a pile ===", self.name);
        println!("{menu}");
        loop {
            match read_choice().as_str() {
                "1" => print!("{}", render_piles(view)),
                "2" => print!("{}", render_hand(view)),
                "3" => print!("{}", render_cards_played(view)),
                "4" => {
                    println!(
                        "Enter the pile number to replace (1-{}) or {back} to return:",
                        view.total_piles
                    );
                    loop {
                        let input = read_choice();
                        let Ok(number) = input.parse::<usize>() else {
                            println!("Invalid input: '{input}'. Please enter a number.");
                            continue;
                        };
                        if number == back {
                            println!("{menu}");
                            break;
                        }
                        if (1..=view.total_piles).contains(&number) {
                            return number - 1;
                        }
                        println!("Invalid pile number. Please try again.");
                    }
                }
                input if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") => {
                    println!("Exiting game at user's request.");
                    std::process::exit(0);
                }
                _ => println!("Invalid option. Please try again."),
            }
        }
    }
}
