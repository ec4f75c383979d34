//! Line-based terminal round.
//!
//! Forwards typed intents to the engine and prints its snapshots. Holds no
//! game state of its own.

use std::io::Write;

use anyhow::Result;
use fooqawhi_quest::{GameEngine, GameState, GameStatus, GuessError, feedback_for};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, instrument};

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Hint,
    Status,
    Map,
    Reset,
    Help,
    Quit,
    Guess { location: String, country: String },
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    match line.to_lowercase().as_str() {
        "hint" | "h" => Input::Hint,
        "status" | "s" => Input::Status,
        "map" | "m" => Input::Map,
        "reset" | "new" => Input::Reset,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        _ => match line.rsplit_once(',') {
            Some((location, country)) => Input::Guess {
                location: location.to_string(),
                country: country.to_string(),
            },
            None => Input::Unknown(line.to_string()),
        },
    }
}

const HELP: &str = "\
Commands:
  <location>, <country>   make a guess, e.g. \"Matera, Italy\"
  hint                    reveal the next hint
  status                  show hints, guesses and time
  map                     show map center and zoom
  reset                   start a new round
  quit                    leave";

/// Runs rounds until the player quits or stdin closes.
#[instrument(skip(engine))]
pub async fn run(engine: GameEngine) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Where the Fooqawhi? Type `help` for commands.\n");
    print_hint(&engine.status());

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            debug!("stdin closed");
            break;
        };

        match parse_input(&line) {
            Input::Hint => match engine.reveal_next_hint() {
                Ok(_) => print_hint(&engine.status()),
                Err(e) => println!("{e}"),
            },
            Input::Status => print_status(&engine.status()),
            Input::Map => {
                let view = engine.map_view();
                println!(
                    "Map centered on ({:.4}, {:.4}) at zoom {}",
                    view.center().latitude,
                    view.center().longitude,
                    view.zoom()
                );
                if let Some(guess) = view.last_guess() {
                    println!("Your last guess: ({:.4}, {:.4})", guess.latitude, guess.longitude);
                }
            }
            Input::Reset => {
                let status = engine.reset()?;
                println!("A new hunt begins.\n");
                print_hint(&status);
            }
            Input::Help => println!("{HELP}"),
            Input::Quit => break,
            Input::Guess { location, country } => {
                match engine.submit_guess(&location, &country).await {
                    Ok(record) => {
                        println!("{}", feedback_for(&record));
                        let status = engine.status();
                        print_outcome(&status);
                    }
                    Err(GuessError::Validation(message)) => println!("{message}"),
                    Err(e) => println!("{e}"),
                }
            }
            Input::Unknown(text) if text.is_empty() => {}
            Input::Unknown(text) => {
                println!("Didn't understand \"{text}\". Guesses look like \"Matera, Italy\".")
            }
        }
    }

    Ok(())
}

fn print_hint(status: &GameStatus) {
    if let Some(hint) = status.current_hint() {
        println!(
            "Hint {} of {}: {}",
            hint.number(),
            status.total_hints(),
            hint.text()
        );
        if *hint.is_last() {
            println!("(That was the last hint.)");
        }
    }
}

fn print_status(status: &GameStatus) {
    println!(
        "Hints used: {} of {}\nGuesses made: {} of {}\nTime: {}\nState: {}",
        status.hints_revealed(),
        status.total_hints(),
        status.guesses_made(),
        status.max_guesses(),
        status.elapsed(),
        status.state()
    );
    for achievement in status.achievements() {
        println!(
            "{} {} - {}",
            achievement.icon(),
            achievement.title(),
            achievement.description()
        );
    }
}

fn print_outcome(status: &GameStatus) {
    let place = status.target_place();
    match status.state() {
        GameState::Won => {
            println!(
                "The Fooqawhi were in {}, {}: {}",
                place.name(),
                place.country(),
                place.feature()
            );
            print_status(status);
        }
        GameState::Lost => {
            println!(
                "Out of guesses. The Fooqawhi were hiding in {}, {}.",
                place.name(),
                place.country()
            );
            print_status(status);
        }
        GameState::Playing => {
            println!("{} guesses left.", status.guesses_remaining());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_case_insensitive() {
        assert_eq!(parse_input("HINT"), Input::Hint);
        assert_eq!(parse_input("  quit "), Input::Quit);
    }

    #[test]
    fn test_guess_splits_on_last_comma() {
        assert_eq!(
            parse_input("Washington, D.C., USA"),
            Input::Guess {
                location: "Washington, D.C.".to_string(),
                country: " USA".to_string(),
            }
        );
    }

    #[test]
    fn test_text_without_comma_is_unknown() {
        assert_eq!(parse_input("Matera"), Input::Unknown("Matera".to_string()));
    }
}
