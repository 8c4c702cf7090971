//! Console collaborators: stdin prompts and stdout table display.

use std::io::{self, BufRead, Write};

use lanjack_core::{Card, Decision, RoundOutcome};

use crate::table::{CardLabel, DecisionProvider, TableObserver};

/// Prompts on stdin for hit/stand choices.
///
/// Any answer other than `h` is a stand, as is a closed stdin.
#[derive(Debug, Default)]
pub struct ConsolePrompt;

impl DecisionProvider for ConsolePrompt {
    fn next_decision(&mut self) -> Decision {
        print!("Hit or Stand? (h/s): ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) if line.trim().eq_ignore_ascii_case("h") => Decision::Hit,
            _ => Decision::Stand,
        }
    }
}

/// Prints the table state to stdout as the round unfolds.
#[derive(Debug, Default)]
pub struct ConsoleTable;

impl ConsoleTable {
    fn label_text(label: CardLabel) -> &'static str {
        match label {
            CardLabel::YourCard => "Your Card",
            CardLabel::DealerVisibleCard => "Dealer's Visible Card",
            CardLabel::YourNewCard => "Your New Card",
            CardLabel::DealerCard => "Dealer's Card",
        }
    }

    fn outcome_text(outcome: RoundOutcome) -> &'static str {
        match outcome {
            RoundOutcome::Win => "WIN",
            RoundOutcome::Loss => "LOSS",
            RoundOutcome::Tie => "TIE",
            RoundOutcome::Continue => "UNKNOWN",
        }
    }
}

impl TableObserver for ConsoleTable {
    fn round_started(&mut self, round_no: u8, _total_rounds: u8) {
        println!("\n--- Round {round_no} ---");
    }

    fn card_dealt(&mut self, label: CardLabel, card: Card) {
        println!(
            "{}: Rank {}, Suit {}",
            Self::label_text(label),
            card.rank,
            card.suit
        );
    }

    fn round_finished(&mut self, outcome: RoundOutcome) {
        println!("Result: {}", Self::outcome_text(outcome));
    }

    fn game_finished(&mut self, wins: u32, rounds: u8) {
        let rate = if rounds == 0 {
            0.0
        } else {
            f64::from(wins) / f64::from(rounds) * 100.0
        };
        println!("\nFinished playing {rounds} rounds, win rate: {rate:.1}%");
    }
}

/// Asks how many rounds to play, re-prompting until the answer parses.
///
/// # Errors
///
/// Returns an error if stdin fails or closes before a usable answer
/// arrives; a closed stdin would otherwise re-prompt forever.
pub fn prompt_round_count() -> io::Result<u8> {
    read_round_count(&mut io::stdin().lock())
}

fn read_round_count(input: &mut impl BufRead) -> io::Result<u8> {
    loop {
        print!("How many rounds would you like to play? ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before a round count was given",
            ));
        }
        if let Ok(n) = line.trim().parse::<u8>() {
            if n > 0 {
                return Ok(n);
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_labels_render_as_table_text() {
        assert_eq!(ConsoleTable::label_text(CardLabel::YourCard), "Your Card");
        assert_eq!(
            ConsoleTable::label_text(CardLabel::DealerVisibleCard),
            "Dealer's Visible Card"
        );
        assert_eq!(
            ConsoleTable::label_text(CardLabel::YourNewCard),
            "Your New Card"
        );
        assert_eq!(
            ConsoleTable::label_text(CardLabel::DealerCard),
            "Dealer's Card"
        );
    }

    #[test]
    fn test_final_outcomes_render_upper_case() {
        assert_eq!(ConsoleTable::outcome_text(RoundOutcome::Win), "WIN");
        assert_eq!(ConsoleTable::outcome_text(RoundOutcome::Loss), "LOSS");
        assert_eq!(ConsoleTable::outcome_text(RoundOutcome::Tie), "TIE");
    }

    #[test]
    fn test_round_count_reprompts_past_unparsable_and_zero_answers() {
        let mut input = io::Cursor::new("abc\n0\n300\n5\n");
        assert_eq!(read_round_count(&mut input).unwrap(), 5);
    }

    #[test]
    fn test_round_count_errors_on_closed_input_instead_of_looping() {
        let mut input = io::Cursor::new("");
        let err = read_round_count(&mut input).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_round_count_errors_on_closed_input_after_invalid_answers() {
        let mut input = io::Cursor::new("nope\n-3\n");
        let err = read_round_count(&mut input).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
