//! The round client: consumes the Game Event stream and plays rounds.
//!
//! The server's events arrive as a byte stream that may be split or merged
//! arbitrarily by the transport, so everything goes through the core
//! [`FrameReader`] first.  On top of that, [`RoundView`] reconstructs the
//! visible state of one round — whose card was that, is a decision due,
//! did the round just end — without touching a socket, which is what the
//! unit tests drive directly.
//!
//! The console is kept at arm's length behind the [`DecisionProvider`] and
//! [`TableObserver`] collaborator traits.

use std::io::{Read, Write};

use lanjack_core::{
    protocol::codec::{encode_decision, encode_join_request},
    Card, Decision, DecisionMessage, FrameReader, GameEventMessage, JoinRequestMessage,
    RoundOutcome,
};
use tracing::debug;

/// Display role of a dealt card, derived from its position in the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardLabel {
    /// One of the player's two opening cards.
    YourCard,
    /// The dealer's third-dealt, face-up card.
    DealerVisibleCard,
    /// A card the player drew by hitting.
    YourNewCard,
    /// A dealer card revealed or drawn after the player stood.
    DealerCard,
}

/// Supplies the player's hit/stand choice at each decision point.
pub trait DecisionProvider {
    fn next_decision(&mut self) -> Decision;
}

/// Receives display notifications: cards, results, the final tally.
pub trait TableObserver {
    fn round_started(&mut self, round_no: u8, total_rounds: u8);
    fn card_dealt(&mut self, label: CardLabel, card: Card);
    fn round_finished(&mut self, outcome: RoundOutcome);
    fn game_finished(&mut self, wins: u32, rounds: u8);
}

/// What one observed event means for the caller.
#[derive(Debug, PartialEq, Eq)]
pub struct Observation {
    /// A card to display, if the event carried one.
    pub card: Option<(CardLabel, Card)>,
    /// Whether the protocol now expects a decision from the player.
    pub wants_decision: bool,
    /// The round's outcome, if this event resolved it.
    pub finished: Option<RoundOutcome>,
}

/// Client-side view of one round in progress.
#[derive(Debug, Default)]
pub struct RoundView {
    cards_seen: u8,
    player_done: bool,
    finished: Option<RoundOutcome>,
}

impl RoundView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one Game Event into the view.
    ///
    /// Card labels follow position: the first two cards are the player's
    /// opening hand, the third is the dealer's visible card, later cards
    /// are player draws until the stand, then dealer cards.  A nonzero
    /// result code finishes the round; after that nothing more is expected.
    pub fn observe(&mut self, event: &GameEventMessage) -> Observation {
        let card = event.card.map(|card| {
            self.cards_seen += 1;
            let label = if self.cards_seen <= 2 {
                CardLabel::YourCard
            } else if self.cards_seen == 3 {
                CardLabel::DealerVisibleCard
            } else if !self.player_done {
                CardLabel::YourNewCard
            } else {
                CardLabel::DealerCard
            };
            (label, card)
        });

        if event.outcome.is_final() {
            self.finished = Some(event.outcome);
            return Observation {
                card,
                wants_decision: false,
                finished: self.finished,
            };
        }

        // A decision is due once the initial three cards are on the table,
        // until the player stands.
        let wants_decision = self.cards_seen >= 3 && !self.player_done;
        Observation {
            card,
            wants_decision,
            finished: None,
        }
    }

    /// Marks that a stand was sent; no further decisions this round.
    pub fn record_stand(&mut self) {
        self.player_done = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }
}

/// Aggregate result of a finished game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameReport {
    pub wins: u32,
    pub rounds: u8,
}

impl GameReport {
    /// Win percentage over the requested round count.
    pub fn win_rate(&self) -> f64 {
        if self.rounds == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.rounds) * 100.0
        }
    }
}

/// Plays one full game session over an established connection.
///
/// Sends the join request, then plays `num_rounds` rounds: events are
/// reassembled from whatever read sizes the transport produces, cards and
/// results go to the `observer`, and each decision point consults the
/// `provider`.  A server close mid-game ends the session early; the tally
/// still reports over the requested round count.
///
/// # Errors
///
/// Returns the underlying I/O error if a read or write fails.
pub fn play_game<S, P, O>(
    stream: &mut S,
    num_rounds: u8,
    team_name: &str,
    provider: &mut P,
    observer: &mut O,
) -> std::io::Result<GameReport>
where
    S: Read + Write,
    P: DecisionProvider,
    O: TableObserver,
{
    stream.write_all(&encode_join_request(&JoinRequestMessage {
        num_rounds,
        team_name: team_name.to_string(),
    }))?;

    // The reader outlives rounds: bytes of the next round may arrive
    // coalesced with the tail of this one.
    let mut reader = FrameReader::new();
    let mut wins = 0u32;

    'rounds: for round_no in 1..=num_rounds {
        observer.round_started(round_no, num_rounds);
        let mut view = RoundView::new();

        loop {
            while let Some(event) = reader.next_event() {
                let observation = view.observe(&event);

                if let Some((label, card)) = observation.card {
                    observer.card_dealt(label, card);
                }

                if let Some(outcome) = observation.finished {
                    if outcome == RoundOutcome::Win {
                        wins += 1;
                    }
                    observer.round_finished(outcome);
                    // Stop processing further events for this round; any
                    // buffered bytes belong to the next one.
                    continue 'rounds;
                }

                if observation.wants_decision {
                    let decision = provider.next_decision();
                    stream.write_all(&encode_decision(&DecisionMessage { decision }))?;
                    if decision == Decision::Stand {
                        view.record_stand();
                    }
                }
            }

            let mut chunk = [0u8; 1024];
            let n = stream.read(&mut chunk)?;
            if n == 0 {
                debug!("server closed the connection mid-game");
                break 'rounds;
            }
            reader.extend(&chunk[..n]);
        }
    }

    let report = GameReport {
        wins,
        rounds: num_rounds,
    };
    observer.game_finished(report.wins, report.rounds);
    Ok(report)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
