//! The round engine: one blackjack round as a sans-I/O state machine.
//!
//! The engine never touches a socket.  Each operation returns the Game
//! Events it wants on the wire; the session loop in
//! [`crate::net::session`] sends them and feeds decisions back in.  Given a
//! fixed draw sequence, the emitted events and the final outcome are fully
//! deterministic, which is what makes the scenario tests below possible.
//!
//! States: `Dealing → PlayerTurn → DealerTurn → Resolved`.  A bust skips
//! the dealer turn entirely.

use lanjack_core::{Card, Decision, DrawSource, GameEventMessage, Hand, RoundOutcome};
use tracing::debug;

/// Where a round currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    Dealing,
    PlayerTurn,
    DealerTurn,
    Resolved,
}

/// One round of play: both hands, the withheld hole card, and the state.
/// Created fresh per round and discarded at resolution.
#[derive(Debug)]
pub struct Round {
    player: Hand,
    dealer: Hand,
    hole_card: Card,
    state: RoundState,
    outcome: Option<RoundOutcome>,
}

impl Round {
    /// Deals the opening hands: two player cards, two dealer cards.
    ///
    /// Returns the round in `PlayerTurn` together with the three initial
    /// events — player card 1, player card 2, dealer visible card.  The
    /// dealer's second card is drawn now but withheld until the dealer turn.
    pub fn deal(draw: &mut impl DrawSource) -> (Self, Vec<GameEventMessage>) {
        let p1 = draw.draw();
        let p2 = draw.draw();
        let d1 = draw.draw();
        let d2 = draw.draw();

        let mut player = Hand::new();
        player.push(p1);
        player.push(p2);
        let mut dealer = Hand::new();
        dealer.push(d1);
        dealer.push(d2);

        let events = vec![
            GameEventMessage::card(p1, RoundOutcome::Continue),
            GameEventMessage::card(p2, RoundOutcome::Continue),
            GameEventMessage::card(d1, RoundOutcome::Continue),
        ];

        let round = Self {
            player,
            dealer,
            hole_card: d2,
            state: RoundState::PlayerTurn,
            outcome: None,
        };
        (round, events)
    }

    /// Applies a player decision and returns the events it produced.
    ///
    /// `Hit` draws one card: a bust emits that card with `Loss` and
    /// resolves the round; otherwise the card goes out with `Continue` and
    /// the player may decide again.  `Stand` runs the entire dealer turn:
    /// the hole card is revealed, the dealer draws while under 17, and the
    /// final cardless event carries the outcome.  A player total over 21
    /// skips the dealer turn: the stand resolves straight to a loss.
    ///
    /// Calling this on a resolved round produces nothing.
    pub fn apply_decision(
        &mut self,
        decision: Decision,
        draw: &mut impl DrawSource,
    ) -> Vec<GameEventMessage> {
        if self.state != RoundState::PlayerTurn {
            debug!(?decision, state = ?self.state, "decision ignored outside player turn");
            return Vec::new();
        }

        match decision {
            Decision::Hit => self.player_hit(draw),
            Decision::Stand => self.dealer_turn(draw),
        }
    }

    fn player_hit(&mut self, draw: &mut impl DrawSource) -> Vec<GameEventMessage> {
        let card = draw.draw();
        self.player.push(card);

        if self.player.is_bust() {
            self.resolve(RoundOutcome::Loss);
            vec![GameEventMessage::card(card, RoundOutcome::Loss)]
        } else {
            vec![GameEventMessage::card(card, RoundOutcome::Continue)]
        }
    }

    fn dealer_turn(&mut self, draw: &mut impl DrawSource) -> Vec<GameEventMessage> {
        // A hand already over 21 never reaches the dealer.  The opening deal
        // can bust outright (a pair of aces is 22); standing on it is an
        // immediate loss with no hole reveal and no dealer draws.
        if self.player.is_bust() {
            self.resolve(RoundOutcome::Loss);
            return vec![GameEventMessage::result(RoundOutcome::Loss)];
        }

        self.state = RoundState::DealerTurn;

        // Reveal the withheld hole card first.
        let mut events = vec![GameEventMessage::card(self.hole_card, RoundOutcome::Continue)];

        // Dealer draws while strictly under 17.
        while self.dealer.total() < 17 {
            let card = draw.draw();
            self.dealer.push(card);
            events.push(GameEventMessage::card(card, RoundOutcome::Continue));
        }

        let player = self.player.total();
        let dealer = self.dealer.total();
        let outcome = if dealer > 21 {
            RoundOutcome::Win
        } else if player > dealer {
            RoundOutcome::Win
        } else if dealer > player {
            RoundOutcome::Loss
        } else {
            RoundOutcome::Tie
        };

        self.resolve(outcome);
        events.push(GameEventMessage::result(outcome));
        events
    }

    fn resolve(&mut self, outcome: RoundOutcome) {
        self.state = RoundState::Resolved;
        self.outcome = Some(outcome);
        debug!(?outcome, player = self.player.total(), dealer = self.dealer.total(), "round resolved");
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_resolved(&self) -> bool {
        self.state == RoundState::Resolved
    }

    /// The final outcome, once resolved.
    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    pub fn player_total(&self) -> u32 {
        self.player.total()
    }

    pub fn dealer_total(&self) -> u32 {
        self.dealer.total()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use lanjack_core::ScriptedDraw;

    fn card(rank: u8) -> Card {
        Card { rank, suit: 0 }
    }

    #[test]
    fn test_deal_emits_both_player_cards_and_dealer_visible_only() {
        // Draw order: player 1, player 2, dealer visible, dealer hole.
        let mut draw = ScriptedDraw::from_pairs(&[(5, 0), (7, 0), (9, 0), (6, 0)]);

        let (round, events) = Round::deal(&mut draw);

        assert_eq!(
            events,
            vec![
                GameEventMessage::card(card(5), RoundOutcome::Continue),
                GameEventMessage::card(card(7), RoundOutcome::Continue),
                GameEventMessage::card(card(9), RoundOutcome::Continue),
            ]
        );
        assert_eq!(round.state(), RoundState::PlayerTurn);
        assert_eq!(round.player_total(), 12);
        // Hole card already counts toward the dealer total even though it
        // has not been sent.
        assert_eq!(round.dealer_total(), 15);
    }

    #[test]
    fn test_stand_on_twelve_loses_to_dealer_nineteen() {
        // Scenario: player (5,7) = 12 stands; dealer shows 9 with hole 4,
        // draws a 6 to reach 19 and wins.
        let mut draw = ScriptedDraw::from_pairs(&[(5, 0), (7, 0), (9, 0), (4, 0), (6, 0)]);
        let (mut round, _) = Round::deal(&mut draw);

        let events = round.apply_decision(Decision::Stand, &mut draw);

        assert_eq!(
            events,
            vec![
                GameEventMessage::card(card(4), RoundOutcome::Continue), // hole card reveal
                GameEventMessage::card(card(6), RoundOutcome::Continue), // draw to 19
                GameEventMessage::result(RoundOutcome::Loss),
            ]
        );
        assert_eq!(round.outcome(), Some(RoundOutcome::Loss));
        assert_eq!(round.dealer_total(), 19);
    }

    #[test]
    fn test_player_bust_emits_loss_with_the_busting_card_and_skips_dealer() {
        // Player (10, 9) = 19, hits a 3 to bust at 22.
        let mut draw = ScriptedDraw::from_pairs(&[(10, 0), (9, 0), (2, 0), (2, 0), (3, 1)]);
        let (mut round, _) = Round::deal(&mut draw);

        let events = round.apply_decision(Decision::Hit, &mut draw);

        assert_eq!(
            events,
            vec![GameEventMessage::card(Card { rank: 3, suit: 1 }, RoundOutcome::Loss)]
        );
        assert!(round.is_resolved());
        assert_eq!(round.outcome(), Some(RoundOutcome::Loss));
        // No dealer draws happened: the script is fully consumed.
        assert_eq!(draw.remaining(), 0);
    }

    #[test]
    fn test_dealer_stops_at_exactly_seventeen() {
        // Dealer shows 10 with hole 7 = exactly 17: no draws at all.
        let mut draw = ScriptedDraw::from_pairs(&[(9, 0), (9, 0), (10, 0), (7, 0)]);
        let (mut round, _) = Round::deal(&mut draw);

        let events = round.apply_decision(Decision::Stand, &mut draw);

        // Reveal plus final result only; the script held no extra cards, so
        // any draw would have panicked.
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], GameEventMessage::card(card(7), RoundOutcome::Continue));
        assert_eq!(events[1], GameEventMessage::result(RoundOutcome::Win));
        assert_eq!(round.dealer_total(), 17);
        assert_eq!(round.player_total(), 18);
    }

    #[test]
    fn test_stand_never_draws_for_the_player() {
        let mut draw = ScriptedDraw::from_pairs(&[(5, 0), (6, 0), (10, 0), (9, 0)]);
        let (mut round, _) = Round::deal(&mut draw);
        let player_before = round.player_total();

        round.apply_decision(Decision::Stand, &mut draw);

        assert_eq!(round.player_total(), player_before);
    }

    #[test]
    fn test_standing_on_a_dealt_bust_loses_without_a_dealer_turn() {
        // A pair of aces busts the opening hand at 22; the dealer holds 20.
        // Standing must resolve to a loss with no hole reveal and no dealer
        // draws, never a 22-beats-20 win.
        let mut draw = ScriptedDraw::from_pairs(&[(1, 0), (1, 1), (10, 0), (10, 1)]);
        let (mut round, _) = Round::deal(&mut draw);
        assert_eq!(round.player_total(), 22);

        let events = round.apply_decision(Decision::Stand, &mut draw);

        assert_eq!(events, vec![GameEventMessage::result(RoundOutcome::Loss)]);
        assert_eq!(round.outcome(), Some(RoundOutcome::Loss));
        // The script held no extra cards, so any dealer draw would have
        // panicked; the hole card stays counted but unsent.
        assert_eq!(draw.remaining(), 0);
        assert_eq!(round.dealer_total(), 20);
    }

    #[test]
    fn test_hitting_a_dealt_bust_loses_with_the_drawn_card() {
        // Hitting an already-busted hand draws one more card and resolves
        // to a loss carrying it; the dealer still never plays.
        let mut draw = ScriptedDraw::from_pairs(&[(1, 0), (1, 1), (10, 0), (10, 1), (4, 2)]);
        let (mut round, _) = Round::deal(&mut draw);

        let events = round.apply_decision(Decision::Hit, &mut draw);

        assert_eq!(
            events,
            vec![GameEventMessage::card(Card { rank: 4, suit: 2 }, RoundOutcome::Loss)]
        );
        assert!(round.is_resolved());
        assert_eq!(round.outcome(), Some(RoundOutcome::Loss));
        assert_eq!(draw.remaining(), 0);
    }

    #[test]
    fn test_dealer_bust_is_a_player_win() {
        // Player stands on 20; dealer 10 + 6 = 16 draws a 9 and busts at 25.
        let mut draw = ScriptedDraw::from_pairs(&[(10, 0), (10, 1), (10, 2), (6, 0), (9, 0)]);
        let (mut round, _) = Round::deal(&mut draw);

        let events = round.apply_decision(Decision::Stand, &mut draw);

        assert_eq!(events.last(), Some(&GameEventMessage::result(RoundOutcome::Win)));
        assert_eq!(round.dealer_total(), 25);
    }

    #[test]
    fn test_equal_totals_tie() {
        // Player 19 vs dealer 10 + 9 = 19.
        let mut draw = ScriptedDraw::from_pairs(&[(10, 0), (9, 0), (10, 1), (9, 1)]);
        let (mut round, _) = Round::deal(&mut draw);

        let events = round.apply_decision(Decision::Stand, &mut draw);

        assert_eq!(events.last(), Some(&GameEventMessage::result(RoundOutcome::Tie)));
    }

    #[test]
    fn test_hit_under_twentyone_continues_the_player_turn() {
        // Player (5,7) = 12 hits a 2: still in the player turn at 14.
        let mut draw = ScriptedDraw::from_pairs(&[(5, 0), (7, 0), (9, 0), (6, 0), (2, 0)]);
        let (mut round, _) = Round::deal(&mut draw);

        let events = round.apply_decision(Decision::Hit, &mut draw);

        assert_eq!(events, vec![GameEventMessage::card(card(2), RoundOutcome::Continue)]);
        assert_eq!(round.state(), RoundState::PlayerTurn);
        assert_eq!(round.player_total(), 14);
    }

    #[test]
    fn test_decisions_after_resolution_produce_nothing() {
        let mut draw = ScriptedDraw::from_pairs(&[(10, 0), (9, 0), (10, 1), (8, 0)]);
        let (mut round, _) = Round::deal(&mut draw);
        round.apply_decision(Decision::Stand, &mut draw);
        assert!(round.is_resolved());

        assert!(round.apply_decision(Decision::Hit, &mut draw).is_empty());
        assert!(round.apply_decision(Decision::Stand, &mut draw).is_empty());
    }

    #[test]
    fn test_identical_scripts_produce_identical_event_streams() {
        let script = [(5, 0), (7, 1), (9, 2), (4, 3), (3, 0), (6, 1)];
        let play = || {
            let mut draw = ScriptedDraw::from_pairs(&script);
            let (mut round, mut events) = Round::deal(&mut draw);
            events.extend(round.apply_decision(Decision::Hit, &mut draw));
            events.extend(round.apply_decision(Decision::Stand, &mut draw));
            (events, round.outcome())
        };

        assert_eq!(play(), play());
    }
}
