//! Cards and hands under the table's fixed valuation.

use serde::{Deserialize, Serialize};

/// A playing card: rank 1–13 (1 = Ace), suit 0–3.  Value semantics only;
/// created by a draw and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub rank: u8,
    pub suit: u8,
}

impl Card {
    /// Counting value of this card.  An ace is always 11 — this table does
    /// not re-evaluate soft aces on bust — and face cards cap at 10.
    pub fn value(self) -> u8 {
        match self.rank {
            1 => 11,
            rank => rank.min(10),
        }
    }
}

/// An ordered, append-only sequence of cards belonging to one side.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a dealt card.
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Sum of card values, recomputed from scratch.
    pub fn total(&self) -> u32 {
        self.cards.iter().map(|c| u32::from(c.value())).sum()
    }

    /// A total over 21 busts the hand.
    pub fn is_bust(&self) -> bool {
        self.total() > 21
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
