//! Draw-source abstraction.
//!
//! The table deals from an unbounded random source rather than a finite
//! deck.  Injecting the source into the round engine lets tests script the
//! exact card sequence and assert the resulting event stream, the same way
//! the platform adapters elsewhere in this workspace ship mock
//! implementations alongside the real ones.

use crate::game::card::Card;
use rand::Rng;
use std::collections::VecDeque;

/// Something that produces the next card.
pub trait DrawSource {
    fn draw(&mut self) -> Card;
}

/// Production draw source backed by a [`rand::Rng`].
#[derive(Debug)]
pub struct RngDraw<R: Rng> {
    rng: R,
}

impl<R: Rng> RngDraw<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngDraw<rand::rngs::StdRng> {
    /// Entropy-seeded draw source.  `StdRng` is `Send`, so one of these can
    /// live inside a per-connection task.
    pub fn from_entropy() -> Self {
        use rand::SeedableRng;
        Self::new(rand::rngs::StdRng::from_entropy())
    }
}

impl<R: Rng> DrawSource for RngDraw<R> {
    fn draw(&mut self) -> Card {
        Card {
            rank: self.rng.gen_range(1..=13),
            suit: self.rng.gen_range(0..=3),
        }
    }
}

/// Deterministic draw source serving a fixed queue of cards.
///
/// Panics when the script runs dry; tests must script every draw the
/// scenario needs.
#[derive(Debug, Default)]
pub struct ScriptedDraw {
    cards: VecDeque<Card>,
}

impl ScriptedDraw {
    /// Builds a script from `(rank, suit)` pairs, served in order.
    pub fn from_pairs(pairs: &[(u8, u8)]) -> Self {
        Self {
            cards: pairs
                .iter()
                .map(|&(rank, suit)| Card { rank, suit })
                .collect(),
        }
    }

    /// Number of scripted cards not yet drawn.
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

impl DrawSource for ScriptedDraw {
    fn draw(&mut self) -> Card {
        self.cards
            .pop_front()
            .unwrap_or_else(|| panic!("scripted draw source exhausted"))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
