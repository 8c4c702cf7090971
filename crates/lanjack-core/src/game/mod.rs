//! Pure card domain: ranks, suits, hand totals, and the draw-source seam.

pub mod card;
pub mod draw;

pub use card::{Card, Hand};
pub use draw::{DrawSource, RngDraw, ScriptedDraw};
