//! # lanjack-core
//!
//! Shared library for Lanjack, a LAN blackjack table: the binary wire
//! protocol, stream frame reassembly, and the card domain used by both the
//! server (dealer) and the client (player).
//!
//! This crate has zero dependencies on sockets or console I/O.  It defines:
//!
//! - **`protocol`** – How bytes travel over the network.  Four fixed-layout
//!   big-endian messages: the UDP discovery offer, the join request, the
//!   card/result game event, and the hit/stand decision.  Every message
//!   begins with the magic cookie `0xabcddcba`; anything failing that check
//!   is foreign traffic to be discarded, not a protocol error.
//!
//! - **`game`** – Pure card domain: ranks, suits, hand totals under the
//!   table's fixed valuation (ace is always 11, face cards are 10), and the
//!   [`game::DrawSource`] seam that lets tests script every draw.

pub mod game;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `lanjack_core::Card` instead of `lanjack_core::game::card::Card`.
pub use game::card::{Card, Hand};
pub use game::draw::{DrawSource, RngDraw, ScriptedDraw};
pub use protocol::codec::ProtocolError;
pub use protocol::frame::FrameReader;
pub use protocol::messages::{
    Decision, DecisionMessage, GameEventMessage, JoinRequestMessage, MessageType, OfferMessage,
    RoundOutcome, DISCOVERY_PORT, MAGIC_COOKIE,
};
