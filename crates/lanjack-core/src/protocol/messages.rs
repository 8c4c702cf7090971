//! All Lanjack protocol message types.
//!
//! Four fixed-size layouts, all big-endian:
//!
//! | Message      | Layout                                               | Size |
//! |--------------|------------------------------------------------------|------|
//! | Offer        | cookie:u32, type:u8(=0x2), tcp_port:u16, team:32B    | 39   |
//! | Join Request | cookie:u32, type:u8(=0x3), num_rounds:u8, team:32B   | 38   |
//! | Game Event   | cookie:u32, type:u8(=0x4), result:u8, card:3B        | 9    |
//! | Decision     | cookie:u32, type:u8(=0x4), reserved:u8, payload:5B   | 11   |
//!
//! The Decision payload is the ASCII literal `"Hittt"` or `"Stand"`.

use crate::game::card::Card;
use serde::{Deserialize, Serialize};

// ── Protocol constants ────────────────────────────────────────────────────────

/// 4-byte sentinel opening every message on the wire.  A message that does
/// not start with this value belongs to someone else's protocol.
pub const MAGIC_COOKIE: u32 = 0xABCD_DCBA;

/// Well-known UDP port offers are broadcast on.
pub const DISCOVERY_PORT: u16 = 13122;

/// Fixed width of the null-padded team name field.
pub const TEAM_NAME_LEN: usize = 32;

/// Total size of an Offer datagram.
pub const OFFER_LEN: usize = 39;

/// Total size of a Join Request message.
pub const JOIN_REQUEST_LEN: usize = 38;

/// Total size of a Game Event frame.
pub const GAME_EVENT_LEN: usize = 9;

/// Total size of a Decision message.
pub const DECISION_LEN: usize = 11;

/// Width of the ASCII decision payload.
pub const DECISION_PAYLOAD_LEN: usize = 5;

// ── Message type codes ────────────────────────────────────────────────────────

/// Message type byte following the cookie.  Game events and decisions share
/// `0x4`; they travel in opposite directions and differ in length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum MessageType {
    Offer = 0x2,
    JoinRequest = 0x3,
    Game = 0x4,
}

impl TryFrom<u8> for MessageType {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x2 => Ok(MessageType::Offer),
            0x3 => Ok(MessageType::JoinRequest),
            0x4 => Ok(MessageType::Game),
            _ => Err(()),
        }
    }
}

// ── Round outcome codes ───────────────────────────────────────────────────────

/// Result byte carried by every Game Event.  `Continue` accompanies a dealt
/// card; the other three resolve the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum RoundOutcome {
    Continue = 0x0,
    Tie = 0x1,
    Loss = 0x2,
    Win = 0x3,
}

impl TryFrom<u8> for RoundOutcome {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x0 => Ok(RoundOutcome::Continue),
            0x1 => Ok(RoundOutcome::Tie),
            0x2 => Ok(RoundOutcome::Loss),
            0x3 => Ok(RoundOutcome::Win),
            _ => Err(()),
        }
    }
}

impl RoundOutcome {
    /// Whether this outcome ends the round.
    pub fn is_final(self) -> bool {
        self != RoundOutcome::Continue
    }
}

// ── Player decision ───────────────────────────────────────────────────────────

/// The 5-byte ASCII payload sent for a hit.
pub const HIT_PAYLOAD: &[u8; DECISION_PAYLOAD_LEN] = b"Hittt";

/// The 5-byte ASCII payload sent for a stand.
pub const STAND_PAYLOAD: &[u8; DECISION_PAYLOAD_LEN] = b"Stand";

/// A player's choice at a decision point.  On the wire, anything other than
/// the exact hit payload is treated as a stand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Hit,
    Stand,
}

impl Decision {
    /// The ASCII payload bytes for this decision.
    pub fn payload(self) -> &'static [u8; DECISION_PAYLOAD_LEN] {
        match self {
            Decision::Hit => HIT_PAYLOAD,
            Decision::Stand => STAND_PAYLOAD,
        }
    }

    /// Interprets a raw payload.  Only the exact hit literal hits; every
    /// other byte pattern stands.
    pub fn from_payload(payload: &[u8]) -> Decision {
        if payload == HIT_PAYLOAD {
            Decision::Hit
        } else {
            Decision::Stand
        }
    }
}

// ── Per-message structs ───────────────────────────────────────────────────────

/// OFFER (0x2): UDP broadcast advertising the server's game TCP port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferMessage {
    /// TCP port the server accepts game connections on.
    pub tcp_port: u16,
    /// Server team name, at most [`TEAM_NAME_LEN`] bytes on the wire.
    pub team_name: String,
}

/// JOIN REQUEST (0x3): first message on a new TCP connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRequestMessage {
    /// How many rounds the client wants to play on this connection.
    pub num_rounds: u8,
    /// Client team name, at most [`TEAM_NAME_LEN`] bytes on the wire.
    pub team_name: String,
}

/// GAME EVENT (0x4, server to client): a dealt card, a result, or both.
///
/// A card rank of zero on the wire means "no card, just result" — used for
/// the cardless final resolution event.  That is represented here as
/// `card: None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEventMessage {
    pub outcome: RoundOutcome,
    pub card: Option<Card>,
}

impl GameEventMessage {
    /// A card dealt mid-round.
    pub fn card(card: Card, outcome: RoundOutcome) -> Self {
        Self {
            outcome,
            card: Some(card),
        }
    }

    /// A cardless resolution event.
    pub fn result(outcome: RoundOutcome) -> Self {
        Self {
            outcome,
            card: None,
        }
    }
}

/// DECISION (0x4, client to server): the player's hit/stand choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionMessage {
    pub decision: Decision,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
