//! Binary codec for encoding and decoding Lanjack protocol messages.
//!
//! All four layouts are fixed-size and big-endian; see
//! [`crate::protocol::messages`] for the byte tables.  Encoding is
//! infallible.  Decoding validates, in order: length, cookie, type byte.
//! A [`ProtocolError::CookieMismatch`] (and, for datagrams, a
//! [`ProtocolError::TooShort`]) marks foreign traffic — callers discard the
//! message and keep going rather than treating it as a session error.

use crate::game::card::Card;
use crate::protocol::messages::{
    Decision, DecisionMessage, GameEventMessage, JoinRequestMessage, MessageType, OfferMessage,
    RoundOutcome, DECISION_LEN, DECISION_PAYLOAD_LEN, GAME_EVENT_LEN, JOIN_REQUEST_LEN,
    MAGIC_COOKIE, OFFER_LEN, TEAM_NAME_LEN,
};
use thiserror::Error;

/// Errors that can occur while decoding a message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// The byte slice is shorter than the message's fixed layout.
    #[error("message too short: need {needed} bytes, got {available}")]
    TooShort { needed: usize, available: usize },

    /// The leading 4 bytes are not the magic cookie.  Foreign traffic;
    /// discard and continue.
    #[error("magic cookie mismatch: got 0x{0:08x}")]
    CookieMismatch(u32),

    /// The type byte is not the one this layout carries.
    #[error("unexpected message type: expected 0x{expected:x}, got 0x{actual:x}")]
    UnexpectedType { expected: u8, actual: u8 },

    /// A field holds a value outside its defined range.
    #[error("bad value {value:#04x} for field {field}")]
    BadValue { field: &'static str, value: u8 },
}

impl ProtocolError {
    /// Whether this error marks a message to be silently dropped (noise on a
    /// shared port) rather than a peer misbehaving.
    pub fn is_discard(&self) -> bool {
        !matches!(self, ProtocolError::UnexpectedType { .. })
    }
}

// ── Encoding ──────────────────────────────────────────────────────────────────

/// Encodes an Offer into its 39-byte datagram.
pub fn encode_offer(msg: &OfferMessage) -> Vec<u8> {
    let mut buf = Vec::with_capacity(OFFER_LEN);
    buf.extend_from_slice(&MAGIC_COOKIE.to_be_bytes());
    buf.push(MessageType::Offer as u8);
    buf.extend_from_slice(&msg.tcp_port.to_be_bytes());
    write_team_name(&mut buf, &msg.team_name);
    buf
}

/// Encodes a Join Request into its 38-byte frame.
pub fn encode_join_request(msg: &JoinRequestMessage) -> Vec<u8> {
    let mut buf = Vec::with_capacity(JOIN_REQUEST_LEN);
    buf.extend_from_slice(&MAGIC_COOKIE.to_be_bytes());
    buf.push(MessageType::JoinRequest as u8);
    buf.push(msg.num_rounds);
    write_team_name(&mut buf, &msg.team_name);
    buf
}

/// Encodes a Game Event into its 9-byte frame.  A `None` card is sent as
/// rank zero.
pub fn encode_game_event(msg: &GameEventMessage) -> Vec<u8> {
    let mut buf = Vec::with_capacity(GAME_EVENT_LEN);
    buf.extend_from_slice(&MAGIC_COOKIE.to_be_bytes());
    buf.push(MessageType::Game as u8);
    buf.push(msg.outcome as u8);
    match msg.card {
        Some(card) => buf.extend_from_slice(&[card.rank, card.suit, 0]),
        None => buf.extend_from_slice(&[0, 0, 0]),
    }
    buf
}

/// Encodes a Decision into its 11-byte frame.
pub fn encode_decision(msg: &DecisionMessage) -> Vec<u8> {
    let mut buf = Vec::with_capacity(DECISION_LEN);
    buf.extend_from_slice(&MAGIC_COOKIE.to_be_bytes());
    buf.push(MessageType::Game as u8);
    buf.push(0x0); // reserved
    buf.extend_from_slice(msg.decision.payload());
    buf
}

// ── Decoding ──────────────────────────────────────────────────────────────────

/// Decodes an Offer from the first 39 bytes of `bytes`.
pub fn decode_offer(bytes: &[u8]) -> Result<OfferMessage, ProtocolError> {
    require_len(bytes, OFFER_LEN)?;
    check_cookie(bytes)?;
    check_type(bytes[4], MessageType::Offer)?;
    let tcp_port = u16::from_be_bytes([bytes[5], bytes[6]]);
    let team_name = read_team_name(&bytes[7..7 + TEAM_NAME_LEN]);
    Ok(OfferMessage { tcp_port, team_name })
}

/// Decodes a Join Request from the first 38 bytes of `bytes`.
pub fn decode_join_request(bytes: &[u8]) -> Result<JoinRequestMessage, ProtocolError> {
    require_len(bytes, JOIN_REQUEST_LEN)?;
    check_cookie(bytes)?;
    check_type(bytes[4], MessageType::JoinRequest)?;
    let num_rounds = bytes[5];
    let team_name = read_team_name(&bytes[6..6 + TEAM_NAME_LEN]);
    Ok(JoinRequestMessage { num_rounds, team_name })
}

/// Decodes a Game Event from the first 9 bytes of `bytes`.
pub fn decode_game_event(bytes: &[u8]) -> Result<GameEventMessage, ProtocolError> {
    require_len(bytes, GAME_EVENT_LEN)?;
    check_cookie(bytes)?;
    check_type(bytes[4], MessageType::Game)?;
    let outcome = RoundOutcome::try_from(bytes[5]).map_err(|_| ProtocolError::BadValue {
        field: "result",
        value: bytes[5],
    })?;
    let card = match bytes[6] {
        0 => None,
        rank => Some(Card {
            rank,
            suit: bytes[7],
        }),
    };
    Ok(GameEventMessage { outcome, card })
}

/// Decodes a Decision from the first 11 bytes of `bytes`.  Any payload other
/// than the exact hit literal is a stand.
pub fn decode_decision(bytes: &[u8]) -> Result<DecisionMessage, ProtocolError> {
    require_len(bytes, DECISION_LEN)?;
    check_cookie(bytes)?;
    check_type(bytes[4], MessageType::Game)?;
    // bytes[5] is reserved – ignored on decode
    let decision = Decision::from_payload(&bytes[6..6 + DECISION_PAYLOAD_LEN]);
    Ok(DecisionMessage { decision })
}

// ── Utility helpers ───────────────────────────────────────────────────────────

fn require_len(bytes: &[u8], needed: usize) -> Result<(), ProtocolError> {
    if bytes.len() < needed {
        Err(ProtocolError::TooShort {
            needed,
            available: bytes.len(),
        })
    } else {
        Ok(())
    }
}

fn check_cookie(bytes: &[u8]) -> Result<(), ProtocolError> {
    let cookie = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    if cookie != MAGIC_COOKIE {
        return Err(ProtocolError::CookieMismatch(cookie));
    }
    Ok(())
}

fn check_type(actual: u8, expected: MessageType) -> Result<(), ProtocolError> {
    if actual != expected as u8 {
        return Err(ProtocolError::UnexpectedType {
            expected: expected as u8,
            actual,
        });
    }
    Ok(())
}

/// Writes a team name truncated and right-padded with NULs to its fixed
/// 32-byte field.
fn write_team_name(buf: &mut Vec<u8>, name: &str) {
    let bytes = name.as_bytes();
    let len = bytes.len().min(TEAM_NAME_LEN);
    buf.extend_from_slice(&bytes[..len]);
    buf.resize(buf.len() + (TEAM_NAME_LEN - len), 0);
}

/// Reads a fixed-width team name field, trimming trailing NUL padding.
fn read_team_name(field: &[u8]) -> String {
    let end = field
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |pos| pos + 1);
    String::from_utf8_lossy(&field[..end]).into_owned()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
