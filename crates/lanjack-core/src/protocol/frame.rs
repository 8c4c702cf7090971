//! Stream reassembly for the Game Event channel.
//!
//! TCP delivers a byte stream, not messages: one `read` may return half a
//! frame, exactly one frame, or several coalesced frames.  The server paces
//! rapid sends with a small delay as a mitigation, but a correct receiver
//! must never rely on it.  [`FrameReader`] accumulates whatever chunks
//! arrive and yields complete 9-byte Game Event frames, keeping unconsumed
//! trailing bytes for the next read.
//!
//! A frame that fails the cookie check is dropped individually — the filter
//! is per message, not per connection.

use crate::protocol::codec::{decode_game_event, ProtocolError};
use crate::protocol::messages::{GameEventMessage, GAME_EVENT_LEN};
use tracing::debug;

/// Accumulates received bytes and slices off complete Game Event frames.
#[derive(Debug, Default)]
pub struct FrameReader {
    buf: Vec<u8>,
}

impl FrameReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a received chunk to the reassembly buffer.
    pub fn extend(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Returns the next complete Game Event, or `None` if fewer than
    /// [`GAME_EVENT_LEN`] bytes are buffered.  Frames that fail to decode
    /// are discarded and scanning continues.
    pub fn next_event(&mut self) -> Option<GameEventMessage> {
        while self.buf.len() >= GAME_EVENT_LEN {
            let frame: Vec<u8> = self.buf.drain(..GAME_EVENT_LEN).collect();
            match decode_game_event(&frame) {
                Ok(event) => return Some(event),
                Err(e @ ProtocolError::CookieMismatch(_)) => {
                    debug!("discarding foreign frame: {e}");
                }
                Err(e) => {
                    debug!("discarding undecodable frame: {e}");
                }
            }
        }
        None
    }

    /// Number of bytes currently held back awaiting a complete frame.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::card::Card;
    use crate::protocol::codec::encode_game_event;
    use crate::protocol::messages::RoundOutcome;

    fn event(rank: u8) -> GameEventMessage {
        GameEventMessage::card(Card { rank, suit: 1 }, RoundOutcome::Continue)
    }

    #[test]
    fn test_single_exact_frame_yields_one_event() {
        let mut reader = FrameReader::new();
        reader.extend(&encode_game_event(&event(5)));

        assert_eq!(reader.next_event(), Some(event(5)));
        assert_eq!(reader.next_event(), None);
        assert_eq!(reader.pending(), 0);
    }

    #[test]
    fn test_split_frame_is_reassembled_across_reads() {
        let bytes = encode_game_event(&event(9));
        let mut reader = FrameReader::new();

        reader.extend(&bytes[..4]);
        assert_eq!(reader.next_event(), None);
        assert_eq!(reader.pending(), 4);

        reader.extend(&bytes[4..]);
        assert_eq!(reader.next_event(), Some(event(9)));
    }

    #[test]
    fn test_coalesced_frames_are_split_in_order() {
        let mut bytes = encode_game_event(&event(2));
        bytes.extend(encode_game_event(&event(3)));
        bytes.extend(encode_game_event(&event(4)));

        let mut reader = FrameReader::new();
        reader.extend(&bytes);

        assert_eq!(reader.next_event(), Some(event(2)));
        assert_eq!(reader.next_event(), Some(event(3)));
        assert_eq!(reader.next_event(), Some(event(4)));
        assert_eq!(reader.next_event(), None);
    }

    #[test]
    fn test_one_and_a_half_frames_keeps_the_tail() {
        let mut bytes = encode_game_event(&event(7));
        let second = encode_game_event(&event(8));
        bytes.extend(&second[..5]);

        let mut reader = FrameReader::new();
        reader.extend(&bytes);

        assert_eq!(reader.next_event(), Some(event(7)));
        assert_eq!(reader.next_event(), None);
        assert_eq!(reader.pending(), 5);

        reader.extend(&second[5..]);
        assert_eq!(reader.next_event(), Some(event(8)));
    }

    #[test]
    fn test_foreign_cookie_frame_is_skipped_not_fatal() {
        let mut foreign = encode_game_event(&event(6));
        foreign[0] = 0xDE;
        let mut reader = FrameReader::new();
        reader.extend(&foreign);
        reader.extend(&encode_game_event(&event(11)));

        // The foreign frame is dropped; the genuine one comes through.
        assert_eq!(reader.next_event(), Some(event(11)));
        assert_eq!(reader.next_event(), None);
    }

    #[test]
    fn test_cardless_result_frame_decodes_with_no_card() {
        let mut reader = FrameReader::new();
        reader.extend(&encode_game_event(&GameEventMessage::result(
            RoundOutcome::Win,
        )));

        let got = reader.next_event().unwrap();
        assert_eq!(got.card, None);
        assert_eq!(got.outcome, RoundOutcome::Win);
    }
}
