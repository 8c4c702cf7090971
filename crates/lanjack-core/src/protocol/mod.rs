//! Protocol module containing message types, the binary codec, and the
//! stream frame reader.

pub mod codec;
pub mod frame;
pub mod messages;

pub use codec::{
    decode_decision, decode_game_event, decode_join_request, decode_offer, encode_decision,
    encode_game_event, encode_join_request, encode_offer, ProtocolError,
};
pub use frame::FrameReader;
pub use messages::*;
